//! # slzw
//!
//! LZW compression with a bounded dictionary and variable length codewords.
//! Codewords start at 9 bits and grow to 12 bits as the dictionary fills.
//! When the dictionary is full both ends reset it in lockstep, there is no
//! clear code in the stream.
//!
//! The `lzw` module has the compression and expansion loops, the `tools`
//! module has the dictionary and the bit packing.

pub mod tools;
pub mod lzw;

use num_derive::ToPrimitive;

/// A dictionary index, 0-255 are roots, 256-4095 are built.
pub type Codeword = u16;

/// no codeword, also used as the flush marker for the packer
pub const NULLCW: Codeword = 0xffff;
/// first codeword that is assigned by building an entry
pub const FIRST_CODEWORD: Codeword = 0x100;
pub const MIN_CODE_WIDTH: u32 = 9;
pub const MAX_CODE_WIDTH: u32 = 12;
/// value of the next free codeword when the dictionary is full
pub const DICT_FULL: Codeword = 1 << MAX_CODE_WIDTH;
/// longest string the decoder will reconstruct
pub const MAX_STRING_LENGTH: usize = 1 << MAX_CODE_WIDTH;

/// Errors that can occur during compression or expansion
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("UNKNOWN CODEWORD (0x{0:03x})")]
    UnknownCodeword(Codeword),
    #[error("BAD WORD LENGTH")]
    BadWordLength,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error)
}

/// Process exit status
#[derive(ToPrimitive,Debug,Clone,Copy,PartialEq,Eq)]
pub enum ExitStatus {
    Success = 0,
    UserError = 1,
    DecompressionError = 2
}

impl Error {
    /// map the error to the status the CLI should exit with
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            Error::UnknownCodeword(_) | Error::BadWordLength => ExitStatus::DecompressionError,
            Error::Io(_) => ExitStatus::UserError
        }
    }
}

#[test]
fn exit_status_mapping() {
    use num_traits::ToPrimitive;
    assert_eq!(Error::UnknownCodeword(0x200).exit_status().to_u8(),Some(2));
    assert_eq!(Error::BadWordLength.exit_status(),ExitStatus::DecompressionError);
    let io = std::io::Error::new(std::io::ErrorKind::NotFound,"missing");
    assert_eq!(Error::from(io).exit_status().to_u8(),Some(1));
    assert_eq!(ExitStatus::Success.to_u8(),Some(0));
    assert_eq!(Error::UnknownCodeword(0x1ff).to_string(),"UNKNOWN CODEWORD (0x1ff)");
}
