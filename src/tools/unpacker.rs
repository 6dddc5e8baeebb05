//! Extracts variable width codewords from a byte stream, least significant bit first.

use std::io::Read;
use crate::{Codeword,Error};
use super::read_byte;

/// Outcome of one call to `Unpacker::unpack`.
#[derive(Debug,PartialEq,Eq)]
pub struct Unpacked {
    /// `None` if the stream ended before a whole codeword was assembled
    pub codeword: Option<Codeword>,
    /// bytes taken from the stream during the call
    pub bytes_read: usize
}

/// Bit accumulator for the expansion side.
pub struct Unpacker {
    barrel: u64,
    /// number of valid bits in the barrel
    currlen: u32,
    /// bytes read so far
    pub count: u64
}

impl Unpacker {
    pub fn new() -> Self {
        Self {
            barrel: 0,
            currlen: 0,
            count: 0
        }
    }
    /// Read bytes until `width` bits are available, then take a codeword from the bottom.
    /// `reader` should not be advanced outside this function until decoding is done.
    pub fn unpack<R: Read>(&mut self,width: u32,reader: &mut R) -> Result<Unpacked,Error> {
        let mut bytes_read = 0;
        while self.currlen < width {
            let by = match read_byte(reader)? {
                Some(by) => by,
                None => {
                    self.count += bytes_read as u64;
                    return Ok(Unpacked { codeword: None, bytes_read });
                }
            };
            self.barrel |= (by as u64) << self.currlen;
            self.currlen += 8;
            bytes_read += 1;
        }
        let codeword = (self.barrel & ((1 << width) - 1)) as Codeword;
        self.currlen -= width;
        self.barrel >>= width;
        self.count += bytes_read as u64;
        Ok(Unpacked { codeword: Some(codeword), bytes_read })
    }
}

#[test]
fn unpack_nine_bit_codes() {
    let mut src = std::io::Cursor::new(hex::decode("410006F9").unwrap());
    let mut unpacker = Unpacker::new();
    assert_eq!(unpacker.unpack(9,&mut src).unwrap(),Unpacked { codeword: Some(0x41), bytes_read: 2 });
    assert_eq!(unpacker.unpack(9,&mut src).unwrap(),Unpacked { codeword: Some(0x100), bytes_read: 1 });
    assert_eq!(unpacker.unpack(9,&mut src).unwrap(),Unpacked { codeword: Some(0x41), bytes_read: 1 });
    assert_eq!(unpacker.unpack(9,&mut src).unwrap(),Unpacked { codeword: None, bytes_read: 0 });
    assert_eq!(unpacker.count,4);
}

#[test]
fn unpack_mixed_widths() {
    let mut src = std::io::Cursor::new(hex::decode("AB79F5").unwrap());
    let mut unpacker = Unpacker::new();
    assert_eq!(unpacker.unpack(9,&mut src).unwrap().codeword,Some(0x1ab));
    assert_eq!(unpacker.unpack(12,&mut src).unwrap().codeword,Some(0xabc));
    assert_eq!(unpacker.unpack(12,&mut src).unwrap().codeword,None);
}

#[test]
fn empty_stream() {
    let mut src = std::io::Cursor::new(Vec::<u8>::new());
    let mut unpacker = Unpacker::new();
    assert_eq!(unpacker.unpack(9,&mut src).unwrap(),Unpacked { codeword: None, bytes_read: 0 });
}
