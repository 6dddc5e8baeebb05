//! Packs variable width codewords into bytes, least significant bit first.

use std::io::Write;
use crate::{Codeword,NULLCW,Error};

const BYTE_BITS: u32 = 8;

/// Bit accumulator for the compression side.
/// Codewords are appended above the bits already held, and whole bytes are
/// taken from the bottom.
pub struct Packer {
    barrel: u64,
    /// number of valid bits in the barrel
    residue: u32,
    /// bytes written so far
    pub count: u64
}

impl Packer {
    pub fn new() -> Self {
        Self {
            barrel: 0,
            residue: 0,
            count: 0
        }
    }
    /// Append `width` bits of `codeword` and write out any whole bytes.
    /// Passing `NULLCW` adds no bits, instead the remaining partial byte is written
    /// (padded with ones) and the writer is flushed.
    /// Returns the number of bytes written by this call.
    pub fn pack<W: Write>(&mut self,codeword: Codeword,width: u32,writer: &mut W) -> Result<usize,Error> {
        let mask = (1u64 << width) - 1;
        self.barrel |= (codeword as u64 & mask) << self.residue;
        let threshold = match codeword {
            NULLCW => 1,
            _ => {
                self.residue += width;
                BYTE_BITS
            }
        };
        let mut bytes = 0;
        while self.residue >= threshold {
            writer.write_all(&[(self.barrel & 0xff) as u8])?;
            self.barrel >>= BYTE_BITS;
            self.residue = self.residue.saturating_sub(BYTE_BITS);
            bytes += 1;
        }
        if codeword == NULLCW {
            self.barrel = 0;
            writer.flush()?;
        }
        self.count += bytes as u64;
        Ok(bytes)
    }
}

#[test]
fn pack_nine_bit_codes() {
    let mut packer = Packer::new();
    let mut out = Vec::new();
    assert_eq!(packer.pack(0x41,9,&mut out).unwrap(),1);
    assert_eq!(packer.pack(0x100,9,&mut out).unwrap(),1);
    assert_eq!(packer.pack(0x41,9,&mut out).unwrap(),1);
    assert_eq!(packer.pack(NULLCW,9,&mut out).unwrap(),1);
    assert_eq!(out,hex::decode("410006F9").unwrap());
    assert_eq!(packer.count,4);
}

#[test]
fn flush_when_aligned() {
    // 8 codes of 9 bits is exactly 9 bytes, nothing left for the flush
    let mut packer = Packer::new();
    let mut out = Vec::new();
    for _i in 0..8 {
        packer.pack(0x1ff,9,&mut out).unwrap();
    }
    assert_eq!(packer.pack(NULLCW,9,&mut out).unwrap(),0);
    assert_eq!(out,vec![0xff;9]);
}

#[test]
fn mixed_widths() {
    let mut packer = Packer::new();
    let mut out = Vec::new();
    packer.pack(0x1ab,9,&mut out).unwrap();
    packer.pack(0xabc,12,&mut out).unwrap();
    packer.pack(NULLCW,12,&mut out).unwrap();
    // 0x1ab | 0xabc << 9 = 0x1579ab, 21 bits, top 3 bits of the last byte padded
    assert_eq!(out,hex::decode("AB79F5").unwrap());
    assert_eq!(packer.count,3);
}
