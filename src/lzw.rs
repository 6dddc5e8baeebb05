//! LZW Compression
//!
//! Codewords are 9 to 12 bits wide, packed least significant bit first.  There is no
//! header, clear code, or stop code.  The dictionary resets itself when it fills, and
//! the decoder follows along because it applies the same rules one codeword later.
//!
//! The compressor emits the longest match it can find, then builds an entry for that
//! match extended by the byte that broke it.  The expander cannot build that entry until
//! it sees the first byte of the next string, so its dictionary always trails by one
//! entry.  When the encoder uses the entry it has just built (the "KwK" case), the
//! expander reconstructs it from the previous string.

use std::io::{Cursor,Read,Write,BufReader,BufWriter};
use crate::tools::dictionary::{Dictionary,Mode};
use crate::tools::packer::Packer;
use crate::tools::unpacker::Unpacker;
use crate::tools::byte_stack::ByteStack;
use crate::tools::read_byte;
use crate::{Codeword,Error,NULLCW,MAX_STRING_LENGTH};

/// Options controlling compression
#[derive(Clone)]
pub struct Options {
    /// Longest string the expander will reconstruct, longer strings are an error.
    /// Streams from the compressor never exceed `MAX_STRING_LENGTH`.
    pub max_string_length: usize
}

pub const STD_OPTIONS: Options = Options {
    max_string_length: MAX_STRING_LENGTH
};

/// Main compression function.
/// `expanded_in` is an object with the `Read` trait, usually `std::fs::File`, `std::io::Stdin`, or `std::io::Cursor<&[u8]>`.
/// `compressed_out` is an object with the `Write` trait, usually `std::fs::File`, `std::io::Stdout`, or `Vec<u8>`.
/// Returns (in_size,out_size) or error.
pub fn compress<R,W>(expanded_in: &mut R, compressed_out: &mut W, _opt: &Options) -> Result<(u64,u64),Error>
where R: Read, W: Write {
    let mut reader = BufReader::new(expanded_in);
    let mut writer = BufWriter::new(compressed_out);
    let mut dict = Dictionary::new(Mode::Compress);
    let mut packer = Packer::new();
    let mut code_bits = dict.reset();
    let mut prev: Option<Codeword> = None;
    let mut in_size: u64 = 0;

    log::debug!("entering loop over input bytes");
    while let Some(by) = read_byte(&mut reader)? {
        in_size += 1;
        prev = match prev {
            None => Some(by as Codeword),
            Some(curr) => match dict.find_match(curr,by) {
                Some(longer) => Some(longer),
                None => {
                    log::trace!("code: {} ({} bits)",curr,code_bits);
                    packer.pack(curr,code_bits,&mut writer)?;
                    code_bits = dict.build(curr,by);
                    Some(by as Codeword)
                }
            }
        };
    }
    if let Some(curr) = prev {
        log::trace!("code: {} ({} bits)",curr,code_bits);
        packer.pack(curr,code_bits,&mut writer)?;
    }
    packer.pack(NULLCW,code_bits,&mut writer)?;
    log::debug!("end of data, {} bytes in, {} bytes out",in_size,packer.count);
    writer.flush()?;
    Ok((in_size,packer.count))
}

/// Walk the links from `codeword` back to a root, pushing bytes onto the stack.
/// `first_byte` is the first byte of the previous string, it comes in as the missing byte
/// of the KwK entry, and goes out as the first byte of this string.
fn push_string(dict: &Dictionary,stack: &mut ByteStack,codeword: Codeword,prev: Option<Codeword>,first_byte: &mut u8) -> Result<(),Error> {
    let mut ptr = codeword;
    loop {
        let (by,next) = if dict.is_root(ptr) {
            (ptr as u8,None)
        } else if dict.is_next_free(ptr) {
            match prev {
                Some(prev_code) => (*first_byte,Some(prev_code)),
                None => {
                    log::error!("first codeword {} refers to an entry that was never built",codeword);
                    return Err(Error::UnknownCodeword(codeword));
                }
            }
        } else {
            (dict.entry_byte(ptr),Some(dict.entry_predecessor(ptr)))
        };
        if let Err(e) = stack.push(by) {
            log::error!("string for codeword {} exceeds {} bytes",codeword,stack.len());
            return Err(e);
        }
        match next {
            Some(p) => ptr = p,
            None => {
                *first_byte = by;
                return Ok(());
            }
        }
    }
}

/// Main decompression function.
/// `compressed_in` is an object with the `Read` trait, usually `std::fs::File`, `std::io::Stdin`, or `std::io::Cursor<&[u8]>`.
/// `expanded_out` is an object with the `Write` trait, usually `std::fs::File`, `std::io::Stdout`, or `Vec<u8>`.
/// Returns (in_size,out_size) or error.  Output produced before an error has been written.
pub fn expand<R,W>(compressed_in: &mut R, expanded_out: &mut W, opt: &Options) -> Result<(u64,u64),Error>
where R: Read, W: Write {
    let mut reader = BufReader::new(compressed_in);
    let mut writer = BufWriter::new(expanded_out);
    let mut dict = Dictionary::new(Mode::Decompress);
    let mut unpacker = Unpacker::new();
    let mut stack = ByteStack::create(opt.max_string_length);
    let mut code_bits = dict.reset();
    let mut prev: Option<Codeword> = None;
    let mut first_byte: u8 = 0;
    let mut out_size: u64 = 0;

    log::debug!("entering loop over codewords");
    while let Some(code) = unpacker.unpack(code_bits,&mut reader)?.codeword {
        if !dict.is_valid(code) {
            log::error!("codeword {} is beyond next free codeword {}",code,dict.next_free());
            writer.flush()?;
            return Err(Error::UnknownCodeword(code));
        }
        if let Err(e) = push_string(&dict,&mut stack,code,prev,&mut first_byte) {
            writer.flush()?;
            return Err(e);
        }
        out_size += stack.drain_to(&mut writer)? as u64;
        log::trace!("code: {} ({} bits)",code,code_bits);
        if let Some(prev_code) = prev {
            code_bits = dict.build(prev_code,first_byte);
        }
        prev = Some(code);
    }
    log::debug!("end of data, {} bytes in, {} bytes out",unpacker.count,out_size);
    writer.flush()?;
    Ok((unpacker.count,out_size))
}

/// Convenience function, calls `compress` with a slice returning a Vec
pub fn compress_slice(slice: &[u8],opt: &Options) -> Result<Vec<u8>,Error> {
    let mut src = Cursor::new(slice);
    let mut ans: Vec<u8> = Vec::new();
    compress(&mut src,&mut ans,opt)?;
    Ok(ans)
}

/// Convenience function, calls `expand` with a slice returning a Vec
pub fn expand_slice(slice: &[u8],opt: &Options) -> Result<Vec<u8>,Error> {
    let mut src = Cursor::new(slice);
    let mut ans: Vec<u8> = Vec::new();
    expand(&mut src,&mut ans,opt)?;
    Ok(ans)
}

// *************** TESTS *****************

/// deterministic filler that builds entries quickly
#[cfg(test)]
fn noise(len: usize,seed: u32,alphabet: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len).map(|_| {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        ((state >> 16) % alphabet) as u8
    }).collect()
}

#[test]
fn compression_works() {
    // A, then AA as the entry just built, then A
    let compressed = compress_slice("AAAA".as_bytes(),&STD_OPTIONS).expect("compression failed");
    assert_eq!(compressed,hex::decode("410006F9").unwrap());
    let compressed = compress_slice("A".as_bytes(),&STD_OPTIONS).expect("compression failed");
    assert_eq!(compressed,hex::decode("41FE").unwrap());
    let compressed = compress_slice(&[],&STD_OPTIONS).expect("compression failed");
    assert!(compressed.is_empty());
}

#[test]
fn compression_works_longer() {
    // Example adapted from wikipedia, all codes are 9 bits and the final 6 bits are padding.
    let test_data = "TOBEORNOTTOBEORTOBEORNOT#\n".as_bytes();
    let lzw_str = "54 9E 08 29 F2 44 8A 93 27 54 00 0A 24 98 70 60 C1 83 23 14 FC";
    let compressed = compress_slice(test_data,&STD_OPTIONS).expect("compression failed");
    assert_eq!(compressed,hex::decode(lzw_str.replace(" ","")).unwrap());
    let expanded = expand_slice(&compressed,&STD_OPTIONS).expect("expansion failed");
    assert_eq!(expanded,test_data.to_vec());
}

#[test]
fn expansion_works() {
    let expanded = expand_slice(&hex::decode("410006F9").unwrap(),&STD_OPTIONS).expect("expansion failed");
    assert_eq!(expanded,"AAAA".as_bytes().to_vec());
    let expanded = expand_slice(&[],&STD_OPTIONS).expect("expansion failed");
    assert!(expanded.is_empty());
}

#[test]
fn invertibility() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    let compressed = compress_slice(test_data,&STD_OPTIONS).expect("compression failed");
    let expanded = expand_slice(&compressed,&STD_OPTIONS).expect("expansion failed");
    assert_eq!(test_data.to_vec(),expanded);
}

#[test]
fn invertibility_kwk() {
    for reps in 1..40 {
        let test_data = "AB".repeat(reps);
        let compressed = compress_slice(test_data.as_bytes(),&STD_OPTIONS).expect("compression failed");
        let expanded = expand_slice(&compressed,&STD_OPTIONS).expect("expansion failed");
        assert_eq!(test_data.as_bytes().to_vec(),expanded);
    }
    // long runs use the newest entry over and over
    let test_data = vec![0u8;100000];
    let compressed = compress_slice(&test_data,&STD_OPTIONS).expect("compression failed");
    let expanded = expand_slice(&compressed,&STD_OPTIONS).expect("expansion failed");
    assert_eq!(test_data,expanded);
}

#[test]
fn invertibility_with_resets() {
    // every distinct byte pair, far more than 3840 builds
    let mut test_data = Vec::new();
    for a in 0..=255u8 {
        for b in 0..=255u8 {
            test_data.push(a);
            test_data.push(b);
        }
    }
    let compressed = compress_slice(&test_data,&STD_OPTIONS).expect("compression failed");
    let expanded = expand_slice(&compressed,&STD_OPTIONS).expect("expansion failed");
    assert_eq!(test_data,expanded);
    for (seed,alphabet) in [(1,256),(2,2),(3,3),(4,17)] {
        let test_data = noise(200000,seed,alphabet);
        let compressed = compress_slice(&test_data,&STD_OPTIONS).expect("compression failed");
        let expanded = expand_slice(&compressed,&STD_OPTIONS).expect("expansion failed");
        assert_eq!(test_data,expanded);
    }
}

#[test]
fn doubled_byte_after_reset() {
    // Grow the table to one entry short of full with bytes below 200, then finish with 3 bytes of 0xff.
    // The first 0xff fills the table, the second is emitted as the table resets, and the third
    // must not match a stale entry 0x100 = (0xff,0xff), since the reset built nothing.
    let filler = noise(20000,7,200);
    let mut dict = Dictionary::new(Mode::Compress);
    let mut prev: Option<Codeword> = None;
    let mut len = 0;
    for by in filler.iter() {
        len += 1;
        prev = match prev {
            None => Some(*by as Codeword),
            Some(curr) => match dict.find_match(curr,*by) {
                Some(longer) => Some(longer),
                None => {
                    dict.build(curr,*by);
                    Some(*by as Codeword)
                }
            }
        };
        if dict.next_free() == crate::DICT_FULL - 1 {
            break;
        }
    }
    assert_eq!(dict.next_free(),crate::DICT_FULL - 1);
    let mut test_data = filler[0..len].to_vec();
    test_data.extend_from_slice(&[0xff,0xff,0xff]);
    let compressed = compress_slice(&test_data,&STD_OPTIONS).expect("compression failed");
    let expanded = expand_slice(&compressed,&STD_OPTIONS).expect("expansion failed");
    assert_eq!(test_data,expanded);

    // widths by codeword position, the reset comes after codeword 3840
    let width = |k: usize| match k {
        0..=256 => 9,
        257..=768 => 10,
        769..=1792 => 11,
        1793..=3840 => 12,
        _ => 9
    };
    let mut src = Cursor::new(&compressed);
    let mut unpacker = Unpacker::new();
    let mut codes = Vec::new();
    while let Some(code) = unpacker.unpack(width(codes.len()),&mut src).unwrap().codeword {
        codes.push(code);
    }
    assert_eq!(codes.len(),3843);
    assert!(dict.is_root(codes[3841]));
    assert_eq!(codes[3840..],[0xff,0xff,0xff]);
}

#[test]
fn invertibility_at_each_length() {
    // walk the input length across the first reset
    let base = noise(9000,5,256);
    let first = compress_slice(&base,&STD_OPTIONS).unwrap();
    assert_eq!(expand_slice(&first,&STD_OPTIONS).unwrap(),base);
    for len in 3800..4300 {
        let test_data = &base[0..len];
        let compressed = compress_slice(test_data,&STD_OPTIONS).expect("compression failed");
        let expanded = expand_slice(&compressed,&STD_OPTIONS).expect("expansion failed");
        assert_eq!(test_data.to_vec(),expanded);
    }
}

#[test]
fn deterministic() {
    let test_data = noise(50000,6,7);
    let c1 = compress_slice(&test_data,&STD_OPTIONS).unwrap();
    let c2 = compress_slice(&test_data,&STD_OPTIONS).unwrap();
    assert_eq!(c1,c2);
}

#[test]
fn sizes_reported() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    let mut compressed = Vec::new();
    let (in_size,out_size) = compress(&mut Cursor::new(test_data),&mut compressed,&STD_OPTIONS).unwrap();
    assert_eq!(in_size,test_data.len() as u64);
    assert_eq!(out_size,compressed.len() as u64);
    let mut expanded = Vec::new();
    let (in_size,out_size) = expand(&mut Cursor::new(&compressed),&mut expanded,&STD_OPTIONS).unwrap();
    assert_eq!(in_size,compressed.len() as u64);
    assert_eq!(out_size,test_data.len() as u64);
}

#[test]
fn unknown_codeword() {
    // first codeword 0x101
    match expand_slice(&[0x01,0x01],&STD_OPTIONS) {
        Err(Error::UnknownCodeword(0x101)) => {},
        other => panic!("unexpected result {:?}",other)
    }
    // first codeword 0x100 has nothing to build from
    match expand_slice(&[0x00,0x01],&STD_OPTIONS) {
        Err(Error::UnknownCodeword(0x100)) => {},
        other => panic!("unexpected result {:?}",other)
    }
    // A, then 0x102 when only 0x100 could be next
    let mut out = Vec::new();
    let res = expand(&mut Cursor::new(&[0x41u8,0x04,0x02][..]),&mut out,&STD_OPTIONS);
    assert!(matches!(res,Err(Error::UnknownCodeword(0x102))));
    assert_eq!(out,"A".as_bytes().to_vec());
}

#[test]
fn string_too_long() {
    // codes A, AA, AAA
    let compressed = compress_slice("AAAAAA".as_bytes(),&STD_OPTIONS).unwrap();
    let opt = Options { max_string_length: 2 };
    match expand_slice(&compressed,&opt) {
        Err(Error::BadWordLength) => {},
        other => panic!("unexpected result {:?}",other)
    }
    let opt = Options { max_string_length: 3 };
    assert_eq!(expand_slice(&compressed,&opt).unwrap(),"AAAAAA".as_bytes().to_vec());
}
