//! LZW string table
//!
//! Entries are stored in a flat table addressed by codeword, each entry links
//! to a predecessor codeword and appends one byte.  Following the links always
//! ends at a root codeword (0-255), for which there is no stored entry.
//!
//! The same table serves both ends of the pipe.  The only differences are that
//! compression keeps a match index, and that expansion anticipates the code
//! width changes by one entry, since the decoder builds each entry one codeword
//! after the encoder did.

use std::collections::HashMap;
use crate::{Codeword,DICT_FULL,FIRST_CODEWORD,MIN_CODE_WIDTH,MAX_CODE_WIDTH};

/// Which end of the pipe the dictionary serves, fixed for its lifetime.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum Mode {
    Compress,
    Decompress
}

impl Mode {
    /// number of codewords by which builds trail the encoder
    fn lag(self) -> usize {
        match self {
            Mode::Compress => 0,
            Mode::Decompress => 1
        }
    }
}

#[derive(Clone,Copy,Default)]
struct Entry {
    predecessor: Codeword,
    byte: u8
}

/// Code width after building entry `built` while at width `code_bits`.
/// Compression grows when the entry reaches `2^code_bits`, expansion one entry earlier.
/// Expansion also drops back to the minimum width one entry before the table fills,
/// because the next build will be a reset.
fn next_code_width(mode: Mode,built: usize,code_bits: u32) -> u32 {
    let lag = mode.lag();
    if code_bits < MAX_CODE_WIDTH {
        if built == (1 << code_bits) - lag {
            return code_bits + 1;
        }
    } else if lag > 0 && built == DICT_FULL as usize - lag {
        return MIN_CODE_WIDTH;
    }
    code_bits
}

pub struct Dictionary {
    mode: Mode,
    entries: Vec<Entry>,
    /// compression only, (predecessor,byte) maps to the codeword last built for it
    index: HashMap<(Codeword,u8),Codeword>,
    next_free: Codeword,
    code_bits: u32
}

impl Dictionary {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            entries: vec![Entry::default();DICT_FULL as usize],
            index: HashMap::new(),
            next_free: FIRST_CODEWORD,
            code_bits: MIN_CODE_WIDTH
        }
    }
    /// Empty the table, returns the starting code width.
    /// Stale entries are left in place, they are unreachable until rebuilt.
    pub fn reset(&mut self) -> u32 {
        log::debug!("reset dictionary");
        self.next_free = FIRST_CODEWORD;
        self.code_bits = MIN_CODE_WIDTH;
        self.index.clear();
        self.code_bits
    }
    /// Find the codeword for `predecessor` extended by `byte`, if it has been built.
    /// The index hit is checked against the table before it is trusted.
    pub fn find_match(&self,predecessor: Codeword,byte: u8) -> Option<Codeword> {
        let addr = *self.index.get(&(predecessor,byte))?;
        if addr < FIRST_CODEWORD || addr >= self.next_free {
            return None;
        }
        let entry = &self.entries[addr as usize];
        match entry.predecessor==predecessor && entry.byte==byte {
            true => Some(addr),
            false => None
        }
    }
    /// Build the entry `predecessor` + `byte` at the next free codeword and return the
    /// code width to use from now on.  If the table is full, reset instead, no entry is built.
    pub fn build(&mut self,predecessor: Codeword,byte: u8) -> u32 {
        if self.is_full() {
            return self.reset();
        }
        let addr = self.next_free;
        self.entries[addr as usize] = Entry { predecessor, byte };
        if self.mode==Mode::Compress {
            self.index.insert((predecessor,byte),addr);
        }
        let new_bits = next_code_width(self.mode,addr as usize,self.code_bits);
        if new_bits != self.code_bits {
            log::debug!("code width {} -> {} at entry {}",self.code_bits,new_bits,addr);
            self.code_bits = new_bits;
        }
        self.next_free += 1;
        self.code_bits
    }
    /// True if the codeword is built or is the next free codeword.
    /// The next free codeword is let through so the decoder can resolve it as the KwK case.
    pub fn is_valid(&self,codeword: Codeword) -> bool {
        codeword <= self.next_free
    }
    pub fn is_next_free(&self,codeword: Codeword) -> bool {
        codeword == self.next_free
    }
    pub fn is_root(&self,codeword: Codeword) -> bool {
        codeword < FIRST_CODEWORD
    }
    /// byte appended by a built codeword, caller should rule out roots
    pub fn entry_byte(&self,codeword: Codeword) -> u8 {
        self.entries[codeword as usize].byte
    }
    /// predecessor of a built codeword, caller should rule out roots
    pub fn entry_predecessor(&self,codeword: Codeword) -> Codeword {
        self.entries[codeword as usize].predecessor
    }
    pub fn is_full(&self) -> bool {
        self.next_free == DICT_FULL
    }
    pub fn next_free(&self) -> Codeword {
        self.next_free
    }
    pub fn code_bits(&self) -> u32 {
        self.code_bits
    }
}

// *************** TESTS *****************

#[test]
fn build_and_match() {
    let mut dict = Dictionary::new(Mode::Compress);
    assert_eq!(dict.reset(),9);
    assert_eq!(dict.find_match(0x41,0x42),None);
    dict.build(0x41,0x42);
    dict.build(0x100,0x43);
    assert_eq!(dict.find_match(0x41,0x42),Some(0x100));
    assert_eq!(dict.find_match(0x100,0x43),Some(0x101));
    assert_eq!(dict.find_match(0x41,0x43),None);
    assert_eq!(dict.entry_predecessor(0x101),0x100);
    assert_eq!(dict.entry_byte(0x101),0x43);
    assert!(dict.is_next_free(0x102));
    assert!(dict.is_valid(0x102));
    assert!(!dict.is_valid(0x103));
    assert!(dict.is_root(0xff));
    assert!(!dict.is_root(0x100));
}

#[test]
fn expansion_does_not_index() {
    let mut dict = Dictionary::new(Mode::Decompress);
    dict.build(0x41,0x42);
    assert_eq!(dict.find_match(0x41,0x42),None);
    assert_eq!(dict.entry_byte(0x100),0x42);
}

#[test]
fn stale_matches_rejected() {
    let mut dict = Dictionary::new(Mode::Compress);
    dict.build(0x41,0x42);
    dict.reset();
    assert_eq!(dict.find_match(0x41,0x42),None);
    // entry 0x100 is rebuilt with different content
    dict.build(0x43,0x44);
    assert_eq!(dict.find_match(0x41,0x42),None);
    assert_eq!(dict.find_match(0x43,0x44),Some(0x100));
}

#[test]
fn compression_widths() {
    let mut dict = Dictionary::new(Mode::Compress);
    let mut bits = dict.reset();
    let mut prev_bits = bits;
    for i in 0..(DICT_FULL - FIRST_CODEWORD) as usize {
        let addr = dict.next_free() as usize;
        bits = dict.build((i % 256) as Codeword,(i / 256) as u8);
        assert_eq!(dict.code_bits(),bits);
        assert!(bits >= prev_bits && bits <= MAX_CODE_WIDTH);
        prev_bits = bits;
        match addr {
            0x1ff => assert_eq!(bits,9),
            0x200 => assert_eq!(bits,10),
            0x3ff => assert_eq!(bits,10),
            0x400 => assert_eq!(bits,11),
            0x800 => assert_eq!(bits,12),
            0xfff => assert_eq!(bits,12),
            _ => {}
        }
    }
    assert!(dict.is_full());
    assert!(dict.is_valid(DICT_FULL));
    // the build after the table fills is only a reset
    assert_eq!(dict.build(0x41,0x42),9);
    assert_eq!(dict.code_bits(),9);
    assert_eq!(dict.next_free(),FIRST_CODEWORD);
    assert_eq!(dict.find_match(0x41,0x42),None);
}

#[test]
fn expansion_widths() {
    let mut dict = Dictionary::new(Mode::Decompress);
    let mut bits = dict.reset();
    for i in 0..(DICT_FULL - FIRST_CODEWORD) as usize {
        let addr = dict.next_free() as usize;
        bits = dict.build((i % 256) as Codeword,(i / 256) as u8);
        match addr {
            0x1fe => assert_eq!(bits,9),
            0x1ff => assert_eq!(bits,10),
            0x3ff => assert_eq!(bits,11),
            0x7ff => assert_eq!(bits,12),
            0xffe => assert_eq!(bits,12),
            _ => {}
        }
    }
    // anticipates the reset on the next build
    assert_eq!(bits,9);
    assert_eq!(dict.code_bits(),9);
    assert!(dict.is_full());
    assert_eq!(dict.build(0x41,0x42),9);
    assert_eq!(dict.next_free(),FIRST_CODEWORD);
    assert!(!dict.is_full());
}
