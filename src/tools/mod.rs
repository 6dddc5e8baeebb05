//! Building blocks for the LZW loops.

pub mod dictionary;
pub mod packer;
pub mod unpacker;
pub mod byte_stack;

use std::io::{Read,ErrorKind};

/// Get the next byte from the stream, or `None` at the end of the stream.
pub fn read_byte<R: Read>(reader: &mut R) -> Result<Option<u8>,std::io::Error> {
    let mut by: [u8;1] = [0];
    match reader.read_exact(&mut by) {
        Ok(()) => Ok(Some(by[0])),
        Err(e) if e.kind()==ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e)
    }
}

#[test]
fn read_until_end() {
    let mut src = std::io::Cursor::new(vec![7,8]);
    assert_eq!(read_byte(&mut src).unwrap(),Some(7));
    assert_eq!(read_byte(&mut src).unwrap(),Some(8));
    assert_eq!(read_byte(&mut src).unwrap(),None);
    assert_eq!(read_byte(&mut src).unwrap(),None);
}
