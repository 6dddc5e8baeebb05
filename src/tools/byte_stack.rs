//! Bounded stack used to reverse strings during expansion
use std::io::Write;
use crate::Error;

pub struct ByteStack {
    buf: Vec<u8>,
    cap: usize
}

impl ByteStack {
    pub fn create(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
            cap
        }
    }
    /// push a byte, it is an error to exceed the capacity
    pub fn push(&mut self,val: u8) -> Result<(),Error> {
        if self.buf.len() == self.cap {
            return Err(Error::BadWordLength);
        }
        self.buf.push(val);
        Ok(())
    }
    pub fn len(&self) -> usize {
        self.buf.len()
    }
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
    /// Pop everything into the writer, last pushed goes out first.
    /// Returns the number of bytes written.
    pub fn drain_to<W: Write>(&mut self,writer: &mut W) -> Result<usize,Error> {
        let count = self.buf.len();
        self.buf.reverse();
        writer.write_all(&self.buf)?;
        self.buf.clear();
        Ok(count)
    }
}

#[test]
fn lifo_order() {
    let mut stack = ByteStack::create(4);
    for c in "cba".bytes() {
        stack.push(c).unwrap();
    }
    let mut out = Vec::new();
    assert_eq!(stack.drain_to(&mut out).unwrap(),3);
    assert_eq!(out,b"abc".to_vec());
    assert!(stack.is_empty());
}

#[test]
fn overflow() {
    let mut stack = ByteStack::create(2);
    stack.push(1).unwrap();
    stack.push(2).unwrap();
    assert!(matches!(stack.push(3),Err(Error::BadWordLength)));
    assert_eq!(stack.len(),2);
}
