//! VM Memory Model
//!
//! The code and heap regions. Both are allocated once at machine creation
//! and never resized. Every code access is bounds checked.

use crate::error::{Fault, SvmError, SvmResult};

/// Code region: fixed capacity, zero-filled word buffer
#[derive(Debug)]
pub struct Code {
    words: Vec<i32>,
    program_len: usize,
}

impl Code {
    pub fn new(capacity: usize) -> Self {
        Code {
            words: vec![0; capacity],
            program_len: 0,
        }
    }

    /// Install a program at offset 0, replacing any previous one
    pub fn install(&mut self, program: &[i32]) -> SvmResult<()> {
        if program.len() > self.words.len() {
            return Err(SvmError::ProgramTooLarge {
                len: program.len(),
                capacity: self.words.len(),
            });
        }
        self.words.fill(0);
        self.words[..program.len()].copy_from_slice(program);
        self.program_len = program.len();
        Ok(())
    }

    /// Append a single word after the installed program
    pub fn push_back(&mut self, word: i32) -> SvmResult<()> {
        if self.program_len >= self.words.len() {
            return Err(SvmError::ProgramTooLarge {
                len: self.program_len + 1,
                capacity: self.words.len(),
            });
        }
        self.words[self.program_len] = word;
        self.program_len += 1;
        Ok(())
    }

    pub fn fetch(&self, pc: usize) -> Result<i32, Fault> {
        self.words.get(pc).copied().ok_or(Fault::CodeOverrun { pc: pc as i64 })
    }

    /// Whole region, including the zero-filled tail
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Installed program only
    pub fn program(&self) -> &[i32] {
        &self.words[..self.program_len]
    }

    pub fn capacity(&self) -> usize {
        self.words.len()
    }

    pub fn program_len(&self) -> usize {
        self.program_len
    }
}

/// Heap region. Reserved address space; no instruction reads or writes it.
#[derive(Debug)]
pub struct Heap {
    bytes: Vec<u8>,
}

impl Heap {
    pub fn new(size: usize) -> Self {
        Heap {
            bytes: vec![0; size],
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_zero_fills_tail() {
        let mut code = Code::new(4);
        code.install(&[7, 7, 7, 7]).expect("install failed");
        code.install(&[1, 2]).expect("install failed");
        assert_eq!(code.words(), &[1, 2, 0, 0]);
        assert_eq!(code.program(), &[1, 2]);
    }

    #[test]
    fn oversized_program_rejected() {
        let mut code = Code::new(2);
        let err = code.install(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, SvmError::ProgramTooLarge { len: 3, capacity: 2 }));
        assert_eq!(code.program_len(), 0);
    }

    #[test]
    fn push_back_stops_at_capacity() {
        let mut code = Code::new(2);
        code.push_back(1).expect("first word");
        code.push_back(2).expect("second word");
        assert!(code.push_back(3).is_err());
        assert_eq!(code.program(), &[1, 2]);
    }

    #[test]
    fn fetch_out_of_bounds_faults() {
        let code = Code::new(3);
        assert_eq!(code.fetch(2), Ok(0));
        assert_eq!(code.fetch(3), Err(Fault::CodeOverrun { pc: 3 }));
    }

    #[test]
    fn heap_sized_as_configured() {
        let heap = Heap::new(64);
        assert_eq!(heap.size(), 64);
        assert!(heap.as_bytes().iter().all(|&b| b == 0));
    }
}
