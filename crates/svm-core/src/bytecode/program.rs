//! Program Construction
//!
//! Word-by-word builder for in-memory programs. There is no textual or file
//! format; callers append opcodes and immediates directly.

use super::opcode::Opcode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    words: Vec<i32>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single-word opcode
    pub fn op(mut self, opcode: Opcode) -> Self {
        self.words.push(opcode.word());
        self
    }

    /// Append `PUSH value`
    pub fn push(mut self, value: i32) -> Self {
        self.words.push(Opcode::Push.word());
        self.words.push(value);
        self
    }

    /// Append a raw word, valid or not
    pub fn word(mut self, word: i32) -> Self {
        self.words.push(word);
        self
    }

    /// Offset of the next appended word
    pub fn here(&self) -> i32 {
        self.words.len() as i32
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[i32] {
        &self.words
    }

    pub fn into_words(self) -> Vec<i32> {
        self.words
    }
}
