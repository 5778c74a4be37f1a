//! Instruction Decoding
//!
//! Interprets a flat word stream as a sequence of word groups. This layer
//! contains no execution semantics.

use std::fmt;

use crate::error::Fault;
use super::opcode::Opcode;

/// One decoded word group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub immediate: Option<i32>,
}

impl Instruction {
    /// Create an instruction with no immediate
    pub fn new(opcode: Opcode) -> Self {
        Instruction {
            opcode,
            immediate: None,
        }
    }

    /// Create an instruction with an inline immediate
    pub fn with_immediate(opcode: Opcode, immediate: i32) -> Self {
        Instruction {
            opcode,
            immediate: Some(immediate),
        }
    }

    pub fn width(&self) -> usize {
        self.opcode.width()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.immediate {
            Some(v) => write!(f, "{} {}", self.opcode, v),
            None => write!(f, "{}", self.opcode),
        }
    }
}

/// Decode the word group starting at `pc`
pub fn decode(words: &[i32], pc: usize) -> Result<Instruction, Fault> {
    let word = *words.get(pc).ok_or(Fault::CodeOverrun { pc: pc as i64 })?;
    let opcode = Opcode::from_word(word).ok_or(Fault::InvalidOpcode(word))?;

    if opcode.width() == 1 {
        return Ok(Instruction::new(opcode));
    }

    let imm_pc = pc + 1;
    let immediate = *words
        .get(imm_pc)
        .ok_or(Fault::CodeOverrun { pc: imm_pc as i64 })?;
    Ok(Instruction::with_immediate(opcode, immediate))
}

/// Linear listing of a word stream. An undecodable word is listed and the
/// walk resumes at the following word.
pub fn disassemble(words: &[i32]) -> Vec<(usize, Result<Instruction, Fault>)> {
    let mut listing = Vec::new();
    let mut pc = 0;

    while pc < words.len() {
        let decoded = decode(words, pc);
        let width = match &decoded {
            Ok(instr) => instr.width(),
            Err(_) => 1,
        };
        listing.push((pc, decoded));
        pc += width;
    }

    listing
}
