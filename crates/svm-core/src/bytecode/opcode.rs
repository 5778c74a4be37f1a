//! Opcode Definitions
//!
//! The closed instruction set of the machine. Tag values are part of the
//! code encoding; `0` is deliberately unassigned so that zero-filled code
//! never decodes as an instruction.

use std::fmt;

/// Instruction opcodes
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Stack operations
    Push = 1,
    Pop  = 2,

    // Arithmetic
    Add  = 3,
    Sub  = 4,
    Mult = 5,
    Div  = 6,
    Mod  = 7,

    // Control flow
    Jmp       = 8,
    CmpJmpE   = 9,
    CmpJmpGt  = 10,
    CmpJmpGte = 11,
    CmpJmpLt  = 12,
    CmpJmpLte = 13,
    Call      = 14,
    Ret       = 15,

    // System
    Nop = 16,
    Hlt = 17,
}

impl Opcode {
    /// Every opcode, in tag order
    pub const ALL: [Opcode; 17] = [
        Opcode::Push,
        Opcode::Pop,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mult,
        Opcode::Div,
        Opcode::Mod,
        Opcode::Jmp,
        Opcode::CmpJmpE,
        Opcode::CmpJmpGt,
        Opcode::CmpJmpGte,
        Opcode::CmpJmpLt,
        Opcode::CmpJmpLte,
        Opcode::Call,
        Opcode::Ret,
        Opcode::Nop,
        Opcode::Hlt,
    ];

    /// Convert a raw code word to an opcode
    pub fn from_word(word: i32) -> Option<Self> {
        match word {
            1 => Some(Opcode::Push),
            2 => Some(Opcode::Pop),

            3 => Some(Opcode::Add),
            4 => Some(Opcode::Sub),
            5 => Some(Opcode::Mult),
            6 => Some(Opcode::Div),
            7 => Some(Opcode::Mod),

            8 => Some(Opcode::Jmp),
            9 => Some(Opcode::CmpJmpE),
            10 => Some(Opcode::CmpJmpGt),
            11 => Some(Opcode::CmpJmpGte),
            12 => Some(Opcode::CmpJmpLt),
            13 => Some(Opcode::CmpJmpLte),
            14 => Some(Opcode::Call),
            15 => Some(Opcode::Ret),

            16 => Some(Opcode::Nop),
            17 => Some(Opcode::Hlt),

            _ => None,
        }
    }

    /// Raw code word for this opcode
    pub fn word(self) -> i32 {
        self as i32
    }

    /// Number of code words the instruction occupies
    pub fn width(self) -> usize {
        match self {
            Opcode::Push => 2,
            _ => 1,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mult => "MULT",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
            Opcode::Jmp => "JMP",
            Opcode::CmpJmpE => "CMPJMPE",
            Opcode::CmpJmpGt => "CMPJMPGT",
            Opcode::CmpJmpGte => "CMPJMPGTE",
            Opcode::CmpJmpLt => "CMPJMPLT",
            Opcode::CmpJmpLte => "CMPJMPLTE",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::Nop => "NOP",
            Opcode::Hlt => "HLT",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
