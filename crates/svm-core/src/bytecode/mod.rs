pub mod instruction;
pub mod opcode;
pub mod program;

pub use instruction::{decode, disassemble, Instruction};
pub use opcode::Opcode;
pub use program::Program;
