//! Stack Virtual Machine - Core Library
//!
//! A closed instruction set executed over three disjoint regions: code,
//! operand stack and heap. Runs end in a terminal [`RunState`] returned to
//! the caller rather than terminating the process.

pub mod error;
pub mod config;
pub mod bytecode;
pub mod vm;

// Re-export commonly used types
pub use error::{Fault, SvmError, SvmResult};
pub use config::MachineConfig;
pub use bytecode::{Instruction, Opcode, Program};
pub use vm::{RunState, TraceLog, TraceRecord, Tracer, VirtualMachine};
