pub mod handlers;
pub mod memory;
pub mod stack;
pub mod trace;
pub mod vm;

pub use trace::{TraceLog, TraceRecord, Tracer};
pub use vm::{RunState, VirtualMachine};
