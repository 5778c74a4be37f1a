//! Execution Diagnostics
//!
//! Optional per-instruction trace. The engine writes records into a sink and
//! never reads them back, so tracing cannot influence control flow.

use std::fmt;

use crate::bytecode::Opcode;

/// One executed instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// Address the instruction was fetched from
    pub pc: usize,
    /// Operand stack depth before execution
    pub depth: usize,
    pub opcode: Opcode,
    /// Value removed by POP
    pub popped: Option<i32>,
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pc = {}, sp = {}: {}", self.pc, self.depth, self.opcode)?;
        if let Some(v) = self.popped {
            write!(f, ": {}", v)?;
        }
        Ok(())
    }
}

/// Diagnostic sink
pub trait Tracer {
    fn record(&mut self, record: &TraceRecord);
}

/// Collects records in memory
#[derive(Debug, Default)]
pub struct TraceLog {
    records: Vec<TraceRecord>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    pub fn opcodes(&self) -> Vec<Opcode> {
        self.records.iter().map(|r| r.opcode).collect()
    }
}

impl Tracer for TraceLog {
    fn record(&mut self, record: &TraceRecord) {
        self.records.push(*record);
    }
}
