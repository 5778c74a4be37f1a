//! SVM Error Types
//!
//! Two layers of failure exist. A [`Fault`] is a fatal condition raised while
//! the machine runs; it ends the run and is reported through
//! `RunState::Faulted`. An [`SvmError`] is raised while setting a machine up,
//! before the first fetch.

use thiserror::Error;

/// Fatal execution fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    /// Fetched word is not a recognized opcode tag
    #[error("invalid opcode: {0}")]
    InvalidOpcode(i32),

    /// Pop requested on an empty operand stack
    #[error("stack underflow")]
    StackUnderflow,

    /// Push requested on a full operand stack
    #[error("stack overflow")]
    StackOverflow,

    /// Program counter left the code region
    #[error("code overrun: pc {pc} is outside the code region")]
    CodeOverrun { pc: i64 },
}

/// Machine construction errors
#[derive(Debug, Error)]
pub enum SvmError {
    #[error("program of {len} words does not fit in code region of {capacity} words")]
    ProgramTooLarge { len: usize, capacity: usize },

    #[error(transparent)]
    Fault(#[from] Fault),
}

pub type SvmResult<T> = Result<T, SvmError>;
