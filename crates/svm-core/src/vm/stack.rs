//! Operand Stack
//!
//! Fixed-capacity LIFO of signed words. No execution semantics.

use crate::error::Fault;

/// Operand stack
#[derive(Debug)]
pub struct Stack {
    values: Vec<i32>,
    max_depth: usize,
}

impl Stack {
    /// Create new stack with maximum depth
    pub fn new(max_depth: usize) -> Self {
        Stack {
            values: Vec::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Push value onto stack
    pub fn push(&mut self, value: i32) -> Result<(), Fault> {
        if self.values.len() >= self.max_depth {
            return Err(Fault::StackOverflow);
        }
        self.values.push(value);
        Ok(())
    }

    /// Pop value from stack
    pub fn pop(&mut self) -> Result<i32, Fault> {
        self.values.pop().ok_or(Fault::StackUnderflow)
    }

    /// Peek at top of stack without removing
    pub fn top(&self) -> Result<i32, Fault> {
        self.values.last().copied().ok_or(Fault::StackUnderflow)
    }

    pub fn depth(&self) -> usize {
        self.values.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Contents, bottom to top
    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    /// Clear stack
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
