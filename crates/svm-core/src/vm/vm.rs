//! Virtual Machine Core
//!
//! Owns the machine state and drives the fetch-decode-execute loop. The loop
//! performs no arithmetic itself: it decodes the word group at `pc`, invokes
//! the matching handler and commits the control state the handler requests.

use tracing::{debug, trace, warn};

use crate::bytecode::decode;
use crate::config::MachineConfig;
use crate::error::{Fault, SvmResult};

use super::handlers::{handler_for, Control};
use super::memory::{Code, Heap};
use super::stack::Stack;
use super::trace::{TraceRecord, Tracer};

/// Dispatch state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Halted,
    Faulted(Fault),
}

impl RunState {
    /// Halted and Faulted are terminal; no further fetch occurs
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunState::Running)
    }
}

/// Stack Virtual Machine
#[derive(Debug)]
pub struct VirtualMachine {
    config: MachineConfig,
    code: Code,
    stack: Stack,
    heap: Heap,

    pc: usize,
    state: RunState,
    steps: u64,
}

impl VirtualMachine {
    /// Create a new VM instance with `program` installed at offset 0
    pub fn new(config: MachineConfig, program: &[i32]) -> SvmResult<Self> {
        let mut code = Code::new(config.code_size);
        code.install(program)?;

        Ok(VirtualMachine {
            stack: Stack::new(config.stack_size),
            heap: Heap::new(config.heap_size),
            code,
            pc: 0,
            state: RunState::Running,
            steps: 0,
            config,
        })
    }

    /// Execute until halt or fault
    pub fn run(&mut self) -> RunState {
        while !self.state.is_terminal() {
            self.dispatch(None);
        }
        self.state
    }

    /// Execute until halt or fault, recording every executed instruction
    pub fn run_traced(&mut self, tracer: &mut dyn Tracer) -> RunState {
        while !self.state.is_terminal() {
            self.dispatch(Some(&mut *tracer));
        }
        self.state
    }

    /// Execute a single instruction. Once terminal this is a no-op.
    pub fn step(&mut self) -> RunState {
        self.dispatch(None)
    }

    pub fn step_traced(&mut self, tracer: &mut dyn Tracer) -> RunState {
        self.dispatch(Some(tracer))
    }

    /// Rewind to `pc = 0` with an empty stack, keeping the installed code
    pub fn reset(&mut self) {
        self.stack.clear();
        self.pc = 0;
        self.state = RunState::Running;
        self.steps = 0;
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Number of instructions completed
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    fn dispatch(&mut self, tracer: Option<&mut dyn Tracer>) -> RunState {
        if self.state.is_terminal() {
            return self.state;
        }

        if let Err(fault) = self.execute_one(tracer) {
            warn!(target: "svm::exec", pc = self.pc, %fault, "machine faulted");
            self.state = RunState::Faulted(fault);
        }
        self.state
    }

    fn execute_one(&mut self, tracer: Option<&mut dyn Tracer>) -> Result<(), Fault> {
        let pc = self.pc;
        let depth = self.stack.depth();

        let instr = decode(self.code.words(), pc)?;
        trace!(target: "svm::exec", pc, depth, op = %instr.opcode);

        let control = handler_for(instr.opcode)(&mut self.stack, &self.code, pc)?;
        self.steps += 1;

        if let Some(tracer) = tracer {
            let popped = match control {
                Control::Next { popped, .. } => popped,
                Control::Halt => None,
            };
            tracer.record(&TraceRecord {
                pc,
                depth,
                opcode: instr.opcode,
                popped,
            });
        }

        match control {
            Control::Next { pc: target, .. } => {
                self.pc = self.checked_pc(target)?;
            }
            Control::Halt => {
                debug!(target: "svm::exec", pc, steps = self.steps, "machine halted");
                self.state = RunState::Halted;
            }
        }
        Ok(())
    }

    /// Validate a control transfer target against the code region
    fn checked_pc(&self, target: i64) -> Result<usize, Fault> {
        usize::try_from(target)
            .ok()
            .filter(|&pc| pc < self.code.capacity())
            .ok_or(Fault::CodeOverrun { pc: target })
    }
}
