//! Built-in demonstration programs

use clap::ValueEnum;
use svm_core::{Opcode, Program};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// Calls a subroutine computing 1 + 2, then loops back forever through CMPJMPE
    CallLoop,
    /// PUSH 1, PUSH 2, ADD, POP, HLT
    Sum,
    /// PUSH 1, PUSH 0, DIV, HLT; the divide is skipped
    DivZero,
}

impl Demo {
    pub fn program(self) -> Program {
        match self {
            Demo::CallLoop => call_loop(),
            Demo::Sum => Program::new()
                .push(1)
                .push(2)
                .op(Opcode::Add)
                .op(Opcode::Pop)
                .op(Opcode::Hlt),
            Demo::DivZero => Program::new()
                .push(1)
                .push(0)
                .op(Opcode::Div)
                .op(Opcode::Hlt),
        }
    }
}

fn call_loop() -> Program {
    let subroutine = 6;
    let resume = 13;

    let program = Program::new()
        .push(subroutine)
        .op(Opcode::Call)
        .push(resume)
        .op(Opcode::Jmp);
    debug_assert_eq!(program.here(), subroutine);

    let program = program
        .push(1)
        .push(2)
        .op(Opcode::Add)
        .op(Opcode::Pop)
        .op(Opcode::Ret);
    debug_assert_eq!(program.here(), resume);

    // 1 + 1 == 2 always holds, so control returns to 0
    program
        .op(Opcode::Nop)
        .push(1)
        .push(1)
        .op(Opcode::Add)
        .push(2)
        .push(0)
        .op(Opcode::CmpJmpE)
        .op(Opcode::Hlt)
}
