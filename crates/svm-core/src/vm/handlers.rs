//! Opcode Handlers
//!
//! One handler per instruction. Each is a pure transition over
//! (stack, code, pc) and reports the next control state to the engine;
//! none of them touch the program counter directly.
//!
//! Operands are popped right to left: for `[.., x, y]` the handler pops `y`
//! first, then `x`. Integer arithmetic wraps on overflow.

use tracing::debug;

use crate::bytecode::Opcode;
use crate::error::Fault;

use super::memory::Code;
use super::stack::Stack;

/// Next state requested by a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Continue at `pc`. The engine validates the target.
    Next { pc: i64, popped: Option<i32> },

    /// Stop with success
    Halt,
}

impl Control {
    fn goto(pc: i64) -> Self {
        Control::Next { pc, popped: None }
    }

    fn advance(pc: usize, width: usize) -> Self {
        Control::goto((pc + width) as i64)
    }
}

pub type Handler = fn(&mut Stack, &Code, usize) -> Result<Control, Fault>;

/// Handler table lookup
pub fn handler_for(opcode: Opcode) -> Handler {
    match opcode {
        Opcode::Push => push as Handler,
        Opcode::Pop => pop,

        Opcode::Add => add,
        Opcode::Sub => sub,
        Opcode::Mult => mult,
        Opcode::Div => div,
        Opcode::Mod => rem,

        Opcode::Jmp => jmp,
        Opcode::CmpJmpE => cmp_jmp_e,
        Opcode::CmpJmpGt => cmp_jmp_gt,
        Opcode::CmpJmpGte => cmp_jmp_gte,
        Opcode::CmpJmpLt => cmp_jmp_lt,
        Opcode::CmpJmpLte => cmp_jmp_lte,
        Opcode::Call => call,
        Opcode::Ret => ret,

        Opcode::Nop => nop,
        Opcode::Hlt => hlt,
    }
}

pub fn push(stack: &mut Stack, code: &Code, pc: usize) -> Result<Control, Fault> {
    let value = code.fetch(pc + 1)?;
    stack.push(value)?;
    Ok(Control::advance(pc, 2))
}

pub fn pop(stack: &mut Stack, _code: &Code, pc: usize) -> Result<Control, Fault> {
    let value = stack.pop()?;
    Ok(Control::Next {
        pc: (pc + 1) as i64,
        popped: Some(value),
    })
}

fn binary(stack: &mut Stack, pc: usize, op: fn(i32, i32) -> i32) -> Result<Control, Fault> {
    let y = stack.pop()?;
    let x = stack.pop()?;
    stack.push(op(x, y))?;
    Ok(Control::advance(pc, 1))
}

pub fn add(stack: &mut Stack, _code: &Code, pc: usize) -> Result<Control, Fault> {
    binary(stack, pc, i32::wrapping_add)
}

pub fn sub(stack: &mut Stack, _code: &Code, pc: usize) -> Result<Control, Fault> {
    binary(stack, pc, i32::wrapping_sub)
}

pub fn mult(stack: &mut Stack, _code: &Code, pc: usize) -> Result<Control, Fault> {
    binary(stack, pc, i32::wrapping_mul)
}

/// Division by zero is not a fault: both operands are consumed, nothing is
/// pushed and execution continues.
fn divide(
    stack: &mut Stack,
    pc: usize,
    name: &'static str,
    op: fn(i32, i32) -> i32,
) -> Result<Control, Fault> {
    let y = stack.pop()?;
    let x = stack.pop()?;

    if y == 0 {
        debug!(target: "svm::exec", pc, op = name, dividend = x, "divide by zero, operands discarded");
        return Ok(Control::advance(pc, 1));
    }

    stack.push(op(x, y))?;
    Ok(Control::advance(pc, 1))
}

pub fn div(stack: &mut Stack, _code: &Code, pc: usize) -> Result<Control, Fault> {
    divide(stack, pc, "div", i32::wrapping_div)
}

pub fn rem(stack: &mut Stack, _code: &Code, pc: usize) -> Result<Control, Fault> {
    divide(stack, pc, "mod", i32::wrapping_rem)
}

pub fn jmp(stack: &mut Stack, _code: &Code, _pc: usize) -> Result<Control, Fault> {
    let target = stack.pop()?;
    Ok(Control::goto(target as i64))
}

fn compare_jump(stack: &mut Stack, pc: usize, taken: fn(i32, i32) -> bool) -> Result<Control, Fault> {
    let target = stack.pop()?;
    let y = stack.pop()?;
    let x = stack.pop()?;

    if taken(x, y) {
        Ok(Control::goto(target as i64))
    } else {
        Ok(Control::advance(pc, 1))
    }
}

pub fn cmp_jmp_e(stack: &mut Stack, _code: &Code, pc: usize) -> Result<Control, Fault> {
    compare_jump(stack, pc, |x, y| x == y)
}

pub fn cmp_jmp_gt(stack: &mut Stack, _code: &Code, pc: usize) -> Result<Control, Fault> {
    compare_jump(stack, pc, |x, y| x > y)
}

pub fn cmp_jmp_gte(stack: &mut Stack, _code: &Code, pc: usize) -> Result<Control, Fault> {
    compare_jump(stack, pc, |x, y| x >= y)
}

pub fn cmp_jmp_lt(stack: &mut Stack, _code: &Code, pc: usize) -> Result<Control, Fault> {
    compare_jump(stack, pc, |x, y| x < y)
}

pub fn cmp_jmp_lte(stack: &mut Stack, _code: &Code, pc: usize) -> Result<Control, Fault> {
    compare_jump(stack, pc, |x, y| x <= y)
}

/// Replaces the target on top of the stack with the return address
pub fn call(stack: &mut Stack, _code: &Code, pc: usize) -> Result<Control, Fault> {
    let target = stack.pop()?;
    let return_pc = i32::try_from(pc + 1).map_err(|_| Fault::CodeOverrun { pc: (pc + 1) as i64 })?;
    stack.push(return_pc)?;
    Ok(Control::goto(target as i64))
}

pub fn ret(stack: &mut Stack, _code: &Code, _pc: usize) -> Result<Control, Fault> {
    let return_pc = stack.pop()?;
    Ok(Control::goto(return_pc as i64))
}

pub fn nop(_stack: &mut Stack, _code: &Code, pc: usize) -> Result<Control, Fault> {
    Ok(Control::advance(pc, 1))
}

pub fn hlt(_stack: &mut Stack, _code: &Code, _pc: usize) -> Result<Control, Fault> {
    Ok(Control::Halt)
}
