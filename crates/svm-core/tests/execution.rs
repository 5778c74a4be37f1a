use svm_core::{Fault, MachineConfig, Opcode, Program, RunState, TraceLog, VirtualMachine};

fn run(program: &Program) -> VirtualMachine {
    let mut vm = VirtualMachine::new(MachineConfig::new(), program.words()).expect("program fits");
    vm.run();
    vm
}

#[test]
fn add_then_pop_halts_with_empty_stack() {
    let words = [
        Opcode::Push.word(), 1,
        Opcode::Push.word(), 2,
        Opcode::Add.word(),
        Opcode::Pop.word(),
        Opcode::Hlt.word(),
    ];
    let mut vm = VirtualMachine::new(MachineConfig::new(), &words).expect("program fits");
    assert_eq!(vm.run(), RunState::Halted);
    assert!(vm.stack().is_empty());
}

#[test]
fn divide_by_zero_is_skipped() {
    let program = Program::new().push(1).push(0).op(Opcode::Div).op(Opcode::Hlt);
    let vm = run(&program);
    assert_eq!(vm.state(), RunState::Halted);
    assert!(vm.stack().is_empty());
}

#[test]
fn modulo_by_zero_matches_divide() {
    let program = Program::new().push(9).push(1).push(0).op(Opcode::Mod).op(Opcode::Hlt);
    let vm = run(&program);
    assert_eq!(vm.state(), RunState::Halted);
    assert_eq!(vm.stack().as_slice(), &[9]);
}

#[test]
fn subtraction_keeps_push_order() {
    let vm = run(&Program::new().push(10).push(3).op(Opcode::Sub).op(Opcode::Hlt));
    assert_eq!(vm.stack().as_slice(), &[7]);

    let vm = run(&Program::new().push(10).push(3).op(Opcode::Add).op(Opcode::Hlt));
    assert_eq!(vm.stack().as_slice(), &[13]);
}

#[test]
fn final_stack_follows_effect_table() {
    // ((4 * 5) - 6) / 3 and 17 % 5, left on the stack
    let program = Program::new()
        .push(4)
        .push(5)
        .op(Opcode::Mult)
        .push(6)
        .op(Opcode::Sub)
        .push(3)
        .op(Opcode::Div)
        .push(17)
        .push(5)
        .op(Opcode::Mod)
        .op(Opcode::Nop)
        .op(Opcode::Hlt);
    let vm = run(&program);
    assert_eq!(vm.state(), RunState::Halted);
    assert_eq!(vm.stack().as_slice(), &[4, 2]);
}

#[test]
fn call_returns_to_following_instruction() {
    // 0: PUSH sub, 2: CALL, 3: NOP, 4: HLT, 5: sub
    let sub = 5;
    let program = Program::new()
        .push(sub)
        .op(Opcode::Call)
        .op(Opcode::Nop)
        .op(Opcode::Hlt);
    assert_eq!(program.here(), sub);
    let program = program
        .push(1)
        .push(2)
        .op(Opcode::Add)
        .op(Opcode::Pop)
        .op(Opcode::Ret);

    let mut vm = VirtualMachine::new(MachineConfig::new(), program.words()).expect("program fits");
    let mut log = TraceLog::new();
    assert_eq!(vm.run_traced(&mut log), RunState::Halted);
    assert!(vm.stack().is_empty());

    let pcs: Vec<usize> = log.records().iter().map(|r| r.pc).collect();
    assert_eq!(pcs, vec![0, 2, 5, 7, 9, 10, 11, 3, 4]);
    // the subroutine's POP discards 1 + 2, leaving the return address on top
    assert_eq!(log.records()[5].popped, Some(3));
    assert_eq!(log.records()[5].depth, 2);
}

#[test]
fn compare_jump_equal_takes_branch() {
    // 0: PUSH 3, 2: PUSH 3, 4: PUSH 8, 6: CMPJMPE, 7: HLT, 8: PUSH 1, 10: HLT
    let program = Program::new()
        .push(3)
        .push(3)
        .push(8)
        .op(Opcode::CmpJmpE)
        .op(Opcode::Hlt)
        .push(1)
        .op(Opcode::Hlt);
    let vm = run(&program);
    assert_eq!(vm.stack().as_slice(), &[1]);
    assert_eq!(vm.pc(), 10);
}

#[test]
fn compare_jump_unequal_falls_through() {
    let program = Program::new()
        .push(3)
        .push(4)
        .push(8)
        .op(Opcode::CmpJmpE)
        .op(Opcode::Hlt)
        .push(1)
        .op(Opcode::Hlt);
    let vm = run(&program);
    assert!(vm.stack().is_empty());
    assert_eq!(vm.pc(), 7);
}

#[test]
fn compare_jump_less_than_skips_block() {
    // 0: PUSH x, 2: PUSH y, 4: PUSH 9, 6: CMPJMPLT, 7: PUSH 99, 9: HLT
    let program = |x, y| {
        Program::new()
            .push(x)
            .push(y)
            .push(9)
            .op(Opcode::CmpJmpLt)
            .push(99)
            .op(Opcode::Hlt)
    };

    let vm = run(&program(1, 2));
    assert_eq!(vm.state(), RunState::Halted);
    assert!(vm.stack().is_empty());

    let vm = run(&program(2, 1));
    assert_eq!(vm.stack().as_slice(), &[99]);
}

#[test]
fn invalid_opcode_stops_execution() {
    let program = Program::new()
        .push(1)
        .word(0)
        .push(2)
        .op(Opcode::Hlt);
    let mut vm = VirtualMachine::new(MachineConfig::new(), program.words()).expect("program fits");
    let mut log = TraceLog::new();
    assert_eq!(vm.run_traced(&mut log), RunState::Faulted(Fault::InvalidOpcode(0)));
    assert_eq!(vm.stack().as_slice(), &[1]);
    assert_eq!(log.records().len(), 1);
}

#[test]
fn ret_to_garbage_faults() {
    let vm = run(&Program::new().push(-1).op(Opcode::Ret));
    assert_eq!(vm.state(), RunState::Faulted(Fault::CodeOverrun { pc: -1 }));
}

#[test]
fn underflow_in_compare_jump_faults() {
    let vm = run(&Program::new().push(1).push(2).op(Opcode::CmpJmpGt).op(Opcode::Hlt));
    assert_eq!(vm.state(), RunState::Faulted(Fault::StackUnderflow));
}

#[test]
fn subroutine_loop_cycles_back_to_start() {
    let program = Program::new()
        .push(6)
        .op(Opcode::Call)
        .push(13)
        .op(Opcode::Jmp)
        // subroutine
        .push(1)
        .push(2)
        .op(Opcode::Add)
        .op(Opcode::Pop)
        .op(Opcode::Ret)
        // 13
        .op(Opcode::Nop)
        .push(1)
        .push(1)
        .op(Opcode::Add)
        .push(2)
        .push(0)
        .op(Opcode::CmpJmpE)
        .op(Opcode::Hlt);

    let mut vm = VirtualMachine::new(MachineConfig::new(), program.words()).expect("program fits");
    for round in 1..=3u64 {
        for _ in 0..16 {
            assert_eq!(vm.step(), RunState::Running);
        }
        assert_eq!(vm.pc(), 0);
        assert!(vm.stack().is_empty());
        assert_eq!(vm.steps(), 16 * round);
    }
}
