//! Stack Virtual Machine - CLI
//!
//! Runs a built-in program on a configurable machine and reports how the
//! run ended.

mod demo;

use std::process::ExitCode;

use clap::Parser;
use svm_core::bytecode::disassemble;
use svm_core::config::DEFAULT_REGION_SIZE;
use svm_core::{MachineConfig, RunState, TraceRecord, Tracer, VirtualMachine};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use demo::Demo;

#[derive(Parser)]
#[clap(name = "svm", about = "Stack Virtual Machine")]
struct Args {
    /// Program to run
    #[clap(short, long, value_enum, default_value = "sum")]
    program: Demo,

    /// Code region capacity, in words
    #[clap(long, value_name = "WORDS", default_value_t = DEFAULT_REGION_SIZE)]
    code_size: usize,

    /// Operand stack capacity, in words
    #[clap(long, value_name = "WORDS", default_value_t = DEFAULT_REGION_SIZE)]
    stack_size: usize,

    /// Heap size, in bytes
    #[clap(long, value_name = "BYTES", default_value_t = DEFAULT_REGION_SIZE)]
    heap_size: usize,

    /// Print every executed instruction
    #[clap(long)]
    trace: bool,

    /// Print the program listing before running
    #[clap(long)]
    list: bool,

    /// Stop the host loop after this many instructions
    #[clap(long, value_name = "NUM")]
    max_steps: Option<u64>,
}

struct PrintTracer;

impl Tracer for PrintTracer {
    fn record(&mut self, record: &TraceRecord) {
        println!("{}", record);
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let program = args.program.program();

    if args.list {
        for (pc, decoded) in disassemble(program.words()) {
            match decoded {
                Ok(instr) => println!("{:5}: {}", pc, instr),
                Err(fault) => println!("{:5}: <{}>", pc, fault),
            }
        }
    }

    let config = MachineConfig {
        code_size: args.code_size,
        stack_size: args.stack_size,
        heap_size: args.heap_size,
    };
    info!(?config, program = ?args.program, words = program.len(), "starting machine");

    let mut vm = match VirtualMachine::new(config, program.words()) {
        Ok(vm) => vm,
        Err(e) => {
            error!("failed to create machine: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut tracer = PrintTracer;
    let mut state = vm.state();
    while !state.is_terminal() {
        if args.max_steps.is_some_and(|max| vm.steps() >= max) {
            println!("step limit reached after {} instructions (pc = {})", vm.steps(), vm.pc());
            return ExitCode::from(2);
        }
        state = if args.trace {
            vm.step_traced(&mut tracer)
        } else {
            vm.step()
        };
    }

    println!("final stack: {:?}", vm.stack().as_slice());
    match state {
        RunState::Halted => {
            println!("halted after {} instructions", vm.steps());
            ExitCode::SUCCESS
        }
        RunState::Faulted(fault) => {
            println!("faulted at pc {}: {}", vm.pc(), fault);
            ExitCode::FAILURE
        }
        RunState::Running => unreachable!("loop exits only on a terminal state"),
    }
}
