//! Rust output, for emulators whose CPU state is a `State` struct passed
//! by mutable reference.
//!
//! Rust won't let an operation routine borrow `cpu` and one of its
//! registers at the same time, so register operands are copied into locals
//! before the operation runs and stored back after it.

use crate::dialect::traits::Dialect;
use crate::dialect::ENTRY_POINT;
use crate::synth::{Argument, Delegate, Routine, Step};
use crate::vocab::Width;
use std::io::{Result, Write};

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn integer(width: Width) -> String {
    format!("u{}", width)
}

fn binding(mutable: bool) -> &'static str {
    if mutable {
        "let mut"
    } else {
        "let"
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Rust;

impl Rust {
    fn argument(&self, argument: &Argument) -> String {
        let name = match argument {
            Argument::Data { slot, .. } => format!("data{}", slot),
            Argument::Status { .. } => "sc".to_string(),
            Argument::Register { slot, register, .. } => format!("{}{}", register.field(), slot),
        };

        if argument.direction().writes() {
            format!("&mut {}", name)
        } else {
            name
        }
    }

    fn emit_execute(
        &self,
        stream: &mut dyn Write,
        routine: Routine,
        arguments: &[Argument],
    ) -> Result<()> {
        for arg in arguments {
            if let Argument::Register {
                slot,
                register,
                direction,
            } = arg
            {
                writeln!(
                    stream,
                    "    {} {}{} = cpu.reg.{};",
                    binding(direction.writes()),
                    register.field(),
                    slot,
                    register.field()
                )?;
            }
        }

        let mut args = vec!["cpu".to_string()];
        args.extend(arguments.iter().map(|a| self.argument(a)));

        writeln!(stream, "    {}({});", self.routine(routine), args.join(", "))?;

        for arg in arguments {
            if let Argument::Register {
                slot,
                register,
                direction,
            } = arg
            {
                if direction.writes() {
                    writeln!(
                        stream,
                        "    cpu.reg.{} = {}{};",
                        register.field(),
                        register.field(),
                        slot
                    )?;
                }
            }
        }

        Ok(())
    }
}

impl Dialect for Rust {
    fn routine(&self, routine: Routine) -> String {
        match routine {
            Routine::Calc(mode) => format!("calc_{}", mode.snake_name()),
            Routine::Read(width) => format!("cpu_read{}", width),
            Routine::Write(width) => format!("cpu_write{}", width),
            Routine::Immediate(width) => format!("cpu_imm{}", width),
            Routine::ReadStatus => "cpu_read_sc".to_string(),
            Routine::WriteStatus => "cpu_write_sc".to_string(),
            Routine::Operation(op, width) => format!("op_{}{}", op.name(), width),
            Routine::Undefined => "inst_undefined".to_string(),
        }
    }

    fn emit_preamble(&self, stream: &mut dyn Write) -> Result<()> {
        writeln!(stream, "// Generated by opgen. Do not edit.")?;
        writeln!(stream)
    }

    fn emit_unit_start(&self, stream: &mut dyn Write, name: &str) -> Result<()> {
        writeln!(stream, "fn {}(cpu: &mut State) -> u32 {{", name)
    }

    fn emit_step(&self, stream: &mut dyn Write, step: &Step) -> Result<()> {
        match step {
            Step::ComputeAddress { slot, mode } => writeln!(
                stream,
                "    let addr{} = {}(cpu);",
                slot,
                self.routine(Routine::Calc(*mode))
            ),
            Step::ReadMemory {
                slot,
                width,
                mutable,
            } => writeln!(
                stream,
                "    {} data{}: {} = {}(cpu, addr{}, Trace::Data);",
                binding(*mutable),
                slot,
                integer(*width),
                self.routine(Routine::Read(*width)),
                slot
            ),
            Step::ReserveMemory { slot, width } => writeln!(
                stream,
                "    let mut data{}: {} = 0;",
                slot,
                integer(*width)
            ),
            Step::FetchImmediate { slot, width, fetch } => writeln!(
                stream,
                "    let data{}: {} = {}(cpu, Trace::Data){};",
                slot,
                integer(*width),
                self.routine(Routine::Immediate(*fetch)),
                if width == fetch { "" } else { ".into()" }
            ),
            Step::SkipUnless { condition, cycles } => {
                writeln!(stream, "    if !({}) {{", condition.expression())?;
                writeln!(stream, "        cpu.reg.cb = cpu.reg.nb;")?;
                writeln!(stream, "        return {};", cycles)?;
                writeln!(stream, "    }}")
            }
            Step::ReadStatus { mutable } => writeln!(
                stream,
                "    {} sc: u8 = {}(cpu);",
                binding(*mutable),
                self.routine(Routine::ReadStatus)
            ),
            Step::ReserveStatus => writeln!(stream, "    let mut sc: u8 = 0;"),
            Step::Execute {
                operation,
                width,
                arguments,
            } => self.emit_execute(stream, Routine::Operation(*operation, *width), arguments),
            Step::WriteStatus => writeln!(
                stream,
                "    {}(cpu, sc);",
                self.routine(Routine::WriteStatus)
            ),
            Step::WriteMemory { slot, width } => writeln!(
                stream,
                "    {}(cpu, data{}, addr{}, Trace::Data);",
                self.routine(Routine::Write(*width)),
                slot,
                slot
            ),
            Step::Return {
                cycles,
                block_interrupts: true,
            } => writeln!(
                stream,
                "    {} + {}(cpu) // Block IRQs",
                cycles, ENTRY_POINT
            ),
            Step::Return {
                cycles,
                block_interrupts: false,
            } => writeln!(stream, "    {}", cycles),
        }
    }

    fn emit_unit_end(&self, stream: &mut dyn Write) -> Result<()> {
        writeln!(stream, "}}")?;
        writeln!(stream)
    }

    fn emit_delegate(&self, stream: &mut dyn Write, delegate: &Delegate) -> Result<()> {
        writeln!(stream, "fn {}(cpu: &mut State) -> u32 {{", delegate.name())?;
        writeln!(stream, "    {}(cpu);", delegate.routine())?;
        writeln!(stream, "    {}", delegate.cycles())?;
        writeln!(stream, "}}")?;
        writeln!(stream)
    }

    fn emit_dispatch_start(&self, stream: &mut dyn Write) -> Result<()> {
        writeln!(stream, "pub fn {}(cpu: &mut State) -> u32 {{", ENTRY_POINT)?;
        writeln!(
            stream,
            "    match {}(cpu, Trace::Instruction) {{",
            self.routine(Routine::Immediate(Width::Byte))
        )
    }

    fn emit_case(
        &self,
        stream: &mut dyn Write,
        depth: usize,
        opcode: u8,
        target: &str,
    ) -> Result<()> {
        writeln!(
            stream,
            "{}0x{:02X} => {}(cpu),",
            indent(depth + 1),
            opcode,
            target
        )
    }

    fn emit_page_case_start(&self, stream: &mut dyn Write, depth: usize, opcode: u8) -> Result<()> {
        writeln!(
            stream,
            "{}0x{:02X} => match {}(cpu, Trace::ExInst) {{",
            indent(depth + 1),
            opcode,
            self.routine(Routine::Immediate(Width::Byte))
        )
    }

    fn emit_page_case_end(&self, stream: &mut dyn Write, depth: usize) -> Result<()> {
        writeln!(stream, "{}}},", indent(depth + 1))
    }

    fn emit_default_case(&self, stream: &mut dyn Write, depth: usize) -> Result<()> {
        writeln!(
            stream,
            "{}_ => {}(cpu),",
            indent(depth + 1),
            self.routine(Routine::Undefined)
        )
    }

    fn emit_dispatch_end(&self, stream: &mut dyn Write) -> Result<()> {
        writeln!(stream, "    }}")?;
        writeln!(stream, "}}")
    }
}
