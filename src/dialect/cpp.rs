//! C++ output, for emulators built around a `Machine::State` structure.

use crate::dialect::traits::Dialect;
use crate::dialect::ENTRY_POINT;
use crate::synth::{Argument, Delegate, Routine, Step};
use crate::vocab::Width;
use std::io::{Result, Write};

fn indent(depth: usize) -> String {
    "\t".repeat(depth)
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Cpp;

impl Cpp {
    fn argument(&self, argument: &Argument) -> String {
        match argument {
            Argument::Data { slot, .. } => format!("data{}", slot),
            Argument::Status { .. } => "sc".to_string(),
            Argument::Register { register, .. } => format!("cpu.reg.{}", register.field()),
        }
    }
}

impl Dialect for Cpp {
    fn routine(&self, routine: Routine) -> String {
        match routine {
            Routine::Calc(mode) => format!("calc_{}", mode.canonical_name()),
            Routine::Read(width) => format!("cpu_read{}", width),
            Routine::Write(width) => format!("cpu_write{}", width),
            Routine::Immediate(width) => format!("cpu_imm{}", width),
            Routine::ReadStatus => "cpu_readSC".to_string(),
            Routine::WriteStatus => "cpu_writeSC".to_string(),
            Routine::Operation(op, width) => format!("op_{}{}", op.name(), width),
            Routine::Undefined => "inst_undefined".to_string(),
        }
    }

    fn emit_preamble(&self, stream: &mut dyn Write) -> Result<()> {
        writeln!(stream, "// Generated by opgen. Do not edit.")?;
        writeln!(stream)?;
        writeln!(stream, "int {}(Machine::State& cpu);", ENTRY_POINT)?;
        writeln!(stream)
    }

    fn emit_unit_start(&self, stream: &mut dyn Write, name: &str) -> Result<()> {
        writeln!(stream, "static int {}(Machine::State& cpu) {{", name)
    }

    fn emit_step(&self, stream: &mut dyn Write, step: &Step) -> Result<()> {
        match step {
            Step::ComputeAddress { slot, mode } => writeln!(
                stream,
                "\tconst auto addr{} = {}(cpu);",
                slot,
                self.routine(Routine::Calc(*mode))
            ),
            Step::ReadMemory {
                slot,
                width,
                mutable,
            } => writeln!(
                stream,
                "\t{}uint{}_t data{} = {}(cpu, addr{}, TRACE_DATA);",
                if *mutable { "" } else { "const " },
                width,
                slot,
                self.routine(Routine::Read(*width)),
                slot
            ),
            Step::ReserveMemory { slot, width } => {
                writeln!(stream, "\tuint{}_t data{};", width, slot)
            }
            Step::FetchImmediate { slot, width, fetch } => writeln!(
                stream,
                "\tconst uint{}_t data{} = {}(cpu, TRACE_DATA);",
                width,
                slot,
                self.routine(Routine::Immediate(*fetch))
            ),
            Step::SkipUnless { condition, cycles } => {
                writeln!(stream, "\tif (!({})) {{", condition.expression())?;
                writeln!(stream, "\t\tcpu.reg.cb = cpu.reg.nb;")?;
                writeln!(stream, "\t\treturn {};", cycles)?;
                writeln!(stream, "\t}}")
            }
            Step::ReadStatus { mutable } => writeln!(
                stream,
                "\t{}uint8_t sc = {}(cpu);",
                if *mutable { "" } else { "const " },
                self.routine(Routine::ReadStatus)
            ),
            Step::ReserveStatus => writeln!(stream, "\tuint8_t sc;"),
            Step::Execute {
                operation,
                width,
                arguments,
            } => {
                let mut args = vec!["cpu".to_string()];
                args.extend(arguments.iter().map(|a| self.argument(a)));

                writeln!(
                    stream,
                    "\t{}({});",
                    self.routine(Routine::Operation(*operation, *width)),
                    args.join(", ")
                )
            }
            Step::WriteStatus => writeln!(
                stream,
                "\t{}(cpu, sc);",
                self.routine(Routine::WriteStatus)
            ),
            Step::WriteMemory { slot, width } => writeln!(
                stream,
                "\t{}(cpu, data{}, addr{}, TRACE_DATA);",
                self.routine(Routine::Write(*width)),
                slot,
                slot
            ),
            Step::Return {
                cycles,
                block_interrupts: true,
            } => writeln!(
                stream,
                "\treturn {} + {}(cpu); // Block IRQs",
                cycles, ENTRY_POINT
            ),
            Step::Return {
                cycles,
                block_interrupts: false,
            } => writeln!(stream, "\treturn {};", cycles),
        }
    }

    fn emit_unit_end(&self, stream: &mut dyn Write) -> Result<()> {
        writeln!(stream, "}}")?;
        writeln!(stream)
    }

    fn emit_delegate(&self, stream: &mut dyn Write, delegate: &Delegate) -> Result<()> {
        writeln!(stream, "int {}(Machine::State& cpu) {{", delegate.name())?;
        writeln!(stream, "\t{}(cpu);", delegate.routine())?;
        writeln!(stream, "\treturn {};", delegate.cycles())?;
        writeln!(stream, "}}")?;
        writeln!(stream)
    }

    fn emit_dispatch_start(&self, stream: &mut dyn Write) -> Result<()> {
        writeln!(stream, "int {}(Machine::State& cpu) {{", ENTRY_POINT)?;
        writeln!(
            stream,
            "\tswitch ({}(cpu, TRACE_INSTRUCTION)) {{",
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
            "{}case 0x{:02X}: return {}(cpu);",
            indent(depth),
            opcode,
            target
        )
    }

    fn emit_page_case_start(&self, stream: &mut dyn Write, depth: usize, opcode: u8) -> Result<()> {
        writeln!(stream, "{}case 0x{:02X}:", indent(depth), opcode)?;
        writeln!(
            stream,
            "{}switch ({}(cpu, TRACE_EX_INST)) {{",
            indent(depth + 1),
            self.routine(Routine::Immediate(Width::Byte))
        )
    }

    fn emit_page_case_end(&self, stream: &mut dyn Write, depth: usize) -> Result<()> {
        writeln!(stream, "{}}}", indent(depth + 1))
    }

    fn emit_default_case(&self, stream: &mut dyn Write, depth: usize) -> Result<()> {
        writeln!(
            stream,
            "{}default: return {}(cpu);",
            indent(depth),
            self.routine(Routine::Undefined)
        )
    }

    fn emit_dispatch_end(&self, stream: &mut dyn Write) -> Result<()> {
        writeln!(stream, "\t}}")?;
        writeln!(stream, "}}")
    }
}
