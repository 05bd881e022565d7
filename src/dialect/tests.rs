//! Dialect test suite

use crate::dialect::{Cpp, Dialect, DialectName, Rust};
use crate::synth::{synthesize, Delegate, Identity, Routine};
use crate::table::{InstructionRow, Page};
use crate::vocab::{AddressingMode, Operation, Width};

fn render_unit<D: Dialect>(dialect: &D, cycles: &str, mnemonic: &str, operands: &[&str]) -> String {
    let row = InstructionRow::new(0x00, Page::Primary, cycles.parse().unwrap(), mnemonic, operands);
    let unit = synthesize(&row).unwrap();
    let mut out = Vec::new();

    dialect.emit_unit(&mut out, &unit).unwrap();

    String::from_utf8(out).unwrap()
}

fn render_delegate<D: Dialect>(dialect: &D, mnemonic: &str, operands: &[&str], cycles: u32) -> String {
    let (identity, _) = Identity::of(mnemonic, operands);
    let mut out = Vec::new();

    dialect
        .emit_delegate(&mut out, &Delegate::new(identity, cycles))
        .unwrap();

    String::from_utf8(out).unwrap()
}

fn render_dispatch<D: Dialect>(dialect: &D) -> String {
    let mut out = Vec::new();

    dialect.emit_dispatch_start(&mut out).unwrap();
    dialect.emit_case(&mut out, 1, 0x00, "inst_nop").unwrap();
    dialect.emit_page_case_start(&mut out, 1, 0xCE).unwrap();
    dialect.emit_case(&mut out, 2, 0x0A, "inst_ld_a_b").unwrap();
    dialect.emit_default_case(&mut out, 2).unwrap();
    dialect.emit_page_case_end(&mut out, 1).unwrap();
    dialect.emit_default_case(&mut out, 1).unwrap();
    dialect.emit_dispatch_end(&mut out).unwrap();

    String::from_utf8(out).unwrap()
}

#[test]
fn dialect_names() {
    assert_eq!("cpp".parse::<DialectName>(), Ok(DialectName::Cpp));
    assert_eq!("C++".parse::<DialectName>(), Ok(DialectName::Cpp));
    assert_eq!("rs".parse::<DialectName>(), Ok(DialectName::Rust));
    assert_eq!("cobol".parse::<DialectName>(), Err(()));
    assert_eq!(DialectName::default(), DialectName::Cpp);
}

#[test]
fn cpp_routine_names() {
    let cpp = Cpp;

    assert_eq!(cpp.routine(Routine::Calc(AddressingMode::DisplacedIX)), "calc_indDIX");
    assert_eq!(cpp.routine(Routine::Read(Width::Word)), "cpu_read16");
    assert_eq!(cpp.routine(Routine::Immediate(Width::Byte)), "cpu_imm8");
    assert_eq!(cpp.routine(Routine::WriteStatus), "cpu_writeSC");
    assert_eq!(cpp.routine(Routine::Operation(Operation::Add, Width::Byte)), "op_add8");
    assert_eq!(cpp.routine(Routine::Undefined), "inst_undefined");
}

#[test]
fn cpp_load_immediate() {
    assert_eq!(
        render_unit(&Cpp, "4", "LD", &["A", "#nn"]),
        "static int inst_ld_a_imm8(Machine::State& cpu) {\n\
         \tconst uint8_t data1 = cpu_imm8(cpu, TRACE_DATA);\n\
         \top_ld8(cpu, cpu.reg.a, data1);\n\
         \treturn 4;\n\
         }\n\n"
    );
}

#[test]
fn cpp_read_modify_write() {
    let text = render_unit(&Cpp, "4", "INC", &["[HL]"]);

    assert!(text.contains("\tconst auto addr0 = calc_absHL(cpu);\n"));
    assert!(text.contains("\tuint8_t data0 = cpu_read8(cpu, addr0, TRACE_DATA);\n"));
    assert!(text.contains("\top_inc8(cpu, data0);\n"));
    assert!(text.contains("\tcpu_write8(cpu, data0, addr0, TRACE_DATA);\n"));
}

#[test]
fn cpp_read_only_memory_is_const() {
    let text = render_unit(&Cpp, "4", "CP", &["A", "[HL]"]);

    assert!(text.contains("\tconst uint8_t data1 = cpu_read8(cpu, addr1, TRACE_DATA);\n"));
    assert!(!text.contains("cpu_write8"));
}

#[test]
fn cpp_conditional_skip() {
    let text = render_unit(&Cpp, "2,3", "JRS", &["Z", "rr"]);

    assert!(text.starts_with("static int inst_jrs_z_imm8(Machine::State& cpu) {\n"));
    assert!(text.contains(
        "\tif (!(cpu.reg.flag.z)) {\n\t\tcpu.reg.cb = cpu.reg.nb;\n\t\treturn 3;\n\t}\n"
    ));
    assert!(text.ends_with("\treturn 2;\n}\n\n"));
}

#[test]
fn cpp_status_writes_block_interrupts() {
    let text = render_unit(&Cpp, "3", "LD", &["SC", "#nn"]);

    assert!(text.contains("\tuint8_t sc;\n"));
    assert!(text.contains("\top_ld8(cpu, sc, data1);\n"));
    assert!(text.contains("\tcpu_writeSC(cpu, sc);\n"));
    assert!(text.contains("\treturn 3 + inst_advance(cpu); // Block IRQs\n"));
}

#[test]
fn cpp_delegate() {
    assert_eq!(
        render_delegate(&Cpp, "HALT", &[], 8),
        "int clock_inst_halt(Machine::State& cpu) {\n\tinst_halt(cpu);\n\treturn 8;\n}\n\n"
    );
}

#[test]
fn cpp_dispatch() {
    assert_eq!(
        render_dispatch(&Cpp),
        "int inst_advance(Machine::State& cpu) {\n\
         \tswitch (cpu_imm8(cpu, TRACE_INSTRUCTION)) {\n\
         \tcase 0x00: return inst_nop(cpu);\n\
         \tcase 0xCE:\n\
         \t\tswitch (cpu_imm8(cpu, TRACE_EX_INST)) {\n\
         \t\tcase 0x0A: return inst_ld_a_b(cpu);\n\
         \t\tdefault: return inst_undefined(cpu);\n\
         \t\t}\n\
         \tdefault: return inst_undefined(cpu);\n\
         \t}\n\
         }\n"
    );
}

#[test]
fn rust_routine_names() {
    let rust = Rust;

    assert_eq!(rust.routine(Routine::Calc(AddressingMode::DisplacedIX)), "calc_ind_dix");
    assert_eq!(rust.routine(Routine::ReadStatus), "cpu_read_sc");
    assert_eq!(rust.routine(Routine::Write(Width::Word)), "cpu_write16");
    assert_eq!(rust.routine(Routine::Operation(Operation::Cp, Width::Word)), "op_cp16");
}

#[test]
fn rust_registers_are_copied_through_locals() {
    assert_eq!(
        render_unit(&Rust, "4", "LD", &["A", "#nn"]),
        "fn inst_ld_a_imm8(cpu: &mut State) -> u32 {\n\
         \x20   let data1: u8 = cpu_imm8(cpu, Trace::Data);\n\
         \x20   let mut a0 = cpu.reg.a;\n\
         \x20   op_ld8(cpu, &mut a0, data1);\n\
         \x20   cpu.reg.a = a0;\n\
         \x20   4\n\
         }\n\n"
    );
}

#[test]
fn rust_read_only_registers_are_not_stored() {
    let text = render_unit(&Rust, "2", "CP", &["A", "B"]);

    assert!(text.contains("    let a0 = cpu.reg.a;\n"));
    assert!(text.contains("    let b1 = cpu.reg.b;\n"));
    assert!(text.contains("    op_cp8(cpu, a0, b1);\n"));
    assert!(!text.contains("cpu.reg.a = "));
}

#[test]
fn rust_narrow_immediates_widen() {
    let text = render_unit(&Rust, "3", "LD", &["BA", "#nn"]);

    assert!(text.contains("    let data1: u16 = cpu_imm8(cpu, Trace::Data).into();\n"));
    assert!(text.contains("    op_ld16(cpu, &mut ba0, data1);\n"));
}

#[test]
fn rust_write_only_memory() {
    let text = render_unit(&Rust, "3", "LD", &["[HL]", "A"]);

    assert!(text.contains("    let addr0 = calc_abs_hl(cpu);\n"));
    assert!(text.contains("    let mut data0: u8 = 0;\n"));
    assert!(text.contains("    op_ld8(cpu, &mut data0, a1);\n"));
    assert!(text.contains("    cpu_write8(cpu, data0, addr0, Trace::Data);\n"));
    assert!(!text.contains("cpu_read8"));
}

#[test]
fn rust_interrupt_blocking() {
    let text = render_unit(&Rust, "4", "RETE", &[]);

    assert!(text.ends_with("    4 + inst_advance(cpu) // Block IRQs\n}\n\n"));
}

#[test]
fn rust_dispatch() {
    assert_eq!(
        render_dispatch(&Rust),
        "pub fn inst_advance(cpu: &mut State) -> u32 {\n\
         \x20   match cpu_imm8(cpu, Trace::Instruction) {\n\
         \x20       0x00 => inst_nop(cpu),\n\
         \x20       0xCE => match cpu_imm8(cpu, Trace::ExInst) {\n\
         \x20           0x0A => inst_ld_a_b(cpu),\n\
         \x20           _ => inst_undefined(cpu),\n\
         \x20       },\n\
         \x20       _ => inst_undefined(cpu),\n\
         \x20   }\n\
         }\n"
    );
}
