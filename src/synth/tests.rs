//! Synthesizer test suite

use crate::synth::{synthesize, Argument as Arg, Reason, Step, Unit};
use crate::table::{CycleCost, InstructionRow, Page};
use crate::vocab::{AddressingMode as Mode, Condition, Direction as Dir, Operation as Op, Register as Reg, Width};

fn row(cycles: &str, mnemonic: &str, operands: &[&str]) -> InstructionRow {
    InstructionRow::new(0x00, Page::Primary, cycles.parse().unwrap(), mnemonic, operands)
}

fn unit(cycles: &str, mnemonic: &str, operands: &[&str]) -> Unit {
    synthesize(&row(cycles, mnemonic, operands)).unwrap()
}

fn steps(unit: &Unit) -> Vec<Step> {
    unit.iter_steps().cloned().collect()
}

macro_rules! assert_unresolved {
    ($mnemonic: expr, $operands: expr, $reason: pat) => {
        let r = row("4", $mnemonic, $operands);
        match synthesize(&r) {
            Err(unresolved) => assert!(
                matches!(unresolved.reason(), $reason),
                "unexpected reason {:?}",
                unresolved.reason()
            ),
            Ok(unit) => panic!("{} unexpectedly synthesized", unit.name()),
        }
    };
}

#[test]
fn load_immediate() {
    let unit = unit("4", "LD", &["A", "#nn"]);

    assert_eq!(unit.name(), "inst_ld_a_imm8");
    assert_eq!(
        steps(&unit),
        vec![
            Step::FetchImmediate {
                slot: 1,
                width: Width::Byte,
                fetch: Width::Byte
            },
            Step::Execute {
                operation: Op::Ld,
                width: Width::Byte,
                arguments: vec![
                    Arg::Register {
                        slot: 0,
                        register: Reg::A,
                        direction: Dir::Write
                    },
                    Arg::Data {
                        slot: 1,
                        direction: Dir::Read
                    },
                ]
            },
            Step::Return {
                cycles: 4,
                block_interrupts: false
            },
        ]
    );
}

#[test]
fn operand_width_widens_operation() {
    let memory = unit("12", "LD", &["BA", "[HL]"]);

    assert_eq!(
        steps(&memory)[..2],
        [
            Step::ComputeAddress {
                slot: 1,
                mode: Mode::RegisterHL
            },
            Step::ReadMemory {
                slot: 1,
                width: Width::Word,
                mutable: false
            },
        ]
    );

    let immediate = unit("8", "LD", &["BA", "#nn"]);
    assert_eq!(
        steps(&immediate)[0],
        Step::FetchImmediate {
            slot: 1,
            width: Width::Word,
            fetch: Width::Byte
        }
    );
}

#[test]
fn conditional_skip() {
    let unit = unit("8,12", "CP", &["Z", "A", "B"]);
    let steps = steps(&unit);

    assert_eq!(unit.name(), "inst_cp_z_a_b");
    assert_eq!(
        steps[0],
        Step::SkipUnless {
            condition: Condition::Z,
            cycles: 12
        }
    );
    assert!(matches!(steps[1], Step::Execute { operation: Op::Cp, .. }));
    assert_eq!(
        steps[2],
        Step::Return {
            cycles: 8,
            block_interrupts: false
        }
    );
}

#[test]
fn conditional_skip_precedes_side_effects() {
    let unit = unit("8,12", "INC", &["NC", "[HL]"]);
    let steps = steps(&unit);
    let skip = steps
        .iter()
        .position(|s| matches!(s, Step::SkipUnless { .. }))
        .unwrap();

    for (i, step) in steps.iter().enumerate() {
        match step {
            Step::ComputeAddress { .. } | Step::ReadMemory { .. } | Step::FetchImmediate { .. } => {
                assert!(i < skip)
            }
            Step::Execute { .. }
            | Step::WriteMemory { .. }
            | Step::WriteStatus
            | Step::ReadStatus { .. }
            | Step::ReserveStatus
            | Step::Return { .. } => assert!(i > skip),
            _ => {}
        }
    }
}

#[test]
fn read_only_memory_is_never_written() {
    let unit = unit("12", "CP", &["A", "[IX+dd]"]);
    let steps = steps(&unit);

    assert!(steps.contains(&Step::ReadMemory {
        slot: 1,
        width: Width::Byte,
        mutable: false
    }));
    assert!(!steps.iter().any(|s| matches!(s, Step::WriteMemory { .. })));
}

#[test]
fn write_only_memory_is_never_read() {
    let unit = unit("12", "LD", &["[BR:ll]", "A"]);
    let steps = steps(&unit);

    assert_eq!(
        steps[..2],
        [
            Step::ComputeAddress {
                slot: 0,
                mode: Mode::BasePage
            },
            Step::ReserveMemory {
                slot: 0,
                width: Width::Byte
            },
        ]
    );
    assert!(!steps.iter().any(|s| matches!(s, Step::ReadMemory { .. })));
    assert!(steps.contains(&Step::WriteMemory {
        slot: 0,
        width: Width::Byte
    }));
}

#[test]
fn read_modify_write_memory() {
    let unit = unit("16", "ADD", &["[HL]", "#nn"]);

    assert_eq!(
        steps(&unit),
        vec![
            Step::ComputeAddress {
                slot: 0,
                mode: Mode::RegisterHL
            },
            Step::ReadMemory {
                slot: 0,
                width: Width::Byte,
                mutable: true
            },
            Step::FetchImmediate {
                slot: 1,
                width: Width::Byte,
                fetch: Width::Byte
            },
            Step::Execute {
                operation: Op::Add,
                width: Width::Byte,
                arguments: vec![
                    Arg::Data {
                        slot: 0,
                        direction: Dir::ReadWrite
                    },
                    Arg::Data {
                        slot: 1,
                        direction: Dir::Read
                    },
                ]
            },
            Step::WriteMemory {
                slot: 0,
                width: Width::Byte
            },
            Step::Return {
                cycles: 16,
                block_interrupts: false
            },
        ]
    );
}

#[test]
fn status_register_access() {
    let written = steps(&unit("12", "LD", &["SC", "#nn"]));
    assert!(written.contains(&Step::ReserveStatus));
    assert!(written.contains(&Step::WriteStatus));
    assert!(!written.iter().any(|s| matches!(s, Step::ReadStatus { .. })));

    let read = steps(&unit("8", "LD", &["A", "SC"]));
    assert!(read.contains(&Step::ReadStatus { mutable: false }));
    assert!(!read.contains(&Step::WriteStatus));

    let modified = steps(&unit("12", "AND", &["SC", "#nn"]));
    let read_at = modified
        .iter()
        .position(|s| *s == Step::ReadStatus { mutable: true })
        .unwrap();
    let exec_at = modified
        .iter()
        .position(|s| matches!(s, Step::Execute { .. }))
        .unwrap();
    let write_at = modified.iter().position(|s| *s == Step::WriteStatus).unwrap();
    assert!(read_at < exec_at && exec_at < write_at);

    match &modified[exec_at] {
        Step::Execute { arguments, .. } => assert_eq!(
            arguments[0],
            Arg::Status {
                direction: Dir::ReadWrite
            }
        ),
        _ => unreachable!(),
    }
}

#[test]
fn interrupt_blocking() {
    let blocks = |unit: &Unit| {
        unit.iter_steps().any(|s| {
            matches!(
                s,
                Step::Return {
                    block_interrupts: true,
                    ..
                }
            )
        })
    };

    assert!(blocks(&unit("12", "LD", &["SC", "#nn"])));
    assert!(blocks(&unit("12", "AND", &["SC", "#nn"])));
    assert!(blocks(&unit("8", "LD", &["NB", "#nn"])));
    assert!(blocks(&unit("8", "POP", &["SC"])));
    assert!(blocks(&unit("8", "RETE", &[])));

    assert!(!blocks(&unit("8", "LD", &["A", "SC"])));
    assert!(!blocks(&unit("8", "LD", &["A", "NB"])));
    assert!(!blocks(&unit("8", "PUSH", &["SC"])));
    assert!(!blocks(&unit("4", "LD", &["A", "B"])));

    let rete = unit("8", "RETE", &[]);
    assert_eq!(
        rete.iter_steps().last(),
        Some(&Step::Return {
            cycles: 8,
            block_interrupts: true
        })
    );
}

#[test]
fn identical_rows_produce_identical_units() {
    let a = synthesize(&InstructionRow::new(
        0x10,
        Page::Primary,
        CycleCost::fixed(8),
        "LD",
        &["A", "#nn"],
    ))
    .unwrap();
    let b = synthesize(&InstructionRow::new(
        0x20,
        Page::ExtendedB,
        CycleCost::fixed(8),
        "LD",
        &["A", "rr"],
    ))
    .unwrap();

    assert_eq!(a, b);
}

#[test]
fn stack_operations_take_operand_width() {
    let unit = unit("16", "PUSH", &["BA"]);

    assert!(unit.iter_steps().any(|s| matches!(
        s,
        Step::Execute {
            operation: Op::Push,
            width: Width::Word,
            ..
        }
    )));
}

#[test]
fn vector_operand() {
    let unit = unit("20", "INT", &["[kk]"]);

    assert_eq!(
        steps(&unit)[..2],
        [
            Step::ComputeAddress {
                slot: 0,
                mode: Mode::Vector
            },
            Step::ReadMemory {
                slot: 0,
                width: Width::Word,
                mutable: false
            },
        ]
    );
}

#[test]
fn unresolved_rows() {
    assert_unresolved!("NOP", &[], Reason::UnknownOperation(_));
    assert_unresolved!("PUSH", &["ALL"], Reason::UnknownOperand(_));
    assert_unresolved!("RETE", &["A"], Reason::TooManyOperands { given: 1, .. });
    assert_unresolved!("INC", &["A", "B"], Reason::TooManyOperands { accepted: 1, .. });
    assert_unresolved!("PUSH", &[], Reason::Unsized(Op::Push));
    assert_unresolved!("LD", &["#nn", "A"], Reason::WrittenImmediate(_));
}

#[test]
fn delegates_share_the_row_name() {
    let r = row("8,12", "JRS", &["C", "ALL"]);
    let unresolved = synthesize(&r).unwrap_err();
    let delegate = unresolved.delegate();

    assert_eq!(delegate.routine(), "inst_jrs_c_all");
    assert_eq!(delegate.name(), "clock_inst_jrs_c_all");
    assert_eq!(delegate.cycles(), 8);
    assert_eq!(unresolved.row(), &r);

    let nop = synthesize(&row("4", "NOP", &[])).unwrap_err().delegate();
    assert_eq!(nop.name(), "clock_inst_nop");
}
