//! Unit collection and dispatch emission

use crate::dialect::Dialect;
use crate::dispatch::{Delegation, Emission, Prefixes};
use crate::error::{Error, Result};
use crate::synth::{synthesize, Identity, Routine};
use crate::table::{InstructionRow, Page, Table};
use crate::vocab::Width;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::{self, Write};

/// One arm of a dispatch switch.
enum Case<'a> {
    Call(&'a str),
    Page(Page),
}

/// Collects synthesized units and delegates, and emits them along with the
/// decoder that dispatches to them.
///
/// Each distinct identity is emitted once, at the position where it was
/// first added. Emission never iterates a hash map, so the same rows always
/// produce the same output.
#[derive(Clone, Debug)]
pub struct Assembler {
    prefixes: Prefixes,

    /// Index into `emissions` for each identity seen so far.
    memo: HashMap<Identity, usize>,

    /// Index into `emissions` for each generated name, so that distinct
    /// identities never share one.
    names: HashMap<String, usize>,

    /// Emissions in first-occurrence order, with the location of the row
    /// that first produced each.
    emissions: Vec<(Emission, String)>,

    /// Dispatch targets for each page, indexed by `Page::index`.
    cases: [BTreeMap<u8, String>; 3],

    delegated: Vec<Delegation>,
}

impl Assembler {
    pub fn new(prefixes: Prefixes) -> Self {
        Assembler {
            prefixes,
            memo: HashMap::new(),
            names: HashMap::new(),
            emissions: Vec::new(),
            cases: [BTreeMap::new(), BTreeMap::new(), BTreeMap::new()],
            delegated: Vec::new(),
        }
    }

    /// Assemble every row of a table, in table order.
    pub fn from_table(table: &Table, prefixes: Prefixes) -> Result<Self> {
        let mut asm = Assembler::new(prefixes);

        for row in table.iter_rows() {
            asm.add_row(row)?;
        }

        Ok(asm)
    }

    /// Synthesize one row and give it a dispatch case.
    ///
    /// Rows the synthesizer can't handle get a delegate instead. A row whose
    /// identity has already been seen reuses the earlier emission, which
    /// must be identical to what this row would have produced.
    pub fn add_row(&mut self, row: &InstructionRow) -> Result<()> {
        if row.page() == Page::Primary && self.prefixes.page_at(row.opcode()).is_some() {
            return Err(Error::PrefixCollision(row.opcode()));
        }

        if self.cases[row.page().index()].contains_key(&row.opcode()) {
            return Err(Error::DuplicateCase(row.location()));
        }

        let emission = match synthesize(row) {
            Ok(unit) => {
                log::debug!("{}: {} synthesized as {}", row.location(), row, unit.name());

                Emission::Unit(unit)
            }
            Err(unresolved) => {
                let delegate = unresolved.delegate();

                log::warn!(
                    "{}: {} needs a hand-written {}: {}",
                    row.location(),
                    row,
                    delegate.routine(),
                    unresolved.reason()
                );

                self.delegated.push(Delegation::new(&unresolved));

                Emission::Delegate(delegate)
            }
        };

        let target = emission.target();

        match self.memo.get(emission.identity()) {
            Some(&index) => {
                let (first, location) = &self.emissions[index];

                if *first != emission {
                    return Err(Error::ConflictingUnit {
                        name: target,
                        first: location.clone(),
                        second: row.location(),
                    });
                }
            }
            None => {
                let name = emission.identity().name();

                if let Some(&index) = self.names.get(&name) {
                    return Err(Error::NameCollision {
                        name,
                        first: self.emissions[index].1.clone(),
                        second: row.location(),
                    });
                }

                self.names.insert(name, self.emissions.len());
                self.memo
                    .insert(emission.identity().clone(), self.emissions.len());
                self.emissions.push((emission, row.location()));
            }
        }

        self.cases[row.page().index()].insert(row.opcode(), target);

        Ok(())
    }

    /// Iterate every distinct emission, in the order it will be printed.
    pub fn iter_emissions(&self) -> impl Iterator<Item = &Emission> {
        self.emissions.iter().map(|(e, _)| e)
    }

    pub fn unit_count(&self) -> usize {
        self.iter_emissions()
            .filter(|e| matches!(e, Emission::Unit(_)))
            .count()
    }

    pub fn delegate_count(&self) -> usize {
        self.iter_emissions()
            .filter(|e| matches!(e, Emission::Delegate(_)))
            .count()
    }

    /// Every row that was delegated, in table order.
    pub fn iter_delegated(&self) -> impl Iterator<Item = &Delegation> {
        self.delegated.iter()
    }

    /// The dispatch target for one page and opcode, if the opcode is defined.
    pub fn case(&self, page: Page, opcode: u8) -> Option<&str> {
        self.cases[page.index()].get(&opcode).map(|s| s.as_str())
    }

    /// The external routines generated code calls into, as the given dialect
    /// names them.
    ///
    /// Hand-written delegation targets are not included; see
    /// `delegation_targets`.
    pub fn collaborators(&self, dialect: &dyn Dialect) -> BTreeSet<String> {
        let mut routines = BTreeSet::new();

        routines.insert(Routine::Immediate(Width::Byte));
        routines.insert(Routine::Undefined);

        for emission in self.iter_emissions() {
            if let Emission::Unit(unit) = emission {
                routines.extend(unit.iter_routines());
            }
        }

        routines.into_iter().map(|r| dialect.routine(r)).collect()
    }

    /// The hand-written routines delegates call.
    pub fn delegation_targets(&self) -> BTreeSet<String> {
        self.iter_emissions()
            .filter_map(|e| match e {
                Emission::Delegate(delegate) => Some(delegate.routine()),
                Emission::Unit(_) => None,
            })
            .collect()
    }

    /// The arms of one page's switch, in opcode order.
    fn iter_cases(&self, page: Page) -> impl Iterator<Item = (u8, Case<'_>)> {
        let mut arms: BTreeMap<u8, Case<'_>> = self.cases[page.index()]
            .iter()
            .map(|(op, target)| (*op, Case::Call(target.as_str())))
            .collect();

        if page == Page::Primary {
            for extended in Page::iter() {
                if let Some(byte) = self.prefixes.prefix(extended) {
                    arms.insert(byte, Case::Page(extended));
                }
            }
        }

        arms.into_iter()
    }

    fn emit_switch(
        &self,
        dialect: &dyn Dialect,
        stream: &mut dyn Write,
        page: Page,
        depth: usize,
    ) -> io::Result<()> {
        for (opcode, case) in self.iter_cases(page) {
            match case {
                Case::Call(target) => dialect.emit_case(stream, depth, opcode, target)?,
                Case::Page(extended) => {
                    dialect.emit_page_case_start(stream, depth, opcode)?;
                    self.emit_switch(dialect, stream, extended, depth + 1)?;
                    dialect.emit_page_case_end(stream, depth)?;
                }
            }
        }

        dialect.emit_default_case(stream, depth)
    }

    /// Emit every unit and delegate, followed by the dispatch entry point.
    pub fn emit(&self, dialect: &dyn Dialect, stream: &mut dyn Write) -> io::Result<()> {
        dialect.emit_preamble(stream)?;

        for emission in self.iter_emissions() {
            match emission {
                Emission::Unit(unit) => dialect.emit_unit(stream, unit)?,
                Emission::Delegate(delegate) => dialect.emit_delegate(stream, delegate)?,
            }
        }

        dialect.emit_dispatch_start(stream)?;
        self.emit_switch(dialect, stream, Page::Primary, 1)?;
        dialect.emit_dispatch_end(stream)
    }
}
