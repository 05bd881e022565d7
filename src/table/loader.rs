//! Table loading from comma-separated text

use crate::error::{Error, LoadErrorKind, Result};
use crate::table::{CycleCost, InstructionRow, Page, Table};
use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::Path;
use std::{fs, io};

/// The opcode column, followed by (cycles, mnemonic, operand, operand) for
/// each page.
const FIELDS_PER_LINE: usize = 1 + 4 * 3;

/// Mnemonic marking a page slot that has no instruction.
const UNDEFINED: &str = "undefined";

/// Split one line of the table into its fields.
///
/// Fields may be quoted so that conditional cycle counts like `"8,12"` can
/// contain a comma. A doubled quote inside a quoted field is a literal
/// quote.
fn split_fields(line: &str) -> std::result::Result<Vec<String>, LoadErrorKind> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            ('"', true) => quoted = false,
            ('"', false) => quoted = true,
            (',', false) => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            (c, _) => field.push(c),
        }
    }

    if quoted {
        return Err(LoadErrorKind::UnterminatedQuote);
    }

    fields.push(field.trim().to_string());

    Ok(fields)
}

fn parse_opcode(field: &str) -> std::result::Result<u8, LoadErrorKind> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);

    if digits.is_empty() || digits.len() > 2 {
        return Err(LoadErrorKind::Opcode(field.to_string()));
    }

    u8::from_str_radix(digits, 16).map_err(|_| LoadErrorKind::Opcode(field.to_string()))
}

/// Parse the page slots of one table line.
fn parse_line(fields: &[String]) -> std::result::Result<(u8, Vec<InstructionRow>), LoadErrorKind> {
    if fields.len() != FIELDS_PER_LINE {
        return Err(LoadErrorKind::FieldCount(fields.len()));
    }

    let opcode = parse_opcode(&fields[0])?;
    let mut rows = Vec::new();

    for (page, group) in Page::iter().zip(fields[1..].chunks(4)) {
        let mnemonic = group[1].as_str();

        if mnemonic == UNDEFINED {
            continue;
        }

        if mnemonic.is_empty() {
            return Err(LoadErrorKind::EmptyMnemonic(page));
        }

        let cycles = group[0]
            .parse::<CycleCost>()
            .map_err(|_| LoadErrorKind::Cycles(group[0].clone()))?;

        rows.push(InstructionRow::new(
            opcode,
            page,
            cycles,
            mnemonic,
            &[group[2].as_str(), group[3].as_str()],
        ));
    }

    Ok((opcode, rows))
}

impl Table {
    /// Read an instruction table from a file.
    pub fn read(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;

        Self::parse(io::BufReader::new(file))
    }

    /// Parse an instruction table.
    ///
    /// The first non-blank line is a column header and is ignored. Any
    /// malformed line fails the whole table.
    pub fn parse<R>(reader: R) -> Result<Self>
    where
        R: BufRead,
    {
        let mut table = Table::default();
        let mut seen = BTreeSet::new();
        let mut header = true;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;

            if line.trim().is_empty() {
                continue;
            }

            if header {
                header = false;
                continue;
            }

            let fields = split_fields(&line).map_err(|e| Error::load(line_number, e))?;
            let (opcode, rows) = parse_line(&fields).map_err(|e| Error::load(line_number, e))?;

            if !seen.insert(opcode) {
                return Err(Error::load(
                    line_number,
                    LoadErrorKind::DuplicateOpcode(opcode),
                ));
            }

            table.rows.extend(rows);
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::split_fields;

    #[test]
    fn quoted_fields() {
        assert_eq!(
            split_fields(r#"E4,"8,12",JRS,Z,rr"#).unwrap(),
            vec!["E4", "8,12", "JRS", "Z", "rr"]
        );
        assert_eq!(split_fields(r#"a,"say ""hi""",b"#).unwrap(), vec!["a", r#"say "hi""#, "b"]);
        assert_eq!(split_fields(" a , b ,").unwrap(), vec!["a", "b", ""]);
        assert!(split_fields(r#"a,"b"#).is_err());
    }
}
