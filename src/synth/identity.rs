//! Unit naming

use crate::vocab::{Condition, Operand};
use std::fmt;

/// Fold a table token into something usable as part of an identifier.
///
/// Letters and digits are lowercased; every run of anything else becomes a
/// single underscore, and underscores at either end are dropped.
fn identifier_part(token: &str) -> String {
    let mut out = String::new();
    let mut pending_separator = false;

    for c in token.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }

            pending_separator = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    out
}

/// The structural identity of a table row: its mnemonic, its condition,
/// and the names of its operands.
///
/// Every row with the same identity compiles to the same unit, so this is
/// also the key the dispatch assembler deduplicates on. Operand tokens that
/// resolve contribute their canonical name; tokens outside the vocabulary
/// contribute their raw text. That way a row names the same routine whether
/// or not synthesis succeeds for it.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Identity {
    mnemonic: String,
    condition: Option<Condition>,
    operands: Vec<String>,
}

impl Identity {
    /// Compute the identity of a mnemonic and its raw operand tokens.
    ///
    /// A leading token that names a condition is taken to be the
    /// instruction's condition. Returns the identity along with the tokens
    /// that are true operands.
    pub fn of<'a>(mnemonic: &str, tokens: &[&'a str]) -> (Self, Vec<&'a str>) {
        let (condition, operands) = match tokens.split_first() {
            Some((first, rest)) => match Condition::from_token(first) {
                Some(cond) => (Some(cond), rest.to_vec()),
                None => (None, tokens.to_vec()),
            },
            None => (None, vec![]),
        };

        let identity = Identity {
            mnemonic: mnemonic.to_string(),
            condition,
            operands: operands
                .iter()
                .map(|t| match Operand::from_token(t) {
                    Some(op) => op.canonical_name().to_string(),
                    None => t.to_string(),
                })
                .collect(),
        };

        (identity, operands)
    }

    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    pub fn condition(&self) -> Option<Condition> {
        self.condition
    }

    /// The unit's entry point name.
    pub fn name(&self) -> String {
        let mut parts = vec![identifier_part(&self.mnemonic)];

        if let Some(cond) = self.condition {
            parts.push(identifier_part(cond.token()));
        }

        for operand in self.operands.iter() {
            parts.push(identifier_part(operand));
        }

        format!("inst_{}", parts.join("_"))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
