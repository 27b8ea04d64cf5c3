//! Truth table based validity checking.
//!
//! An argument is valid when no assignment of its atoms makes every
//! premise true and the conclusion false. [`validate`] decides this by
//! enumerating all `2^n` assignments of the `n` distinct atoms, so the
//! number of atoms is capped by [`Params::max_atoms`].

use std::iter;

use serde::{Deserialize, Serialize};

use crate::{
    consts::{DEFAULT_MAX_ATOMS, MAX_ATOMS_HARD_LIMIT},
    logging::targets::VALIDATE,
    logic::{collect_atoms, Formula, Interpretation},
    parse::parse,
};

pub mod result;

pub use result::{
    Example, FormulaError, FormulaRole, Status, TruthRow, ValidationResult, EXPLAIN_INVALID,
    EXPLAIN_NO_CONCLUSION, EXPLAIN_NO_PREMISES, EXPLAIN_PARSE_ERROR, EXPLAIN_VALID,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Params {
    #[serde(rename = "maxAtoms")]
    pub max_atoms: usize,
}

impl Params {
    pub fn with_max_atoms(max_atoms: usize) -> Self {
        Self { max_atoms }
    }

    /// The ceiling actually enforced.
    pub fn atom_limit(&self) -> usize {
        self.max_atoms.min(MAX_ATOMS_HARD_LIMIT)
    }
}

impl Default for Params {
    fn default() -> Self {
        Params {
            max_atoms: DEFAULT_MAX_ATOMS,
        }
    }
}

/// Checks whether `premises` entail `conclusion` with the default [`Params`].
pub fn validate<S: AsRef<str>>(premises: &[S], conclusion: Option<&str>) -> ValidationResult {
    validate_with(premises, conclusion, &Params::default())
}

/// Checks whether `premises` entail `conclusion`.
///
/// Never fails: missing input, malformed formulas and too many atoms all
/// produce a result with `is_valid == false`, an empty table and a
/// matching [`Status`].
pub fn validate_with<S: AsRef<str>>(
    premises: &[S],
    conclusion: Option<&str>,
    params: &Params,
) -> ValidationResult {
    if premises.is_empty() {
        return ValidationResult::degenerate(Status::InsufficientPremises, EXPLAIN_NO_PREMISES);
    }
    let conclusion = match conclusion {
        Some(c) => c,
        None => {
            return ValidationResult::degenerate(Status::MissingConclusion, EXPLAIN_NO_CONCLUSION)
        }
    };

    let mut parsed = Vec::with_capacity(premises.len());
    for (i, p) in premises.iter().enumerate() {
        let p = p.as_ref();
        match parse(p) {
            Ok(f) => parsed.push(f),
            Err(e) => {
                return ValidationResult::parse_failure(FormulaError::new(
                    FormulaRole::Premise(i),
                    p,
                    &e,
                ))
            }
        }
    }
    let parsed_conclusion = match parse(conclusion) {
        Ok(f) => f,
        Err(e) => {
            return ValidationResult::parse_failure(FormulaError::new(
                FormulaRole::Conclusion,
                conclusion,
                &e,
            ))
        }
    };

    validate_formulas(&parsed, Some(&parsed_conclusion), params)
}

/// Like [`validate_with`], for formulas that are already parsed.
pub fn validate_formulas(
    premises: &[Formula],
    conclusion: Option<&Formula>,
    params: &Params,
) -> ValidationResult {
    if premises.is_empty() {
        return ValidationResult::degenerate(Status::InsufficientPremises, EXPLAIN_NO_PREMISES);
    }
    let conclusion = match conclusion {
        Some(c) => c,
        None => {
            return ValidationResult::degenerate(Status::MissingConclusion, EXPLAIN_NO_CONCLUSION)
        }
    };

    let atoms = collect_atoms(premises.iter().chain(iter::once(conclusion)));
    let limit = params.atom_limit();
    if atoms.len() > limit {
        log::warn!(
            target: VALIDATE,
            "Refusing to enumerate {} atoms (limit {})",
            atoms.len(),
            limit
        );
        return ValidationResult::resource_limit(atoms.len(), limit);
    }

    let row_count: u64 = 1 << atoms.len();
    log::debug!(
        target: VALIDATE,
        "Enumerating {} rows over {:?} for {} premises",
        row_count,
        atoms,
        premises.len()
    );

    let mut truth_table = Vec::with_capacity(row_count as usize);
    let mut counterexamples = vec![];

    for mask in 0..row_count {
        let row = MaskRow {
            atoms: &atoms,
            mask,
        };
        let values = (0..atoms.len()).map(|i| mask >> i & 1 == 1).collect();
        let premise_values = premises.iter().map(|p| row.eval(p)).collect();
        let truth_row = TruthRow::new(values, premise_values, row.eval(conclusion));

        if truth_row.is_counterexample() {
            counterexamples.push(truth_row.clone());
        }
        truth_table.push(truth_row);
    }

    log::debug!(
        target: VALIDATE,
        "{} counterexamples in {} rows",
        counterexamples.len(),
        truth_table.len()
    );

    ValidationResult::checked(atoms, truth_table, counterexamples)
}

/// The assignment of one enumeration step: bit `i` of `mask` is the value
/// of `atoms[i]`. `atoms` must be sorted.
struct MaskRow<'a> {
    atoms: &'a [String],
    mask: u64,
}

impl<'a> MaskRow<'a> {
    fn eval(&self, f: &Formula) -> bool {
        match f.eval(self) {
            Ok(v) => v,
            Err(e) => unreachable!("atoms are collected from every evaluated formula: {e}"),
        }
    }
}

impl<'a> Interpretation for MaskRow<'a> {
    fn value_of(&self, atom: &str) -> Option<bool> {
        self.atoms
            .binary_search_by(|a| a.as_str().cmp(atom))
            .ok()
            .map(|i| self.mask >> i & 1 == 1)
    }
}
