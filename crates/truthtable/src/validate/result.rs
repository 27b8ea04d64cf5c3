use std::fmt;

use serde::{
    ser::{SerializeMap, SerializeStruct},
    Deserialize, Serialize, Serializer,
};

use crate::{logic::Assignment, parse::ParseErr};

pub const EXPLAIN_VALID: &str =
    "in no assignment are all premises true while the conclusion is false";
pub const EXPLAIN_INVALID: &str =
    "at least one assignment makes all premises true and the conclusion false";
pub const EXPLAIN_NO_PREMISES: &str = "insufficient premises";
pub const EXPLAIN_NO_CONCLUSION: &str = "no conclusion — validity cannot be tested";
pub const EXPLAIN_PARSE_ERROR: &str = "formula parse error";
const EXPLAIN_COUNTEREXAMPLE: &str = "all premises are true but the conclusion is false";

/// How a validation ended. Only `Checked` results carry a truth table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "CHECKED")]
    Checked,
    #[serde(rename = "INSUFFICIENT_PREMISES")]
    InsufficientPremises,
    #[serde(rename = "MISSING_CONCLUSION")]
    MissingConclusion,
    #[serde(rename = "PARSE_ERROR")]
    ParseError,
    #[serde(rename = "RESOURCE_LIMIT_EXCEEDED")]
    ResourceLimitExceeded,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Checked => write!(f, "CHECKED"),
            Status::InsufficientPremises => write!(f, "INSUFFICIENT_PREMISES"),
            Status::MissingConclusion => write!(f, "MISSING_CONCLUSION"),
            Status::ParseError => write!(f, "PARSE_ERROR"),
            Status::ResourceLimitExceeded => write!(f, "RESOURCE_LIMIT_EXCEEDED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormulaRole {
    Premise(usize),
    Conclusion,
}

impl fmt::Display for FormulaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaRole::Premise(i) => write!(f, "premise {i}"),
            FormulaRole::Conclusion => write!(f, "conclusion"),
        }
    }
}

/// The formula that failed to parse and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormulaError {
    pub formula: FormulaRole,
    pub source: String,
    pub message: String,
    pub position: Option<usize>,
}

impl FormulaError {
    pub fn new(formula: FormulaRole, source: &str, e: &ParseErr) -> Self {
        Self {
            formula,
            source: source.to_string(),
            message: e.to_string(),
            position: e.position(),
        }
    }
}

/// Readable summary of the first counterexample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    pub scenario: String,
    /// The counterexample's assignment by atom name.
    pub values: Assignment,
    pub premises: Vec<bool>,
    pub conclusion: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthRow {
    /// Truth values of the atoms, in atom order.
    pub values: Vec<bool>,
    /// Truth values of the premises, in input order.
    pub premises: Vec<bool>,
    pub conclusion: bool,
    pub all_premises: bool,
    pub valid: bool,
}

impl TruthRow {
    pub fn new(values: Vec<bool>, premises: Vec<bool>, conclusion: bool) -> Self {
        let all_premises = premises.iter().all(|p| *p);
        Self {
            values,
            premises,
            conclusion,
            all_premises,
            valid: !all_premises || conclusion,
        }
    }

    pub fn is_counterexample(&self) -> bool {
        self.all_premises && !self.conclusion
    }

    pub fn assignment(&self, atoms: &[String]) -> Assignment {
        atoms.iter().cloned().zip(self.values.iter().copied()).collect()
    }

    /// `P=true, Q=false` style rendering of the row's assignment.
    pub fn scenario(&self, atoms: &[String]) -> String {
        let parts: Vec<String> = atoms
            .iter()
            .zip(&self.values)
            .map(|(a, v)| format!("{a}={v}"))
            .collect();
        parts.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub status: Status,
    pub is_valid: bool,
    pub atoms: Vec<String>,
    pub truth_table: Vec<TruthRow>,
    pub counterexamples: Vec<TruthRow>,
    pub example: Option<Example>,
    pub explanation: String,
    pub error: Option<FormulaError>,
}

impl ValidationResult {
    pub(crate) fn degenerate(status: Status, explanation: &str) -> Self {
        Self {
            status,
            is_valid: false,
            atoms: vec![],
            truth_table: vec![],
            counterexamples: vec![],
            example: None,
            explanation: explanation.to_string(),
            error: None,
        }
    }

    pub(crate) fn parse_failure(error: FormulaError) -> Self {
        Self {
            error: Some(error),
            ..Self::degenerate(Status::ParseError, EXPLAIN_PARSE_ERROR)
        }
    }

    pub(crate) fn resource_limit(atom_count: usize, limit: usize) -> Self {
        Self::degenerate(
            Status::ResourceLimitExceeded,
            &format!(
                "{atom_count} distinct atoms exceed the enumeration limit of {limit}"
            ),
        )
    }

    pub(crate) fn checked(
        atoms: Vec<String>,
        truth_table: Vec<TruthRow>,
        counterexamples: Vec<TruthRow>,
    ) -> Self {
        let is_valid = counterexamples.is_empty();
        let example = counterexamples.first().map(|row| Example {
            scenario: row.scenario(&atoms),
            values: row.assignment(&atoms),
            premises: row.premises.clone(),
            conclusion: row.conclusion,
            explanation: EXPLAIN_COUNTEREXAMPLE.to_string(),
        });
        let explanation = if is_valid {
            EXPLAIN_VALID
        } else {
            EXPLAIN_INVALID
        };

        Self {
            status: Status::Checked,
            is_valid,
            atoms,
            truth_table,
            counterexamples,
            example,
            explanation: explanation.to_string(),
            error: None,
        }
    }
}

impl Serialize for ValidationResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ValidationResult", 8)?;
        state.serialize_field("isValid", &self.is_valid)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("atoms", &self.atoms)?;
        state.serialize_field(
            "truthTable",
            &RowsView {
                atoms: &self.atoms,
                rows: &self.truth_table,
                with_scenario: false,
            },
        )?;
        state.serialize_field(
            "counterexamples",
            &RowsView {
                atoms: &self.atoms,
                rows: &self.counterexamples,
                with_scenario: true,
            },
        )?;
        state.serialize_field("example", &self.example)?;
        state.serialize_field("explanation", &self.explanation)?;
        match &self.error {
            Some(e) => state.serialize_field("error", e)?,
            None => state.skip_field("error")?,
        }
        state.end()
    }
}

struct RowsView<'a> {
    atoms: &'a [String],
    rows: &'a [TruthRow],
    with_scenario: bool,
}

impl<'a> Serialize for RowsView<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.rows.iter().map(|row| RowView {
            atoms: self.atoms,
            row,
            with_scenario: self.with_scenario,
        }))
    }
}

/// A row as a flat JSON object. Atom columns come first so the fixed
/// columns win for an atom that happens to share their name.
struct RowView<'a> {
    atoms: &'a [String],
    row: &'a TruthRow,
    with_scenario: bool,
}

impl<'a> Serialize for RowView<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self.atoms.len() + if self.with_scenario { 5 } else { 4 };
        let mut map = serializer.serialize_map(Some(len))?;
        for (atom, value) in self.atoms.iter().zip(&self.row.values) {
            map.serialize_entry(atom, value)?;
        }
        map.serialize_entry("premises", &self.row.premises)?;
        map.serialize_entry("conclusion", &self.row.conclusion)?;
        map.serialize_entry("ALL_PREMISES", &self.row.all_premises)?;
        map.serialize_entry("VALID", &self.row.valid)?;
        if self.with_scenario {
            map.serialize_entry("scenario", &self.row.scenario(self.atoms))?;
        }
        map.end()
    }
}
