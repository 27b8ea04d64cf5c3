use chrono::{DateTime, Utc};
use core::fmt;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use serde::{Deserialize, Serialize};
use truthtable::{tamper_protect::ProtectedState, Status, ValidationResult};

const FORMULA_SIZE: usize = 1024;
const MAX_PREMISE_COUNT: usize = 64;
const MAX_ANALYSIS_COUNT: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreErr {
    StorageErr(&'static str, usize),
    TooManyPremises(usize),
    Io(String),
}

impl fmt::Display for StoreErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreErr::StorageErr(field, limit) => {
                write!(f, "Analysis {field} exceeds size limit of {limit}")
            }
            StoreErr::TooManyPremises(n) => write!(
                f,
                "{n} premises given, at most {MAX_PREMISE_COUNT} are accepted"
            ),
            StoreErr::Io(msg) => write!(f, "Could not persist analysis: {msg}"),
        }
    }
}

/// A stored analysis. Only the verdict is kept, not the truth table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub id: u64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub premises: Vec<String>,
    pub conclusion: Option<String>,
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    pub status: Status,
    pub atoms: Vec<String>,
    #[serde(rename = "counterexampleCount")]
    pub counterexample_count: usize,
    pub explanation: String,
    pub seal: String,
}

impl ProtectedState for StoredAnalysis {
    fn compute_seal_info(&self) -> String {
        format!(
            "analysis|{}|{}|{:?}|{:?}|{}|{}|[{}]|{}|{}",
            self.id,
            self.created_at.to_rfc3339(),
            self.premises,
            self.conclusion,
            self.is_valid,
            self.status,
            self.atoms.join(", "),
            self.counterexample_count,
            self.explanation
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub invalid: usize,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    #[serde(rename = "nextId")]
    next_id: u64,
    analyses: Vec<StoredAnalysis>,
}

pub struct AnalysisStore {
    state: Mutex<StoreState>,
    path: PathBuf,
}

impl AnalysisStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut state: StoreState = match fs::read_to_string(&path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                log::warn!("Discarding unreadable state file {}: {e}", path.display());
                StoreState::default()
            }),
            Err(_) => StoreState::default(),
        };

        let before = state.analyses.len();
        state.analyses.retain(|a| a.verify_seal(&a.seal));
        if state.analyses.len() != before {
            log::warn!(
                "Dropped {} stored analyses with invalid seals",
                before - state.analyses.len()
            );
        }
        if let Some(max) = state.analyses.iter().map(|a| a.id).max() {
            state.next_id = state.next_id.max(max + 1);
        }

        Self {
            state: Mutex::new(state),
            path,
        }
    }

    pub fn add(
        &self,
        premises: Vec<String>,
        conclusion: Option<String>,
        result: &ValidationResult,
    ) -> Result<StoredAnalysis, StoreErr> {
        // Since we will be writing this to disk, let's
        // make sure that the input is somewhat sane
        check_input(&premises, conclusion.as_deref())?;

        let mut state = self.lock();
        let mut analysis = StoredAnalysis {
            id: state.next_id,
            created_at: Utc::now(),
            premises,
            conclusion,
            is_valid: result.is_valid,
            status: result.status,
            atoms: result.atoms.clone(),
            counterexample_count: result.counterexamples.len(),
            explanation: result.explanation.clone(),
            seal: String::new(),
        };
        analysis.seal = analysis.seal();

        state.next_id += 1;
        state.analyses.push(analysis.clone());
        if state.analyses.len() > MAX_ANALYSIS_COUNT {
            let excess = state.analyses.len() - MAX_ANALYSIS_COUNT;
            state.analyses.drain(..excess);
        }
        self.flush(&state)?;

        log::info!(
            "Stored analysis {} ({}, valid: {})",
            analysis.id,
            analysis.status,
            analysis.is_valid
        );
        Ok(analysis)
    }

    /// The `n` most recent analyses, newest first.
    pub fn recent(&self, n: usize) -> Vec<StoredAnalysis> {
        self.lock().analyses.iter().rev().take(n).cloned().collect()
    }

    pub fn stats(&self) -> Stats {
        let state = self.lock();
        Stats {
            total: state.analyses.len(),
            invalid: state.analyses.iter().filter(|a| !a.is_valid).count(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn flush(&self, state: &StoreState) -> Result<(), StoreErr> {
        let s = serde_json::to_string(state).map_err(|e| StoreErr::Io(e.to_string()))?;
        fs::write(&self.path, s).map_err(|e| {
            log::error!("Couldn't write {}: {e}", self.path.display());
            StoreErr::Io(e.to_string())
        })
    }
}

pub fn check_input(premises: &[String], conclusion: Option<&str>) -> Result<(), StoreErr> {
    if premises.len() > MAX_PREMISE_COUNT {
        return Err(StoreErr::TooManyPremises(premises.len()));
    }
    if premises.iter().any(|p| p.len() > FORMULA_SIZE) {
        return Err(StoreErr::StorageErr("premise", FORMULA_SIZE));
    }
    if conclusion.map_or(false, |c| c.len() > FORMULA_SIZE) {
        return Err(StoreErr::StorageErr("conclusion", FORMULA_SIZE));
    }
    Ok(())
}
