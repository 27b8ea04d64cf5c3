use std::env;

use lazy_static::lazy_static;
use truthtable::{Params, DEFAULT_MAX_ATOMS, MAX_ATOMS_HARD_LIMIT};

const DEFAULT_BIND: &str = "127.0.0.1:7000";
const DEFAULT_STATE_PATH: &str = "truthtable-state.json";

const BIND_VAR: &str = "TRUTHTABLE_BIND";
const MAX_ATOMS_VAR: &str = "TRUTHTABLE_MAX_ATOMS";
const STATE_VAR: &str = "TRUTHTABLE_STATE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: String,
    pub params: Params,
    pub state_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| env::var(k).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_atoms = match lookup(MAX_ATOMS_VAR) {
            Some(v) => match v.trim().parse::<usize>() {
                Ok(n) => {
                    if n > MAX_ATOMS_HARD_LIMIT {
                        log::warn!(
                            "{MAX_ATOMS_VAR}={n} is above the hard limit, using {MAX_ATOMS_HARD_LIMIT}"
                        );
                    }
                    n
                }
                Err(_) => {
                    log::warn!("Ignoring invalid {MAX_ATOMS_VAR} '{v}'");
                    DEFAULT_MAX_ATOMS
                }
            },
            None => DEFAULT_MAX_ATOMS,
        };

        Self {
            bind: lookup(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string()),
            params: Params::with_max_atoms(max_atoms),
            state_path: lookup(STATE_VAR).unwrap_or_else(|| DEFAULT_STATE_PATH.to_string()),
        }
    }
}

lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}
