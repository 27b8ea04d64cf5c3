//! Propositional validity checking by truth tables.
//!
//! ```
//! use truthtable::validate;
//!
//! let res = validate(&["P -> Q", "P"], Some("Q"));
//! assert!(res.is_valid);
//! assert_eq!(4, res.truth_table.len());
//! ```

mod consts;
pub mod logging;
pub mod logic;
pub mod parse;
pub mod tamper_protect;
pub mod validate;

pub use consts::{
    DEFAULT_MAX_ATOMS, MAX_ATOMS_HARD_LIMIT, MAX_FORMULA_HEIGHT, MAX_NESTING_DEPTH,
};
pub use logic::{evaluate, Assignment, Formula, Interpretation};
pub use parse::{parse, tokenize, ParseErr};
pub use validate::{
    validate, validate_formulas, validate_with, Params, Status, TruthRow, ValidationResult,
};
