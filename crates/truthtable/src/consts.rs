/// Default ceiling on the number of distinct atoms a single validation may
/// enumerate. 20 atoms is a little over a million rows.
pub const DEFAULT_MAX_ATOMS: usize = 20;

/// Configured ceilings are clamped to this. 2^24 rows is the most a single
/// request may hold in memory.
pub const MAX_ATOMS_HARD_LIMIT: usize = 24;

/// How deep parentheses and negations may nest in a single formula.
pub const MAX_NESTING_DEPTH: usize = 128;

/// How tall a parsed formula tree may grow, counting long chains of
/// binary connectives.
pub const MAX_FORMULA_HEIGHT: usize = 1024;
