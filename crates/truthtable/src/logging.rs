/*!
Targets for the [log] macros called throughout the library.

No log implementation is provided here; binaries pick one.
*/

pub mod targets {
    /// Formula tokenizing and parsing
    pub const PARSE: &str = "truthtable::parse";

    /// Truth table enumeration and verdicts
    pub const VALIDATE: &str = "truthtable::validate";
}
