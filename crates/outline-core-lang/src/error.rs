use thiserror::Error;

/// Errors produced while building a language policy.
#[derive(Debug, Error)]
pub enum LanguageError {
    /// A region marker pattern failed to compile.
    #[error("invalid {which} pattern `{pattern}`")]
    InvalidPattern {
        /// Which marker the pattern belongs to (e.g. `"comment start"`).
        which: &'static str,
        /// The offending pattern.
        pattern: String,
        /// The regex compilation error.
        #[source]
        source: regex::Error,
    },
    /// A region start pattern has no capture group for the region name.
    #[error("{which} pattern `{pattern}` has no capture group for the region name")]
    MissingNameGroup {
        /// Which marker the pattern belongs to.
        which: &'static str,
        /// The offending pattern.
        pattern: String,
    },
}
