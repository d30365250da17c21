use thiserror::Error;

/// Failure recorded by a single [`Parser::parse`](crate::Parser::parse) pass.
///
/// The first error encountered during a pass wins; later tokens are still
/// scanned so `found` state and leftovers stay informative, but the recorded
/// error is never overwritten. Duplicate registration is a host programming
/// error and panics at registration time instead of appearing here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An option name appeared as the last token, with no value after it.
    #[error("missing value for option '{option}'")]
    MissingOptionValue { option: String },

    /// A value token could not be converted to the bound target's type.
    /// Whole-token conversion: trailing garbage and out-of-range literals
    /// are rejected, never truncated.
    #[error("invalid value '{token}': expected {expected}")]
    ConversionFailure {
        token: String,
        expected: &'static str,
    },

    /// A spec marked `required()` was never found by the end of the pass.
    #[error("missing required argument: {what}")]
    MissingRequired { what: String },

    /// A token matched no flag, option, or open positional slot while the
    /// parser was in `no_unrecognized()` mode.
    #[error("unrecognized argument: {token}")]
    UnrecognizedToken { token: String },
}
