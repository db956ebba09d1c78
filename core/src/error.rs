//! Error types for identifier parsing and view model construction.

use alloc::string::String;

/// Error returned when a component identifier string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// The identifier string is empty.
    #[error("component identifier string is empty")]
    Empty,
    /// The part before `:` is empty, as in `":name"`.
    #[error("component identifier `{0}` has an empty namespace")]
    EmptyNamespace(String),
    /// The name part is empty, as in `"namespace:"`.
    #[error("component identifier `{0}` has an empty name")]
    EmptyName(String),
    /// More than one `:` separator was found.
    #[error("component identifier `{0}` contains more than one `:` separator")]
    TooManySeparators(String),
    /// A name without namespace contains `:`, so its string form reads back
    /// as a different namespace and name.
    #[error("component identifier `{0}` has a `:` in its name")]
    SeparatorInName(String),
}

/// Error returned when a view model violates one of its structural rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewModelError {
    /// Two body component models share the same identifier.
    #[error("component model identifier `{0}` appears more than once")]
    DuplicateIdentifier(String),
    /// A component model names a component identifier that cannot be
    /// written out and parsed back.
    #[error("component model `{model}` has an invalid component identifier")]
    InvalidComponentIdentifier {
        /// Identifier of the offending component model.
        model: String,
        /// Why the component identifier is invalid.
        #[source]
        source: IdentifierError,
    },
}
