//! Component identifiers.
//!
//! A [`ComponentIdentifier`] tells the component registry which component
//! implementation renders a given [`ComponentModel`](crate::ComponentModel).
//! It consists of an optional namespace and a name. When the namespace is
//! missing, the registry infers its default namespace.
//!
//! ```
//! use hubui_core::ComponentIdentifier;
//!
//! let id: ComponentIdentifier = "music:row".parse().unwrap();
//! assert_eq!(id.namespace(), Some("music"));
//! assert_eq!(id.name(), "row");
//! assert_eq!(id.to_string(), "music:row");
//! ```

use alloc::string::{String, ToString};
use core::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::IdentifierError;

const SEPARATOR: char = ':';

/// Two-part key mapping a component model to a component implementation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentIdentifier {
    namespace: Option<String>,
    name: String,
}

impl ComponentIdentifier {
    /// Creates an identifier from its parts.
    ///
    /// Pass `None` as namespace to let the registry infer one. The parts are
    /// not checked here: a name must be non-empty, and neither part may
    /// contain `:`. [`validate`](Self::validate) reports violations, and
    /// view models refuse identifiers that fail it.
    pub fn new(namespace: Option<impl Into<String>>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(Into::into),
            name: name.into(),
        }
    }

    /// Parses an identifier of the form `namespace:name` or `name`.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentifierError`] when the string is empty, when either
    /// part is empty, or when it contains more than one separator.
    pub fn parse(identifier: &str) -> Result<Self, IdentifierError> {
        if identifier.is_empty() {
            return Err(IdentifierError::Empty);
        }

        let mut parts = identifier.split(SEPARATOR);
        let first = parts.next().unwrap_or_default();
        let second = parts.next();

        if parts.next().is_some() {
            return Err(IdentifierError::TooManySeparators(identifier.to_string()));
        }

        match second {
            None => Ok(Self {
                namespace: None,
                name: first.to_string(),
            }),
            Some(_) if first.is_empty() => {
                Err(IdentifierError::EmptyNamespace(identifier.to_string()))
            }
            Some("") => Err(IdentifierError::EmptyName(identifier.to_string())),
            Some(name) => Ok(Self {
                namespace: Some(first.to_string()),
                name: name.to_string(),
            }),
        }
    }

    /// Checks that the string form of this identifier parses back to it.
    ///
    /// # Errors
    ///
    /// Returns the [`IdentifierError`] that parsing the string form reports,
    /// or [`IdentifierError::SeparatorInName`] when it parses into different
    /// parts.
    pub fn validate(&self) -> Result<(), IdentifierError> {
        let text = self.to_string();
        if Self::parse(&text)? == *self {
            Ok(())
        } else {
            Err(IdentifierError::SeparatorInName(text))
        }
    }

    /// Returns the explicit namespace, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the explicit namespace, or `default` when it should be inferred.
    #[must_use]
    pub fn namespace_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.namespace.as_deref().unwrap_or(default)
    }
}

impl fmt::Display for ComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{namespace}{SEPARATOR}{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl FromStr for ComponentIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ComponentIdentifier {
    type Error = IdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for ComponentIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ComponentIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
