//! Component registry.

use alloc::{
    boxed::Box,
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use hubui_core::ComponentIdentifier;

use crate::{Component, ComponentFactory};

/// Error returned by [`ComponentRegistry`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A factory is already registered for the namespace.
    #[error("a component factory is already registered for namespace `{0}`")]
    NamespaceAlreadyRegistered(String),
}

/// Maps component namespaces to the factories creating their components.
///
/// Identifiers without a namespace resolve against the registry's default
/// namespace.
pub struct ComponentRegistry {
    default_namespace: String,
    factories: BTreeMap<String, Box<dyn ComponentFactory>>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("default_namespace", &self.default_namespace)
            .field("namespaces", &self.namespaces())
            .finish()
    }
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self {
            default_namespace: default_namespace.into(),
            factories: BTreeMap::new(),
        }
    }

    /// Namespace used for identifiers that do not carry one.
    #[must_use]
    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// Registered namespaces, sorted.
    #[must_use]
    pub fn namespaces(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Registers `factory` for `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NamespaceAlreadyRegistered`] if the namespace
    /// is taken. Unregister the existing factory first to replace it.
    pub fn register_factory(
        &mut self,
        namespace: &str,
        factory: impl ComponentFactory + 'static,
    ) -> Result<(), RegistryError> {
        if self.factories.contains_key(namespace) {
            return Err(RegistryError::NamespaceAlreadyRegistered(
                namespace.to_string(),
            ));
        }
        self.factories
            .insert(namespace.to_string(), Box::new(factory));
        Ok(())
    }

    /// Removes the factory for `namespace`. Returns whether one existed.
    pub fn unregister_factory(&mut self, namespace: &str) -> bool {
        self.factories.remove(namespace).is_some()
    }

    /// Creates the component for `identifier`, or `None` if nothing matches.
    #[must_use]
    pub fn create_component(&self, identifier: &ComponentIdentifier) -> Option<Box<dyn Component>> {
        let namespace = identifier.namespace_or(&self.default_namespace);
        self.factories
            .get(namespace)?
            .create_component(identifier.name())
    }
}
