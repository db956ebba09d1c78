//! Project configuration stored in `hubui.toml`.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::layout::{ComponentRegistry, MarginLayoutManager};

/// Tunables for layout, animation and component resolution.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct HubConfig {
    /// Margins used by the layout factory.
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Resize animation settings.
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Component resolution settings.
    #[serde(default)]
    pub components: ComponentsConfig,
}

impl HubConfig {
    /// Loads `hubui.toml` from `root`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid configuration.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Fails if `contents` is not valid configuration.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Writes the configuration to `hubui.toml` in `root`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration cannot be serialized or written.
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = Self::path(root);
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Location of the configuration file within `root`.
    #[must_use]
    pub fn path(root: &Path) -> PathBuf {
        root.join("hubui.toml")
    }

    /// Layout manager applying the configured margins.
    #[must_use]
    pub const fn layout_manager(&self) -> MarginLayoutManager {
        MarginLayoutManager {
            content_edge_margin: self.layout.content_edge_margin,
            vertical_spacing: self.layout.vertical_spacing,
            horizontal_spacing: self.layout.horizontal_spacing,
            header_margin: self.layout.header_margin,
        }
    }

    /// Empty registry using the configured default namespace.
    #[must_use]
    pub fn registry(&self) -> ComponentRegistry {
        ComponentRegistry::new(self.components.default_namespace.clone())
    }

    /// Duration of resize animations started by content updates.
    #[must_use]
    pub const fn resize_duration(&self) -> Duration {
        Duration::from_millis(self.animation.resize_duration_ms)
    }
}

/// `[layout]` section.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Margin to the content edges.
    pub content_edge_margin: f32,
    /// Margin between rows.
    pub vertical_spacing: f32,
    /// Margin between compact components sharing a row.
    pub horizontal_spacing: f32,
    /// Margin between the header and the body.
    pub header_margin: f32,
    /// Lay the body out below the header rather than underneath it.
    pub add_header_margin: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let manager = MarginLayoutManager::default();
        Self {
            content_edge_margin: manager.content_edge_margin,
            vertical_spacing: manager.vertical_spacing,
            horizontal_spacing: manager.horizontal_spacing,
            header_margin: manager.header_margin,
            add_header_margin: true,
        }
    }
}

/// `[animation]` section.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Resize animation duration in milliseconds.
    pub resize_duration_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            resize_duration_ms: 300,
        }
    }
}

/// `[components]` section.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ComponentsConfig {
    /// Namespace of component identifiers written without one.
    pub default_namespace: String,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
        }
    }
}

fn default_namespace() -> String {
    hubui_core::ComponentDefaults::default().namespace
}
