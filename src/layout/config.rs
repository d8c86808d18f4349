//! Configuration for layout passes
//!
//! Reading direction is an explicit value handed to the directional
//! constructors, never ambient state, so both directions can be exercised
//! side by side.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::stack::StackDirection;

/// Errors that can occur when loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read layout config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse layout config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Reading direction used to resolve leading/trailing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl LayoutDirection {
    pub fn is_right_to_left(self) -> bool {
        self == LayoutDirection::RightToLeft
    }
}

/// Configuration options for building and running layouts
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Direction used when resolving leading/trailing constraints and alignments
    pub direction: LayoutDirection,

    /// Default spacing between items of a stack scheme
    pub stack_spacing: f64,

    /// Default end of the stack axis the first item starts from
    pub stack_direction: StackDirection,

    /// Warn when a snapshot pass constrains against a frame not yet computed in that pass
    pub warn_on_stale_reference: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::LeftToRight,
            stack_spacing: 0.0,
            stack_direction: StackDirection::FromLeading,
            warn_on_stale_reference: true,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the reading direction
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the default stack spacing
    pub fn with_stack_spacing(mut self, spacing: f64) -> Self {
        self.stack_spacing = spacing;
        self
    }

    /// Set the default stack direction
    pub fn with_stack_direction(mut self, direction: StackDirection) -> Self {
        self.stack_direction = direction;
        self
    }

    /// Enable or disable stale reference warnings
    pub fn with_stale_reference_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_stale_reference = enabled;
        self
    }
}
