//! Sparse style overrides and the row/column cascade.
//!
//! # Responsibility
//! - Define the optional color overrides attached to rows and columns.
//! - Resolve the effective style of one grid cell at read time.
//!
//! # Invariants
//! - An unset field means "inherit the platform default", never a literal color.
//! - Column values take precedence over row values, field by field.
//! - Resolution never mutates or caches into its inputs.

use serde::{Deserialize, Serialize};

/// Optional color overrides for an experiment row or a week column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// CSS-style color string, e.g. `#ffeeaa`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl Style {
    /// Builds a style with only a background override.
    pub fn background(color: impl Into<String>) -> Self {
        Self {
            background_color: Some(color.into()),
            text_color: None,
        }
    }

    /// Builds a style with only a text color override.
    pub fn text(color: impl Into<String>) -> Self {
        Self {
            background_color: None,
            text_color: Some(color.into()),
        }
    }

    /// Builds a style from user-entered colors.
    ///
    /// Blank values mean "inherit" and are stored as unset.
    pub fn from_colors(background_color: Option<String>, text_color: Option<String>) -> Self {
        Self {
            background_color: background_color.filter(|value| !value.trim().is_empty()),
            text_color: text_color.filter(|value| !value.trim().is_empty()),
        }
    }

    /// Returns whether no field is overridden.
    pub fn is_empty(&self) -> bool {
        self.background_color.is_none() && self.text_color.is_none()
    }
}

/// Merges a row style and a column style into one effective cell style.
///
/// Column wins over row for each field independently; fields unset in both
/// stay unset.
pub fn resolve_cell_style(row: &Style, col: &Style) -> Style {
    Style {
        background_color: col
            .background_color
            .clone()
            .or_else(|| row.background_color.clone()),
        text_color: col.text_color.clone().or_else(|| row.text_color.clone()),
    }
}
