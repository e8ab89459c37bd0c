use dockgrid_common::Size;
use serde::{Deserialize, Serialize};

use crate::error::DockLayoutError;

/// Tuning of the layout negotiation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LayoutOptions {
    /// Pixel tolerance below which a thickness or size difference is noise
    pub margin_epsilon: f32,

    /// Cap on margin passes. Also caps how often the client size may grow
    /// during one layout.
    pub max_margin_iterations: usize,

    /// Cap on padding passes
    pub max_padding_iterations: usize,

    /// Decimal digits kept when quantizing padding requests for loop detection
    pub padding_key_precision: u32,

    /// Smallest padding increase worth negotiating, in pixels
    pub min_padding_change: f32,

    /// Smallest padding increase worth negotiating, relative to the current value
    pub relative_padding_change: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            margin_epsilon: 0.1,
            max_margin_iterations: 5,
            max_padding_iterations: 9,
            padding_key_precision: 0,
            min_padding_change: 1.0,
            relative_padding_change: 0.01,
        }
    }
}

impl LayoutOptions {
    pub fn validate(&self) -> Result<(), DockLayoutError> {
        if self.max_margin_iterations == 0 {
            return Err(DockLayoutError::InvalidOptions(
                "max_margin_iterations must be at least 1".to_string(),
            ));
        }
        if self.max_padding_iterations == 0 {
            return Err(DockLayoutError::InvalidOptions(
                "max_padding_iterations must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("margin_epsilon", self.margin_epsilon),
            ("min_padding_change", self.min_padding_change),
            ("relative_padding_change", self.relative_padding_change),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DockLayoutError::InvalidOptions(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        // f32 holds about 7 significant digits
        if self.padding_key_precision > 6 {
            return Err(DockLayoutError::InvalidOptions(format!(
                "padding_key_precision must be at most 6, got {}",
                self.padding_key_precision
            )));
        }
        Ok(())
    }

    /// Smallest padding increase accepted over a `current` padding value
    pub fn padding_change_threshold(&self, current: f32) -> f32 {
        self.min_padding_change
            .max(self.relative_padding_change * current.abs())
    }
}

/// Constraints from the caller of a layout computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LayoutConstraints {
    /// Whether children may still change the layout, i.e. grow the client
    /// size or the shared paddings
    pub can_change: bool,

    /// Floor of the size offered to side regions while margins settle
    pub fill_size_minimum: Option<Size>,
}

impl Default for LayoutConstraints {
    fn default() -> Self {
        Self {
            can_change: true,
            fill_size_minimum: None,
        }
    }
}

impl LayoutConstraints {
    pub fn fixed() -> Self {
        Self {
            can_change: false,
            ..Default::default()
        }
    }

    pub fn with_fill_size_minimum(mut self, minimum: Size) -> Self {
        self.fill_size_minimum = Some(minimum);
        self
    }
}
