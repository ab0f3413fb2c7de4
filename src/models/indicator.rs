use serde::{Deserialize, Serialize};

use super::enums::IndicatorColor;

/// A coloured status label shown on a form (page indicator, dashboard
/// badge or headline alert).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub label: String,
    pub color: IndicatorColor,
}

impl Indicator {
    pub fn new(label: impl Into<String>, color: IndicatorColor) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}
