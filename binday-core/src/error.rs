//! Errors raised while validating configuration for a schedule engine.

use std::fmt;

/// Waste streams that can be put on a week rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationCategory {
    /// Regular household garbage.
    Garbage,
    /// Recycling.
    Recycling,
}

impl fmt::Display for RotationCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            RotationCategory::Garbage => "garbage",
            RotationCategory::Recycling => "recycling",
        };
        write!(formatter, "{slug}")
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Configuration problems detected when an engine is constructed.
pub enum ConfigError {
    /// The municipality did not name the weekday that ends a leap window.
    #[error("Reset weekday is not configured")]
    MissingResetWeekday,
    /// The municipality did not name the date its rotation starts on.
    #[error("Rotation start date is not configured")]
    MissingRotationStart,
    /// The household's slot is not one of the municipality's rotation labels.
    #[error("{category} slot {slot:?} is not part of rotation {labels:?}")]
    SlotNotInRotation {
        /// Stream whose rotation was checked.
        category: RotationCategory,
        /// Slot assigned to the household, if any.
        slot: Option<String>,
        /// Labels configured by the municipality.
        labels: Vec<String>,
    },
}
