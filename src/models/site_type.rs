//! Site-of-service categories
//!
//! The category is informational only. The partitioning engine treats every
//! site as interchangeable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of the location where an anesthesia case is delivered
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum SiteType {
    /// Main operating room
    #[default]
    #[serde(rename = "OR")]
    OperatingRoom,
    /// Cardiac surgery or catheterization lab
    #[serde(rename = "Cardiac/Cath Lab")]
    CardiacCathLab,
    /// GI / endoscopy suite
    #[serde(rename = "GI")]
    Gastrointestinal,
    /// Interventional radiology suite
    #[serde(rename = "IR")]
    InterventionalRadiology,
    /// Short procedures under monitored anesthesia care
    #[serde(rename = "Short/MAC")]
    ShortMac,
    /// Labor and delivery, staffed and contracted separately
    #[serde(rename = "L&D")]
    LaborDelivery,
}

impl SiteType {
    /// Get the display label for this site type
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OperatingRoom => "OR",
            Self::CardiacCathLab => "Cardiac/Cath Lab",
            Self::Gastrointestinal => "GI",
            Self::InterventionalRadiology => "IR",
            Self::ShortMac => "Short/MAC",
            Self::LaborDelivery => "L&D",
        }
    }

    /// Parse a label as written in case exports. Unknown labels yield `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "or" | "operating room" => Some(Self::OperatingRoom),
            "cardiac/cath lab" | "cardiac" | "cath lab" => Some(Self::CardiacCathLab),
            "gi" | "endo" | "endoscopy" => Some(Self::Gastrointestinal),
            "ir" | "interventional radiology" => Some(Self::InterventionalRadiology),
            "short/mac" | "mac" | "short" => Some(Self::ShortMac),
            "l&d" | "labor and delivery" => Some(Self::LaborDelivery),
            _ => None,
        }
    }

    /// Get all site types
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![
            Self::OperatingRoom,
            Self::CardiacCathLab,
            Self::Gastrointestinal,
            Self::InterventionalRadiology,
            Self::ShortMac,
            Self::LaborDelivery,
        ]
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
