use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationPrecision {
    #[default]
    Exact,
    Coarse,
    Aggregated,
}

impl LocationPrecision {
    pub const ALL: [LocationPrecision; 3] = [
        LocationPrecision::Exact,
        LocationPrecision::Coarse,
        LocationPrecision::Aggregated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationPrecision::Exact => "exact",
            LocationPrecision::Coarse => "coarse",
            LocationPrecision::Aggregated => "aggregated",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LocationPrecision::Exact => "Precise (best for accurate pricing)",
            LocationPrecision::Coarse => "General area (city level)",
            LocationPrecision::Aggregated => "Broad region (more privacy)",
        }
    }
}

impl fmt::Display for LocationPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for LocationPrecision {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "exact" => Ok(LocationPrecision::Exact),
            "coarse" => Ok(LocationPrecision::Coarse),
            "aggregated" => Ok(LocationPrecision::Aggregated),
            other => Err(format!("unsupported location precision: {other}")),
        }
    }
}

/// Client-side copy of the user's consent choices. The server holds the
/// authoritative copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsentState {
    #[serde(rename = "telematics")]
    pub telematics_sharing_enabled: bool,
    #[serde(rename = "location")]
    pub location_precision: LocationPrecision,
    #[serde(rename = "data_retention")]
    pub data_retention_enabled: bool,
}

impl Default for ConsentState {
    fn default() -> Self {
        Self {
            telematics_sharing_enabled: true,
            location_precision: LocationPrecision::Exact,
            data_retention_enabled: true,
        }
    }
}

impl ConsentState {
    /// Location precision only applies while telematics sharing is on.
    pub fn location_editable(&self) -> bool {
        self.telematics_sharing_enabled
    }
}

/// Individually editable consent fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConsentField {
    TelematicsSharing,
    LocationPrecision,
    DataRetention,
}

impl ConsentField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentField::TelematicsSharing => "telematics",
            ConsentField::LocationPrecision => "location",
            ConsentField::DataRetention => "data_retention",
        }
    }
}

impl fmt::Display for ConsentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
