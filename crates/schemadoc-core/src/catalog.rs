//! Table catalog: known descriptions and functional categories
//!
//! Descriptions come from a fixed list of the NDC PLUS tables, with
//! caller-supplied overrides taking precedence. Categories are assigned by
//! explicit table list first, then by name prefix, then `Other`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Functional group a table is documented under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Channel & Waveform Data")]
    ChannelWaveform,
    #[serde(rename = "Event Management")]
    EventManagement,
    #[serde(rename = "Feature Measurements")]
    FeatureMeasurements,
    #[serde(rename = "Feature Predictions")]
    FeaturePredictions,
    #[serde(rename = "Location & Uncertainty")]
    LocationUncertainty,
    #[serde(rename = "Magnitude Calculations")]
    MagnitudeCalculations,
    #[serde(rename = "Quality Control")]
    QualityControl,
    #[serde(rename = "Signal Detection")]
    SignalDetection,
    #[serde(rename = "Metadata & Configuration")]
    MetadataConfiguration,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 10] = [
        Category::ChannelWaveform,
        Category::EventManagement,
        Category::FeatureMeasurements,
        Category::FeaturePredictions,
        Category::LocationUncertainty,
        Category::MagnitudeCalculations,
        Category::QualityControl,
        Category::SignalDetection,
        Category::MetadataConfiguration,
        Category::Other,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Category::ChannelWaveform => "Channel & Waveform Data",
            Category::EventManagement => "Event Management",
            Category::FeatureMeasurements => "Feature Measurements",
            Category::FeaturePredictions => "Feature Predictions",
            Category::LocationUncertainty => "Location & Uncertainty",
            Category::MagnitudeCalculations => "Magnitude Calculations",
            Category::QualityControl => "Quality Control",
            Category::SignalDetection => "Signal Detection",
            Category::MetadataConfiguration => "Metadata & Configuration",
            Category::Other => "Other",
        }
    }

    /// Categorize a table by name
    pub fn for_table(name: &str) -> Self {
        if let Some(category) = explicit_category(name) {
            return category;
        }
        prefix_category(name).unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

const EXPLICIT_CATEGORIES: &[(Category, &[&str])] = &[
    (
        Category::ChannelWaveform,
        &[
            "CHANNEL_SEGMENT",
            "CHANNEL_SEGMENT_CREATION",
            "CHANNEL_SEGMENT_PROC_MASK_XREF",
            "CHANNEL_SEGMENT_WAVEFORM",
            "STATION_CHANNEL",
        ],
    ),
    (
        Category::EventManagement,
        &[
            "EVENT",
            "EVENT_HYPOTHESIS",
            "EVENT_HYPOTHESIS_TAG",
            "EVENT_STATUS_INFO",
            "EVENT_CORRELATION",
            "EVENT_CORRELATION_CHANNEL_SEGMENT",
        ],
    ),
    (
        Category::FeatureMeasurements,
        &[
            "FEATURE_MEASUREMENT_AMPLITUDE",
            "FEATURE_MEASUREMENT_ARRIVAL_TIME",
            "FEATURE_MEASUREMENT_ENUMERATED",
            "FEATURE_MEASUREMENT_NUMERIC",
        ],
    ),
    (
        Category::FeaturePredictions,
        &[
            "FEATURE_PREDICTION_ARRIVAL_TIME",
            "FEATURE_PREDICTION_COMPONENT",
            "FEATURE_PREDICTION_NUMERIC",
        ],
    ),
    (
        Category::LocationUncertainty,
        &[
            "LOCATION_SOLUTION",
            "LOCATION_BEHAVIOR",
            "LOCATION_RESTRAINT",
            "LOCATION_UNCERTAINTY",
            "LOCATION_UNCERTAINTY_ELLIPSE",
            "LOCATION_UNCERTAINTY_ELLIPSOID",
        ],
    ),
    (
        Category::MagnitudeCalculations,
        &["NETWORK_MAGNITUDE_SOLUTION", "STATION_MAGNITUDE_SOLUTION"],
    ),
    (
        Category::QualityControl,
        &[
            "PROCESSING_MASK",
            "PROCESSING_MASK_QC_SEGMENT_VERSION",
            "QC_SEGMENT_VERSION",
        ],
    ),
    (
        Category::SignalDetection,
        &["SIGNAL_DETECTION_HYPOTHESIS", "INTERVAL"],
    ),
    (
        Category::MetadataConfiguration,
        &[
            "STATION_GROUP_VERSION",
            "RESPONSE_TABLE",
            "REMARK",
            "STAGE_METRICS",
        ],
    ),
];

fn explicit_category(name: &str) -> Option<Category> {
    EXPLICIT_CATEGORIES
        .iter()
        .find(|(_, tables)| tables.contains(&name))
        .map(|(category, _)| *category)
}

fn prefix_category(name: &str) -> Option<Category> {
    // MAGNITUDE must be checked before the STATION_ prefix.
    if name.contains("MAGNITUDE") {
        Some(Category::MagnitudeCalculations)
    } else if name.starts_with("CHANNEL_") || name.contains("WAVEFORM") {
        Some(Category::ChannelWaveform)
    } else if name.starts_with("EVENT_") {
        Some(Category::EventManagement)
    } else if name.starts_with("FEATURE_MEASUREMENT") {
        Some(Category::FeatureMeasurements)
    } else if name.starts_with("FEATURE_PREDICTION") {
        Some(Category::FeaturePredictions)
    } else if name.starts_with("LOCATION_") {
        Some(Category::LocationUncertainty)
    } else if name.starts_with("QC_") || name.starts_with("PROCESSING_MASK") {
        Some(Category::QualityControl)
    } else if name.starts_with("SIGNAL_DETECTION") {
        Some(Category::SignalDetection)
    } else if name.starts_with("STATION_") {
        Some(Category::MetadataConfiguration)
    } else {
        None
    }
}

const KNOWN_DESCRIPTIONS: &[(&str, &str)] = &[
    ("CHANNEL_SEGMENT", "Stores time series channel segment information for waveform data"),
    ("CHANNEL_SEGMENT_CREATION", "Tracks creation metadata for channel segments"),
    ("CHANNEL_SEGMENT_PROC_MASK_XREF", "Cross-reference between channel segments and processing masks"),
    ("CHANNEL_SEGMENT_WAVEFORM", "Links channel segments to waveform IDs"),
    ("EVENT", "Seismic event master table"),
    ("EVENT_CORRELATION", "Correlation analysis between seismic events"),
    ("EVENT_CORRELATION_CHANNEL_SEGMENT", "Channel segments used in event correlation"),
    ("EVENT_HYPOTHESIS", "Hypotheses about seismic event characteristics"),
    ("EVENT_HYPOTHESIS_TAG", "Tags and classifications for event hypotheses"),
    ("EVENT_STATUS_INFO", "Status and workflow information for events"),
    ("FEATURE_MEASUREMENT_AMPLITUDE", "Amplitude measurements from seismic signals"),
    ("FEATURE_MEASUREMENT_ARRIVAL_TIME", "Arrival time measurements for seismic phases"),
    ("FEATURE_MEASUREMENT_ENUMERATED", "Categorical feature measurements"),
    ("FEATURE_MEASUREMENT_NUMERIC", "Numeric feature measurements"),
    ("FEATURE_PREDICTION_ARRIVAL_TIME", "Predicted arrival times for seismic phases"),
    ("FEATURE_PREDICTION_COMPONENT", "Component-specific feature predictions"),
    ("FEATURE_PREDICTION_NUMERIC", "Numeric feature predictions"),
    ("INTERVAL", "Time intervals for processing and analysis"),
    ("LOCATION_BEHAVIOR", "Location calculation behavior and parameters"),
    ("LOCATION_RESTRAINT", "Constraints and restraints for location calculations"),
    ("LOCATION_SOLUTION", "Calculated geographic locations for events"),
    ("LOCATION_UNCERTAINTY", "Uncertainty estimates for event locations"),
    ("LOCATION_UNCERTAINTY_ELLIPSE", "Elliptical uncertainty representation"),
    ("LOCATION_UNCERTAINTY_ELLIPSOID", "Ellipsoidal 3D uncertainty representation"),
    ("NETWORK_MAGNITUDE_SOLUTION", "Network-level magnitude calculations"),
    ("PROCESSING_MASK", "Data quality masks and processing intervals"),
    ("PROCESSING_MASK_QC_SEGMENT_VERSION", "Links processing masks to QC segments"),
    ("QC_SEGMENT_VERSION", "Quality control segment versions"),
    ("REMARK", "Comments and annotations"),
    ("SIGNAL_DETECTION_HYPOTHESIS", "Signal detection hypotheses and picks"),
    ("STAGE_METRICS", "Performance metrics for processing stages"),
    ("STATION_MAGNITUDE_SOLUTION", "Station-level magnitude calculations"),
    ("RESPONSE_TABLE", "Instrument response specifications"),
    ("STATION_CHANNEL", "Station and channel configuration metadata"),
    ("STATION_GROUP_VERSION", "Station group definitions and versions"),
];

/// Description lookup with caller overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Descriptions that replace or extend the built-in list
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the description of one table
    pub fn with_description(mut self, table: impl Into<String>, description: impl Into<String>) -> Self {
        self.overrides.insert(table.into(), description.into());
        self
    }

    pub fn description(&self, table: &str) -> String {
        if let Some(description) = self.overrides.get(table) {
            return description.clone();
        }

        KNOWN_DESCRIPTIONS
            .iter()
            .find(|(name, _)| *name == table)
            .map(|(_, description)| (*description).to_string())
            .unwrap_or_else(|| default_description(table))
    }

    pub fn category(&self, table: &str) -> Category {
        Category::for_table(table)
    }
}

/// Description used for tables nobody has described
pub fn default_description(table: &str) -> String {
    format!("Database table: {}", table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_default_descriptions() {
        let catalog = Catalog::new();
        assert_eq!(catalog.description("EVENT"), "Seismic event master table");
        assert_eq!(catalog.description("ORIGIN"), "Database table: ORIGIN");
    }

    #[test]
    fn test_override_wins() {
        let catalog = Catalog::new().with_description("EVENT", "Events");
        assert_eq!(catalog.description("EVENT"), "Events");
        assert_eq!(catalog.description("REMARK"), "Comments and annotations");
    }

    #[test]
    fn test_explicit_category_beats_prefix() {
        // STATION_CHANNEL would fall under metadata by prefix
        assert_eq!(Category::for_table("STATION_CHANNEL"), Category::ChannelWaveform);
        assert_eq!(Category::for_table("INTERVAL"), Category::SignalDetection);
    }

    #[test]
    fn test_prefix_fallbacks() {
        assert_eq!(Category::for_table("EVENT_ARCHIVE"), Category::EventManagement);
        assert_eq!(Category::for_table("STATION_MAGNITUDE_HISTORY"), Category::MagnitudeCalculations);
        assert_eq!(Category::for_table("FEATURE_MEASUREMENT_PHASE"), Category::FeatureMeasurements);
        assert_eq!(Category::for_table("STATION_SITE"), Category::MetadataConfiguration);
        assert_eq!(Category::for_table("ORIGIN"), Category::Other);
    }

    #[test]
    fn test_category_serializes_as_title() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.title()));
        }
    }
}
