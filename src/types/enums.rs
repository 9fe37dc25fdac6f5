//! Enumeration types for the crowd control system
//!
//! This module contains the enumeration types used throughout the system:
//! evacuation priorities, congestion bands, and output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Priority assigned to an evacuation plan entry
///
/// Zones that were critical at planning time evacuate with high priority;
/// everything else is normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvacuationPriority {
    /// Zone was critically congested when the plan was drawn up
    High,
    /// Zone was below the critical threshold
    Normal,
}

impl fmt::Display for EvacuationPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvacuationPriority::High => write!(f, "HIGH"),
            EvacuationPriority::Normal => write!(f, "NORMAL"),
        }
    }
}

/// Coarse congestion classification for display purposes
///
/// Bands match the operator dashboard conventions: clear up to 50%,
/// busy up to the critical threshold, critical above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CongestionBand {
    /// Congestion level at or below 50%
    Clear,
    /// Congestion level above 50% but not critical
    Busy,
    /// Congestion level above the critical threshold
    Critical,
}

impl CongestionBand {
    /// Classify a congestion level against a critical threshold
    pub fn classify(congestion_level: f64, critical_threshold: f64) -> Self {
        if congestion_level > critical_threshold {
            CongestionBand::Critical
        } else if congestion_level > 50.0 {
            CongestionBand::Busy
        } else {
            CongestionBand::Clear
        }
    }
}

impl fmt::Display for CongestionBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CongestionBand::Clear => write!(f, "clear"),
            CongestionBand::Busy => write!(f, "busy"),
            CongestionBand::Critical => write!(f, "critical"),
        }
    }
}

/// Output format for reports printed by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Machine-readable JSON
    Json,
    /// Human-readable text
    Text,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" | "plain" => Ok(OutputFormat::Text),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_display() {
        assert_eq!(format!("{}", EvacuationPriority::High), "HIGH");
        assert_eq!(format!("{}", EvacuationPriority::Normal), "NORMAL");
    }

    #[test]
    fn test_congestion_band_classification() {
        assert_eq!(CongestionBand::classify(0.0, 80.0), CongestionBand::Clear);
        assert_eq!(CongestionBand::classify(50.0, 80.0), CongestionBand::Clear);
        assert_eq!(CongestionBand::classify(50.1, 80.0), CongestionBand::Busy);
        assert_eq!(CongestionBand::classify(80.0, 80.0), CongestionBand::Busy);

        // Strictly above the threshold is critical
        assert_eq!(CongestionBand::classify(80.1, 80.0), CongestionBand::Critical);
        assert_eq!(CongestionBand::classify(100.0, 80.0), CongestionBand::Critical);
    }

    #[test]
    fn test_congestion_band_respects_custom_threshold() {
        assert_eq!(CongestionBand::classify(75.0, 70.0), CongestionBand::Critical);
        assert_eq!(CongestionBand::classify(75.0, 80.0), CongestionBand::Busy);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_enum_serialization() {
        let json = serde_json::to_string(&EvacuationPriority::High).unwrap();
        assert_eq!(json, "\"High\"");

        let band: CongestionBand = serde_json::from_str("\"Busy\"").unwrap();
        assert_eq!(band, CongestionBand::Busy);
    }
}
