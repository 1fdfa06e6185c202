use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::error::FlowError;

/// Longest typed area accepted. Keeps confirmations well inside Telegram's
/// message size even when every character is HTML-escaped.
pub const MAX_AREA_CHARS: usize = 256;

/// A location a request can be dispatched to.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    GeoCoordinate { latitude: f64, longitude: f64 },
    FreeTextArea { text: String },
}

impl LocationInput {
    pub fn geo(latitude: f64, longitude: f64) -> Result<Self, FlowError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(FlowError::MalformedLocation(format!(
                "latitude {} out of range",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(FlowError::MalformedLocation(format!(
                "longitude {} out of range",
                longitude
            )));
        }
        Ok(LocationInput::GeoCoordinate {
            latitude,
            longitude,
        })
    }

    pub fn free_text(raw: &str) -> Result<Self, FlowError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(FlowError::MalformedLocation("empty area name".to_string()));
        }
        if text.chars().count() > MAX_AREA_CHARS {
            return Err(FlowError::MalformedLocation(format!(
                "area name longer than {} characters",
                MAX_AREA_CHARS
            )));
        }
        Ok(LocationInput::FreeTextArea {
            text: text.to_string(),
        })
    }

    /// Human readable form used in confirmations and dispatch signals.
    pub fn summary(&self) -> String {
        match self {
            LocationInput::GeoCoordinate {
                latitude,
                longitude,
            } => format!("{:.6}, {:.6}", latitude, longitude),
            LocationInput::FreeTextArea { text } => text.clone(),
        }
    }

    pub fn maps_link(&self) -> Option<String> {
        match self {
            LocationInput::GeoCoordinate {
                latitude,
                longitude,
            } => Some(format!(
                "https://www.google.com/maps?q={},{}",
                coordinate_literal(*latitude),
                coordinate_literal(*longitude)
            )),
            LocationInput::FreeTextArea { .. } => None,
        }
    }
}

// Whole numbers keep one decimal place: 40 -> "40.0".
fn coordinate_literal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Which location variants the conversation accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocationPolicy {
    GeoOnly,
    TextOnly,
    #[default]
    Both,
}

impl LocationPolicy {
    pub fn accepts_geo(self) -> bool {
        matches!(self, LocationPolicy::GeoOnly | LocationPolicy::Both)
    }

    pub fn accepts_text(self) -> bool {
        matches!(self, LocationPolicy::TextOnly | LocationPolicy::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown location input mode `{0}`, expected geo, text or both")]
pub struct ParsePolicyError(pub String);

impl FromStr for LocationPolicy {
    type Err = ParsePolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "geo" => Ok(LocationPolicy::GeoOnly),
            "text" => Ok(LocationPolicy::TextOnly),
            "both" => Ok(LocationPolicy::Both),
            _ => Err(ParsePolicyError(value.to_string())),
        }
    }
}

impl fmt::Display for LocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LocationPolicy::GeoOnly => "geo",
            LocationPolicy::TextOnly => "text",
            LocationPolicy::Both => "both",
        };
        f.write_str(name)
    }
}
