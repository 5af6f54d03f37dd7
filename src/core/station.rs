//! Station records and their identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::icon::IconSlug;

/// Kind of map feature a record describes. Only stations are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Station,
}

/// Transit modes that get their own station list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Bus,
    Subway,
    Tram,
}

impl Mode {
    /// All partitioned modes, in output order.
    pub const ALL: [Mode; 3] = [Mode::Bus, Mode::Subway, Mode::Tram];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Bus => "bus",
            Mode::Subway => "subway",
            Mode::Tram => "tram",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bus" => Ok(Mode::Bus),
            "subway" => Ok(Mode::Subway),
            "tram" => Ok(Mode::Tram),
            _ => Err(format!("unknown mode '{}'", s)),
        }
    }
}

/// Geographic point, kept as the source's decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Center {
    pub lat: String,
    pub lng: String,
}

/// A station as published in the station lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub subtype: String,
    pub line_number: String,
    /// Built icon file name, when the line has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub center: Center,
    pub title: String,
    pub infos: String,
    #[serde(rename = "openDataID")]
    pub open_data_id: String,
}

impl StationRecord {
    /// Dedup key of this record.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(&self.title, &self.center)
    }

    /// Partition this record belongs to, if any.
    pub fn mode(&self) -> Option<Mode> {
        self.subtype.parse().ok()
    }

    /// Icon key of the record's line.
    pub fn icon_key(&self) -> IconSlug {
        IconSlug::for_line(&self.subtype, &self.line_number)
    }
}

/// `title-lat-lng`. Two records with the same fingerprint are the same
/// station, whatever line file they were read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(title: &str, center: &Center) -> Self {
        Fingerprint(format!("{}-{}-{}", title, center.lat, center.lng))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A stop table whose line has no built icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingIconRecord {
    /// Icon key that was looked up, `<subtype>-<lineNumber>`
    pub icon: String,
    /// Stop table path, relative to the stations root
    pub file: String,
}
