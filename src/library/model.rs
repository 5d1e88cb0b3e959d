use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder written for fields that do not apply to a record.
pub const ABSENT: &str = "-";

/// How a release was filed in the artist folder.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseKind {
    Album,
    Single,
    Live,
}

impl ReleaseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseKind::Album => "album",
            ReleaseKind::Single => "single",
            ReleaseKind::Live => "live",
        }
    }
}

// Ordered by the persisted text so sorted listings match the table contents.
impl Ord for ReleaseKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for ReleaseKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One media item of an artist catalog.
///
/// Field order is the identity tuple `(kind, date, album, no, name)`; the
/// derived `Ord`/`Eq` compare exactly that tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackRecord {
    #[serde(rename = "Type")]
    pub kind: ReleaseKind,
    /// `YYYY.MM.DD`, or empty when the name carried no date.
    #[serde(rename = "Date", with = "date_column")]
    pub date: String,
    #[serde(rename = "Album")]
    pub album: String,
    #[serde(rename = "No")]
    pub no: String,
    #[serde(rename = "Name")]
    pub name: String,
}

fn or_absent(value: &str) -> String {
    if value.is_empty() {
        ABSENT.to_string()
    } else {
        value.to_string()
    }
}

impl TrackRecord {
    pub fn album(date: &str, album: &str, no: &str, name: &str) -> Self {
        Self {
            kind: ReleaseKind::Album,
            date: date.to_string(),
            album: or_absent(album),
            no: or_absent(no),
            name: or_absent(name),
        }
    }

    pub fn single(date: &str, name: &str) -> Self {
        Self {
            kind: ReleaseKind::Single,
            date: date.to_string(),
            album: ABSENT.to_string(),
            no: ABSENT.to_string(),
            name: or_absent(name),
        }
    }

    pub fn live(date: &str, name: &str) -> Self {
        Self {
            kind: ReleaseKind::Live,
            date: date.to_string(),
            album: ABSENT.to_string(),
            no: ABSENT.to_string(),
            name: or_absent(name),
        }
    }

    /// Re-file an album-shaped record as a single dated by its container.
    pub fn into_single(self, date: &str) -> Self {
        Self::single(date, &self.name)
    }
}

impl fmt::Display for TrackRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Type: {}, Date: {}, Album: {}, No: {}, Name: {}",
            self.kind,
            date_column::shown(&self.date),
            self.album,
            self.no,
            self.name
        )
    }
}

/// One row of the cross-artist summary table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(rename = "Singer")]
    pub singer: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "From")]
    pub from: String,
}

impl fmt::Display for SummaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Singer: {}, Name: {}, From: {}",
            self.singer, self.name, self.from
        )
    }
}

/// Empty dates are stored as the absent marker and read back as empty.
pub mod date_column {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ABSENT;

    pub fn shown(date: &str) -> &str {
        if date.is_empty() { ABSENT } else { date }
    }

    pub fn serialize<S: Serializer>(date: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(shown(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == ABSENT {
            Ok(String::new())
        } else {
            Ok(raw)
        }
    }
}
