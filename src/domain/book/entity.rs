use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::DomainError;

/// A book record as confirmed by the library server.
///
/// Books are never constructed locally: the only way a `Book` enters the
/// client is by decoding a server response and passing `check_book`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Server-assigned identifier, positive and immutable
    pub id: u64,

    pub title: String,

    pub author: String,

    /// Publication year
    pub year: i32,

    /// May be empty
    #[serde(default)]
    pub description: String,

    pub status: ReadingStatus,

    /// Creation timestamp (server-assigned, never changes)
    pub created_at: DateTime<Utc>,

    /// Last update timestamp (server-assigned)
    pub updated_at: DateTime<Utc>,
}

/// Where the reader is with a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadingStatus {
    #[serde(rename = "to-read")]
    WantToRead,
    #[serde(rename = "reading")]
    CurrentlyReading,
    #[serde(rename = "read")]
    Read,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 3] = [
        ReadingStatus::WantToRead,
        ReadingStatus::CurrentlyReading,
        ReadingStatus::Read,
    ];

    /// Wire representation used by the REST API
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::WantToRead => "to-read",
            ReadingStatus::CurrentlyReading => "reading",
            ReadingStatus::Read => "read",
        }
    }
}

impl std::fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to-read" => Ok(ReadingStatus::WantToRead),
            "reading" => Ok(ReadingStatus::CurrentlyReading),
            "read" => Ok(ReadingStatus::Read),
            other => Err(DomainError::UnknownValue {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}
