use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Book, ReadingStatus};
use super::invariants::{check_draft, FieldErrors};

/// A candidate book as it arrives from a form: every field is a string and
/// nothing has been checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub year: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
}

/// A validated, typed book body ready to be sent to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub description: String,
    pub status: ReadingStatus,
}

impl BookDraft {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            description: description.into(),
            status: status.into(),
        }
    }

    /// Validates the draft and converts it into a typed body.
    /// This is the only way to obtain a `BookInput`.
    pub fn parse(&self) -> Result<BookInput, FieldErrors> {
        self.parse_for_year(Utc::now().year())
    }

    pub fn parse_for_year(&self, current_year: i32) -> Result<BookInput, FieldErrors> {
        check_draft(self, current_year)
    }
}

/// Pre-fills an edit form from a stored book
impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year.to_string(),
            description: book.description.clone(),
            status: book.status.to_string(),
        }
    }
}
