use chrono::{Datelike, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

use super::draft::{BookDraft, BookInput};
use super::entity::{Book, ReadingStatus};
use crate::domain::{DomainError, DomainResult};

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_AUTHOR_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;
pub const MIN_YEAR: i32 = 1000;

/// How far into the future a publication year may be
pub const FUTURE_YEAR_ALLOWANCE: i32 = 10;

/// A form field of a book draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookField {
    Title,
    Author,
    Year,
    Description,
    Status,
}

impl BookField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Year => "year",
            BookField::Description => "description",
            BookField::Status => "status",
        }
    }
}

impl std::fmt::Display for BookField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation result. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<BookField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: BookField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: BookField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: BookField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = BookField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Latest publication year accepted right now
pub fn max_publication_year() -> i32 {
    Utc::now().year() + FUTURE_YEAR_ALLOWANCE
}

/// Validates a draft against the current calendar year
pub fn validate_draft(draft: &BookDraft) -> FieldErrors {
    validate_draft_for_year(draft, Utc::now().year())
}

/// Validates every field of a draft independently, so the caller sees all
/// violations at once.
pub fn validate_draft_for_year(draft: &BookDraft, current_year: i32) -> FieldErrors {
    check_draft(draft, current_year).err().unwrap_or_default()
}

/// Single pass over the draft: either every field is valid and typed, or
/// every violation is reported.
pub(crate) fn check_draft(draft: &BookDraft, current_year: i32) -> Result<BookInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Some(message) = title_error(&draft.title) {
        errors.insert(BookField::Title, message);
    }
    if let Some(message) = author_error(&draft.author) {
        errors.insert(BookField::Author, message);
    }
    let year = match parse_year(&draft.year, current_year + FUTURE_YEAR_ALLOWANCE) {
        Ok(year) => Some(year),
        Err(message) => {
            errors.insert(BookField::Year, message);
            None
        }
    };
    if let Some(message) = description_error(&draft.description) {
        errors.insert(BookField::Description, message);
    }
    let status = match parse_status(&draft.status) {
        Ok(status) => Some(status),
        Err(message) => {
            errors.insert(BookField::Status, message);
            None
        }
    };

    match (year, status) {
        (Some(year), Some(status)) if errors.is_empty() => Ok(BookInput {
            title: draft.title.clone(),
            author: draft.author.clone(),
            year,
            description: draft.description.clone(),
            status,
        }),
        _ => Err(errors),
    }
}

fn title_error(title: &str) -> Option<String> {
    if title.trim().is_empty() {
        Some("Title is required".to_string())
    } else if title.chars().count() > MAX_TITLE_CHARS {
        Some(format!("Title must be less than {} characters", MAX_TITLE_CHARS))
    } else {
        None
    }
}

fn author_error(author: &str) -> Option<String> {
    if author.trim().is_empty() {
        Some("Author is required".to_string())
    } else if author.chars().count() > MAX_AUTHOR_CHARS {
        Some(format!("Author must be less than {} characters", MAX_AUTHOR_CHARS))
    } else {
        None
    }
}

fn parse_year(year: &str, max_year: i32) -> Result<i32, String> {
    let year = year.trim();
    if year.is_empty() {
        return Err("Year is required".to_string());
    }
    match year.parse::<i32>() {
        Err(_) => Err("Year must be a valid number".to_string()),
        Ok(value) if !(MIN_YEAR..=max_year).contains(&value) => {
            Err(format!("Year must be between {} and {}", MIN_YEAR, max_year))
        }
        Ok(value) => Ok(value),
    }
}

fn description_error(description: &str) -> Option<String> {
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        Some(format!(
            "Description must be less than {} characters",
            MAX_DESCRIPTION_CHARS
        ))
    } else {
        None
    }
}

fn parse_status(status: &str) -> Result<ReadingStatus, String> {
    if status.is_empty() {
        return Err("Reading status is required".to_string());
    }
    ReadingStatus::from_str(status).map_err(|_| "Invalid reading status".to_string())
}

/// Checks a decoded server record against the same constraints a draft must
/// satisfy. The store refuses to hold a book that fails this.
pub fn check_book(book: &Book) -> DomainResult<()> {
    if book.id == 0 {
        return Err(DomainError::InvariantViolation(
            "Book id must be positive".to_string(),
        ));
    }

    let max_year = max_publication_year();
    let problems: Vec<String> = [
        title_error(&book.title),
        author_error(&book.author),
        parse_year(&book.year.to_string(), max_year).err(),
        description_error(&book.description),
    ]
    .into_iter()
    .flatten()
    .collect();

    if problems.is_empty() {
        Ok(())
    } else {
        Err(DomainError::InvariantViolation(format!(
            "Book {} is invalid: {}",
            book.id,
            problems.join(", ")
        )))
    }
}

/// Invariants that must hold true for every stored Book:
///
/// 1. Identity is positive and assigned by the server
/// 2. Title is non-empty and at most 200 characters
/// 3. Author is non-empty and at most 100 characters
/// 4. 1000 <= year <= current year + 10
/// 5. Description is at most 1000 characters, may be empty
/// 6. Status is one of the three reading states
