// src/domain/query.rs
//
// Collection query parameters (filter + ordering)
//
// The server applies filtering and ordering; the client only describes
// what it wants and keeps the server's order untouched.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::DomainError;

/// Substring filters, matched case-insensitively by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    Title,
    Author,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookOrder {
    pub field: OrderField,
    pub direction: OrderDirection,
}

/// Everything `fetch_all` can ask the server for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookQuery {
    pub filter: BookFilter,
    pub order: Option<BookOrder>,
}

impl OrderField {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderField::Title => "title",
            OrderField::Author => "author",
            OrderField::Year => "year",
        }
    }
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }
}

impl FromStr for OrderField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(OrderField::Title),
            "author" => Ok(OrderField::Author),
            "year" => Ok(OrderField::Year),
            other => Err(DomainError::UnknownValue {
                field: "orderBy",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for OrderDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(OrderDirection::Asc),
            "desc" => Ok(OrderDirection::Desc),
            other => Err(DomainError::UnknownValue {
                field: "orderDir",
                value: other.to_string(),
            }),
        }
    }
}

impl BookQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.filter.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.filter.author = Some(author.into());
        self
    }

    pub fn ordered_by(mut self, field: OrderField, direction: OrderDirection) -> Self {
        self.order = Some(BookOrder { field, direction });
        self
    }

    /// Query-string pairs for `GET /books`. Blank filters are omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(title) = non_blank(&self.filter.title) {
            pairs.push(("title", title.to_string()));
        }
        if let Some(author) = non_blank(&self.filter.author) {
            pairs.push(("author", author.to_string()));
        }
        if let Some(order) = &self.order {
            pairs.push(("orderBy", order.field.as_str().to_string()));
            pairs.push(("orderDir", order.direction.as_str().to_string()));
        }

        pairs
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
