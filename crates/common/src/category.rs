use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CATEGORY_NAME_MIN_CHARS: usize = 2;
pub const CATEGORY_NAME_MAX_CHARS: usize = 16;

/// A validated category name: trimmed, between 2 and 16 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryName(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryNameError {
    #[error("category name must not be empty")]
    Empty,
    #[error(
        "category name must be between {} and {} characters (got {0})",
        CATEGORY_NAME_MIN_CHARS,
        CATEGORY_NAME_MAX_CHARS
    )]
    Length(usize),
}

impl CategoryName {
    pub fn parse(raw: &str) -> Result<Self, CategoryNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CategoryNameError::Empty);
        }

        // Count characters, not bytes: names are mostly Japanese.
        let chars = trimmed.chars().count();
        if !(CATEGORY_NAME_MIN_CHARS..=CATEGORY_NAME_MAX_CHARS).contains(&chars) {
            return Err(CategoryNameError::Length(chars));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CategoryName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        CategoryName::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A stored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The `(id, name)` projection of a category attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
}

impl From<&Category> for CategoryRef {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
        }
    }
}
