use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::CategoryRef;

/// Placeholder dimensions reported for every cover image.
/// Actual image dimensions are never computed.
pub const COVER_IMAGE_WIDTH: u32 = 800;
pub const COVER_IMAGE_HEIGHT: u32 = 600;

/// Client-facing descriptor of a post's cover image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverImage {
    pub key: String,
    pub width: u32,
    pub height: u32,
}

impl CoverImage {
    pub fn for_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            width: COVER_IMAGE_WIDTH,
            height: COVER_IMAGE_HEIGHT,
        }
    }
}

/// A post together with its resolved categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub cover_image_key: String,
    pub cover_image: CoverImage,
    pub shop_name: Option<String>,
    pub business_hours: Option<String>,
    pub phone_number: Option<String>,
    pub categories: Vec<CategoryRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Category ids as a set, for order-insensitive comparisons.
    pub fn category_ids(&self) -> HashSet<Uuid> {
        self.categories.iter().map(|c| c.id).collect()
    }
}

/// The writable fields of a post, as submitted by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub cover_image_key: String,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostDraftError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("cover image key must not be empty")]
    EmptyCoverImageKey,
}

impl PostDraft {
    /// Validate the draft and bring it into canonical form.
    ///
    /// Titles and keys are trimmed, blank shop fields become `None`, and
    /// repeated category ids are collapsed keeping first occurrence order.
    pub fn normalize(self) -> Result<Self, PostDraftError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(PostDraftError::EmptyTitle);
        }

        let cover_image_key = self.cover_image_key.trim().to_string();
        if cover_image_key.is_empty() {
            return Err(PostDraftError::EmptyCoverImageKey);
        }

        let mut seen = HashSet::new();
        let category_ids = self
            .category_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        Ok(Self {
            title,
            content: self.content,
            cover_image_key,
            category_ids,
            shop_name: non_blank(self.shop_name),
            business_hours: non_blank(self.business_hours),
            phone_number: non_blank(self.phone_number),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostDraft {
        PostDraft {
            title: "  絶品プリン ".to_string(),
            content: "なめらか<br/>".to_string(),
            cover_image_key: "abc".to_string(),
            category_ids: vec![],
            shop_name: Some("  ".to_string()),
            business_hours: Some("11:00-20:00".to_string()),
            phone_number: None,
        }
    }

    #[test]
    fn test_normalize_trims_and_blanks() {
        let normalized = draft().normalize().unwrap();
        assert_eq!(normalized.title, "絶品プリン");
        assert_eq!(normalized.shop_name, None);
        assert_eq!(normalized.business_hours.as_deref(), Some("11:00-20:00"));
        // content is stored verbatim
        assert_eq!(normalized.content, "なめらか<br/>");
    }

    #[test]
    fn test_normalize_collapses_duplicate_categories() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut d = draft();
        d.category_ids = vec![a, b, a, b, a];
        let normalized = d.normalize().unwrap();
        assert_eq!(normalized.category_ids, vec![a, b]);
    }

    #[test]
    fn test_normalize_rejects_missing_fields() {
        let mut d = draft();
        d.title = "   ".to_string();
        assert_eq!(d.normalize(), Err(PostDraftError::EmptyTitle));

        let mut d = draft();
        d.cover_image_key = String::new();
        assert_eq!(d.normalize(), Err(PostDraftError::EmptyCoverImageKey));
    }

    #[test]
    fn test_draft_accepts_camel_case_json() {
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{"title":"t","content":"c","coverImageKey":"k","categoryIds":["{}"],"shopName":"s"}}"#,
            id
        );
        let d: PostDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(d.category_ids, vec![id]);
        assert_eq!(d.shop_name.as_deref(), Some("s"));
        assert_eq!(d.phone_number, None);
    }

    #[test]
    fn test_cover_image_uses_placeholder_dimensions() {
        let cover = CoverImage::for_key("k");
        assert_eq!(cover.width, 800);
        assert_eq!(cover.height, 600);
    }
}
