//! Content item model matching the learning backend's recommendation records.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A link to an external platform offering a content item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlatformLink {
    pub name: String,
    pub url: String,
}

/// A course, video, document or exercise that can be recommended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<PlatformLink>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_in_progress: bool,
    /// Computed locally by the ranker; never authoritative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<u32>,
}

impl ContentItem {
    /// Build a content item, rejecting an empty id or title.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        tags: &[&str],
        item_type: impl Into<String>,
    ) -> Result<Self, AppError> {
        let id = id.into();
        let title = title.into();
        if id.trim().is_empty() {
            return Err(AppError::Validation("Content id is required".to_string()));
        }
        if title.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "Content {} has no title",
                id
            )));
        }

        Ok(Self {
            id,
            title,
            description: description.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            item_type: item_type.into(),
            platforms: Vec::new(),
            is_completed: false,
            is_in_progress: false,
            relevance_score: None,
        })
    }

    pub fn with_platforms(mut self, links: &[(&str, &str)]) -> Self {
        self.platforms = links
            .iter()
            .map(|(name, url)| PlatformLink {
                name: name.to_string(),
                url: url.to_string(),
            })
            .collect();
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_backend_record() {
        let raw = r#"{"_id": "i1", "title": "Intro", "tags": ["python"], "type": "video"}"#;
        let item: ContentItem = serde_json::from_str(raw).unwrap();

        assert_eq!(item.id, "i1");
        assert_eq!(item.item_type, "video");
        assert!(item.description.is_empty());
        assert!(!item.is_completed);
        assert!(item.relevance_score.is_none());
    }

    #[test]
    fn test_accepts_plain_id_alias() {
        let item: ContentItem = serde_json::from_str(r#"{"id": "x", "title": "X"}"#).unwrap();
        assert_eq!(item.id, "x");
    }

    #[test]
    fn test_new_rejects_empty_id() {
        assert!(ContentItem::new("", "Title", "", &[], "video").is_err());
        assert!(ContentItem::new("i1", " ", "", &[], "video").is_err());
    }
}
