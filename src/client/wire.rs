//! Request and response bodies of the learning backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ContentItem, Platform, WebResult};

#[derive(Debug, Serialize)]
pub(super) struct ChatRequest<'a> {
    pub message: &'a str,
    pub user_id: &'a str,
}

/// Reply of `POST /chat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub web_results: Option<Vec<WebResult>>,
    #[serde(default)]
    pub learning_platforms: Option<Vec<Platform>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlatformsResponse {
    #[serde(default)]
    pub platforms: Option<Vec<Platform>>,
}

#[derive(Debug, Serialize)]
pub(super) struct UserProfile<'a> {
    #[serde(rename = "_id")]
    pub id: &'a str,
    pub interests: &'a [String],
    pub goals: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
pub(super) struct RecommendationsResponse {
    #[serde(default)]
    pub recommendations: Option<Vec<ContentItem>>,
}

/// Body of `POST /recommend`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub interests: Vec<String>,
    pub level: String,
    pub current_tab: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RecommendResponse {
    #[serde(default)]
    pub platforms: Option<Vec<Platform>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Kind of user interaction with a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Like,
    Start,
    Complete,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Like => "like",
            InteractionKind::Start => "start",
            InteractionKind::Complete => "complete",
        }
    }

    /// Implicit rating logged with the event.
    pub fn event_score(&self) -> f64 {
        match self {
            InteractionKind::Like => 1.0,
            _ => 0.5,
        }
    }
}

/// Body of `POST /events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub user_id: String,
    pub item_id: String,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub score: f64,
    pub ts: DateTime<Utc>,
}

impl InteractionEvent {
    pub fn new(user_id: &str, item_id: &str, kind: InteractionKind, ts: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            item_id: item_id.to_string(),
            kind,
            score: kind.event_score(),
            ts,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct Feedback<'a> {
    pub user_id: &'a str,
    pub item_id: &'a str,
    pub reward: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct CourseAction<'a> {
    pub user_id: &'a str,
    pub course_id: &'a str,
    pub action: InteractionKind,
}

/// Reply of `POST /course-action`; only the skill level is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseActionResponse {
    #[serde(default)]
    pub skill_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_type_and_iso_timestamp() {
        let ts = DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let event = InteractionEvent::new("u1", "i3", InteractionKind::Like, ts);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "like");
        assert_eq!(json["score"], 1.0);
        assert_eq!(json["ts"], "2026-01-02T03:04:05Z");
    }

    #[test]
    fn test_chat_response_tolerates_nulls() {
        let reply: ChatResponse =
            serde_json::from_str(r#"{"response": "hi", "web_results": null}"#).unwrap();
        assert_eq!(reply.response.as_deref(), Some("hi"));
        assert!(reply.web_results.is_none());
        assert!(reply.error.is_none());
    }
}
