//! External learning platform and web-result records.

use serde::{Deserialize, Serialize};

/// An external learning service.
///
/// Chat and topic lookups only fill name, url and description; the
/// `/recommend` endpoint adds the display metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Platform {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl Platform {
    pub fn basic(name: &str, url: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            description: description.to_string(),
            image: None,
            category: None,
            location: None,
            rating: None,
            interests: None,
            level: None,
        }
    }

    /// Whether the platform is based in Nepal.
    pub fn is_local(&self) -> bool {
        self.location
            .as_deref()
            .is_some_and(|loc| loc.contains("Nepal") || loc.contains("Nepali"))
    }
}

/// A web search hit attached to a chat reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebResult {
    pub title: String,
    pub link: String,
}
