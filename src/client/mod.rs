//! HTTP client for the learning backend.
//!
//! Every call is a single attempt: no retries, and no timeout unless one is
//! configured. Callers decide whether a failure is worth surfacing.

mod wire;

pub use wire::*;

use std::time::Duration;

use reqwest::{Response, Url};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{ContentItem, Platform};

/// Goals sent with every profile update.
const DEFAULT_GOALS: [&str; 1] = ["learn new skills"];

/// Client for the chat, recommendation and interaction endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let base = Url::parse(base_url)
            .map_err(|e| AppError::Validation(format!("Invalid backend URL '{}': {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "Backend URL '{}' cannot be used as a base",
                base_url
            )));
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("learnhub-widget/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base })
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<Response, AppError> {
        let response = self
            .http
            .post(self.endpoint(segments))
            .json(body)
            .send()
            .await?;
        Ok(response.error_for_status()?)
    }

    /// POST /chat
    pub async fn chat(&self, user_id: &str, message: &str) -> Result<ChatResponse, AppError> {
        let response = self
            .post_json(&["chat"], &ChatRequest { message, user_id })
            .await?;
        Ok(response.json().await?)
    }

    /// GET /learning-platforms/{topic}
    pub async fn learning_platforms(&self, topic: &str) -> Result<Vec<Platform>, AppError> {
        let response = self
            .http
            .get(self.endpoint(&["learning-platforms", topic]))
            .send()
            .await?
            .error_for_status()?;
        let body: PlatformsResponse = response.json().await?;
        Ok(body.platforms.unwrap_or_default())
    }

    /// POST /users
    pub async fn update_user(&self, user_id: &str, interests: &[String]) -> Result<(), AppError> {
        let profile = UserProfile {
            id: user_id,
            interests,
            goals: &DEFAULT_GOALS,
        };
        self.post_json(&["users"], &profile).await?;
        Ok(())
    }

    /// GET /recommendations?user_id=&limit=
    pub async fn recommendations(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ContentItem>, AppError> {
        let response = self
            .http
            .get(self.endpoint(&["recommendations"]))
            .query(&[("user_id", user_id.to_string()), ("limit", limit.to_string())])
            .send()
            .await?
            .error_for_status()?;
        let body: RecommendationsResponse = response.json().await?;
        Ok(body.recommendations.unwrap_or_default())
    }

    /// POST /recommend
    pub async fn recommend_platforms(
        &self,
        request: &RecommendRequest,
    ) -> Result<Vec<Platform>, AppError> {
        let response = self.post_json(&["recommend"], request).await?;
        let body: RecommendResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(AppError::Remote(error));
        }
        Ok(body.platforms.unwrap_or_default())
    }

    /// POST /events
    pub async fn record_event(&self, event: &InteractionEvent) -> Result<(), AppError> {
        self.post_json(&["events"], event).await?;
        Ok(())
    }

    /// POST /feedback
    pub async fn send_feedback(
        &self,
        user_id: &str,
        item_id: &str,
        reward: f64,
    ) -> Result<(), AppError> {
        let feedback = Feedback {
            user_id,
            item_id,
            reward,
        };
        self.post_json(&["feedback"], &feedback).await?;
        Ok(())
    }

    /// POST /course-action
    ///
    /// A body that does not decode is treated as carrying no skill level.
    pub async fn course_action(
        &self,
        user_id: &str,
        course_id: &str,
        action: InteractionKind,
    ) -> Result<CourseActionResponse, AppError> {
        let body = CourseAction {
            user_id,
            course_id,
            action,
        };
        let response = self.post_json(&["course-action"], &body).await?;
        match response.json::<CourseActionResponse>().await {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                tracing::debug!("Ignoring undecodable course-action reply: {}", e);
                Ok(CourseActionResponse::default())
            }
        }
    }
}
