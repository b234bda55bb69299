//! The widget adapter.
//!
//! Owns the single [`WidgetState`] behind an async mutex so every event is
//! applied to completion before the next one. Remote calls happen with the
//! lock released; their results are applied only while their request token
//! is still the newest of its kind.

mod state;

pub use state::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::catalog;
use crate::client::{ApiClient, InteractionEvent, InteractionKind, RecommendRequest};
use crate::config::Config;
use crate::db::{self, HistoryStore};
use crate::errors::AppError;
use crate::models::{ContentItem, Platform, SkillLevel, WebResult};
use crate::quiz::{Answer, QuizCatalog};
use crate::tips::{self, LearningTip};

/// Range of the score logged when a course is completed without one.
const SIMULATED_SCORE: std::ops::RangeInclusive<u32> = 70..=99;

const PROGRESS_NOT_SAVED: &str = "Your progress could not be saved.";

const CHAT_UNREACHABLE: &str = "Sorry, I'm having trouble connecting right now. Please try again.";

/// A value together with the state revision it was produced at.
#[derive(Debug)]
pub struct Applied<T> {
    pub data: T,
    pub revision: i64,
}

/// Ranked recommendations with an optional toast.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    pub items: Vec<ContentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Platform cards with an optional toast.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformList {
    pub platforms: Vec<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Assistant reply.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    pub web_results: Vec<WebResult>,
    pub learning_platforms: Vec<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Outcome of starting or completing a course.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdate {
    pub course_id: String,
    /// False when the course already was in the requested state.
    pub changed: bool,
    pub stats: Stats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Which of the independent interaction calls reached the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionReport {
    pub event_recorded: bool,
    pub feedback_sent: bool,
    pub course_action_recorded: bool,
}

/// Outcome of liking a course.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeUpdate {
    pub course_id: String,
    pub report: InteractionReport,
    pub notice: Notice,
}

struct Inner {
    state: WidgetState,
    rng: StdRng,
}

/// Thin adapter applying every widget event to the shared state.
pub struct Widget {
    inner: Mutex<Inner>,
    store: HistoryStore,
    client: ApiClient,
    catalog: QuizCatalog,
    content: Vec<ContentItem>,
    recommendation_limit: usize,
}

fn validate_course_id(course_id: &str) -> Result<&str, AppError> {
    let course_id = course_id.trim();
    if course_id.is_empty() {
        return Err(AppError::Validation("Course id is required".to_string()));
    }
    Ok(course_id)
}

/// Log a failed best-effort call and report whether it succeeded.
fn best_effort<T>(what: &str, result: Result<T, AppError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Could not {}: {}", what, e);
            None
        }
    }
}

impl Widget {
    /// Open the history database and connect the backend client.
    pub async fn open(config: &Config) -> Result<Self, AppError> {
        let pool = db::init_database(&config.db_path).await?;
        let store = HistoryStore::new(pool);
        let client = ApiClient::new(&config.api_base_url, config.request_timeout)?;
        Self::load(config, store, client, StdRng::from_entropy()).await
    }

    /// Build a widget around existing parts, restoring the stored history.
    pub async fn load(
        config: &Config,
        store: HistoryStore,
        client: ApiClient,
        rng: StdRng,
    ) -> Result<Self, AppError> {
        let history = store.load(&config.user_id).await?;
        tracing::info!(
            user = %config.user_id,
            skill_level = %history.skill_level,
            completed = history.completed_courses.len(),
            "Loaded user history"
        );

        Ok(Self {
            inner: Mutex::new(Inner {
                state: WidgetState::new(config.user_id.clone(), history),
                rng,
            }),
            store,
            client,
            catalog: QuizCatalog::builtin()?,
            content: catalog::builtin_content()?,
            recommendation_limit: config.recommendation_limit,
        })
    }

    pub async fn revision(&self) -> i64 {
        self.inner.lock().await.state.revision()
    }

    /// Save the history. A failed write leaves the applied update in place
    /// and comes back as an error notice for the page.
    async fn persist(&self, state: &WidgetState) -> Option<Notice> {
        match self.store.save(state.user_id(), state.history()).await {
            Ok(()) => None,
            Err(e) => {
                tracing::error!(user = state.user_id(), "Failed to save user history: {}", e);
                Some(Notice::error(PROGRESS_NOT_SAVED))
            }
        }
    }

    // ----- Local state -----

    pub async fn snapshot(&self) -> Applied<Snapshot> {
        let inner = self.inner.lock().await;
        Applied {
            data: inner.state.snapshot(),
            revision: inner.state.revision(),
        }
    }

    pub async fn select_interest(&self, interest: &str) -> Result<Applied<Snapshot>, AppError> {
        let mut inner = self.inner.lock().await;
        if inner.state.select_interest(interest)? {
            tracing::debug!(interest, "Interest selected");
        }
        Ok(Applied {
            data: inner.state.snapshot(),
            revision: inner.state.revision(),
        })
    }

    pub async fn deselect_interest(&self, interest: &str) -> Applied<Snapshot> {
        let mut inner = self.inner.lock().await;
        if inner.state.deselect_interest(interest) {
            tracing::debug!(interest, "Interest deselected");
        }
        Applied {
            data: inner.state.snapshot(),
            revision: inner.state.revision(),
        }
    }

    pub async fn switch_tab(&self, tab: &str) -> Result<Applied<Snapshot>, AppError> {
        let mut inner = self.inner.lock().await;
        inner.state.switch_tab(tab)?;
        Ok(Applied {
            data: inner.state.snapshot(),
            revision: inner.state.revision(),
        })
    }

    pub async fn tips(&self) -> Applied<LearningTip> {
        let inner = self.inner.lock().await;
        Applied {
            data: tips::learning_tip(inner.state.interests(), inner.state.skill_level()),
            revision: inner.state.revision(),
        }
    }

    /// The static catalog, annotated and ranked for the current user.
    pub async fn content(&self) -> Applied<Vec<ContentItem>> {
        let inner = self.inner.lock().await;
        Applied {
            data: inner.state.rank_items(self.content.clone()),
            revision: inner.state.revision(),
        }
    }

    // ----- Quiz -----

    pub async fn start_quiz(&self) -> Result<Applied<QuizView>, AppError> {
        let mut guard = self.inner.lock().await;
        let Inner { state, rng } = &mut *guard;
        let view = state.start_quiz(&self.catalog, rng)?;
        Ok(Applied {
            data: view,
            revision: state.revision(),
        })
    }

    pub async fn quiz_view(&self) -> Applied<QuizView> {
        let inner = self.inner.lock().await;
        Applied {
            data: inner.state.quiz_view(),
            revision: inner.state.revision(),
        }
    }

    /// Answer (or skip) the current question; the history is saved when the
    /// quiz finishes.
    pub async fn advance_quiz(
        &self,
        session_id: Uuid,
        answer: Answer,
    ) -> Result<Applied<QuizUpdate>, AppError> {
        let mut inner = self.inner.lock().await;
        let mut update = inner.state.advance_quiz(session_id, answer)?;
        if update.completed {
            if let Some(failed) = self.persist(&inner.state).await {
                // Keep the result in the message; the level is applied either way.
                let result = update.notice.take().map(|n| n.message).unwrap_or_default();
                update.notice = Some(Notice::error(format!("{} {}", result, failed.message)));
            }
        }
        Ok(Applied {
            data: update,
            revision: inner.state.revision(),
        })
    }

    // ----- Remote data -----

    /// Push the profile, fetch remote recommendations and re-rank them locally.
    pub async fn refresh_recommendations(&self) -> Result<Applied<Recommendations>, AppError> {
        let (token, user_id, interests) = {
            let mut inner = self.inner.lock().await;
            let token = inner.state.issue_token(RequestKind::Recommendations);
            (
                token,
                inner.state.user_id().to_string(),
                inner.state.interests().as_slice().to_vec(),
            )
        };

        if !interests.is_empty() {
            best_effort(
                "update user profile",
                self.client.update_user(&user_id, &interests).await,
            );
        }
        let fetched = self
            .client
            .recommendations(&user_id, self.recommendation_limit)
            .await;

        let mut inner = self.inner.lock().await;
        inner.state.ensure_current(token)?;

        let data = match fetched {
            Ok(items) if items.is_empty() => Recommendations {
                items: Vec::new(),
                notice: Some(Notice::info(
                    "No recommendations found. Try selecting some interests!",
                )),
            },
            Ok(items) => {
                let items = inner.state.apply_recommendations(items).to_vec();
                tracing::info!(count = items.len(), "Recommendations updated");
                Recommendations {
                    items,
                    notice: None,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to load recommendations: {}", e);
                Recommendations {
                    items: inner.state.recommendations().to_vec(),
                    notice: Some(Notice::error("Error loading recommendations")),
                }
            }
        };

        Ok(Applied {
            data,
            revision: inner.state.revision(),
        })
    }

    /// Ask the backend for platforms matching interests, level and tab.
    pub async fn refresh_platforms(&self) -> Result<Applied<PlatformList>, AppError> {
        let (token, request) = {
            let mut inner = self.inner.lock().await;
            if inner.state.interests().is_empty() {
                return Err(AppError::Validation(
                    "Please select at least one interest first!".to_string(),
                ));
            }
            let token = inner.state.issue_token(RequestKind::Platforms);
            let request = RecommendRequest {
                interests: inner.state.interests().as_slice().to_vec(),
                level: inner.state.skill_level().as_str().to_string(),
                current_tab: inner.state.current_tab().to_string(),
            };
            (token, request)
        };

        let fetched = self.client.recommend_platforms(&request).await;

        let mut inner = self.inner.lock().await;
        inner.state.ensure_current(token)?;

        let data = match fetched {
            Ok(platforms) => {
                let count = platforms.len();
                tracing::info!(
                    count,
                    local = platforms.iter().filter(|p| p.is_local()).count(),
                    "Platforms updated"
                );
                inner.state.apply_platforms(platforms);
                let target = match inner.state.skill_level() {
                    SkillLevel::NotAssessed => "your selected interests".to_string(),
                    level => format!("your {} level", level),
                };
                PlatformList {
                    platforms: inner.state.visible_platforms(),
                    notice: Some(Notice::success(format!(
                        "Found {} courses perfect for {}!",
                        count, target
                    ))),
                }
            }
            Err(e) => {
                tracing::warn!("Failed to load platforms: {}", e);
                PlatformList {
                    platforms: Vec::new(),
                    notice: Some(Notice::error(format!(
                        "Error loading recommendations: {}",
                        e.message()
                    ))),
                }
            }
        };

        Ok(Applied {
            data,
            revision: inner.state.revision(),
        })
    }

    /// Last fetched platforms, filtered for the current selection.
    pub async fn platforms(&self) -> Applied<Vec<Platform>> {
        let inner = self.inner.lock().await;
        Applied {
            data: inner.state.visible_platforms(),
            revision: inner.state.revision(),
        }
    }

    /// Platforms for the primary interest, or the default list without one.
    pub async fn topic_platforms(&self) -> Result<Applied<PlatformList>, AppError> {
        let (token, topic) = {
            let mut inner = self.inner.lock().await;
            let Some(topic) = inner.state.interests().primary().map(str::to_string) else {
                return Ok(Applied {
                    data: PlatformList {
                        platforms: catalog::default_platforms(),
                        notice: None,
                    },
                    revision: inner.state.revision(),
                });
            };
            (inner.state.issue_token(RequestKind::TopicPlatforms), topic)
        };

        let fetched = self.client.learning_platforms(&topic).await;

        let inner = self.inner.lock().await;
        inner.state.ensure_current(token)?;

        let data = match fetched {
            Ok(platforms) => PlatformList {
                platforms,
                notice: None,
            },
            Err(e) => {
                tracing::warn!(topic = %topic, "Failed to load topic platforms: {}", e);
                PlatformList {
                    platforms: Vec::new(),
                    notice: Some(Notice::error(format!(
                        "Could not load platforms for {}",
                        topic
                    ))),
                }
            }
        };

        Ok(Applied {
            data,
            revision: inner.state.revision(),
        })
    }

    pub async fn chat(&self, message: &str) -> Result<Applied<ChatReply>, AppError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::Validation("Message is required".to_string()));
        }
        let user_id = self.inner.lock().await.state.user_id().to_string();

        let data = match self.client.chat(&user_id, message).await {
            Ok(response) => {
                let reply = match (response.error, response.response) {
                    (Some(error), _) => format!("Sorry, I encountered an error: {}", error),
                    (None, Some(reply)) => reply,
                    (None, None) => String::new(),
                };
                ChatReply {
                    reply,
                    web_results: response.web_results.unwrap_or_default(),
                    learning_platforms: response.learning_platforms.unwrap_or_default(),
                    notice: None,
                }
            }
            Err(e) => {
                tracing::warn!("Chat request failed: {}", e);
                ChatReply {
                    reply: CHAT_UNREACHABLE.to_string(),
                    web_results: Vec::new(),
                    learning_platforms: Vec::new(),
                    notice: Some(Notice::error("Chat service unavailable")),
                }
            }
        };

        Ok(Applied {
            data,
            revision: self.revision().await,
        })
    }

    // ----- Courses -----

    pub async fn start_course(&self, course_id: &str) -> Result<Applied<CourseUpdate>, AppError> {
        let course_id = validate_course_id(course_id)?;
        let (user_id, save_failed) = {
            let mut inner = self.inner.lock().await;
            if !inner.state.start_course(course_id) {
                return Ok(Applied {
                    data: CourseUpdate {
                        course_id: course_id.to_string(),
                        changed: false,
                        stats: inner.state.stats(),
                        notice: None,
                    },
                    revision: inner.state.revision(),
                });
            }
            let save_failed = self.persist(&inner.state).await;
            (inner.state.user_id().to_string(), save_failed)
        };

        best_effort(
            "record course start",
            self.client
                .course_action(&user_id, course_id, InteractionKind::Start)
                .await,
        );

        let inner = self.inner.lock().await;
        Ok(Applied {
            data: CourseUpdate {
                course_id: course_id.to_string(),
                changed: true,
                stats: inner.state.stats(),
                notice: Some(save_failed.unwrap_or_else(|| {
                    Notice::info("Course started! Good luck with your learning journey!")
                })),
            },
            revision: inner.state.revision(),
        })
    }

    /// Mark a course complete, logging `score` (or a simulated one), then let
    /// the backend's reported skill level override the local one.
    pub async fn complete_course(
        &self,
        course_id: &str,
        score: Option<u32>,
    ) -> Result<Applied<CourseUpdate>, AppError> {
        let course_id = validate_course_id(course_id)?;
        if score.is_some_and(|s| s > 100) {
            return Err(AppError::Validation(
                "Score must be between 0 and 100".to_string(),
            ));
        }

        let (token, user_id, changed, mut save_failed) = {
            let mut guard = self.inner.lock().await;
            let Inner { state, rng } = &mut *guard;
            let score = score.unwrap_or_else(|| rng.gen_range(SIMULATED_SCORE));
            let changed = state.complete_course(course_id, score);
            let save_failed = self.persist(state).await;
            (
                state.issue_token(RequestKind::SkillSync),
                state.user_id().to_string(),
                changed,
                save_failed,
            )
        };

        let reply = best_effort(
            "record course completion",
            self.client
                .course_action(&user_id, course_id, InteractionKind::Complete)
                .await,
        );

        let mut inner = self.inner.lock().await;
        let reported = reply
            .and_then(|r| r.skill_level)
            .and_then(|raw| match SkillLevel::parse(&raw) {
                Some(level) => Some(level),
                None => {
                    tracing::warn!("Ignoring unknown skill level from backend: {}", raw);
                    None
                }
            });
        if let Some(level) = reported {
            if inner.state.is_current(token) {
                inner.state.override_skill_level(level);
                save_failed = save_failed.or(self.persist(&inner.state).await);
            } else {
                tracing::debug!("Skipping skill level from a superseded completion");
            }
        }

        Ok(Applied {
            data: CourseUpdate {
                course_id: course_id.to_string(),
                changed,
                stats: inner.state.stats(),
                notice: Some(save_failed.unwrap_or_else(|| {
                    Notice::success("Congratulations! Course completed successfully!")
                })),
            },
            revision: inner.state.revision(),
        })
    }

    /// Record a like: event log, feedback and course action, each attempted
    /// independently.
    pub async fn like_course(&self, course_id: &str) -> Result<Applied<LikeUpdate>, AppError> {
        let course_id = validate_course_id(course_id)?;
        let user_id = self.inner.lock().await.state.user_id().to_string();
        let kind = InteractionKind::Like;

        let event = InteractionEvent::new(&user_id, course_id, kind, chrono::Utc::now());
        let event_recorded = best_effort("record event", self.client.record_event(&event).await)
            .is_some();
        let feedback_sent = best_effort(
            "send feedback",
            self.client.send_feedback(&user_id, course_id, 1.0).await,
        )
        .is_some();
        let course_action_recorded = best_effort(
            "record course action",
            self.client.course_action(&user_id, course_id, kind).await,
        )
        .is_some();

        let report = InteractionReport {
            event_recorded,
            feedback_sent,
            course_action_recorded,
        };
        tracing::debug!(course_id, kind = kind.as_str(), ?report, "Interaction recorded");

        Ok(Applied {
            data: LikeUpdate {
                course_id: course_id.to_string(),
                report,
                notice: Notice::success("Thanks for the feedback!"),
            },
            revision: self.revision().await,
        })
    }
}
