//! Application state of one widget and its synchronous update functions.
//!
//! Nothing in here performs I/O. The [`Widget`](super::Widget) adapter owns
//! the single instance and applies remote results through request tokens.

use std::collections::HashMap;

use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    ContentItem, Difficulty, InterestSet, Platform, SkillLevel, UserHistory, OPTION_COUNT,
};
use crate::quiz::{Answer, QuizCatalog, QuizPhase, QuizSession};
use crate::ranker;

/// Tab shown when the widget starts.
pub const DEFAULT_TAB: &str = "all";

/// Severity of a toast shown by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// User-visible, non-fatal notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Logical remote actions that can have a request in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Recommendations,
    Platforms,
    TopicPlatforms,
    /// Skill level reported back by `/course-action` after a completion.
    SkillSync,
}

/// Generation issued when a remote request starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    kind: RequestKind,
    generation: u64,
}

/// What the page sees of the quiz.
///
/// The correct option is never exposed while a question is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum QuizView {
    NotStarted,
    #[serde(rename_all = "camelCase")]
    InProgress {
        session_id: Uuid,
        index: usize,
        total: usize,
        /// Percentage of questions already answered or skipped.
        progress: u32,
        question: String,
        options: [String; OPTION_COUNT],
        difficulty: Difficulty,
    },
    #[serde(rename_all = "camelCase")]
    Results {
        session_id: Uuid,
        correct: u32,
        total: usize,
        percentage: u32,
        skill_level: SkillLevel,
    },
}

impl QuizView {
    fn of(session: Option<&QuizSession>) -> Self {
        let Some(session) = session else {
            return QuizView::NotStarted;
        };

        match (session.phase(), session.current_question()) {
            (QuizPhase::InProgress, Some(question)) => QuizView::InProgress {
                session_id: session.id(),
                index: session.current_index(),
                total: session.total(),
                progress: progress(session.current_index(), session.total()),
                question: question.text().to_string(),
                options: question.options().clone(),
                difficulty: question.difficulty(),
            },
            _ => QuizView::Results {
                session_id: session.id(),
                correct: session.correct_count(),
                total: session.total(),
                percentage: session.percentage(),
                skill_level: session.skill_level().unwrap_or(SkillLevel::Beginner),
            },
        }
    }
}

fn progress(index: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    u32::try_from(index * 100 / total).unwrap_or(100)
}

/// Result of answering or skipping a question.
#[derive(Debug, Clone, Serialize)]
pub struct QuizUpdate {
    pub quiz: QuizView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    /// Set when this update produced the results (skill level changed).
    #[serde(skip)]
    pub completed: bool,
}

/// Dashboard counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_interests: usize,
    pub skill_level: SkillLevel,
    /// Score of the finished quiz session, if any.
    pub quiz_score: Option<u32>,
    pub completed_courses: usize,
    pub in_progress_courses: usize,
}

/// Everything the page needs to redraw the widget.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub user_id: String,
    pub interests: InterestSet,
    pub skill_level: SkillLevel,
    pub current_tab: String,
    pub quiz: QuizView,
    pub stats: Stats,
}

/// The widget's state.
#[derive(Debug)]
pub struct WidgetState {
    user_id: String,
    interests: InterestSet,
    quiz: Option<QuizSession>,
    history: UserHistory,
    current_tab: String,
    recommendations: Vec<ContentItem>,
    platforms: Vec<Platform>,
    revision: i64,
    generations: HashMap<RequestKind, u64>,
}

impl WidgetState {
    pub fn new(user_id: impl Into<String>, history: UserHistory) -> Self {
        Self {
            user_id: user_id.into(),
            interests: InterestSet::new(),
            quiz: None,
            history,
            current_tab: DEFAULT_TAB.to_string(),
            recommendations: Vec::new(),
            platforms: Vec::new(),
            revision: 0,
            generations: HashMap::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn interests(&self) -> &InterestSet {
        &self.interests
    }

    pub fn history(&self) -> &UserHistory {
        &self.history
    }

    pub fn skill_level(&self) -> SkillLevel {
        self.history.skill_level
    }

    pub fn current_tab(&self) -> &str {
        &self.current_tab
    }

    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    pub fn recommendations(&self) -> &[ContentItem] {
        &self.recommendations
    }

    /// Revision of the last applied update.
    pub fn revision(&self) -> i64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    fn superseded(&self, message: String) -> AppError {
        AppError::Superseded {
            message,
            current_revision: self.revision,
        }
    }

    // ----- Request tokens -----

    /// Start a new request of `kind`, invalidating any older one in flight.
    pub fn issue_token(&mut self, kind: RequestKind) -> RequestToken {
        let generation = self.generations.entry(kind).or_insert(0);
        *generation += 1;
        RequestToken {
            kind,
            generation: *generation,
        }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.generations.get(&token.kind).copied() == Some(token.generation)
    }

    /// Fail with `Superseded` when a newer request of the same kind started.
    pub fn ensure_current(&self, token: RequestToken) -> Result<(), AppError> {
        if self.is_current(token) {
            return Ok(());
        }
        tracing::debug!(kind = ?token.kind, generation = token.generation, "Dropping stale response");
        Err(self.superseded(format!(
            "A newer {:?} request replaced this one",
            token.kind
        )))
    }

    // ----- Interests and tabs -----

    /// Select an interest. Returns false when it was already selected.
    pub fn select_interest(&mut self, interest: &str) -> Result<bool, AppError> {
        let interest = interest.trim();
        if interest.is_empty() {
            return Err(AppError::Validation("Interest is required".to_string()));
        }
        let changed = self.interests.select(interest);
        if changed {
            self.bump();
        }
        Ok(changed)
    }

    /// Deselect an interest. Returns false when it was not selected.
    pub fn deselect_interest(&mut self, interest: &str) -> bool {
        let changed = self.interests.deselect(interest.trim());
        if changed {
            self.bump();
        }
        changed
    }

    pub fn switch_tab(&mut self, tab: &str) -> Result<(), AppError> {
        let tab = tab.trim();
        if tab.is_empty() {
            return Err(AppError::Validation("Tab is required".to_string()));
        }
        if self.current_tab != tab {
            self.current_tab = tab.to_string();
            self.bump();
        }
        Ok(())
    }

    // ----- Quiz -----

    /// Replace any previous session with a freshly generated quiz.
    pub fn start_quiz<R: Rng + ?Sized>(
        &mut self,
        catalog: &QuizCatalog,
        rng: &mut R,
    ) -> Result<QuizView, AppError> {
        let session = QuizSession::start(self.interests.as_slice(), catalog, rng)?;
        tracing::info!(
            session = %session.id(),
            questions = session.total(),
            "Quiz started"
        );
        self.quiz = Some(session);
        self.bump();
        Ok(self.quiz_view())
    }

    pub fn quiz_view(&self) -> QuizView {
        QuizView::of(self.quiz.as_ref())
    }

    /// Record `answer` for the current question of session `session_id`.
    ///
    /// When the last question is answered the derived skill level replaces
    /// the one in the history.
    pub fn advance_quiz(&mut self, session_id: Uuid, answer: Answer) -> Result<QuizUpdate, AppError> {
        let current_revision = self.revision;
        let session = self
            .quiz
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No quiz has been started".to_string()))?;

        if session.id() != session_id {
            return Err(AppError::Superseded {
                message: format!("Quiz session {} was replaced by a newer quiz", session_id),
                current_revision,
            });
        }
        if session.phase() == QuizPhase::Results {
            return Ok(QuizUpdate {
                quiz: self.quiz_view(),
                notice: None,
                completed: false,
            });
        }

        let phase = session.advance(answer);
        let mut notice = None;
        let mut completed = false;
        if phase == QuizPhase::Results {
            let level = session.skill_level().unwrap_or(SkillLevel::Beginner);
            notice = Some(Notice::success(format!(
                "Quiz completed! You scored {}% and reached {} level!",
                session.percentage(),
                level
            )));
            self.history.skill_level = level;
            completed = true;
        }
        self.bump();

        Ok(QuizUpdate {
            quiz: self.quiz_view(),
            notice,
            completed,
        })
    }

    // ----- Recommendations and platforms -----

    /// Annotate and rank `items` for the current interests and skill level.
    pub fn rank_items(&self, items: Vec<ContentItem>) -> Vec<ContentItem> {
        let items = ranker::annotate(items, &self.history);
        ranker::rank(items, self.interests.as_slice(), self.history.skill_level)
    }

    /// Keep freshly ranked remote recommendations.
    pub fn apply_recommendations(&mut self, items: Vec<ContentItem>) -> &[ContentItem] {
        self.recommendations = self.rank_items(items);
        self.bump();
        &self.recommendations
    }

    pub fn apply_platforms(&mut self, platforms: Vec<Platform>) {
        self.platforms = platforms;
        self.bump();
    }

    /// Last fetched platforms visible for the current selection.
    pub fn visible_platforms(&self) -> Vec<Platform> {
        ranker::filter_platforms(
            &self.platforms,
            self.interests.as_slice(),
            self.history.skill_level,
        )
    }

    // ----- Courses -----

    /// Returns false when the course was already in progress.
    pub fn start_course(&mut self, course_id: &str) -> bool {
        let changed = self.history.start_course(course_id);
        if changed {
            self.bump();
        }
        changed
    }

    /// Returns false when the course had already been completed. The
    /// revision moves only if the history did.
    pub fn complete_course(&mut self, course_id: &str, score: u32) -> bool {
        let was_in_progress = self.history.is_in_progress(course_id);
        let changed = self
            .history
            .complete_course(course_id, score, chrono::Utc::now());
        if changed || was_in_progress {
            self.bump();
        }
        changed
    }

    /// Adopt a skill level reported by the learning backend.
    pub fn override_skill_level(&mut self, level: SkillLevel) {
        if self.history.skill_level != level {
            tracing::info!(from = %self.history.skill_level, to = %level, "Skill level updated by backend");
            self.history.skill_level = level;
            self.bump();
        }
    }

    // ----- Views -----

    pub fn stats(&self) -> Stats {
        let quiz_score = self
            .quiz
            .as_ref()
            .filter(|q| q.phase() == QuizPhase::Results)
            .map(QuizSession::percentage);

        Stats {
            total_interests: self.interests.len(),
            skill_level: self.history.skill_level,
            quiz_score,
            completed_courses: self.history.completed_courses.len(),
            in_progress_courses: self.history.in_progress_courses.len(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            user_id: self.user_id.clone(),
            interests: self.interests.clone(),
            skill_level: self.history.skill_level,
            current_tab: self.current_tab.clone(),
            quiz: self.quiz_view(),
            stats: self.stats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state_with(interests: &[&str]) -> WidgetState {
        let mut state = WidgetState::new("u1", UserHistory::default());
        for interest in interests {
            state.select_interest(interest).unwrap();
        }
        state
    }

    fn started(state: &mut WidgetState) -> Uuid {
        let catalog = QuizCatalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        match state.start_quiz(&catalog, &mut rng).unwrap() {
            QuizView::InProgress { session_id, .. } => session_id,
            other => panic!("unexpected view {:?}", other),
        }
    }

    /// Answer every remaining question correctly.
    fn answer_all(state: &mut WidgetState, session_id: Uuid) -> QuizUpdate {
        loop {
            let correct = state.quiz().unwrap().current_question().unwrap().correct();
            let update = state.advance_quiz(session_id, Answer::Selected(correct)).unwrap();
            if update.completed {
                return update;
            }
        }
    }

    #[test]
    fn test_select_bumps_revision_only_on_change() {
        let mut state = WidgetState::new("u1", UserHistory::default());
        assert!(state.select_interest("python").unwrap());
        assert!(!state.select_interest(" python ").unwrap());
        assert_eq!(state.revision(), 1);

        assert!(state.deselect_interest("python"));
        assert!(!state.deselect_interest("python"));
        assert_eq!(state.revision(), 2);
    }

    #[test]
    fn test_empty_interest_rejected() {
        let mut state = WidgetState::new("u1", UserHistory::default());
        assert!(matches!(
            state.select_interest("  "),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_quiz_needs_interest() {
        let mut state = WidgetState::new("u1", UserHistory::default());
        let catalog = QuizCatalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let result = state.start_quiz(&catalog, &mut rng);
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(state.quiz_view(), QuizView::NotStarted);
    }

    #[test]
    fn test_full_quiz_sets_skill_level() {
        let mut state = state_with(&["python"]);
        let session_id = started(&mut state);

        let update = answer_all(&mut state, session_id);
        assert_eq!(state.skill_level(), SkillLevel::Advanced);
        assert_eq!(
            update.notice.unwrap().message,
            "Quiz completed! You scored 100% and reached Advanced level!"
        );
        assert!(matches!(
            update.quiz,
            QuizView::Results { correct: 5, total: 5, percentage: 100, .. }
        ));
        assert_eq!(state.stats().quiz_score, Some(100));
    }

    #[test]
    fn test_answer_for_replaced_session_is_superseded() {
        let mut state = state_with(&["python"]);
        let old = started(&mut state);
        let new = started(&mut state);
        assert_ne!(old, new);

        let result = state.advance_quiz(old, Answer::Skipped);
        assert!(matches!(result, Err(AppError::Superseded { .. })));
        assert!(state.advance_quiz(new, Answer::Skipped).is_ok());
    }

    #[test]
    fn test_advance_without_quiz_is_not_found() {
        let mut state = state_with(&["python"]);
        let result = state.advance_quiz(Uuid::new_v4(), Answer::Skipped);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_advance_after_results_keeps_state() {
        let mut state = state_with(&["python"]);
        let session_id = started(&mut state);
        answer_all(&mut state, session_id);
        let revision = state.revision();

        let update = state.advance_quiz(session_id, Answer::Selected(0)).unwrap();
        assert!(!update.completed);
        assert!(update.notice.is_none());
        assert_eq!(state.revision(), revision);
    }

    #[test]
    fn test_in_progress_view_hides_answer() {
        let mut state = state_with(&["javascript"]);
        started(&mut state);

        let json = serde_json::to_value(state.quiz_view()).unwrap();
        assert_eq!(json["phase"], "inProgress");
        assert_eq!(json["index"], 0);
        assert_eq!(json["progress"], 0);
        assert_eq!(json["options"].as_array().unwrap().len(), 4);
        assert!(json.get("correct").is_none());
    }

    #[test]
    fn test_tokens_supersede_older_requests() {
        let mut state = WidgetState::new("u1", UserHistory::default());
        let first = state.issue_token(RequestKind::Recommendations);
        let other_kind = state.issue_token(RequestKind::Platforms);
        let second = state.issue_token(RequestKind::Recommendations);

        assert!(!state.is_current(first));
        assert!(state.is_current(second));
        assert!(state.is_current(other_kind));
        assert!(matches!(
            state.ensure_current(first),
            Err(AppError::Superseded { .. })
        ));
    }

    #[test]
    fn test_recommendations_ranked_with_history_flags() {
        let mut state = state_with(&["python"]);
        state.start_course("b");
        let items = vec![
            ContentItem::new("a", "A", "", &["javascript"], "video").unwrap(),
            ContentItem::new("b", "B", "", &["python"], "video").unwrap(),
        ];

        let ranked = state.apply_recommendations(items);
        assert_eq!(ranked[0].id, "b");
        assert!(ranked[0].is_in_progress);
        assert_eq!(ranked[0].relevance_score, Some(2));
    }

    #[test]
    fn test_course_lifecycle_updates_stats() {
        let mut state = WidgetState::new("u1", UserHistory::default());
        assert!(state.start_course("i1"));
        assert!(!state.start_course("i1"));
        assert_eq!(state.stats().in_progress_courses, 1);

        assert!(state.complete_course("i1", 88));
        let stats = state.stats();
        assert_eq!(stats.in_progress_courses, 0);
        assert_eq!(stats.completed_courses, 1);
        assert_eq!(stats.quiz_score, None);
    }

    #[test]
    fn test_completing_twice_keeps_revision() {
        let mut state = WidgetState::new("u1", UserHistory::default());
        assert!(state.complete_course("i2", 90));
        let revision = state.revision();

        assert!(!state.complete_course("i2", 75));
        assert_eq!(state.revision(), revision);
        assert_eq!(state.history().completed_courses.len(), 1);

        // Restarting a completed course and completing it again drops the
        // in-progress entry, which is a change even though no result is added.
        state.start_course("i2");
        let revision = state.revision();
        assert!(!state.complete_course("i2", 75));
        assert_eq!(state.revision(), revision + 1);
        assert_eq!(state.stats().in_progress_courses, 0);
    }

    #[test]
    fn test_override_skill_level() {
        let mut state = WidgetState::new("u1", UserHistory::default());
        state.override_skill_level(SkillLevel::Intermediate);
        assert_eq!(state.snapshot().skill_level, SkillLevel::Intermediate);
        assert_eq!(state.revision(), 1);

        state.override_skill_level(SkillLevel::Intermediate);
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn test_switch_tab() {
        let mut state = WidgetState::new("u1", UserHistory::default());
        assert_eq!(state.current_tab(), DEFAULT_TAB);
        state.switch_tab("local").unwrap();
        assert_eq!(state.current_tab(), "local");
        assert!(state.switch_tab("").is_err());
    }
}
