//! Quiz engine.
//!
//! Builds a short quiz from the selected interests, tracks answers and
//! derives a skill level from the final score. Everything here is pure: the
//! caller supplies the random source and owns the session.

mod catalog;

pub use catalog::*;

use std::collections::{BTreeMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Question, SkillLevel};

/// Upper bound on the number of questions in one quiz.
pub const MAX_QUESTIONS: usize = 5;

/// Percentage from which a result counts as Advanced.
const ADVANCED_THRESHOLD: u32 = 80;
/// Percentage from which a result counts as Intermediate.
const INTERMEDIATE_THRESHOLD: u32 = 60;

/// Build a quiz for the given interests.
///
/// Pools every catalog question of every interest (in selection order),
/// falls back to [`DEFAULT_TOPIC`] when none match, shuffles the pool
/// uniformly and keeps at most [`MAX_QUESTIONS`].
pub fn generate_quiz<R: Rng + ?Sized>(
    interests: &[String],
    catalog: &QuizCatalog,
    rng: &mut R,
) -> Result<Vec<Question>, AppError> {
    if interests.is_empty() {
        return Err(AppError::Validation(
            "Please select at least one interest to start the quiz!".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let mut pool: Vec<Question> = interests
        .iter()
        .flat_map(|interest| catalog.questions(interest))
        .filter(|q| seen.insert(q.text().to_string()))
        .cloned()
        .collect();

    if pool.is_empty() {
        tracing::debug!(
            ?interests,
            "No quiz questions for selected interests, using {}",
            DEFAULT_TOPIC
        );
        pool = catalog.questions(DEFAULT_TOPIC).to_vec();
    }
    if pool.is_empty() {
        return Err(AppError::Internal(
            "Quiz catalog has no questions for the default topic".to_string(),
        ));
    }

    pool.shuffle(rng);
    pool.truncate(MAX_QUESTIONS);
    Ok(pool)
}

/// Rounded score percentage; an empty quiz scores 0.
pub fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    // Round half up, matching the page's Math.round on non-negative values.
    (200 * correct + total) / (2 * total)
}

/// Map a quiz score to a skill level (inclusive lower bounds at 60% and 80%).
pub fn compute_skill_level(correct: u32, total: u32) -> SkillLevel {
    if total == 0 {
        return SkillLevel::Beginner;
    }
    match percentage(correct, total) {
        p if p >= ADVANCED_THRESHOLD => SkillLevel::Advanced,
        p if p >= INTERMEDIATE_THRESHOLD => SkillLevel::Intermediate,
        _ => SkillLevel::Beginner,
    }
}

/// What the user did with one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Answer {
    Selected(usize),
    Skipped,
}

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    InProgress,
    Results,
}

/// One run through a generated quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    questions: Vec<Question>,
    current: usize,
    answers: BTreeMap<usize, Answer>,
    correct: u32,
    skill_level: Option<SkillLevel>,
}

impl QuizSession {
    /// Start a session over an already generated question set.
    pub fn new(questions: Vec<Question>) -> Result<Self, AppError> {
        if questions.is_empty() {
            return Err(AppError::Validation(
                "A quiz needs at least one question".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            questions,
            current: 0,
            answers: BTreeMap::new(),
            correct: 0,
            skill_level: None,
        })
    }

    /// Generate questions for `interests` and start a session over them.
    pub fn start<R: Rng + ?Sized>(
        interests: &[String],
        catalog: &QuizCatalog,
        rng: &mut R,
    ) -> Result<Self, AppError> {
        Self::new(generate_quiz(interests, catalog, rng)?)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn answers(&self) -> &BTreeMap<usize, Answer> {
        &self.answers
    }

    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    pub fn phase(&self) -> QuizPhase {
        if self.current >= self.questions.len() {
            QuizPhase::Results
        } else {
            QuizPhase::InProgress
        }
    }

    /// Derived level, available once the session reached its results.
    pub fn skill_level(&self) -> Option<SkillLevel> {
        self.skill_level
    }

    pub fn percentage(&self) -> u32 {
        percentage(self.correct, self.total_u32())
    }

    /// Record the answer to the current question and move to the next one.
    ///
    /// A finished session is left untouched.
    pub fn advance(&mut self, answer: Answer) -> QuizPhase {
        let Some(question) = self.questions.get(self.current) else {
            return QuizPhase::Results;
        };

        if let Answer::Selected(option) = answer {
            if question.is_correct(option) {
                self.correct += 1;
            }
        }
        self.answers.insert(self.current, answer);
        self.current += 1;

        let phase = self.phase();
        if phase == QuizPhase::Results {
            let level = compute_skill_level(self.correct, self.total_u32());
            tracing::debug!(
                session = %self.id,
                correct = self.correct,
                total = self.total(),
                level = %level,
                "Quiz completed"
            );
            self.skill_level = Some(level);
        }
        phase
    }

    fn total_u32(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn interests(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn session_with(n: usize) -> QuizSession {
        let questions = (0..n)
            .map(|i| {
                Question::new(
                    format!("Question {}", i),
                    ["a", "b", "c", "d"],
                    i % 4,
                    Difficulty::Beginner,
                )
                .unwrap()
            })
            .collect();
        QuizSession::new(questions).unwrap()
    }

    #[test]
    fn test_skill_level_thresholds() {
        assert_eq!(compute_skill_level(4, 5), SkillLevel::Advanced);
        assert_eq!(compute_skill_level(3, 5), SkillLevel::Intermediate);
        assert_eq!(compute_skill_level(2, 5), SkillLevel::Beginner);
        assert_eq!(compute_skill_level(5, 5), SkillLevel::Advanced);
        assert_eq!(compute_skill_level(0, 5), SkillLevel::Beginner);
    }

    #[test]
    fn test_skill_level_rounds_before_comparing() {
        // 2/3 = 66.67% -> 67 -> Intermediate; 1/3 = 33% -> Beginner
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(compute_skill_level(2, 3), SkillLevel::Intermediate);
        // 79.5% rounds up to 80
        assert_eq!(percentage(159, 200), 80);
        assert_eq!(compute_skill_level(159, 200), SkillLevel::Advanced);
    }

    #[test]
    fn test_skill_level_with_no_questions_is_beginner() {
        assert_eq!(compute_skill_level(0, 0), SkillLevel::Beginner);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_generate_requires_interest() {
        let catalog = QuizCatalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let result = generate_quiz(&[], &catalog, &mut rng);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_generate_falls_back_to_default_topic() {
        let catalog = QuizCatalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let quiz = generate_quiz(&interests(&["fintech"]), &catalog, &mut rng).unwrap();

        assert_eq!(quiz.len(), 5);
        for q in &quiz {
            assert!(catalog.questions(DEFAULT_TOPIC).contains(q));
        }
    }

    #[test]
    fn test_generate_draws_from_union_without_duplicates() {
        let catalog = QuizCatalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let selected = interests(&["python", "unknown", "javascript"]);
        let quiz = generate_quiz(&selected, &catalog, &mut rng).unwrap();

        assert_eq!(quiz.len(), MAX_QUESTIONS);
        let texts: HashSet<&str> = quiz.iter().map(Question::text).collect();
        assert_eq!(texts.len(), quiz.len());
        for q in &quiz {
            assert!(
                catalog.questions("python").contains(q)
                    || catalog.questions("javascript").contains(q)
            );
        }
    }

    #[test]
    fn test_small_pool_is_not_padded() {
        let mut catalog = QuizCatalog::new();
        catalog.insert("rust", session_with(2).questions().to_vec());
        let mut rng = StdRng::seed_from_u64(3);

        let quiz = generate_quiz(&interests(&["rust"]), &catalog, &mut rng).unwrap();
        assert_eq!(quiz.len(), 2);
    }

    #[test]
    fn test_shuffle_is_uniform() {
        let catalog = QuizCatalog::builtin().unwrap();
        let pool = catalog.questions("python");
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 20_000;
        let mut counts = [[0u32; 5]; 5];

        for _ in 0..trials {
            let quiz = generate_quiz(&interests(&["python"]), &catalog, &mut rng).unwrap();
            for (position, q) in quiz.iter().enumerate() {
                let original = pool.iter().position(|p| p == q).unwrap();
                counts[original][position] += 1;
            }
        }

        // Expected 4000 per cell; allow +-10%.
        for row in counts {
            for count in row {
                assert!((3600..=4400).contains(&count), "count {} out of range", count);
            }
        }
    }

    #[test]
    fn test_results_only_after_last_advance() {
        let mut session = session_with(3);
        assert_eq!(session.phase(), QuizPhase::InProgress);

        assert_eq!(session.advance(Answer::Selected(0)), QuizPhase::InProgress);
        assert_eq!(session.advance(Answer::Skipped), QuizPhase::InProgress);
        assert!(session.skill_level().is_none());
        assert_eq!(session.advance(Answer::Selected(2)), QuizPhase::Results);

        assert_eq!(session.current_index(), 3);
        assert_eq!(session.correct_count(), 2);
        assert_eq!(session.skill_level(), Some(SkillLevel::Intermediate));
    }

    #[test]
    fn test_skip_never_counts() {
        let mut session = session_with(5);
        for _ in 0..5 {
            session.advance(Answer::Skipped);
        }
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.skill_level(), Some(SkillLevel::Beginner));
        assert!(session.answers().values().all(|a| *a == Answer::Skipped));
    }

    #[test]
    fn test_advance_after_results_is_noop() {
        let mut session = session_with(1);
        session.advance(Answer::Selected(0));
        let answers_before = session.answers().len();

        assert_eq!(session.advance(Answer::Selected(0)), QuizPhase::Results);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.answers().len(), answers_before);
        assert_eq!(session.correct_count(), 1);
    }

    #[test]
    fn test_answers_only_cover_past_questions() {
        let mut session = session_with(4);
        session.advance(Answer::Selected(3));
        session.advance(Answer::Selected(1));

        assert!(session.answers().keys().all(|&i| i < session.current_index()));
        assert_eq!(session.current_question().map(Question::text), Some("Question 2"));
    }

    proptest! {
        #[test]
        fn prop_generated_quiz_is_bounded(
            picks in prop::collection::vec(
                prop::sample::select(vec![
                    "python", "javascript", "data-science", "machine-learning",
                    "web-development", "fintech", "nepali-tech",
                ]),
                1..5,
            ),
            seed in any::<u64>(),
        ) {
            let catalog = QuizCatalog::builtin().unwrap();
            let mut selected: Vec<String> = Vec::new();
            for p in picks {
                if !selected.iter().any(|s| s == p) {
                    selected.push(p.to_string());
                }
            }
            let mut rng = StdRng::seed_from_u64(seed);
            let quiz = generate_quiz(&selected, &catalog, &mut rng).unwrap();

            prop_assert!((1..=MAX_QUESTIONS).contains(&quiz.len()));
            let matched: Vec<&Question> = selected
                .iter()
                .flat_map(|s| catalog.questions(s))
                .collect();
            for q in &quiz {
                if matched.is_empty() {
                    prop_assert!(catalog.questions(DEFAULT_TOPIC).contains(q));
                } else {
                    prop_assert!(matched.contains(&q));
                }
            }
        }

        #[test]
        fn prop_results_after_exactly_length_advances(
            choices in prop::collection::vec(prop::option::of(0usize..4), 1..8),
        ) {
            let mut session = session_with(choices.len());
            for (i, choice) in choices.iter().enumerate() {
                prop_assert_eq!(session.phase(), QuizPhase::InProgress);
                let answer = choice.map_or(Answer::Skipped, Answer::Selected);
                let phase = session.advance(answer);
                if i + 1 < choices.len() {
                    prop_assert_eq!(phase, QuizPhase::InProgress);
                } else {
                    prop_assert_eq!(phase, QuizPhase::Results);
                }
            }
        }
    }
}
