//! Persisted learning history of a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SkillLevel;

/// Score logged when a course is marked complete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub course_id: String,
    pub score: u32,
    pub date: DateTime<Utc>,
}

/// Course progress and skill level, read and written as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserHistory {
    #[serde(default)]
    pub completed_courses: Vec<String>,
    #[serde(default)]
    pub in_progress_courses: Vec<String>,
    #[serde(default)]
    pub skill_level: SkillLevel,
    #[serde(default)]
    pub quiz_results: Vec<QuizResult>,
}

impl UserHistory {
    pub fn is_completed(&self, course_id: &str) -> bool {
        self.completed_courses.iter().any(|id| id == course_id)
    }

    pub fn is_in_progress(&self, course_id: &str) -> bool {
        self.in_progress_courses.iter().any(|id| id == course_id)
    }

    /// Mark a course as started. Returns false when it already was.
    pub fn start_course(&mut self, course_id: &str) -> bool {
        if self.is_in_progress(course_id) {
            return false;
        }
        self.in_progress_courses.push(course_id.to_string());
        true
    }

    /// Move a course to completed, logging `score` the first time it completes.
    ///
    /// Returns false when the course had already been completed.
    pub fn complete_course(&mut self, course_id: &str, score: u32, at: DateTime<Utc>) -> bool {
        self.in_progress_courses.retain(|id| id != course_id);
        if self.is_completed(course_id) {
            return false;
        }
        self.completed_courses.push(course_id.to_string());
        self.quiz_results.push(QuizResult {
            course_id: course_id.to_string(),
            score,
            date: at,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_idempotent() {
        let mut history = UserHistory::default();
        assert!(history.start_course("i1"));
        assert!(!history.start_course("i1"));
        assert_eq!(history.in_progress_courses, vec!["i1"]);
    }

    #[test]
    fn test_complete_moves_course_and_logs_once() {
        let mut history = UserHistory::default();
        history.start_course("i1");

        assert!(history.complete_course("i1", 85, Utc::now()));
        assert!(!history.complete_course("i1", 90, Utc::now()));

        assert!(history.in_progress_courses.is_empty());
        assert_eq!(history.completed_courses, vec!["i1"]);
        assert_eq!(history.quiz_results.len(), 1);
        assert_eq!(history.quiz_results[0].score, 85);
    }

    #[test]
    fn test_default_round_trips_with_sentinel_level() {
        let json = serde_json::to_value(UserHistory::default()).unwrap();
        assert_eq!(json["skillLevel"], "Take Quiz");
        assert_eq!(json["completedCourses"], serde_json::json!([]));
    }
}
