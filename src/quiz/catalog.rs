//! Built-in per-topic question bank.

use std::collections::HashMap;

use crate::errors::AppError;
use crate::models::{Difficulty, Question, OPTION_COUNT};

/// Topic whose questions are used when no selected interest has any.
pub const DEFAULT_TOPIC: &str = "web-development";

type RawQuestion = (&'static str, [&'static str; OPTION_COUNT], usize, Difficulty);

const PYTHON: [RawQuestion; 5] = [
    (
        "What is the correct way to define a function in Python?",
        ["function myFunc():", "def myFunc():", "func myFunc():", "define myFunc():"],
        1,
        Difficulty::Beginner,
    ),
    (
        "Which data structure is ordered and mutable in Python?",
        ["tuple", "set", "list", "frozenset"],
        2,
        Difficulty::Beginner,
    ),
    (
        "What is a Python decorator?",
        ["A design pattern", "A function that modifies another function", "A data type", "A loop construct"],
        1,
        Difficulty::Intermediate,
    ),
    (
        "Which method is used for deep copying in Python?",
        ["copy.copy()", "copy.deepcopy()", "object.copy()", "clone()"],
        1,
        Difficulty::Intermediate,
    ),
    (
        "What does the GIL (Global Interpreter Lock) prevent?",
        ["Memory leaks", "Syntax errors", "True multithreading", "Import errors"],
        2,
        Difficulty::Advanced,
    ),
];

const JAVASCRIPT: [RawQuestion; 5] = [
    (
        "What is the correct way to declare a variable in JavaScript?",
        ["var x = 5;", "variable x = 5;", "v x = 5;", "declare x = 5;"],
        0,
        Difficulty::Beginner,
    ),
    (
        "Which method adds an element to the end of an array?",
        ["add()", "append()", "push()", "insert()"],
        2,
        Difficulty::Beginner,
    ),
    (
        "What is a closure in JavaScript?",
        ["A loop", "A function with access to outer variables", "An object", "A promise"],
        1,
        Difficulty::Intermediate,
    ),
    (
        "What does 'this' refer to in an arrow function?",
        ["The function itself", "The global object", "The lexical scope", "undefined"],
        2,
        Difficulty::Intermediate,
    ),
    (
        "What is the event loop in JavaScript?",
        ["A syntax error", "A mechanism for handling asynchronous operations", "A type of loop", "A debugging tool"],
        1,
        Difficulty::Advanced,
    ),
];

const DATA_SCIENCE: [RawQuestion; 5] = [
    (
        "Which Python library is primarily used for data manipulation?",
        ["NumPy", "Pandas", "Matplotlib", "Scikit-learn"],
        1,
        Difficulty::Beginner,
    ),
    (
        "What does CSV stand for?",
        ["Computer System Values", "Comma Separated Values", "Code Source Variables", "Central System Variables"],
        1,
        Difficulty::Beginner,
    ),
    (
        "What is the purpose of normalization in data preprocessing?",
        ["Remove duplicates", "Scale features to similar ranges", "Handle missing values", "Create new features"],
        1,
        Difficulty::Intermediate,
    ),
    (
        "Which metric is best for imbalanced classification problems?",
        ["Accuracy", "F1-score", "Mean Squared Error", "R-squared"],
        1,
        Difficulty::Intermediate,
    ),
    (
        "What is the curse of dimensionality?",
        ["Too many features causing performance issues", "Lack of data", "Overfitting", "Underfitting"],
        0,
        Difficulty::Advanced,
    ),
];

const MACHINE_LEARNING: [RawQuestion; 5] = [
    (
        "What is supervised learning?",
        ["Learning without labels", "Learning with input-output pairs", "Clustering data", "Reducing dimensions"],
        1,
        Difficulty::Beginner,
    ),
    (
        "Which algorithm is used for classification?",
        ["K-means", "Linear Regression", "Logistic Regression", "PCA"],
        2,
        Difficulty::Beginner,
    ),
    (
        "What is cross-validation used for?",
        ["Data cleaning", "Model evaluation", "Feature selection", "Data visualization"],
        1,
        Difficulty::Intermediate,
    ),
    (
        "What is regularization in machine learning?",
        ["Data preprocessing", "Technique to prevent overfitting", "Feature scaling", "Model deployment"],
        1,
        Difficulty::Intermediate,
    ),
    (
        "What is the difference between bagging and boosting?",
        ["No difference", "Bagging reduces variance, boosting reduces bias", "Bagging is for regression only", "Boosting is unsupervised"],
        1,
        Difficulty::Advanced,
    ),
];

const WEB_DEVELOPMENT: [RawQuestion; 5] = [
    (
        "What does HTML stand for?",
        ["Hyper Text Markup Language", "High Tech Modern Language", "Home Tool Markup Language", "Hyperlink Text Markup Language"],
        0,
        Difficulty::Beginner,
    ),
    (
        "Which CSS property controls the text size?",
        ["font-weight", "text-size", "font-size", "text-style"],
        2,
        Difficulty::Beginner,
    ),
    (
        "What is the box model in CSS?",
        ["A layout technique", "Content, padding, border, margin", "A design pattern", "A CSS framework"],
        1,
        Difficulty::Intermediate,
    ),
    (
        "What is the purpose of a web framework?",
        ["Design websites", "Provide structure and tools for web development", "Host websites", "Test websites"],
        1,
        Difficulty::Intermediate,
    ),
    (
        "What is server-side rendering (SSR)?",
        ["Rendering on the client", "Rendering HTML on the server", "A graphics technique", "A database operation"],
        1,
        Difficulty::Advanced,
    ),
];

/// Mapping from topic id to its ordered question sequence.
#[derive(Debug, Clone, Default)]
pub struct QuizCatalog {
    topics: HashMap<String, Vec<Question>>,
}

impl QuizCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The question bank shipped with the widget.
    pub fn builtin() -> Result<Self, AppError> {
        let mut catalog = Self::new();
        catalog.insert_raw("python", &PYTHON)?;
        catalog.insert_raw("javascript", &JAVASCRIPT)?;
        catalog.insert_raw("data-science", &DATA_SCIENCE)?;
        catalog.insert_raw("machine-learning", &MACHINE_LEARNING)?;
        catalog.insert_raw(DEFAULT_TOPIC, &WEB_DEVELOPMENT)?;
        Ok(catalog)
    }

    pub fn insert(&mut self, topic: &str, questions: Vec<Question>) {
        self.topics.insert(topic.to_string(), questions);
    }

    fn insert_raw(&mut self, topic: &str, raw: &[RawQuestion]) -> Result<(), AppError> {
        let questions = raw
            .iter()
            .map(|(text, options, correct, difficulty)| {
                Question::new(*text, *options, *correct, *difficulty)
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.insert(topic, questions);
        Ok(())
    }

    /// Questions for a topic, or an empty slice when the topic is unknown.
    pub fn questions(&self, topic: &str) -> &[Question] {
        self.topics.get(topic).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_five_questions_per_topic() {
        let catalog = QuizCatalog::builtin().unwrap();

        assert_eq!(catalog.topics().count(), 5);
        for topic in catalog.topics() {
            assert_eq!(catalog.questions(topic).len(), 5, "topic {}", topic);
        }
        assert!(!catalog.questions(DEFAULT_TOPIC).is_empty());
    }

    #[test]
    fn test_unknown_topic_is_empty() {
        let catalog = QuizCatalog::builtin().unwrap();
        assert!(catalog.questions("fintech").is_empty());
    }
}
