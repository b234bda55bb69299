//! Learning-path tips derived from interests and skill level.

use serde::Serialize;

use crate::models::{InterestSet, SkillLevel};

type SuggestionTable = [(&'static str, [&'static str; 4])];

const BEGINNER: &SuggestionTable = &[
    ("python", ["Python Syntax", "Variables & Data Types", "Control Structures", "Functions Basics"]),
    ("javascript", ["JS Fundamentals", "DOM Basics", "Events", "Basic Functions"]),
    ("data-science", ["Statistics Intro", "Excel/Spreadsheets", "Data Visualization", "Python for Data"]),
    ("machine-learning", ["Math Foundations", "Statistics", "Python Programming", "Data Analysis"]),
    ("web-development", ["HTML Basics", "CSS Fundamentals", "JavaScript Intro", "Responsive Design"]),
    ("nepali-tech", ["Local IT Education", "University Programs", "Career Guidance", "Industry Connections"]),
    ("nepali-training", ["Basic Programming", "Local Workshops", "Certification Prep", "Job Training"]),
    ("nepali-online", ["Nepali Tutorials", "Local Context Learning", "Community Support", "Language Friendly"]),
    ("digital-literacy", ["Computer Basics", "Internet Skills", "Digital Government", "Online Safety"]),
    ("fintech", ["Banking Software", "Digital Payments", "Financial Technology", "Local Market"]),
];

const INTERMEDIATE: &SuggestionTable = &[
    ("python", ["OOP Concepts", "Modules & Packages", "Error Handling", "File Operations"]),
    ("javascript", ["ES6 Features", "Async Programming", "APIs", "Frameworks Intro"]),
    ("data-science", ["Pandas & NumPy", "Data Cleaning", "Statistical Analysis", "Machine Learning Basics"]),
    ("machine-learning", ["Supervised Learning", "Model Evaluation", "Feature Engineering", "Scikit-learn"]),
    ("web-development", ["Backend Development", "Databases", "RESTful APIs", "Version Control"]),
    ("nepali-tech", ["Advanced Coursework", "Industry Projects", "Research Opportunities", "Thesis Work"]),
    ("nepali-training", ["Professional Certification", "Internship Programs", "Real Projects", "Industry Mentorship"]),
    ("nepali-online", ["Advanced Tutorials", "Community Projects", "Local Case Studies", "Peer Learning"]),
    ("digital-literacy", ["Advanced Government Services", "Digital Business", "Online Entrepreneurship", "Tech Leadership"]),
    ("fintech", ["Advanced Banking Tech", "Blockchain in Finance", "Payment Systems", "Regulatory Compliance"]),
];

const ADVANCED: &SuggestionTable = &[
    ("python", ["Advanced OOP", "Decorators", "Metaclasses", "Performance Optimization"]),
    ("javascript", ["TypeScript", "Advanced Patterns", "Node.js", "Testing Frameworks"]),
    ("data-science", ["Deep Learning", "Big Data Tools", "MLOps", "Advanced Statistics"]),
    ("machine-learning", ["Neural Networks", "NLP", "Computer Vision", "Production ML"]),
    ("web-development", ["Microservices", "DevOps", "System Design", "Performance Optimization"]),
    ("nepali-tech", ["Research & Development", "PhD Programs", "Innovation Labs", "Startup Incubation"]),
    ("nepali-training", ["Training Others", "Corporate Training", "Consultancy", "Business Solutions"]),
    ("nepali-online", ["Content Creation", "Platform Development", "Community Building", "Tech Leadership"]),
    ("digital-literacy", ["Policy Making", "Digital Transformation", "Smart City Initiatives", "Innovation Strategy"]),
    ("fintech", ["Fintech Innovation", "Regulatory Technology", "Blockchain Development", "Financial AI"]),
];

const BEGINNER_FALLBACK: [&str; 4] = ["Fundamentals", "Basic Concepts", "Getting Started", "Practice Projects"];
const INTERMEDIATE_FALLBACK: [&str; 4] = ["Advanced Concepts", "Real Projects", "Best Practices", "Industry Tools"];
const ADVANCED_FALLBACK: [&str; 4] = ["Expert Topics", "Research Areas", "Cutting-edge Tech", "Innovation Projects"];

/// Suggestions taken per interest above beginner level.
const PER_INTEREST: usize = 2;

/// Personalized learning path shown next to the recommendations.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LearningTip {
    pub headline: String,
    pub suggestions: Vec<String>,
    /// Whether the page should offer the skill assessment quiz.
    pub offer_quiz: bool,
}

fn lookup<'a>(table: &'a SuggestionTable, interest: &str) -> Option<&'a [&'static str; 4]> {
    table
        .iter()
        .find(|(topic, _)| *topic == interest)
        .map(|(_, suggestions)| suggestions)
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn leading_suggestions(
    table: &SuggestionTable,
    interests: &InterestSet,
    fallback: &[&str],
) -> Vec<String> {
    let picked: Vec<String> = interests
        .as_slice()
        .iter()
        .filter_map(|interest| lookup(table, interest))
        .flat_map(|suggestions| suggestions.iter().take(PER_INTEREST))
        .map(|s| s.to_string())
        .collect();

    if picked.is_empty() {
        owned(fallback)
    } else {
        picked
    }
}

/// Build the learning tip for the current selection and skill level.
pub fn learning_tip(interests: &InterestSet, skill_level: SkillLevel) -> LearningTip {
    let Some(primary) = interests.primary() else {
        return LearningTip {
            headline: "Start by selecting your interests above and take the skill assessment quiz!"
                .to_string(),
            suggestions: Vec::new(),
            offer_quiz: !skill_level.is_assessed(),
        };
    };

    match skill_level {
        SkillLevel::NotAssessed => LearningTip {
            headline: "Take our skill assessment quiz to get personalized recommendations based on your knowledge level!"
                .to_string(),
            suggestions: Vec::new(),
            offer_quiz: true,
        },
        SkillLevel::Beginner => LearningTip {
            headline: format!(
                "Great start! Based on your {} level in {}, here's your learning path:",
                skill_level,
                primary.replacen('-', " ", 1)
            ),
            suggestions: owned(lookup(BEGINNER, primary).map_or(&BEGINNER_FALLBACK[..], |s| &s[..])),
            offer_quiz: false,
        },
        SkillLevel::Intermediate => LearningTip {
            headline: format!(
                "You're making great progress! As an {} learner, here are your next challenges:",
                skill_level
            ),
            suggestions: leading_suggestions(INTERMEDIATE, interests, &INTERMEDIATE_FALLBACK),
            offer_quiz: false,
        },
        SkillLevel::Advanced => LearningTip {
            headline: format!(
                "Impressive! You've reached {} level. Time for expert challenges:",
                skill_level
            ),
            suggestions: leading_suggestions(ADVANCED, interests, &ADVANCED_FALLBACK),
            offer_quiz: false,
        },
    }
}
