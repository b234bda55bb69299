//! Built-in content and platforms shown before any backend data arrives.

use crate::errors::AppError;
use crate::models::{ContentItem, Platform};

/// Platforms listed when no interest is selected.
pub fn default_platforms() -> Vec<Platform> {
    vec![
        Platform::basic("Coursera", "https://coursera.org", "University-level courses from top institutions"),
        Platform::basic("edX", "https://edx.org", "High-quality courses from universities and institutions"),
        Platform::basic("Udemy", "https://udemy.com", "Wide variety of practical courses"),
        Platform::basic("Khan Academy", "https://khanacademy.org", "Free courses on many subjects"),
        Platform::basic("FreeCodeCamp", "https://freecodecamp.org", "Free coding bootcamp with certificates"),
        Platform::basic("Codecademy", "https://codecademy.com", "Interactive coding courses"),
    ]
}

/// The static "all content" listing.
pub fn builtin_content() -> Result<Vec<ContentItem>, AppError> {
    Ok(vec![
        ContentItem::new(
            "i1",
            "Introduction to Python Programming",
            "Learn Python basics with hands-on examples and exercises",
            &["python", "beginner"],
            "video",
        )?
        .with_platforms(&[
            ("Python.org", "https://python.org"),
            ("Codecademy", "https://codecademy.com/learn/learn-python-3"),
        ]),
        ContentItem::new(
            "i2",
            "Data Science with Python",
            "Master pandas, NumPy, and data visualization techniques",
            &["python", "data-science", "pandas"],
            "pdf",
        )?
        .with_platforms(&[
            ("Kaggle Learn", "https://kaggle.com/learn"),
            ("DataCamp", "https://datacamp.com"),
        ]),
        ContentItem::new(
            "i3",
            "Machine Learning Fundamentals",
            "Understand supervised learning algorithms and their applications",
            &["machine-learning", "algorithms"],
            "video",
        )?
        .with_platforms(&[
            ("Coursera ML", "https://coursera.org/learn/machine-learning"),
            ("Fast.ai", "https://fast.ai"),
        ]),
        ContentItem::new(
            "i4",
            "Deep Learning with PyTorch",
            "Build neural networks and train deep learning models",
            &["machine-learning", "deep-learning", "pytorch"],
            "video",
        )?
        .with_platforms(&[
            ("PyTorch Tutorials", "https://pytorch.org/tutorials/"),
            ("Fast.ai", "https://fast.ai"),
        ]),
        ContentItem::new(
            "i5",
            "Python Coding Exercises",
            "Practice your Python skills with interactive challenges",
            &["python", "practice"],
            "exercise",
        )?
        .with_platforms(&[
            ("LeetCode", "https://leetcode.com"),
            ("HackerRank", "https://hackerrank.com"),
        ]),
        ContentItem::new(
            "i6",
            "Web Development with JavaScript",
            "Build interactive websites and web applications",
            &["javascript", "web-development"],
            "video",
        )?
        .with_platforms(&[
            ("FreeCodeCamp", "https://freecodecamp.org"),
            ("MDN Web Docs", "https://developer.mozilla.org"),
        ]),
        ContentItem::new(
            "i7",
            "React Frontend Development",
            "Learn modern React development with hooks and state management",
            &["react", "frontend", "javascript"],
            "video",
        )?
        .with_platforms(&[
            ("React Docs", "https://reactjs.org"),
            ("Scrimba", "https://scrimba.com"),
        ]),
        ContentItem::new(
            "i8",
            "Cloud Computing with AWS",
            "Master Amazon Web Services for scalable applications",
            &["aws", "cloud-computing"],
            "pdf",
        )?
        .with_platforms(&[
            ("AWS Training", "https://aws.amazon.com/training/"),
            ("A Cloud Guru", "https://acloudguru.com"),
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_content_ids_are_unique() {
        let items = builtin_content().unwrap();
        let ids: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();

        assert_eq!(items.len(), 8);
        assert_eq!(ids.len(), items.len());
        assert!(items.iter().all(|i| !i.platforms.is_empty()));
    }

    #[test]
    fn test_default_platforms() {
        let names: Vec<String> = default_platforms().into_iter().map(|p| p.name).collect();
        assert_eq!(names.first().map(String::as_str), Some("Coursera"));
        assert_eq!(names.len(), 6);
    }
}
