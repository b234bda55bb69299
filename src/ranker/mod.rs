//! Recommendation ranking.
//!
//! Re-scores content locally from interest/tag overlap and skill alignment,
//! keeping the incoming (remote) order for equal scores.

use crate::models::{ContentItem, Platform, SkillLevel, UserHistory};

/// Points per tag that overlaps a selected interest.
const TAG_MATCH_POINTS: u32 = 2;
/// Points for carrying the tag that matches the user's skill level.
const SKILL_BONUS_POINTS: u32 = 3;

/// Relevance of a single item for the given interests and skill level.
pub fn score(item: &ContentItem, interests: &[String], skill_level: SkillLevel) -> u32 {
    let overlap = item
        .tags
        .iter()
        .filter(|tag| {
            interests
                .iter()
                .any(|interest| interest.contains(tag.as_str()) || tag.contains(interest.as_str()))
        })
        .count();
    let mut total = u32::try_from(overlap)
        .unwrap_or(u32::MAX)
        .saturating_mul(TAG_MATCH_POINTS);

    if let Some(tag) = skill_level.bonus_tag() {
        if item.has_tag(tag) {
            total += SKILL_BONUS_POINTS;
        }
    }
    total
}

/// Attach scores and sort descending; ties keep their input order.
pub fn rank(
    mut items: Vec<ContentItem>,
    interests: &[String],
    skill_level: SkillLevel,
) -> Vec<ContentItem> {
    for item in &mut items {
        item.relevance_score = Some(score(item, interests, skill_level));
    }
    // sort_by is stable
    items.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    items
}

/// Attach completion and in-progress flags from the user's history.
pub fn annotate(mut items: Vec<ContentItem>, history: &UserHistory) -> Vec<ContentItem> {
    for item in &mut items {
        item.is_completed = history.is_completed(&item.id);
        item.is_in_progress = history.is_in_progress(&item.id);
    }
    items
}

/// Whether a platform card should be shown for the current selection.
pub fn platform_visible(platform: &Platform, interests: &[String], skill_level: SkillLevel) -> bool {
    if interests.is_empty() {
        return true;
    }

    let matches_interest = platform.interests.as_deref().unwrap_or_default().iter().any(|p| {
        let p = p.trim();
        interests.iter().any(|i| i == p)
    });
    if !matches_interest {
        return false;
    }

    let platform_level = platform
        .level
        .as_deref()
        .and_then(SkillLevel::parse)
        .unwrap_or(SkillLevel::Beginner);
    !matches!(
        (skill_level, platform_level),
        (SkillLevel::Beginner, SkillLevel::Advanced) | (SkillLevel::Advanced, SkillLevel::Beginner)
    )
}

/// Platforms visible for the current selection, in their original order.
pub fn filter_platforms(
    platforms: &[Platform],
    interests: &[String],
    skill_level: SkillLevel,
) -> Vec<Platform> {
    platforms
        .iter()
        .filter(|p| platform_visible(p, interests, skill_level))
        .cloned()
        .collect()
}
