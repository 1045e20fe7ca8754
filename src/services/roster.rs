//! Roster presentation helpers.
//!
//! Filtering and availability formatting for the activities list, kept out
//! of the App struct so they test without a terminal.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::activities::Activity;
use crate::constants;

/// Indices of activities whose names fuzzy-match the query.
///
/// An empty query keeps every activity in roster order. Otherwise results
/// are ordered by match score so the closest name rises to the top.
pub fn filter_indices(activities: &[Activity], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..activities.len()).collect();
    }

    let matcher = SkimMatcherV2::default();
    let query_lower = query.to_lowercase();

    let mut scored: Vec<(usize, i64)> = activities
        .iter()
        .enumerate()
        .filter_map(|(idx, activity)| {
            let score = matcher
                .fuzzy_match(&activity.name.as_str().to_lowercase(), &query_lower)
                .unwrap_or(0);
            if score >= constants::filter::MIN_SCORE {
                Some((idx, score))
            } else {
                None
            }
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(idx, _)| idx).collect()
}

/// Availability label for an activity ("7 spots left").
pub fn availability_label(activity: &Activity) -> String {
    format!("{} spots left", activity.spots_left())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::ActivityName;

    fn make_activity(name: &str, max: usize, signed_up: usize) -> Activity {
        Activity {
            name: ActivityName::new(name),
            description: String::new(),
            schedule: String::new(),
            max_participants: max,
            participants: (0..signed_up)
                .map(|i| format!("student{}@mergington.edu", i))
                .collect(),
        }
    }

    fn roster() -> Vec<Activity> {
        vec![
            make_activity("Chess Club", 12, 2),
            make_activity("Gym Class", 30, 30),
            make_activity("Programming Class", 20, 1),
        ]
    }

    #[test]
    fn empty_query_keeps_roster_order() {
        assert_eq!(filter_indices(&roster(), ""), vec![0, 1, 2]);
    }

    #[test]
    fn query_narrows_to_matching_names() {
        let indices = filter_indices(&roster(), "chess");
        assert_eq!(indices, vec![0]);
    }

    #[test]
    fn query_matches_are_case_insensitive() {
        let indices = filter_indices(&roster(), "GYM");
        assert_eq!(indices, vec![1]);
    }

    #[test]
    fn unrelated_query_matches_nothing() {
        assert!(filter_indices(&roster(), "zzzzzz").is_empty());
    }

    #[test]
    fn shared_substring_keeps_both_classes() {
        let indices = filter_indices(&roster(), "class");
        assert_eq!(indices.len(), 2);
        assert!(indices.contains(&1));
        assert!(indices.contains(&2));
    }

    #[test]
    fn availability_label_counts_open_spots() {
        assert_eq!(availability_label(&make_activity("Chess Club", 12, 2)), "10 spots left");
        assert_eq!(availability_label(&make_activity("Gym Class", 30, 30)), "0 spots left");
    }
}
