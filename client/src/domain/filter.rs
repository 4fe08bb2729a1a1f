//! Client-side event filtering.
//!
//! Two filters are combined: a case-insensitive title substring and a
//! category selection. Filtering is a single pass that keeps the store's
//! order.

use super::{CategoryId, Event};

/// Raw select value meaning "no category constraint".
pub const ALL_CATEGORIES: &str = "all";

/// Category constraint parsed from the category selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every event passes.
    #[default]
    All,
    /// Only events tagged with this category pass.
    Only(CategoryId),
    /// The selection is not an id, so nothing can pass.
    Unmatchable(String),
}

impl CategoryFilter {
    /// Parse a raw select value.
    ///
    /// `all` and a blank selection mean [`CategoryFilter::All`]; integers
    /// select a category; anything else matches no event.
    ///
    /// # Examples
    /// ```
    /// use event_board::domain::{CategoryFilter, CategoryId};
    ///
    /// assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
    /// assert_eq!(CategoryFilter::parse("2"), CategoryFilter::Only(CategoryId::new(2)));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return Self::All;
        }
        trimmed
            .parse::<CategoryId>()
            .map_or_else(|_| Self::Unmatchable(trimmed.to_owned()), Self::Only)
    }

    /// Whether `event` satisfies the constraint.
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => event.has_category(*category),
            Self::Unmatchable(_) => false,
        }
    }

    /// The select value that would produce this filter.
    pub fn as_select_value(&self) -> String {
        match self {
            Self::All => ALL_CATEGORIES.to_owned(),
            Self::Only(category) => category.to_string(),
            Self::Unmatchable(raw) => raw.clone(),
        }
    }
}

/// Search text plus category selection held by the list view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventFilter {
    /// Title substring; empty matches everything.
    pub search_term: String,
    /// Category selection.
    pub category: CategoryFilter,
}

impl EventFilter {
    /// Build a filter from raw input values.
    pub fn new(search_term: impl Into<String>, category: &str) -> Self {
        Self {
            search_term: search_term.into(),
            category: CategoryFilter::parse(category),
        }
    }

    /// Whether `event` passes both constraints.
    pub fn matches(&self, event: &Event) -> bool {
        title_contains(&event.title, &self.search_term) && self.category.matches(event)
    }

    /// Keep matching events, in their original order.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|event| self.matches(event)).collect()
    }
}

/// Case-insensitive substring test. An empty term matches every title.
pub fn title_contains(title: &str, term: &str) -> bool {
    title.to_lowercase().contains(&term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use crate::domain::EventId;

    fn event(id: i64, title: &str, categories: &[i64]) -> Event {
        Event {
            id: EventId::new(id),
            title: title.to_owned(),
            description: String::new(),
            image: String::new(),
            location: String::new(),
            start_time: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            created_by: None,
            category_ids: categories.iter().copied().map(CategoryId::new).collect(),
        }
    }

    #[fixture]
    fn events() -> Vec<Event> {
        vec![
            event(1, "Yoga in the Park", &[1]),
            event(2, "Jazz Night", &[2, 3]),
            event(3, "Morning yoga retreat", &[1, 3]),
            event(4, "Board games", &[]),
        ]
    }

    fn ids(events: &[&Event]) -> Vec<i64> {
        events.iter().map(|event| event.id.get()).collect()
    }

    #[rstest]
    #[case("", "all", vec![1, 2, 3, 4])]
    #[case("YOGA", "all", vec![1, 3])]
    #[case("yoga", "3", vec![3])]
    #[case("", "3", vec![2, 3])]
    #[case("", "99", vec![])]
    #[case("", "music", vec![])]
    #[case("", "", vec![1, 2, 3, 4])]
    #[case("night", "1", vec![])]
    fn filters_by_title_and_category(
        events: Vec<Event>,
        #[case] search: &str,
        #[case] category: &str,
        #[case] expected: Vec<i64>,
    ) {
        let filter = EventFilter::new(search, category);
        assert_eq!(ids(&filter.apply(&events)), expected);
    }

    #[rstest]
    #[case("a")]
    #[case("ga")]
    #[case("Night")]
    #[case("zzz")]
    fn kept_titles_contain_term_and_dropped_titles_do_not(
        events: Vec<Event>,
        #[case] term: &str,
    ) {
        let filter = EventFilter::new(term, ALL_CATEGORIES);
        let needle = term.to_lowercase();
        for event in &events {
            let contains = event.title.to_lowercase().contains(&needle);
            assert_eq!(filter.matches(event), contains, "title {:?}", event.title);
        }
    }

    #[rstest]
    fn every_kept_event_carries_selected_category(events: Vec<Event>) {
        let filter = EventFilter::new("", "1");
        let kept = filter.apply(&events);
        assert!(!kept.is_empty());
        assert!(kept.iter().all(|event| event.has_category(CategoryId::new(1))));
    }

    #[rstest]
    #[case("all", CategoryFilter::All)]
    #[case("ALL", CategoryFilter::All)]
    #[case(" 4 ", CategoryFilter::Only(CategoryId::new(4)))]
    #[case("sports", CategoryFilter::Unmatchable("sports".to_owned()))]
    fn parses_select_values(#[case] raw: &str, #[case] expected: CategoryFilter) {
        let parsed = CategoryFilter::parse(raw);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn select_value_round_trips() {
        for raw in ["all", "7"] {
            assert_eq!(CategoryFilter::parse(raw).as_select_value(), raw);
        }
    }
}
