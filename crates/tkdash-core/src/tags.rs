//! User-defined tag combinations and the buckets of videos that match them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::metrics::engagement_percent;
use crate::records::ContentRecord;

/// Tags offered for selection when building a combination.
pub const AVAILABLE_TAGS: &[&str] = &[
    "heroi",
    "fantasia",
    "famoso",
    "dc",
    "marvel",
    "futurista",
    "medieval",
    "animal",
    "games",
    "carro",
    "mitologia",
    "fusao",
    "sem tag",
];

/// Separator used when a combination's label is derived from its tags.
pub const LABEL_SEPARATOR: &str = " + ";

/// A named set of tags. A video belongs to the combination when its own tags
/// include every tag listed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCombination {
    pub id: u32,
    pub tags: Vec<String>,
    pub label: String,
}

impl TagCombination {
    #[must_use]
    pub fn matches(&self, record: &ContentRecord) -> bool {
        let record_tags = record_tags(record);
        self.tags.iter().all(|t| record_tags.contains(t))
    }
}

/// Lowercases and trims a tag.
#[must_use]
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Normalizes, drops blanks and de-duplicates while keeping first-seen order.
#[must_use]
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    tags.iter()
        .map(|t| normalize_tag(t.as_ref()))
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

/// The normalized tag set of a video, built from `tags1` and `tags2`.
#[must_use]
pub fn record_tags(record: &ContentRecord) -> BTreeSet<String> {
    [record.tags1.as_deref(), record.tags2.as_deref()]
        .into_iter()
        .flatten()
        .map(normalize_tag)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Ordered list of combinations with session-monotonic identifiers.
///
/// Every operation returns a new value; the receiver is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCombinations {
    items: Vec<TagCombination>,
}

impl Default for TagCombinations {
    fn default() -> Self {
        Self::empty().with_added(&["heroi", "marvel"], None)
    }
}

impl TagCombinations {
    #[must_use]
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[TagCombination] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: u32) -> Option<&TagCombination> {
        self.items.iter().find(|c| c.id == id)
    }

    fn next_id(&self) -> u32 {
        self.items.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }

    /// Appends a combination for `tags`.
    ///
    /// An empty tag set (after trimming blanks) is a no-op. The new entry's id
    /// is one more than the current maximum, and its label defaults to the
    /// tags joined by `" + "`.
    #[must_use]
    pub fn with_added<S: AsRef<str>>(&self, tags: &[S], label: Option<&str>) -> Self {
        let tags = normalize_tags(tags);
        if tags.is_empty() {
            return self.clone();
        }

        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map_or_else(|| tags.join(LABEL_SEPARATOR), str::to_string);

        let mut items = self.items.clone();
        items.push(TagCombination {
            id: self.next_id(),
            tags,
            label,
        });
        Self { items }
    }

    /// Drops the combination with `id`; other ids are left as they are.
    #[must_use]
    pub fn without(&self, id: u32) -> Self {
        Self {
            items: self.items.iter().filter(|c| c.id != id).cloned().collect(),
        }
    }
}

/// One video plotted under a combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagScatterPoint {
    pub category_index: usize,
    pub category_name: String,
    pub engagement: f64,
    /// The video has no views; `engagement` is reported as `0.0`.
    pub engagement_undefined: bool,
    pub video_title: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub saves: u64,
}

/// The videos matching one combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagBucket {
    pub index: usize,
    pub id: u32,
    pub label: String,
    pub points: Vec<TagScatterPoint>,
}

/// Buckets `records` under every combination. Buckets are independent: one
/// video may appear in several, or in none.
#[must_use]
pub fn group_by_combinations(
    records: &[ContentRecord],
    combinations: &TagCombinations,
) -> Vec<TagBucket> {
    combinations
        .as_slice()
        .iter()
        .enumerate()
        .map(|(index, combination)| TagBucket {
            index,
            id: combination.id,
            label: combination.label.clone(),
            points: records
                .iter()
                .filter(|r| combination.matches(r))
                .map(|r| TagScatterPoint {
                    category_index: index,
                    category_name: combination.label.clone(),
                    engagement: engagement_percent(r),
                    engagement_undefined: r.total_views == 0,
                    video_title: r.video_title.clone(),
                    views: r.total_views,
                    likes: r.total_likes,
                    comments: r.total_comments,
                    shares: r.total_shares,
                    saves: r.total_saves,
                })
                .collect(),
        })
        .collect()
}

/// Adds `tag` to the pending selection, or removes it if already selected.
#[must_use]
pub fn toggle_selection(selected: &[String], tag: &str) -> Vec<String> {
    let tag = normalize_tag(tag);
    if selected.contains(&tag) {
        selected.iter().filter(|t| **t != tag).cloned().collect()
    } else {
        let mut next = selected.to_vec();
        if !tag.is_empty() {
            next.push(tag);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn video(title: &str, tags1: Option<&str>, tags2: Option<&str>) -> ContentRecord {
        ContentRecord {
            post_day: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            video_title: title.to_string(),
            total_video_time: 20.0,
            total_views: 1_000,
            total_likes: 100,
            total_comments: 20,
            total_shares: 5,
            total_saves: 5,
            avg_watch_time: 8.0,
            full_watch_percentage: 10.0,
            new_followers: 1,
            tags1: tags1.map(str::to_string),
            tags2: tags2.map(str::to_string),
        }
    }

    #[test]
    fn default_has_heroi_marvel_with_id_one() {
        let combos = TagCombinations::default();
        assert_eq!(combos.len(), 1);
        let first = &combos.as_slice()[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.tags, vec!["heroi", "marvel"]);
        assert_eq!(first.label, "heroi + marvel");
    }

    #[test]
    fn match_is_case_insensitive_and_trimmed() {
        let combos = TagCombinations::empty().with_added(&["heroi", "marvel"], None);
        let rec = video("a", Some(" Heroi"), Some("MARVEL "));
        assert!(combos.as_slice()[0].matches(&rec));
    }

    #[test]
    fn combination_requires_every_tag() {
        let combos = TagCombinations::empty().with_added(&["heroi", "dc"], None);
        let rec = video("a", Some("Heroi"), Some("Marvel"));
        assert!(!combos.as_slice()[0].matches(&rec));
    }

    #[test]
    fn single_tag_combination_matches_either_column() {
        let combos = TagCombinations::empty().with_added(&["marvel"], None);
        assert!(combos.as_slice()[0].matches(&video("a", Some("marvel"), None)));
        assert!(combos.as_slice()[0].matches(&video("b", None, Some("Marvel"))));
        assert!(!combos.as_slice()[0].matches(&video("c", None, None)));
    }

    #[test]
    fn adding_empty_selection_is_noop() {
        let combos = TagCombinations::default();
        let empty: [&str; 0] = [];
        assert_eq!(combos.with_added(&empty, None), combos);
        assert_eq!(combos.with_added(&["  ", ""], None).len(), 1);
    }

    #[test]
    fn ids_stay_monotonic_after_removal() {
        let combos = TagCombinations::default()
            .with_added(&["dc"], None)
            .with_added(&["games"], None);
        let ids: Vec<u32> = combos.as_slice().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let combos = combos.without(2);
        let ids: Vec<u32> = combos.as_slice().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let combos = combos.with_added(&["animal"], None);
        assert_eq!(combos.as_slice().last().map(|c| c.id), Some(4));
    }

    #[test]
    fn removing_max_id_then_adding_reuses_next_after_current_max() {
        let combos = TagCombinations::default().with_added(&["dc"], None).without(2);
        let combos = combos.with_added(&["games"], None);
        assert_eq!(combos.get(2).map(|c| c.label.as_str()), Some("games"));
    }

    #[test]
    fn first_id_from_empty_list_is_one() {
        let combos = TagCombinations::empty().with_added(&["carro"], None);
        assert_eq!(combos.as_slice()[0].id, 1);
    }

    #[test]
    fn removing_unknown_id_changes_nothing() {
        let combos = TagCombinations::default();
        assert_eq!(combos.without(42), combos);
    }

    #[test]
    fn custom_label_is_kept() {
        let combos = TagCombinations::empty().with_added(&["dc", "heroi"], Some("DC heroes"));
        assert_eq!(combos.as_slice()[0].label, "DC heroes");
    }

    #[test]
    fn added_tags_are_normalized_and_deduplicated() {
        let combos = TagCombinations::empty().with_added(&["Heroi", " heroi ", "DC"], None);
        assert_eq!(combos.as_slice()[0].tags, vec!["heroi", "dc"]);
        assert_eq!(combos.as_slice()[0].label, "heroi + dc");
    }

    #[test]
    fn buckets_are_independent_and_indexed() {
        let records = vec![
            video("both", Some("heroi"), Some("marvel")),
            video("hero only", Some("heroi"), None),
            video("none", None, None),
        ];
        let combos = TagCombinations::empty()
            .with_added(&["heroi"], None)
            .with_added(&["heroi", "marvel"], None)
            .with_added(&["dc"], None);
        let buckets = group_by_combinations(&records, &combos);

        assert_eq!(buckets.len(), 3);
        let titles = |b: &TagBucket| -> Vec<String> {
            b.points.iter().map(|p| p.video_title.clone()).collect()
        };
        assert_eq!(titles(&buckets[0]), vec!["both", "hero only"]);
        assert_eq!(titles(&buckets[1]), vec!["both"]);
        assert!(buckets[2].points.is_empty());

        let p = &buckets[1].points[0];
        assert_eq!(p.category_index, 1);
        assert_eq!(p.category_name, "heroi + marvel");
        assert!((p.engagement - 13.0).abs() < 1e-9);
        assert_eq!(p.views, 1_000);
        assert_eq!(p.saves, 5);
    }

    #[test]
    fn toggle_selection_adds_then_removes() {
        let selected = toggle_selection(&[], "Marvel");
        assert_eq!(selected, vec!["marvel"]);
        let selected = toggle_selection(&selected, "heroi");
        assert_eq!(selected, vec!["marvel", "heroi"]);
        let selected = toggle_selection(&selected, "marvel");
        assert_eq!(selected, vec!["heroi"]);
    }

    #[test]
    fn available_tags_include_sem_tag() {
        assert!(AVAILABLE_TAGS.contains(&"sem tag"));
        assert_eq!(AVAILABLE_TAGS.len(), 13);
    }
}
