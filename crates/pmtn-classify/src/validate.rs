//! Cross-source validation of independently fetched result lists.

use std::collections::HashSet;

use pmtn_core::{Confidence, NewsItem};

/// Two titles agreeing above this Jaccard score count as the same story.
const MATCH_THRESHOLD: f64 = 0.7;

/// Word-set similarity between two titles, in `[0.0, 1.0]`.
///
/// Exact lowercase equality short-circuits to `1.0`; otherwise the Jaccard
/// index over lowercase whitespace-token sets. Either side tokenizing to an
/// empty set scores `0.0`. Symmetric by construction.
#[must_use]
pub fn title_similarity(a: &str, b: &str) -> f64 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();

    if a_lower == b_lower {
        return 1.0;
    }

    let words_a: HashSet<&str> = a_lower.split_whitespace().collect();
    let words_b: HashSet<&str> = b_lower.split_whitespace().collect();

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();

    #[allow(clippy::cast_precision_loss)]
    let score = intersection as f64 / union as f64;
    score
}

/// Merge two ranked result lists into one deduplicated, confidence-scored list.
///
/// Each item of `list_a` (in original order) is matched against the
/// best-scoring not-yet-consumed title in `list_b`. A match above the
/// threshold merges the pair: confidence `high`, the longer summary wins, and
/// both titles are consumed. Unmatched items from either side come through
/// with confidence `medium`, tagged with their source label.
///
/// The output carries every surviving item, high-confidence first, each band
/// sorted by ascending title, with no case-insensitive title repeated.
#[must_use]
pub fn cross_validate(
    list_a: Vec<NewsItem>,
    list_b: Vec<NewsItem>,
    label_a: &str,
    label_b: &str,
) -> Vec<NewsItem> {
    let mut consumed_b = vec![false; list_b.len()];
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut merged: Vec<NewsItem> = Vec::new();

    for mut item in list_a {
        if !seen_titles.insert(item.title.to_lowercase()) {
            continue;
        }

        let best = list_b
            .iter()
            .enumerate()
            .filter(|(i, _)| !consumed_b[*i])
            .map(|(i, candidate)| (i, title_similarity(&item.title, &candidate.title)))
            .max_by(|(_, x), (_, y)| x.total_cmp(y));

        match best {
            Some((idx, score)) if score > MATCH_THRESHOLD => {
                consumed_b[idx] = true;
                let partner = &list_b[idx];
                seen_titles.insert(partner.title.to_lowercase());

                if partner.summary.len() > item.summary.len() {
                    item.summary = partner.summary.clone();
                }
                item.confidence = Some(Confidence::High);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let percent = (score * 100.0).round() as u32;
                item.validation = Some(format!("{label_a} + {label_b} ({percent}% similar)"));
                merged.push(item);
            }
            _ => {
                item.confidence = Some(Confidence::Medium);
                item.validation = Some(format!("{label_a} only"));
                merged.push(item);
            }
        }
    }

    for (idx, mut item) in list_b.into_iter().enumerate() {
        if consumed_b[idx] || !seen_titles.insert(item.title.to_lowercase()) {
            continue;
        }
        item.confidence = Some(Confidence::Medium);
        item.validation = Some(format!("{label_b} only"));
        merged.push(item);
    }

    merged.sort_by(|x, y| {
        let x_high = x.confidence == Some(Confidence::High);
        let y_high = y.confidence == Some(Confidence::High);
        y_high.cmp(&x_high).then_with(|| x.title.cmp(&y.title))
    });

    merged
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn item(title: &str) -> NewsItem {
        item_with_summary(title, "")
    }

    fn item_with_summary(title: &str, summary: &str) -> NewsItem {
        NewsItem {
            date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            country: None,
            continent: None,
            title: title.to_string(),
            summary: summary.to_string(),
            url: format!("https://example.com/{}", title.len()),
            source: "test".to_string(),
            kind: None,
            category: None,
            category_group: None,
            confidence: None,
            validation: None,
        }
    }

    #[test]
    fn similarity_is_symmetric() {
        let pairs = [
            ("Server outage hits Brazil", "Brazil hit by server outage"),
            ("PUBG Mobile update", "update released"),
            ("", "something"),
            ("같은 제목", "같은 제목"),
        ];
        for (a, b) in pairs {
            assert!(
                (title_similarity(a, b) - title_similarity(b, a)).abs() < f64::EPSILON,
                "similarity not symmetric for ({a}, {b})"
            );
        }
    }

    #[test]
    fn exact_match_ignoring_case_scores_one() {
        assert!((title_similarity("PUBG Mobile Update", "pubg mobile update") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_side_scores_zero() {
        assert!((title_similarity("", "anything") - 0.0).abs() < f64::EPSILON);
        assert!((title_similarity("   ", "anything") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn jaccard_counts_word_overlap() {
        // {a,b,c} vs {b,c,d}: 2 shared of 4 total.
        let score = title_similarity("a b c", "b c d");
        assert!((score - 0.5).abs() < f64::EPSILON, "got {score}");
    }

    #[test]
    fn identical_titles_across_sources_merge_high() {
        let merged = cross_validate(
            vec![item("PUBG Mobile update released")],
            vec![item("pubg mobile update released")],
            "OpenAI",
            "Claude",
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].confidence, Some(Confidence::High));
        assert_eq!(
            merged[0].validation.as_deref(),
            Some("OpenAI + Claude (100% similar)")
        );
    }

    #[test]
    fn unrelated_titles_stay_separate_medium() {
        let merged = cross_validate(
            vec![item("Server outage hits Brazil")],
            vec![item("Completely unrelated headline")],
            "OpenAI",
            "Claude",
        );
        assert_eq!(merged.len(), 2);
        assert!(merged
            .iter()
            .all(|n| n.confidence == Some(Confidence::Medium)));
        let tags: Vec<&str> = merged
            .iter()
            .filter_map(|n| n.validation.as_deref())
            .collect();
        assert!(tags.contains(&"OpenAI only"));
        assert!(tags.contains(&"Claude only"));
    }

    #[test]
    fn merged_item_takes_the_longer_summary() {
        let merged = cross_validate(
            vec![item_with_summary("big story breaks today", "short")],
            vec![item_with_summary(
                "big story breaks today",
                "a much longer and more detailed summary",
            )],
            "OpenAI",
            "Claude",
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].summary, "a much longer and more detailed summary");
    }

    #[test]
    fn empty_first_list_relabels_second_medium() {
        let merged = cross_validate(Vec::new(), vec![item("X")], "OpenAI", "Claude");
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "X");
        assert_eq!(merged[0].confidence, Some(Confidence::Medium));
        assert_eq!(merged[0].validation.as_deref(), Some("Claude only"));
    }

    #[test]
    fn both_lists_empty_gives_empty_output() {
        assert!(cross_validate(Vec::new(), Vec::new(), "a", "b").is_empty());
    }

    #[test]
    fn no_title_appears_twice_case_insensitively() {
        let merged = cross_validate(
            vec![
                item("Breaking story one"),
                item("breaking STORY one"),
                item("Another headline"),
            ],
            vec![item("BREAKING story ONE"), item("Another headline")],
            "OpenAI",
            "Claude",
        );
        let mut seen = HashSet::new();
        for n in &merged {
            assert!(
                seen.insert(n.title.to_lowercase()),
                "duplicate title in output: {}",
                n.title
            );
        }
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn high_confidence_sorts_before_medium_then_alphabetical() {
        let merged = cross_validate(
            vec![
                item("zebra sightings spike today"),
                item("quake disrupts mobile networks"),
            ],
            vec![
                item("quake disrupts mobile networks"),
                item("alpha release announced"),
            ],
            "OpenAI",
            "Claude",
        );
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].title, "quake disrupts mobile networks");
        assert_eq!(merged[0].confidence, Some(Confidence::High));
        assert_eq!(merged[1].title, "alpha release announced");
        assert_eq!(merged[2].title, "zebra sightings spike today");
    }

    #[test]
    fn each_partner_is_consumed_at_most_once() {
        // Two A items both similar to the single B item: only the first merges.
        let merged = cross_validate(
            vec![
                item("massive flood cuts power lines"),
                item("massive flood cuts power lines again"),
            ],
            vec![item("massive flood cuts power lines")],
            "OpenAI",
            "Claude",
        );
        let high_count = merged
            .iter()
            .filter(|n| n.confidence == Some(Confidence::High))
            .count();
        assert_eq!(high_count, 1);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn below_threshold_similarity_does_not_merge() {
        // 3 of 6 words shared: 3/9 union? {heavy,rain,floods,city,center} vs
        // {light,rain,in,city} — intersection {rain, city} = 2, union 7 → 0.29.
        let merged = cross_validate(
            vec![item("heavy rain floods city center")],
            vec![item("light rain in city")],
            "OpenAI",
            "Claude",
        );
        assert_eq!(merged.len(), 2);
        assert!(merged
            .iter()
            .all(|n| n.confidence == Some(Confidence::Medium)));
    }
}
