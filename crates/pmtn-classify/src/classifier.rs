//! Keyword-based relevance classifier.

use pmtn_core::{KeywordRules, NewsKind};

/// Outcome of classifying one item against the keyword tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Item stays, with this kind (possibly reclassified from the declared one).
    Keep(NewsKind),
    /// Item is irrelevant and should be removed.
    Drop,
}

/// True iff the item text matches any exclusion keyword.
///
/// Exclusion wins over every other signal.
#[must_use]
pub fn should_exclude(title: &str, summary: &str, rules: &KeywordRules) -> bool {
    rules.exclude.matches(title, summary)
}

/// Classify an item by its declared kind and keyword matches.
///
/// - Any exclusion match drops the item, regardless of other signals.
/// - A declared gaming item without a gaming keyword is reclassified to
///   traffic-impact when a traffic keyword matches, otherwise dropped.
/// - An item with no declared kind is assigned gaming, then traffic-impact,
///   in that order; with no match it is dropped.
/// - Anything else keeps its declared kind.
#[must_use]
pub fn classify(
    kind: Option<NewsKind>,
    title: &str,
    summary: &str,
    rules: &KeywordRules,
) -> Verdict {
    if should_exclude(title, summary, rules) {
        return Verdict::Drop;
    }

    let gaming = rules.gaming_required.matches(title, summary);
    let traffic = rules.traffic_required.matches(title, summary);

    match kind {
        Some(NewsKind::Gaming) if !gaming => {
            if traffic {
                Verdict::Keep(NewsKind::TrafficImpact)
            } else {
                Verdict::Drop
            }
        }
        Some(declared) => Verdict::Keep(declared),
        None => {
            if gaming {
                Verdict::Keep(NewsKind::Gaming)
            } else if traffic {
                Verdict::Keep(NewsKind::TrafficImpact)
            } else {
                Verdict::Drop
            }
        }
    }
}
