//! CSV persistence for collected news items.
//!
//! One flat file holds every item the pipeline has kept so far. Loading an
//! absent file is an empty list, merging drops already-known identities, and
//! saving re-derives the category group for any item missing one so that a
//! persisted row always carries a group.

use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::Path;

use thiserror::Error;

use pmtn_core::NewsItem;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Load all items from the CSV file at `path`.
///
/// A missing file is not an error: the store starts empty.
///
/// # Errors
///
/// Returns [`StoreError`] when the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<Vec<NewsItem>, StoreError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no existing news file — starting empty");
        return Ok(Vec::new());
    }

    let file = std::fs::File::open(path).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    read_items(file)
}

/// Deserialize items from any CSV reader.
///
/// # Errors
///
/// Returns [`StoreError::Csv`] on malformed rows.
pub fn read_items<R: Read>(reader: R) -> Result<Vec<NewsItem>, StoreError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut items = Vec::new();
    for record in csv_reader.deserialize() {
        items.push(record?);
    }
    Ok(items)
}

/// Keep only incoming items whose identity key is not already present.
///
/// Identity is the normalized URL, falling back to the normalized title
/// (see [`NewsItem::identity_key`]). Duplicates inside `incoming` itself are
/// also collapsed, first occurrence wins.
#[must_use]
pub fn merge_new(existing: &[NewsItem], incoming: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen: HashSet<String> = existing.iter().map(NewsItem::identity_key).collect();
    let total = incoming.len();

    let unique: Vec<NewsItem> = incoming
        .into_iter()
        .filter(|item| seen.insert(item.identity_key()))
        .collect();

    tracing::info!(
        incoming = total,
        unique = unique.len(),
        "deduplicated new items against the store"
    );
    unique
}

/// Write all items to the CSV file at `path`, newest first.
///
/// Every item gets its `category_group` derived from `category` if it does
/// not carry one yet.
///
/// # Errors
///
/// Returns [`StoreError`] on I/O or serialization failure.
pub fn save(path: &Path, items: Vec<NewsItem>) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }

    let file = std::fs::File::create(path).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let count = items.len();
    write_items(file, items)?;
    tracing::info!(count, path = %path.display(), "saved news items");
    Ok(())
}

/// Serialize items to any CSV writer, sorted by date descending.
///
/// # Errors
///
/// Returns [`StoreError::Csv`] on serialization failure.
pub fn write_items<W: Write>(writer: W, mut items: Vec<NewsItem>) -> Result<(), StoreError> {
    for item in &mut items {
        item.ensure_category_group();
    }
    items.sort_by(|a, b| b.date.cmp(&a.date));

    let mut csv_writer = csv::Writer::from_writer(writer);
    for item in &items {
        csv_writer.serialize(item)?;
    }
    csv_writer.flush().map_err(|e| StoreError::Io {
        path: String::from("<writer>"),
        source: e,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pmtn_core::{CategoryGroup, Confidence, NewsKind};

    use super::*;

    fn item(title: &str, url: &str, date: (i32, u32, u32)) -> NewsItem {
        NewsItem {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            country: None,
            continent: None,
            title: title.to_string(),
            summary: "a summary".to_string(),
            url: url.to_string(),
            source: "test".to_string(),
            kind: Some(NewsKind::TrafficImpact),
            category: Some("internet_shutdown".to_string()),
            category_group: None,
            confidence: Some(Confidence::Medium),
            validation: Some("OpenAI only".to_string()),
        }
    }

    #[test]
    fn round_trips_through_csv() {
        let items = vec![
            item("Shutdown in region A", "https://example.com/a", (2025, 11, 20)),
            item("Shutdown in region B", "https://example.com/b", (2025, 11, 22)),
        ];

        let mut buf = Vec::new();
        write_items(&mut buf, items).unwrap();
        let restored = read_items(buf.as_slice()).unwrap();

        assert_eq!(restored.len(), 2);
        // Newest first after save.
        assert_eq!(restored[0].title, "Shutdown in region B");
        assert_eq!(restored[1].title, "Shutdown in region A");
        assert_eq!(restored[0].kind, Some(NewsKind::TrafficImpact));
        assert_eq!(restored[0].confidence, Some(Confidence::Medium));
        assert_eq!(restored[0].validation.as_deref(), Some("OpenAI only"));
    }

    #[test]
    fn save_enforces_category_group_invariant() {
        let mut no_category = item("Uncategorized", "https://example.com/u", (2025, 11, 20));
        no_category.category = None;

        let mut buf = Vec::new();
        write_items(&mut buf, vec![no_category]).unwrap();
        let restored = read_items(buf.as_slice()).unwrap();

        assert_eq!(restored[0].category_group, Some(CategoryGroup::Other));

        let categorized = item("Categorized", "https://example.com/c", (2025, 11, 20));
        let mut buf = Vec::new();
        write_items(&mut buf, vec![categorized]).unwrap();
        let restored = read_items(buf.as_slice()).unwrap();
        assert_eq!(restored[0].category_group, Some(CategoryGroup::OutageBlock));
    }

    #[test]
    fn merge_drops_known_urls() {
        let existing = vec![item("Old story", "https://example.com/a", (2025, 11, 18))];
        let incoming = vec![
            item("Old story again", "https://example.com/a", (2025, 11, 20)),
            item("Fresh story", "https://example.com/new", (2025, 11, 20)),
        ];
        let unique = merge_new(&existing, incoming);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].title, "Fresh story");
    }

    #[test]
    fn merge_falls_back_to_title_when_url_is_placeholder() {
        let existing = vec![item("AI sourced story", "#", (2025, 11, 18))];
        let incoming = vec![
            item("ai sourced STORY", "#", (2025, 11, 20)),
            item("Different story", "#", (2025, 11, 20)),
        ];
        let unique = merge_new(&existing, incoming);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].title, "Different story");
    }

    #[test]
    fn merge_collapses_duplicates_within_incoming() {
        let incoming = vec![
            item("Same", "https://example.com/s", (2025, 11, 20)),
            item("Same", "https://example.com/s", (2025, 11, 20)),
        ];
        let unique = merge_new(&[], incoming);
        assert_eq!(unique.len(), 1);
    }

    #[test]
    fn load_missing_file_is_empty() {
        let items = load(Path::new("./definitely/not/here/news.csv")).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn optional_fields_survive_empty_cells() {
        let csv_text = "\
date,country,continent,title,summary,url,source,news_type,category,category_group,confidence,validation
2025-11-20,,,Bare row,,https://example.com/bare,Google News,,,other,,
";
        let restored = read_items(csv_text.as_bytes()).unwrap();
        assert_eq!(restored.len(), 1);
        assert!(restored[0].country.is_none());
        assert!(restored[0].continent.is_none());
        assert!(restored[0].kind.is_none());
        assert!(restored[0].confidence.is_none());
        assert_eq!(restored[0].category_group, Some(CategoryGroup::Other));
    }
}
