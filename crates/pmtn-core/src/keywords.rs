use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// An ordered set of case-insensitive keywords used for inclusion/exclusion
/// tests against a news item's text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet(pub Vec<String>);

impl KeywordSet {
    #[must_use]
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keywords.into_iter().map(Into::into).collect())
    }

    /// True iff any keyword occurs as a case-insensitive substring of
    /// `title + " " + summary`.
    #[must_use]
    pub fn matches(&self, title: &str, summary: &str) -> bool {
        let text = format!("{title} {summary}").to_lowercase();
        self.0.iter().any(|k| text.contains(&k.to_lowercase()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The three keyword tables driving the cleaning pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRules {
    /// Items matching any of these are dropped outright.
    pub exclude: KeywordSet,
    /// A gaming item must match at least one of these to stay gaming.
    pub gaming_required: KeywordSet,
    /// Traffic-impact items are recognized by these.
    pub traffic_required: KeywordSet,
}

/// Full contents of `config/keywords.yaml`: search queries plus rule tables.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordsFile {
    pub base_keywords: Vec<String>,
    #[serde(default)]
    pub country_keywords: BTreeMap<String, Vec<String>>,
    pub rules: KeywordRules,
}

/// Load and validate the keyword configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_keywords(path: &Path) -> Result<KeywordsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::KeywordsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: KeywordsFile = serde_yaml::from_str(&content)?;

    validate_keywords(&file)?;

    Ok(file)
}

fn validate_keywords(file: &KeywordsFile) -> Result<(), ConfigError> {
    if file.base_keywords.is_empty() {
        return Err(ConfigError::Validation(
            "base_keywords must not be empty".to_string(),
        ));
    }

    let all_lists: Vec<(&str, &[String])> = [
        ("base_keywords", file.base_keywords.as_slice()),
        ("rules.exclude", file.rules.exclude.0.as_slice()),
        ("rules.gaming_required", file.rules.gaming_required.0.as_slice()),
        ("rules.traffic_required", file.rules.traffic_required.0.as_slice()),
    ]
    .into_iter()
    .chain(
        file.country_keywords
            .iter()
            .map(|(country, list)| (country.as_str(), list.as_slice())),
    )
    .collect();

    for (name, list) in all_lists {
        if list.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "keyword list '{name}' contains a blank entry"
            )));
        }
    }

    for (name, set) in [
        ("rules.exclude", &file.rules.exclude),
        ("rules.gaming_required", &file.rules.gaming_required),
        ("rules.traffic_required", &file.rules.traffic_required),
    ] {
        if set.is_empty() {
            return Err(ConfigError::Validation(format!(
                "keyword list '{name}' must not be empty"
            )));
        }
    }

    let mut seen_countries = HashSet::new();
    for country in file.country_keywords.keys() {
        if !seen_countries.insert(country.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate country: '{country}'"
            )));
        }
    }

    Ok(())
}
