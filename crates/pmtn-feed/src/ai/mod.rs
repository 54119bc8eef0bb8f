//! AI-backed news search clients.
//!
//! Both providers get the same Korean analyst prompt and are expected to
//! answer with a JSON array of news objects. The array is pulled out of the
//! free-form completion text with a regex before deserializing, since models
//! routinely wrap it in prose or code fences.

mod anthropic;
mod openai;

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::Deserialize;

use pmtn_core::{Continent, NewsItem};

use crate::error::FeedError;
use crate::rss::truncate_chars;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

const SUMMARY_MAX_CHARS: usize = 500;

/// At most this many country names are folded into the prompt context.
const MAX_PROMPT_COUNTRIES: usize = 5;

static JSON_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("static regex must compile"));

/// Build the search prompt sent to both providers.
pub(crate) fn build_search_prompt(keyword: &str, countries: &[String]) -> String {
    let country_context = if countries.is_empty() {
        String::new()
    } else {
        let names = countries
            .iter()
            .take(MAX_PROMPT_COUNTRIES)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        format!(" 특히 {names} 국가와 관련된")
    };

    format!(
        r#"다음 키워드와 관련된 최신 뉴스를 검색하고 분석해주세요: {keyword}{country_context}

다음 JSON 형식으로 응답해주세요 (최대 10개):
[
  {{
    "title": "뉴스 제목",
    "summary": "요약 (2-3문장)",
    "url": "뉴스 링크 (가능한 경우)",
    "source": "출처",
    "date": "YYYY-MM-DD 형식",
    "country": "관련 국가 (없으면 null)",
    "reason": "트래픽 변화와의 연관성 분석"
  }}
]

최근 7일 이내의 뉴스만 포함하고, PUBG Mobile이나 모바일 게임과 관련된 뉴스만 알려주세요."#
    )
}

/// One element of the JSON array a provider answers with.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSearchItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

/// Pull the JSON array out of a completion and deserialize it.
///
/// # Errors
///
/// Returns [`FeedError::MalformedResponse`] when no array is present or the
/// array does not deserialize.
pub(crate) fn parse_search_response(text: &str) -> Result<Vec<RawSearchItem>, FeedError> {
    let json = JSON_ARRAY
        .find(text)
        .ok_or_else(|| FeedError::MalformedResponse("no JSON array in completion".to_string()))?
        .as_str();

    serde_json::from_str(json)
        .map_err(|e| FeedError::MalformedResponse(format!("bad JSON array: {e}")))
}

/// Convert raw provider items into `NewsItem`s.
///
/// Missing fields degrade to empty strings or defaults, never errors:
/// unparseable dates become `today`, missing URLs the `#` placeholder, and
/// missing sources the provider's own name.
pub(crate) fn raw_items_to_news(
    raw: Vec<RawSearchItem>,
    provider: &str,
    today: NaiveDate,
) -> Vec<NewsItem> {
    raw.into_iter()
        .map(|r| {
            let date = r
                .date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                .unwrap_or(today);
            let country = r.country.filter(|c| !c.trim().is_empty());
            let continent = country.as_deref().map(Continent::for_country);
            NewsItem {
                date,
                country,
                continent,
                title: r.title.unwrap_or_default(),
                summary: truncate_chars(&r.summary.unwrap_or_default(), SUMMARY_MAX_CHARS),
                url: r.url.unwrap_or_else(|| "#".to_string()),
                source: r.source.unwrap_or_else(|| provider.to_string()),
                kind: None,
                category: Some("gaming".to_string()),
                category_group: None,
                confidence: None,
                validation: None,
            }
        })
        .collect()
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_keyword_and_country_context() {
        let prompt = build_search_prompt("PUBG Mobile", &["India".to_string()]);
        assert!(prompt.contains("PUBG Mobile"));
        assert!(prompt.contains("특히 India 국가와 관련된"));
    }

    #[test]
    fn prompt_caps_country_context_at_five() {
        let countries: Vec<String> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let prompt = build_search_prompt("PUBG Mobile", &countries);
        assert!(prompt.contains("A, B, C, D, E"));
        assert!(!prompt.contains(", F"));
    }

    #[test]
    fn parse_extracts_array_from_prose() {
        let text = r#"Here is what I found:
[{"title": "BGMI returns", "date": "2025-11-20"}]
Hope this helps."#;
        let raw = parse_search_response(text).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].title.as_deref(), Some("BGMI returns"));
    }

    #[test]
    fn parse_without_array_is_malformed() {
        let err = parse_search_response("no structured data here").unwrap_err();
        assert!(matches!(err, FeedError::MalformedResponse(_)));
    }

    #[test]
    fn parse_with_invalid_array_is_malformed() {
        let err = parse_search_response("[{\"title\": }]").unwrap_err();
        assert!(matches!(err, FeedError::MalformedResponse(_)));
    }

    #[test]
    fn raw_items_fill_defaults() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 25).unwrap();
        let raw = parse_search_response(
            r#"[{"title": "Flood warning", "country": "India"}, {"title": "No extras"}]"#,
        )
        .unwrap();
        let items = raw_items_to_news(raw, "Claude", today);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].date, today);
        assert_eq!(items[0].country.as_deref(), Some("India"));
        assert_eq!(items[0].continent, Some(Continent::Asia));
        assert_eq!(items[0].url, "#");
        assert_eq!(items[0].source, "Claude");
        assert!(items[1].country.is_none());
        assert!(items[1].continent.is_none());
    }

    #[test]
    fn raw_item_dates_are_parsed() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 25).unwrap();
        let raw =
            parse_search_response(r#"[{"title": "Dated", "date": "2025-11-20"}]"#).unwrap();
        let items = raw_items_to_news(raw, "OpenAI", today);
        assert_eq!(items[0].date, NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
    }
}
