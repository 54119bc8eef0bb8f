//! Google News RSS collector.

use chrono::{DateTime, Days, NaiveDate, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use quick_xml::events::Event;
use quick_xml::Reader;

use pmtn_core::{Continent, NewsItem};

use crate::error::FeedError;

/// At most this many items are taken per query.
const MAX_ITEMS: usize = 10;
/// Items older than this many days are skipped.
const RECENCY_DAYS: u64 = 7;
/// Summaries are truncated to this many characters.
const SUMMARY_MAX_CHARS: usize = 500;

/// Fetch news items from Google News RSS for a search keyword.
///
/// When `country` is set, the items are tagged with that country and its
/// derived continent (country-specific queries carry the country in the
/// keyword itself).
///
/// # Errors
///
/// Returns [`FeedError::Http`] on network failure or [`FeedError::Xml`] on
/// malformed RSS.
pub async fn fetch_google_news(
    keyword: &str,
    country: Option<&str>,
) -> Result<Vec<NewsItem>, FeedError> {
    let encoded = utf8_percent_encode(keyword, NON_ALPHANUMERIC).to_string();
    let url = format!("https://news.google.com/rss/search?q={encoded}&hl=ko&gl=KR&ceid=KR:ko");

    let body = reqwest::get(&url).await?.text().await?;
    parse_rss_feed(&body, country, Utc::now().date_naive())
}

/// Parse an RSS feed XML body into `NewsItem`s.
///
/// `today` anchors the recency cut: items published more than
/// [`RECENCY_DAYS`] before it are skipped, as are items without a link.
///
/// # Errors
///
/// Returns [`FeedError::Xml`] if the XML is malformed.
pub fn parse_rss_feed(
    xml: &str,
    country: Option<&str>,
    today: NaiveDate,
) -> Result<Vec<NewsItem>, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let cutoff = today
        .checked_sub_days(Days::new(RECENCY_DAYS))
        .unwrap_or(today);

    let mut items = Vec::new();
    let mut current_title = String::new();
    let mut current_link = String::new();
    let mut current_description = String::new();
    let mut current_pub_date = String::new();
    let mut current_source = String::new();
    let mut in_item = false;
    let mut current_tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                match name.as_str() {
                    "item" => {
                        in_item = true;
                        current_title.clear();
                        current_link.clear();
                        current_description.clear();
                        current_pub_date.clear();
                        current_source.clear();
                    }
                    _ => {
                        current_tag = name;
                    }
                }
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                let name = std::str::from_utf8(raw.as_ref()).unwrap_or("");
                if name == "item" && in_item {
                    in_item = false;
                    if current_link.is_empty() {
                        continue;
                    }
                    let date = parse_pub_date(&current_pub_date).unwrap_or(today);
                    if date < cutoff {
                        continue;
                    }
                    let source = if current_source.is_empty() {
                        "Google News".to_string()
                    } else {
                        current_source.clone()
                    };
                    items.push(NewsItem {
                        date,
                        country: country.map(ToString::to_string),
                        continent: country.map(Continent::for_country),
                        title: current_title.trim().to_string(),
                        summary: truncate_chars(current_description.trim(), SUMMARY_MAX_CHARS),
                        url: current_link.clone(),
                        source,
                        kind: None,
                        category: Some("gaming".to_string()),
                        category_group: None,
                        confidence: None,
                        validation: None,
                    });
                    if items.len() >= MAX_ITEMS {
                        break;
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    assign_field(
                        &current_tag,
                        text,
                        &mut current_title,
                        &mut current_link,
                        &mut current_description,
                        &mut current_pub_date,
                        &mut current_source,
                    );
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    assign_field(
                        &current_tag,
                        text,
                        &mut current_title,
                        &mut current_link,
                        &mut current_description,
                        &mut current_pub_date,
                        &mut current_source,
                    );
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedError::Xml(e)),
            _ => {}
        }
    }

    Ok(items)
}

#[allow(clippy::too_many_arguments)]
fn assign_field(
    tag: &str,
    text: String,
    title: &mut String,
    link: &mut String,
    description: &mut String,
    pub_date: &mut String,
    source: &mut String,
) {
    match tag {
        "title" => *title = text,
        "link" => *link = text,
        "description" => *description = strip_html(&text),
        "pubDate" => *pub_date = text,
        "source" => *source = text,
        _ => {}
    }
}

/// Parse an RFC 2822 publication date ("Mon, 24 Nov 2025 08:00:00 GMT").
fn parse_pub_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc2822(raw.trim())
        .ok()
        .map(|dt| dt.date_naive())
}

/// Strip HTML tags from a string, returning plain text.
fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }
    result.trim().to_string()
}

/// Truncate to at most `max` characters on a char boundary.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
