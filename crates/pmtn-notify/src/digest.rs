//! Block Kit digest assembly.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::{json, Value};

use pmtn_core::{CategoryGroup, NewsItem, NewsKind};

/// At most this many traffic stories are listed individually.
const TOP_STORIES: usize = 3;

/// Icon and Korean display name for a category group.
fn group_info(group: CategoryGroup) -> (&'static str, &'static str) {
    match group {
        CategoryGroup::OutageBlock => ("🔴", "장애/차단"),
        CategoryGroup::SocialCrisis => ("🟠", "사회 위기"),
        CategoryGroup::SeasonalCalendar => ("🟢", "시즌/일정"),
        CategoryGroup::GamingCompetitor => ("🔵", "게임/경쟁"),
        CategoryGroup::Other => ("⚪", "기타"),
    }
}

/// Split the store into (traffic-impact, gaming) items within the window.
///
/// The cutoff is `now - hours`, compared at date granularity since the store
/// only keeps publication dates. Items with no kind are not reported.
#[must_use]
pub fn recent_split(
    items: &[NewsItem],
    hours: i64,
    now: DateTime<Utc>,
) -> (Vec<NewsItem>, Vec<NewsItem>) {
    let cutoff: NaiveDate = (now - Duration::hours(hours)).date_naive();
    let mut traffic = Vec::new();
    let mut gaming = Vec::new();
    for item in items {
        if item.date < cutoff {
            continue;
        }
        match item.kind {
            Some(NewsKind::TrafficImpact) => traffic.push(item.clone()),
            Some(NewsKind::Gaming) => gaming.push(item.clone()),
            None => {}
        }
    }
    (traffic, gaming)
}

/// Build the daily Block Kit digest.
///
/// `dashboard_url`, when present, is appended as a primary link button.
#[must_use]
pub fn build_digest(
    traffic: &[NewsItem],
    gaming: &[NewsItem],
    today: NaiveDate,
    dashboard_url: Option<&str>,
) -> Value {
    let mut blocks = vec![
        json!({
            "type": "header",
            "text": {
                "type": "plain_text",
                "text": format!("📊 PUBGM 트래픽 리포트 - {}", today.format("%Y년 %m월 %d일")),
                "emoji": true
            }
        }),
        json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!(
                    "*지난 24시간 뉴스 현황*\n⚡ 트래픽 영향: *{}건* | 🎮 게임 뉴스: *{}건*",
                    traffic.len(),
                    gaming.len()
                )
            }
        }),
        json!({ "type": "divider" }),
    ];

    if traffic.is_empty() {
        blocks.push(json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": "✅ 지난 24시간 동안 특이한 트래픽 영향 이슈가 없습니다."
            }
        }));
    } else {
        let tallies = group_tallies(traffic);

        let mut cat_text = String::new();
        for &(group, count) in &tallies {
            let (icon, name) = group_info(group);
            cat_text.push_str(&format!("{icon} {name}: *{count}건*\n"));
        }
        blocks.push(json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!("*🚨 트래픽 영향 이슈*\n{cat_text}")
            }
        }));

        let crisis_count: usize = tallies
            .iter()
            .filter(|(g, _)| {
                matches!(g, CategoryGroup::OutageBlock | CategoryGroup::SocialCrisis)
            })
            .map(|(_, c)| *c)
            .sum();
        if crisis_count > 0 {
            blocks.push(json!({
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!(
                        "⚠️ *주의:* {crisis_count}건의 위기/장애 관련 뉴스가 감지되었습니다."
                    )
                }
            }));
        }

        blocks.push(json!({ "type": "divider" }));
        blocks.push(json!({
            "type": "section",
            "text": { "type": "mrkdwn", "text": "*📌 주요 뉴스*" }
        }));

        for (idx, item) in traffic.iter().take(TOP_STORIES).enumerate() {
            let group = item.category_group.unwrap_or(CategoryGroup::Other);
            let (icon, _) = group_info(group);
            let title: String = item.title.chars().take(60).collect();
            let mut text = format!("{icon} {title}");
            if let Some(country) = item.country.as_deref() {
                if !country.is_empty() && country != "Unknown" {
                    text.push_str(&format!(" ({country})"));
                }
            }
            blocks.push(json!({
                "type": "section",
                "text": { "type": "mrkdwn", "text": text },
                "accessory": {
                    "type": "button",
                    "text": { "type": "plain_text", "text": "보기", "emoji": true },
                    "url": item.url,
                    "action_id": format!("view_news_{idx}")
                }
            }));
        }
    }

    if let Some(url) = dashboard_url {
        blocks.push(json!({ "type": "divider" }));
        blocks.push(json!({
            "type": "actions",
            "elements": [
                {
                    "type": "button",
                    "text": {
                        "type": "plain_text",
                        "text": "📊 대시보드 바로가기",
                        "emoji": true
                    },
                    "url": url,
                    "style": "primary"
                }
            ]
        }));
    }

    json!({ "blocks": blocks })
}

/// Count traffic items per category group, largest group first.
fn group_tallies(traffic: &[NewsItem]) -> Vec<(CategoryGroup, usize)> {
    let mut counts: std::collections::BTreeMap<CategoryGroup, usize> =
        std::collections::BTreeMap::new();
    for item in traffic {
        let group = item.category_group.unwrap_or(CategoryGroup::Other);
        *counts.entry(group).or_insert(0) += 1;
    }
    let mut tallies: Vec<(CategoryGroup, usize)> = counts.into_iter().collect();
    tallies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    tallies
}
