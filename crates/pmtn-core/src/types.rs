use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Coarse news kind driving report routing (CSV column `news_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsKind {
    Gaming,
    TrafficImpact,
}

impl std::fmt::Display for NewsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewsKind::Gaming => write!(f, "gaming"),
            NewsKind::TrafficImpact => write!(f, "traffic_impact"),
        }
    }
}

/// How strongly an item is corroborated: `high` when two independent sources
/// reported it, `medium` when only one did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
}

/// The five reporting buckets every persisted item is grouped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    OutageBlock,
    SocialCrisis,
    SeasonalCalendar,
    GamingCompetitor,
    Other,
}

impl CategoryGroup {
    /// Map a fine-grained category label to its reporting group.
    ///
    /// Total and deterministic: membership is exact-string only, and any
    /// unrecognized label maps to [`CategoryGroup::Other`].
    #[must_use]
    pub fn from_fine(label: &str) -> Self {
        match label {
            "internet_shutdown" | "network_outage" | "power_outage" | "server_outage"
            | "app_ban" | "platform_block" => CategoryGroup::OutageBlock,
            "war" | "protest" | "protest_strike" | "riot" | "terror_attack" | "explosion"
            | "martial_law" | "earthquake" | "typhoon" | "flood" => CategoryGroup::SocialCrisis,
            "holiday" | "school_vacation" | "exam_period" | "festival" => {
                CategoryGroup::SeasonalCalendar
            }
            "gaming" | "esports" | "game_update" | "game_tournament" | "competitor_launch" => {
                CategoryGroup::GamingCompetitor
            }
            _ => CategoryGroup::Other,
        }
    }
}

impl std::fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryGroup::OutageBlock => write!(f, "outage_block"),
            CategoryGroup::SocialCrisis => write!(f, "social_crisis"),
            CategoryGroup::SeasonalCalendar => write!(f, "seasonal_calendar"),
            CategoryGroup::GamingCompetitor => write!(f, "gaming_competitor"),
            CategoryGroup::Other => write!(f, "other"),
        }
    }
}

/// Continent bucket derived from a country name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Continent {
    #[serde(rename = "NORTH AMERICA")]
    NorthAmerica,
    #[serde(rename = "SOUTH AMERICA")]
    SouthAmerica,
    #[serde(rename = "EUROPE")]
    Europe,
    #[serde(rename = "ASIA")]
    Asia,
    #[serde(rename = "AFRICA")]
    Africa,
    #[serde(rename = "OCEANIA")]
    Oceania,
    #[serde(rename = "RUSSIA & CIS")]
    RussiaCis,
    #[serde(rename = "OTHER")]
    Other,
}

impl Continent {
    /// Exact-match lookup from country name. Unknown countries map to `OTHER`.
    #[must_use]
    pub fn for_country(country: &str) -> Self {
        match country {
            "USA" | "Canada" | "Mexico" => Continent::NorthAmerica,
            "Brazil" | "Argentina" => Continent::SouthAmerica,
            "Germany" | "UK" | "France" | "Italy" | "Spain" => Continent::Europe,
            "China" | "India" | "Japan" | "Korea" | "South Korea" => Continent::Asia,
            "South Africa" | "Egypt" | "Nigeria" => Continent::Africa,
            "Australia" | "New Zealand" => Continent::Oceania,
            "Russia" => Continent::RussiaCis,
            _ => Continent::Other,
        }
    }
}

impl std::fmt::Display for Continent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Continent::NorthAmerica => write!(f, "NORTH AMERICA"),
            Continent::SouthAmerica => write!(f, "SOUTH AMERICA"),
            Continent::Europe => write!(f, "EUROPE"),
            Continent::Asia => write!(f, "ASIA"),
            Continent::Africa => write!(f, "AFRICA"),
            Continent::Oceania => write!(f, "OCEANIA"),
            Continent::RussiaCis => write!(f, "RUSSIA & CIS"),
            Continent::Other => write!(f, "OTHER"),
        }
    }
}

/// One collected news record.
///
/// Created by the feed layer, mutated only by classification and validation
/// (`kind`, `category`, `category_group`, `confidence`, `validation`), and
/// removed only when the cleaning pass drops it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub date: NaiveDate,
    pub country: Option<String>,
    pub continent: Option<Continent>,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: String,
    #[serde(rename = "news_type")]
    pub kind: Option<NewsKind>,
    pub category: Option<String>,
    pub category_group: Option<CategoryGroup>,
    pub confidence: Option<Confidence>,
    pub validation: Option<String>,
}

impl NewsItem {
    /// Dedup identity: normalized URL, falling back to normalized title when
    /// the URL is empty or the `#` placeholder some sources emit.
    #[must_use]
    pub fn identity_key(&self) -> String {
        let url = self.url.trim();
        if url.is_empty() || url == "#" {
            self.title.trim().to_lowercase()
        } else {
            url.to_lowercase()
        }
    }

    /// Fill `category_group` from `category` if it is not set yet.
    ///
    /// Items without a fine-grained category land in the `other` group, so a
    /// persisted item always carries a group.
    pub fn ensure_category_group(&mut self) {
        if self.category_group.is_none() {
            self.category_group = Some(
                self.category
                    .as_deref()
                    .map_or(CategoryGroup::Other, CategoryGroup::from_fine),
            );
        }
    }
}
