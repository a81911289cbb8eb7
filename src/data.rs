use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

/// Lists the API may send as `null`; they decode as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularDish {
    pub name: String,
    pub mentions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Price scale written as one to four euro signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PriceTier(u8);

impl PriceTier {
    pub const MAX: u8 = 4;

    pub fn new(level: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            f.write_str("€")?;
        }
        Ok(())
    }
}

impl FromStr for PriceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let level = s.chars().count();
        if s.is_empty() || s.chars().any(|c| c != '€') {
            return Err(format!("unexpected price tier {s:?}"));
        }
        u8::try_from(level)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| format!("price tier {s:?} is out of range"))
    }
}

impl TryFrom<String> for PriceTier {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PriceTier> for String {
    fn from(value: PriceTier) -> Self {
        value.to_string()
    }
}

/// `price_range` as sent: a euro-sign tier, or any other label kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceRange {
    Tier(PriceTier),
    Label(String),
}

impl PriceRange {
    pub fn tier(&self) -> Option<PriceTier> {
        match self {
            Self::Tier(tier) => Some(*tier),
            Self::Label(_) => None,
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tier(tier) => tier.fmt(f),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// Trustworthiness of a reviewer, 0 to 10. Fractions are allowed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Credibility(f64);

impl Credibility {
    pub const MAX: f64 = 10.0;

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Credibility {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !(0.0..=Self::MAX).contains(&value) {
            return Err(format!("credibility {value} is outside 0..={}", Self::MAX));
        }
        Ok(Self(value))
    }
}

impl From<Credibility> for f64 {
    fn from(value: Credibility) -> Self {
        value.0
    }
}

/// Scores coming from professional reviewers rather than the crowd.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpertTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert_reviews: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_blogger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blogger_credibility: Option<Credibility>,
}

/// One row of a ranking. Public rankings fill the crowd scores, expert
/// rankings fill [`ExpertTrack`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantSummary {
    pub id: u64,
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iosoai_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    pub cuisine_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub popular_dishes: Vec<PopularDish>,
    #[serde(flatten)]
    pub expert: ExpertTrack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub summary: RestaurantSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub specialties: Vec<String>,
}

impl RestaurantDetail {
    /// The key to look this restaurant up by: the slug when it has one.
    pub fn lookup_key(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.is_empty() => slug.clone(),
            _ => self.summary.id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    #[default]
    Public,
    Expert,
}

impl RankingMode {
    pub const ALL: [RankingMode; 2] = [RankingMode::Public, RankingMode::Expert];

    /// Value of the `type` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Expert => "expert",
        }
    }

    /// Label of the tab on the site.
    pub fn tab(self) -> &'static str {
        match self {
            Self::Public => "pubblico",
            Self::Expert => "esperti",
        }
    }
}

impl fmt::Display for RankingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

impl FromStr for RankingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" | "pubblico" => Ok(Self::Public),
            "expert" | "esperti" => Ok(Self::Expert),
            other => Err(format!("unknown ranking mode {other:?}")),
        }
    }
}

pub type RankingList = Vec<RestaurantSummary>;

/// `{"restaurants": [...]}` as returned by list, ranking and search endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub restaurants: Vec<RestaurantSummary>,
}

/// Single restaurant responses come either wrapped in `{"restaurant": ..}` or bare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RestaurantEnvelope {
    Wrapped { restaurant: RestaurantDetail },
    Bare(RestaurantDetail),
}

impl RestaurantEnvelope {
    pub fn into_detail(self) -> RestaurantDetail {
        match self {
            Self::Wrapped { restaurant } | Self::Bare(restaurant) => restaurant,
        }
    }
}
