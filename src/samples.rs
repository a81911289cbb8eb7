use std::{collections::HashMap, sync::OnceLock};

use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};
use serde::Deserialize;

use crate::data::{RankingList, RankingMode, RestaurantDetail, RestaurantSummary};

const BUNDLED: &str = include_str!("../assets/samples.json");

#[derive(Deserialize)]
struct SampleRankings {
    public: RankingList,
    expert: RankingList,
}

#[derive(Deserialize)]
struct SampleDetail {
    /// Every route identifier that resolves to this restaurant.
    keys: Vec<String>,
    restaurant: RestaurantDetail,
}

#[derive(Deserialize)]
struct SampleDocument {
    rankings: SampleRankings,
    details: Vec<SampleDetail>,
}

/// Local data shown when the API cannot be reached. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct SampleData {
    public: RankingList,
    expert: RankingList,
    details: HashMap<String, RestaurantDetail>,
}

impl SampleData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let SampleDocument { rankings, details } = serde_json::from_str(json)?;
        let details = details
            .into_iter()
            .flat_map(|SampleDetail { keys, restaurant }| {
                keys.into_iter().map(move |key| (key, restaurant.clone()))
            })
            .collect();

        Ok(Self {
            public: rankings.public,
            expert: rankings.expert,
            details,
        })
    }

    /// The dataset compiled into the binary, parsed on first use.
    pub fn builtin() -> &'static SampleData {
        static SAMPLES: OnceLock<SampleData> = OnceLock::new();
        SAMPLES.get_or_init(|| {
            SampleData::from_json(BUNDLED).expect("bundled sample data must be valid json")
        })
    }

    pub fn ranking(&self, mode: RankingMode) -> &RankingList {
        match mode {
            RankingMode::Public => &self.public,
            RankingMode::Expert => &self.expert,
        }
    }

    /// Only whitelisted identifiers resolve; anything else is unknown.
    pub fn detail(&self, key: &str) -> Option<&RestaurantDetail> {
        self.details.get(key)
    }

    /// Every sample restaurant once, public ranking first.
    pub fn restaurants(&self) -> impl Iterator<Item = &RestaurantSummary> {
        self.public.iter().chain(
            self.expert
                .iter()
                .filter(|expert| self.public.iter().all(|public| public.name != expert.name)),
        )
    }

    /// Fuzzy search over names, cuisines and dishes. Best match first.
    pub fn search(&self, query: &str) -> RankingList {
        let query = query.trim();
        if query.is_empty() {
            return self.restaurants().cloned().collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &RestaurantSummary)> = self
            .restaurants()
            .filter_map(|restaurant| {
                std::iter::once(restaurant.name.as_str())
                    .chain(std::iter::once(restaurant.cuisine_type.as_str()))
                    .chain(restaurant.popular_dishes.iter().map(|dish| dish.name.as_str()))
                    .filter_map(|text| matcher.fuzzy_match(text, query))
                    .max()
                    .map(|score| (score, restaurant))
            })
            .collect();
        // stable: equal scores keep ranking order
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, r)| r.clone()).collect()
    }
}
