use async_trait::async_trait;

use super::{Controller, Page};
use crate::{api::RestaurantSource, data::RankingList, error::Result, samples::SampleData};

/// Dish and restaurant search. Offline it searches the sample restaurants.
pub struct SearchPage<S> {
    source: S,
    samples: &'static SampleData,
}

impl<S> SearchPage<S> {
    pub fn new(source: S) -> Self {
        Self::with_samples(source, SampleData::builtin())
    }

    pub fn with_samples(source: S, samples: &'static SampleData) -> Self {
        Self { source, samples }
    }
}

#[async_trait]
impl<S: RestaurantSource> Page for SearchPage<S> {
    type Key = String;
    type Data = RankingList;

    fn name(&self) -> &'static str {
        "search"
    }

    async fn fetch(&self, query: &String) -> Result<RankingList> {
        Ok(self.source.search(query).await?.restaurants)
    }

    fn fallback(&self, query: &String) -> Option<RankingList> {
        Some(self.samples.search(query))
    }

    fn unavailable(&self, query: &String) -> String {
        format!("No results for {query:?}")
    }
}

pub type SearchView<S> = Controller<SearchPage<S>>;
