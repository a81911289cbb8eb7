use async_trait::async_trait;

use super::{Controller, Page};
use crate::{
    api::RestaurantSource,
    data::{RankingList, RankingMode},
    error::Result,
    samples::SampleData,
};

pub const LOAD_FAILED: &str = "Could not load data, please retry";

/// Home page rankings, one list per tab.
pub struct RankingPage<S> {
    source: S,
    samples: &'static SampleData,
}

impl<S> RankingPage<S> {
    pub fn new(source: S) -> Self {
        Self::with_samples(source, SampleData::builtin())
    }

    pub fn with_samples(source: S, samples: &'static SampleData) -> Self {
        Self { source, samples }
    }
}

#[async_trait]
impl<S: RestaurantSource> Page for RankingPage<S> {
    type Key = RankingMode;
    type Data = RankingList;

    fn name(&self) -> &'static str {
        "rankings"
    }

    async fn fetch(&self, mode: &RankingMode) -> Result<RankingList> {
        Ok(self.source.rankings(*mode).await?.restaurants)
    }

    fn fallback(&self, mode: &RankingMode) -> Option<RankingList> {
        let samples = self.samples.ranking(*mode);
        (!samples.is_empty()).then(|| samples.clone())
    }

    fn unavailable(&self, _mode: &RankingMode) -> String {
        LOAD_FAILED.to_string()
    }
}

pub type RankingView<S> = Controller<RankingPage<S>>;
