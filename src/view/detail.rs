use async_trait::async_trait;
use tracing::debug;

use super::{Controller, Page};
use crate::{api::RestaurantSource, data::RestaurantDetail, error::Result, samples::SampleData};

pub const NOT_FOUND: &str = "Restaurant not found";

/// Ways to resolve the identifier in `/restaurants/{slug-or-id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    BySlug,
    ById,
}

/// Tried in order; a lookup is only issued once the previous one failed.
pub const LOOKUP_ORDER: [Lookup; 2] = [Lookup::BySlug, Lookup::ById];

impl Lookup {
    async fn run<S: RestaurantSource>(self, source: &S, key: &str) -> Result<RestaurantDetail> {
        match self {
            Self::BySlug => source.restaurant_by_slug(key).await,
            Self::ById => source.restaurant_by_id(key).await,
        }
    }
}

pub struct DetailPage<S> {
    source: S,
    samples: &'static SampleData,
}

impl<S> DetailPage<S> {
    pub fn new(source: S) -> Self {
        Self::with_samples(source, SampleData::builtin())
    }

    pub fn with_samples(source: S, samples: &'static SampleData) -> Self {
        Self { source, samples }
    }
}

#[async_trait]
impl<S: RestaurantSource> Page for DetailPage<S> {
    type Key = String;
    type Data = RestaurantDetail;

    fn name(&self) -> &'static str {
        "restaurant-detail"
    }

    async fn fetch(&self, key: &String) -> Result<RestaurantDetail> {
        let mut outcome = LOOKUP_ORDER[0].run(&self.source, key).await;
        for lookup in &LOOKUP_ORDER[1..] {
            let Err(e) = &outcome else { break };
            debug!(%key, next = ?lookup, "lookup failed: {e}");
            outcome = lookup.run(&self.source, key).await;
        }
        outcome
    }

    fn fallback(&self, key: &String) -> Option<RestaurantDetail> {
        self.samples.detail(key).cloned()
    }

    fn unavailable(&self, _key: &String) -> String {
        NOT_FOUND.to_string()
    }
}

pub type DetailView<S> = Controller<DetailPage<S>>;
