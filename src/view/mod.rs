//! Page controllers: load remote data for a selection key, fall back to the
//! bundled samples when the API fails, and never let a stale load win.

use std::fmt;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::Result;

mod detail;
mod ranking;
mod search;

#[cfg(test)]
pub(crate) mod fake;

pub use detail::{DetailPage, DetailView, Lookup, LOOKUP_ORDER, NOT_FOUND};
pub use ranking::{RankingPage, RankingView, LOAD_FAILED};
pub use search::{SearchPage, SearchView};

/// What a page currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested yet.
    Idle,
    Loading,
    Loaded(T),
    /// The API failed and local sample data is shown instead.
    Fallback(T),
    /// The API failed and there is nothing to fall back to.
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) | Self::Fallback(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// One data-bearing page of the site.
#[async_trait]
pub trait Page: Send + Sync {
    /// What selects the data: a ranking tab, a route parameter, a query.
    type Key: Clone + PartialEq + fmt::Debug + Send + Sync;
    type Data: Clone + Send + Sync;

    fn name(&self) -> &'static str;

    async fn fetch(&self, key: &Self::Key) -> Result<Self::Data>;

    /// Local data to show when `fetch` fails, if any exists for `key`.
    fn fallback(&self, key: &Self::Key) -> Option<Self::Data>;

    /// Message shown when `fetch` fails and there is no fallback.
    fn unavailable(&self, key: &Self::Key) -> String;
}

struct Cycle<K, T> {
    generation: u64,
    key: Option<K>,
    state: FetchState<T>,
}

/// Drives a [`Page`] through `Loading -> Loaded | Fallback | Error` cycles.
///
/// Every call to [`Controller::load`] starts a new generation. A cycle only
/// commits its outcome if no newer cycle has started in the meantime, so a
/// slow response for an old key can never overwrite the state of the current
/// one. In-flight requests are not cancelled, their results are dropped.
pub struct Controller<P: Page> {
    page: P,
    cycle: Mutex<Cycle<P::Key, P::Data>>,
}

impl<P: Page> Controller<P> {
    pub fn new(page: P) -> Self {
        Self {
            page,
            cycle: Mutex::new(Cycle {
                generation: 0,
                key: None,
                state: FetchState::Idle,
            }),
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn state(&self) -> FetchState<P::Data> {
        self.cycle.lock().state.clone()
    }

    pub fn key(&self) -> Option<P::Key> {
        self.cycle.lock().key.clone()
    }

    pub fn generation(&self) -> u64 {
        self.cycle.lock().generation
    }

    pub fn is_loading(&self) -> bool {
        self.cycle.lock().state.is_loading()
    }

    /// Select `key` and run a full fetch cycle for it.
    ///
    /// Returns the page state once this cycle is over. If a newer cycle
    /// started meanwhile, that is the newer cycle's state.
    pub async fn load(&self, key: P::Key) -> FetchState<P::Data> {
        let generation = self.begin(key.clone());
        info!(page = self.page.name(), generation, ?key, "loading");

        let outcome = match self.page.fetch(&key).await {
            Ok(data) => FetchState::Loaded(data),
            Err(e) => match self.page.fallback(&key) {
                Some(data) => {
                    warn!(page = self.page.name(), ?key, "API unavailable, using sample data: {e}");
                    FetchState::Fallback(data)
                }
                None => {
                    warn!(page = self.page.name(), ?key, "API unavailable, no sample data: {e}");
                    FetchState::Error(self.page.unavailable(&key))
                }
            },
        };

        self.commit(generation, outcome);
        self.state()
    }

    /// Run the cycle again for the current key. `None` if nothing was ever selected.
    pub async fn reload(&self) -> Option<FetchState<P::Data>> {
        let key = self.key()?;
        Some(self.load(key).await)
    }

    fn begin(&self, key: P::Key) -> u64 {
        let mut cycle = self.cycle.lock();
        cycle.generation += 1;
        cycle.key = Some(key);
        cycle.state = FetchState::Loading;
        cycle.generation
    }

    fn commit(&self, generation: u64, outcome: FetchState<P::Data>) {
        let mut cycle = self.cycle.lock();
        if cycle.generation != generation {
            debug!(
                page = self.page.name(),
                generation,
                current = cycle.generation,
                "discarding stale result"
            );
            return;
        }
        cycle.state = outcome;
    }
}
