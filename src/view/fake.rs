//! Scripted [`RestaurantSource`] for controller tests.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::{
    api::RestaurantSource,
    data::{RankingMode, RestaurantDetail, RestaurantEnvelope, RestaurantList},
    error::{ApiError, Result},
};

#[derive(Debug)]
pub(crate) enum Reply {
    Json(Value),
    Status(u16),
    /// Hold the call until the test sends the real reply.
    Gated(oneshot::Receiver<Reply>),
}

/// Answers calls by name (`rankings:public`, `slug:<s>`, `id:<i>`,
/// `search:<q>`) from queued replies. Unscripted calls get a 503.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on(&self, call: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .entry(call.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub(crate) async fn wait_for_calls(&self, count: usize) {
        while self.calls.lock().len() < count {
            tokio::task::yield_now().await;
        }
    }

    async fn answer<T: DeserializeOwned>(&self, call: String) -> Result<T> {
        let reply = self
            .replies
            .lock()
            .get_mut(&call)
            .and_then(VecDeque::pop_front);
        self.calls.lock().push(call);

        let mut reply = reply.unwrap_or(Reply::Status(503));
        loop {
            match reply {
                Reply::Json(value) => return serde_json::from_value(value).map_err(ApiError::Decode),
                Reply::Status(status) => return Err(ApiError::Http { status }),
                Reply::Gated(rx) => reply = rx.await.unwrap_or(Reply::Status(599)),
            }
        }
    }
}

#[async_trait]
impl RestaurantSource for ScriptedSource {
    async fn rankings(&self, mode: RankingMode) -> Result<RestaurantList> {
        self.answer(format!("rankings:{mode}")).await
    }

    async fn restaurant_by_slug(&self, slug: &str) -> Result<RestaurantDetail> {
        self.answer::<RestaurantEnvelope>(format!("slug:{slug}"))
            .await
            .map(RestaurantEnvelope::into_detail)
    }

    async fn restaurant_by_id(&self, id: &str) -> Result<RestaurantDetail> {
        self.answer::<RestaurantEnvelope>(format!("id:{id}"))
            .await
            .map(RestaurantEnvelope::into_detail)
    }

    async fn search(&self, query: &str) -> Result<RestaurantList> {
        self.answer(format!("search:{query}")).await
    }
}
