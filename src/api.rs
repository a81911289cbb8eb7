use std::{fmt::Display, sync::Arc};

use async_trait::async_trait;
use derive_builder::Builder;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    multipart::{Form, Part},
    Method, RequestBuilder,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    config::ApiConfig,
    data::{RankingMode, RestaurantDetail, RestaurantEnvelope, RestaurantList},
    error::{ApiError, Result},
};

pub const DEFAULT_TOP_BLOGGERS: u32 = 10;
pub const DEFAULT_FEATURED_REVIEWS: u32 = 5;

/// One percent-encoded path segment, so an id can never add a `/` or a query.
fn segment(id: impl Display) -> String {
    urlencoding::encode(&id.to_string()).into_owned()
}

/// Per-call overrides for [`ApiClient::request`].
#[derive(Builder, Debug, Clone, Default)]
#[builder(default)]
pub struct RequestOptions {
    #[builder(setter(into))]
    method: Method,
    /// Merged over the JSON defaults; a header given here replaces the default of the same name.
    headers: HeaderMap,
    #[builder(setter(into, strip_option))]
    body: Option<String>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn json<T: Serialize + ?Sized>(method: Method, body: &T) -> Result<Self> {
        let body = serde_json::to_string(body).map_err(ApiError::Encode)?;
        Ok(Self {
            method,
            body: Some(body),
            ..Default::default()
        })
    }
}

/// Query parameters for the list endpoints, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pairs: Vec<(String, String)>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `?a=1&b=x+y`, or nothing at all when there are no parameters.
    pub fn to_query(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        format!("?{encoded}")
    }
}

/// Filters accepted by `GET /restaurants`.
#[derive(Builder, Debug, Clone, Default)]
#[builder(default)]
pub struct RestaurantFilter {
    #[builder(setter(into, strip_option))]
    city: Option<String>,
    #[builder(setter(into, strip_option))]
    cuisine_type: Option<String>,
    #[builder(setter(into, strip_option))]
    price_range: Option<String>,
    #[builder(setter(into, strip_option))]
    limit: Option<u32>,
}

impl From<&RestaurantFilter> for ListParams {
    fn from(filter: &RestaurantFilter) -> Self {
        let mut params = ListParams::new();
        if let Some(city) = &filter.city {
            params = params.with("city", city);
        }
        if let Some(cuisine) = &filter.cuisine_type {
            params = params.with("cuisine_type", cuisine);
        }
        if let Some(price) = &filter.price_range {
            params = params.with("price_range", price);
        }
        if let Some(limit) = filter.limit {
            params = params.with("limit", limit);
        }
        params
    }
}

/// Stateless handle on the remote API. Clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder().build().map_err(ApiError::Client)?;
        Ok(Self::with_http(config, http))
    }

    pub fn with_http(config: &ApiConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: Arc::from(config.base_url.as_str()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn request<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        let RequestOptions {
            method,
            headers: overrides,
            body,
        } = options;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for name in overrides.keys() {
            headers.remove(name);
        }
        for (name, value) in overrides.iter() {
            headers.append(name.clone(), value.clone());
        }

        debug!(%method, path, "API request");
        let mut req = self.http.request(method, self.url(path)).headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }
        self.execute(path, req).await
    }

    async fn execute<T: DeserializeOwned>(&self, path: &str, req: RequestBuilder) -> Result<T> {
        let result: Result<T> = async {
            let resp = req.send().await.map_err(ApiError::Network)?;
            let status = resp.status();
            if !status.is_success() {
                return Err(ApiError::Http {
                    status: status.as_u16(),
                });
            }
            let bytes = resp.bytes().await.map_err(ApiError::Network)?;
            serde_json::from_slice(&bytes).map_err(ApiError::Decode)
        }
        .await;

        if let Err(e) = &result {
            error!(path, "API request failed: {e}");
        }
        result
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(path, RequestOptions::default()).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T> {
        self.request(path, RequestOptions::json(Method::POST, body)?)
            .await
    }

    // restaurants

    pub async fn get_restaurants(&self, params: &ListParams) -> Result<RestaurantList> {
        self.get(&format!("/restaurants{}", params.to_query())).await
    }

    pub async fn get_restaurant(&self, id: impl Display) -> Result<RestaurantEnvelope> {
        self.get(&format!("/restaurants/{}", segment(id))).await
    }

    pub async fn get_restaurant_by_slug(&self, slug: &str) -> Result<RestaurantEnvelope> {
        self.get(&format!("/restaurants/slug/{}", segment(slug)))
            .await
    }

    pub async fn get_restaurant_rankings(&self, mode: RankingMode) -> Result<RestaurantList> {
        self.get(&format!("/restaurants/rankings?type={}", mode.as_query()))
            .await
    }

    pub async fn search_restaurants(&self, query: &str) -> Result<RestaurantList> {
        self.get(&format!("/restaurants/search?q={}", urlencoding::encode(query)))
            .await
    }

    // food bloggers

    pub async fn get_food_bloggers(&self, params: &ListParams) -> Result<Value> {
        self.get(&format!("/food-bloggers{}", params.to_query())).await
    }

    pub async fn get_food_blogger(&self, id: impl Display) -> Result<Value> {
        self.get(&format!("/food-bloggers/{}", segment(id))).await
    }

    pub async fn get_top_bloggers(&self, limit: u32) -> Result<Value> {
        self.get(&format!("/food-bloggers/top?limit={limit}")).await
    }

    // expert reviews

    pub async fn get_expert_reviews(&self, params: &ListParams) -> Result<Value> {
        self.get(&format!("/expert-reviews{}", params.to_query())).await
    }

    pub async fn get_expert_review(&self, id: impl Display) -> Result<Value> {
        self.get(&format!("/expert-reviews/{}", segment(id))).await
    }

    pub async fn get_featured_reviews(&self, limit: u32) -> Result<Value> {
        self.get(&format!("/expert-reviews/featured?limit={limit}"))
            .await
    }

    pub async fn create_expert_review<B: Serialize + ?Sized>(&self, review: &B) -> Result<Value> {
        self.post_json("/expert-reviews", review).await
    }

    // auth

    pub async fn login<B: Serialize + ?Sized>(&self, credentials: &B) -> Result<Value> {
        self.post_json("/auth/login", credentials).await
    }

    pub async fn register<B: Serialize + ?Sized>(&self, user: &B) -> Result<Value> {
        self.post_json("/auth/register", user).await
    }

    pub async fn logout(&self) -> Result<Value> {
        self.request("/auth/logout", RequestOptions::new(Method::POST))
            .await
    }

    pub async fn get_current_user(&self) -> Result<Value> {
        self.get("/auth/me").await
    }

    pub async fn health_check(&self) -> Result<Value> {
        self.get("/health").await
    }

    /// Send `bytes` as the `file` part of a multipart form. The JSON content
    /// type is not applied; reqwest sets the multipart boundary header.
    pub async fn upload_file(&self, endpoint: &str, file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Value> {
        let part = Part::bytes(bytes).file_name(file_name.into());
        let form = Form::new().part("file", part);
        debug!(endpoint, "API upload");
        let req = self.http.post(self.url(endpoint)).multipart(form);
        self.execute(endpoint, req).await
    }
}

/// Where the page controllers get restaurant data from.
#[async_trait]
pub trait RestaurantSource: Send + Sync {
    async fn rankings(&self, mode: RankingMode) -> Result<RestaurantList>;
    async fn restaurant_by_slug(&self, slug: &str) -> Result<RestaurantDetail>;
    async fn restaurant_by_id(&self, id: &str) -> Result<RestaurantDetail>;
    async fn search(&self, query: &str) -> Result<RestaurantList>;
}

#[async_trait]
impl RestaurantSource for ApiClient {
    async fn rankings(&self, mode: RankingMode) -> Result<RestaurantList> {
        self.get_restaurant_rankings(mode).await
    }

    async fn restaurant_by_slug(&self, slug: &str) -> Result<RestaurantDetail> {
        self.get_restaurant_by_slug(slug)
            .await
            .map(RestaurantEnvelope::into_detail)
    }

    async fn restaurant_by_id(&self, id: &str) -> Result<RestaurantDetail> {
        self.get_restaurant(id)
            .await
            .map(RestaurantEnvelope::into_detail)
    }

    async fn search(&self, query: &str) -> Result<RestaurantList> {
        self.search_restaurants(query).await
    }
}

#[async_trait]
impl<S: RestaurantSource + ?Sized> RestaurantSource for Arc<S> {
    async fn rankings(&self, mode: RankingMode) -> Result<RestaurantList> {
        (**self).rankings(mode).await
    }

    async fn restaurant_by_slug(&self, slug: &str) -> Result<RestaurantDetail> {
        (**self).restaurant_by_slug(slug).await
    }

    async fn restaurant_by_id(&self, id: &str) -> Result<RestaurantDetail> {
        (**self).restaurant_by_id(id).await
    }

    async fn search(&self, query: &str) -> Result<RestaurantList> {
        (**self).search(query).await
    }
}
