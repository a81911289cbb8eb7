//! In-process stand-in for the remote API, used by the HTTP tests.

use std::collections::HashMap;

use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};

use crate::{
    api::ApiClient,
    config::ApiConfig,
    data::{RankingList, RankingMode, RestaurantDetail},
};

/// How the restaurant endpoints misbehave.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Failure {
    Status(u16),
    Garbage,
}

pub(crate) struct StubApi {
    base_url: String,
}

impl StubApi {
    pub(crate) async fn spawn() -> Self {
        Self::start(None).await
    }

    pub(crate) async fn failing(failure: Failure) -> Self {
        Self::start(Some(failure)).await
    }

    async fn start(failure: Option<Failure>) -> Self {
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(failure))
                .service(web::scope("/api").configure(routes))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("fail to bind stub api");
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        Self {
            base_url: format!("http://{addr}/api"),
        }
    }

    pub(crate) fn client(&self) -> ApiClient {
        ApiClient::new(&ApiConfig::new(self.base_url.as_str())).expect("fail to build client")
    }
}

fn summary(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "address": "Via Roma, 1, 10121 Torino TO, Italia",
        "city": "Torino",
        "iosoai_score": 8.0,
        "google_rating": 4.2,
        "review_count": 120,
        "cuisine_type": "Trattoria",
        "price_range": "€€",
        "popular_dishes": [{ "name": "Agnolotti", "mentions": 4 }]
    })
}

fn ranking_json(mode: RankingMode) -> Value {
    match mode {
        RankingMode::Public => json!([summary(11, "Trattoria Remota"), summary(12, "Pizzeria Remota")]),
        RankingMode::Expert => json!([summary(21, "Bistrot degli Esperti"), summary(22, "Osteria Remota")]),
    }
}

/// What the stub answers for `GET /restaurants/rankings?type=<mode>`.
pub(crate) fn ranking(mode: RankingMode) -> RankingList {
    serde_json::from_value(ranking_json(mode)).expect("stub ranking is valid")
}

fn detail_json() -> Value {
    let mut detail = summary(2, "Osteria del Borgo");
    detail["slug"] = json!("osteria-del-borgo");
    detail["opening_hours"] = json!("Mar-Dom: 12:00-15:00, 19:00-23:00");
    detail["specialties"] = json!(["Vitello Tonnato"]);
    detail
}

pub(crate) fn detail() -> RestaurantDetail {
    serde_json::from_value(detail_json()).expect("stub detail is valid")
}

fn fail(failure: Failure) -> HttpResponse {
    match failure {
        Failure::Status(code) => {
            HttpResponse::build(StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR))
                .body("{\"error\": true}")
        }
        Failure::Garbage => HttpResponse::Ok()
            .content_type("application/json")
            .body("{\"restaurants\": [oops"),
    }
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/restaurants/rankings", web::get().to(rankings))
        .route("/restaurants/search", web::get().to(search))
        .route("/restaurants/slug/{slug}", web::get().to(by_slug))
        .route("/restaurants/{id}", web::get().to(by_id))
        .route(
            "/restaurants",
            web::get().to(|| async { HttpResponse::Ok().json(json!({ "restaurants": "nope" })) }),
        )
        .route("/food-bloggers/top", web::get().to(echo_query))
        .route("/food-bloggers", web::get().to(echo_query))
        .route("/food-bloggers/{id}", web::get().to(echo_path))
        .route("/expert-reviews/featured", web::get().to(echo_query))
        .route("/expert-reviews", web::get().to(echo_query))
        .route("/expert-reviews/{id}", web::get().to(echo_path))
        .route("/expert-reviews", web::post().to(echo_body))
        .route("/auth/login", web::post().to(echo_body))
        .route("/auth/register", web::post().to(echo_body))
        .route(
            "/auth/logout",
            web::post().to(|| async { HttpResponse::Ok().json(json!({ "logged_out": true })) }),
        )
        .route(
            "/auth/me",
            web::get().to(|| async { HttpResponse::Ok().content_type("text/html").body("<html>") }),
        )
        .route(
            "/health",
            web::get().to(|| async { HttpResponse::ServiceUnavailable().finish() }),
        )
        .route("/headers", web::get().to(headers))
        .route("/uploads", web::post().to(upload));
}

async fn rankings(
    failure: web::Data<Option<Failure>>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    if let Some(failure) = **failure {
        return fail(failure);
    }
    match query.get("type").and_then(|t| t.parse::<RankingMode>().ok()) {
        Some(mode) => HttpResponse::Ok().json(json!({ "restaurants": ranking_json(mode) })),
        None => HttpResponse::BadRequest().finish(),
    }
}

async fn search(
    failure: web::Data<Option<Failure>>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    if let Some(failure) = **failure {
        return fail(failure);
    }
    let q = query.get("q").cloned().unwrap_or_default();
    HttpResponse::Ok().json(json!({ "restaurants": [summary(31, &q)] }))
}

async fn by_slug(failure: web::Data<Option<Failure>>, slug: web::Path<String>) -> HttpResponse {
    if let Some(failure) = **failure {
        return fail(failure);
    }
    if slug.as_str() == "osteria-del-borgo" {
        HttpResponse::Ok().json(json!({ "restaurant": detail_json() }))
    } else {
        HttpResponse::NotFound().finish()
    }
}

async fn by_id(failure: web::Data<Option<Failure>>, id: web::Path<String>) -> HttpResponse {
    if let Some(failure) = **failure {
        return fail(failure);
    }
    if id.as_str() == "2" {
        HttpResponse::Ok().json(detail_json())
    } else {
        HttpResponse::NotFound().finish()
    }
}

async fn echo_query(req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "query": req.query_string() }))
}

async fn echo_path(req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "path": req.path() }))
}

async fn echo_body(body: web::Json<Value>) -> HttpResponse {
    HttpResponse::Ok().json(body.into_inner())
}

fn header(req: &HttpRequest, name: &str) -> Value {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map_or(Value::Null, |v| json!(v))
}

async fn headers(req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "content_type": header(&req, "content-type"),
        "request_id": header(&req, "x-request-id"),
    }))
}

async fn upload(req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let text = String::from_utf8_lossy(&body);
    if text.contains("filename=\"menu.exe\"") {
        return HttpResponse::UnsupportedMediaType().finish();
    }
    let has_file = text.contains("name=\"file\"") && text.contains("margherita");
    HttpResponse::Ok().json(json!({
        "content_type": header(&req, "content-type"),
        "has_file": has_file,
    }))
}
