use anyhow::Context;
use iosoai::{
    api::DEFAULT_TOP_BLOGGERS,
    data::RankingMode,
    route::Route,
    view::{DetailPage, DetailView, RankingPage, RankingView, SearchPage, SearchView},
    ApiClient, ApiConfig,
};
use tracing::info;

mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(true)
        .with_file(false)
        .with_writer(std::io::stderr)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("fail to setup logging")?;

    let target = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    let client = ApiClient::new(&ApiConfig::from_env()).context("fail to create API client")?;

    let route = Route::parse(&target);
    info!(?route, base_url = client.base_url(), "previewing {target}");

    let output = match route {
        Route::Home => {
            let view = RankingView::new(RankingPage::new(client));
            let mode = RankingMode::default();
            render::ranking(mode, &view.load(mode).await)
        }
        Route::Rankings(mode) => {
            let view = RankingView::new(RankingPage::new(client));
            render::ranking(mode, &view.load(mode).await)
        }
        Route::Search(query) => {
            let view = SearchView::new(SearchPage::new(client));
            let state = view.load(query.clone()).await;
            render::search(&query, &state)
        }
        Route::Restaurant(id) => {
            let view = DetailView::new(DetailPage::new(client));
            render::detail(&view.load(id).await)
        }
        Route::Bloggers => match client.get_top_bloggers(DEFAULT_TOP_BLOGGERS).await {
            Ok(bloggers) => serde_json::to_string_pretty(&bloggers)?,
            Err(e) => format!("Food bloggers are unavailable: {e}"),
        },
        Route::Info => render::INFO.to_string(),
        Route::NotFound => render::NOT_FOUND.to_string(),
    };

    println!("{output}");
    Ok(())
}
