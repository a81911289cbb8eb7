use iosoai::{
    data::{RankingList, RankingMode, RestaurantDetail, RestaurantSummary},
    view::FetchState,
};

pub(super) const INFO: &str =
    "IosoAI analyzes Google, TripAdvisor and TheFork reviews and turns them into weekly reports.";
pub(super) const NOT_FOUND: &str = "404 - Page not found";

fn status<T>(state: &FetchState<T>) -> Option<String> {
    match state {
        FetchState::Idle => Some(String::new()),
        FetchState::Loading => Some("Loading...".to_string()),
        FetchState::Error(message) => Some(message.clone()),
        FetchState::Loaded(_) | FetchState::Fallback(_) => None,
    }
}

fn sample_note<T>(state: &FetchState<T>) -> &'static str {
    if state.is_fallback() {
        "\n(offline: showing sample data)"
    } else {
        ""
    }
}

fn price(r: &RestaurantSummary) -> String {
    r.price_range.as_ref().map_or_else(|| "-".to_string(), ToString::to_string)
}

fn row(mode: RankingMode, rank: usize, r: &RestaurantSummary) -> String {
    let score = match mode {
        RankingMode::Public => r.iosoai_score,
        RankingMode::Expert => r.expert.expert_score,
    };
    let score = score.map_or_else(|| "-".to_string(), |s| format!("{s:.1}"));
    let extra = match mode {
        RankingMode::Public => r
            .popular_dishes
            .iter()
            .map(|dish| format!("{} ({})", dish.name, dish.mentions))
            .collect::<Vec<_>>()
            .join(", "),
        RankingMode::Expert => match (&r.expert.top_blogger, r.expert.blogger_credibility) {
            (Some(blogger), Some(cred)) => format!("Top blogger: {blogger} ({}/10)", cred.value()),
            (Some(blogger), None) => format!("Top blogger: {blogger}"),
            _ => String::new(),
        },
    };
    format!(
        "#{rank} {score} {} [{}, {}] {}\n    {extra}",
        r.name,
        r.cuisine_type,
        price(r),
        r.address
    )
}

pub(super) fn ranking(mode: RankingMode, state: &FetchState<RankingList>) -> String {
    if let Some(status) = status(state) {
        return status;
    }
    let Some(list) = state.data() else { return String::new() };
    if list.is_empty() {
        return "No restaurants found for this ranking".to_string();
    }
    let body = list
        .iter()
        .enumerate()
        .fold(String::new(), |sumed, (i, unit)| {
            format!("{sumed}\n{}", row(mode, i + 1, unit))
        });
    format!("Ranking: {}{body}{}", mode.tab(), sample_note(state))
}

pub(super) fn search(query: &str, state: &FetchState<RankingList>) -> String {
    if let Some(status) = status(state) {
        return status;
    }
    let Some(list) = state.data() else { return String::new() };
    if list.is_empty() {
        return format!("Nothing matches {query:?}");
    }
    let body = list.iter().fold(String::new(), |sumed, unit| {
        format!("{sumed}\n{}. {} ({})", unit.id, unit.name, unit.cuisine_type)
    });
    format!("Results for {query:?}:{body}{}", sample_note(state))
}

pub(super) fn detail(state: &FetchState<RestaurantDetail>) -> String {
    if let Some(status) = status(state) {
        return status;
    }
    let Some(d) = state.data() else { return String::new() };
    let r = &d.summary;

    let mut out = format!("{}\n{}\n{} {}", r.name, r.address, r.cuisine_type, price(r));
    if let Some(score) = r.iosoai_score {
        out.push_str(&format!("\nIosoAI score: {score:.1}"));
    }
    if let Some(score) = r.expert.expert_score {
        out.push_str(&format!("\nExpert score: {score:.1}"));
    }
    if let (Some(rating), Some(count)) = (r.google_rating, r.review_count) {
        out.push_str(&format!("\nGoogle: {rating} ({count} reviews)"));
    }
    for (label, value) in [
        ("Hours", &d.opening_hours),
        ("Phone", &d.phone),
        ("Website", &d.website),
        ("About", &d.description),
    ] {
        if let Some(value) = value {
            out.push_str(&format!("\n{label}: {value}"));
        }
    }
    for dish in &r.popular_dishes {
        out.push_str(&format!("\n  - {} ({} mentions)", dish.name, dish.mentions));
        if let Some(description) = &dish.description {
            out.push_str(&format!(": {description}"));
        }
    }
    if !d.specialties.is_empty() {
        out.push_str(&format!("\nSpecialties: {}", d.specialties.join(", ")));
    }
    out.push_str(sample_note(state));
    out
}
