use crate::data::RankingMode;

/// Pages of the site, with the selection key each one loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Rankings(RankingMode),
    Search(String),
    Bloggers,
    Info,
    Restaurant(String),
    NotFound,
}

impl Route {
    pub fn parse(target: &str) -> Self {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        let param = |name: &str| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Home,
            ["classifiche"] => Self::Rankings(
                param("tab")
                    .and_then(|tab| tab.parse().ok())
                    .unwrap_or_default(),
            ),
            ["cerca-piatti"] => Self::Search(param("q").unwrap_or_default()),
            ["foodblogger"] => Self::Bloggers,
            ["info"] => Self::Info,
            ["restaurants", id] => {
                let id = urlencoding::decode(id).map_or_else(|_| id.to_string(), |id| id.into_owned());
                Self::Restaurant(id)
            }
            _ => Self::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Rankings(mode) => format!("/classifiche?tab={}", mode.tab()),
            Self::Search(q) if q.is_empty() => "/cerca-piatti".to_string(),
            Self::Search(q) => format!("/cerca-piatti?q={}", urlencoding::encode(q)),
            Self::Bloggers => "/foodblogger".to_string(),
            Self::Info => "/info".to_string(),
            Self::Restaurant(id) => format!("/restaurants/{}", urlencoding::encode(id)),
            Self::NotFound => "/404".to_string(),
        }
    }
}
