//! Client-side routes.

use std::fmt;

use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Search,
    /// `/analyze`, optionally with `?url=`
    Analyze { url: Option<String> },
    /// `/analyze/:id`; the id cannot be resolved without the article URL.
    AnalyzeById { id: String, url: Option<String> },
    /// `/recents`
    Recents,
    /// `/settings`
    Settings,
    /// `/details/:id`
    Details { id: String },
}

impl Route {
    /// Parses a path with an optional query string. Unknown paths yield `None`.
    pub fn parse(target: &str) -> Option<Route> {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        let url_param = query.and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "url")
                .map(|(_, value)| value.into_owned())
                .filter(|value| !value.trim().is_empty())
        });

        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Some(Route::Search),
            ["analyze"] => Some(Route::Analyze { url: url_param }),
            ["analyze", id] => Some(Route::AnalyzeById {
                id: decode_segment(id)?,
                url: url_param,
            }),
            ["recents"] => Some(Route::Recents),
            ["settings"] => Some(Route::Settings),
            ["details", id] => Some(Route::Details {
                id: decode_segment(id)?,
            }),
            _ => None,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Search => "/".to_string(),
            Route::Analyze { url: None } => "/analyze".to_string(),
            Route::Analyze { url: Some(url) } => format!("/analyze?url={}", urlencoding::encode(url)),
            Route::AnalyzeById { id, url: None } => format!("/analyze/{}", urlencoding::encode(id)),
            Route::AnalyzeById { id, url: Some(url) } => build_analyze_link(id, url),
            Route::Recents => "/recents".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::Details { id } => format!("/details/{}", urlencoding::encode(id)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

/// Link to an analysis page that carries the article URL along with its id.
pub fn build_analyze_link(id: &str, url: &str) -> String {
    format!(
        "/analyze/{}?url={}",
        urlencoding::encode(id),
        urlencoding::encode(url)
    )
}

fn decode_segment(segment: &str) -> Option<String> {
    urlencoding::decode(segment).ok().map(|decoded| decoded.into_owned())
}
