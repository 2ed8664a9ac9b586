use std::fmt;

/// The two pages of the portfolio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Photographer list
    Home,
    /// Detail page. `None` when the `id` parameter is absent or not a number.
    Photographer(Option<u32>),
}

impl Route {
    /// Parse a page path such as `/`, `index.html` or `photographer.html?id=243`.
    /// Unknown paths fall back to the home page.
    pub fn parse(location: &str) -> Self {
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (location, None),
        };

        if path.ends_with("photographer.html") {
            let id = query
                .and_then(|query| query_param(query, "id"))
                .and_then(|value| value.parse().ok());
            return Route::Photographer(id);
        }

        Route::Home
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("index.html"),
            Route::Photographer(Some(id)) => write!(f, "photographer.html?id={}", id),
            Route::Photographer(None) => f.write_str("photographer.html"),
        }
    }
}

/// First value of `name` in an `a=1&b=2` query string
fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
