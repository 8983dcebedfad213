use log::debug;

use crate::content::ContentRegistry;

/// Route chosen for this run, derived once from the navigational path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSelection {
    pub route: String,
    pub debug: bool,
}

impl RouteSelection {
    /// Parses a location such as `/chen?debug`, `chen` or `https://host/poems/x`.
    ///
    /// The first path segment names the route; an empty or unknown name resolves
    /// to the registry default. A `debug` query key turns on the debug panel.
    pub fn parse(location: &str, registry: &ContentRegistry) -> Self {
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (location, None),
        };
        let path = path.split_once('#').map_or(path, |(p, _)| p);
        let path = match path.split_once("://") {
            Some((_, rest)) => rest.split_once('/').map_or("", |(_, p)| p),
            None => path,
        };

        let segment = path.trim_start_matches('/').split('/').next().unwrap_or("");
        let route = if registry.contains(segment) {
            segment.to_string()
        } else {
            if !segment.is_empty() {
                debug!("unknown route `{segment}`, using `{}`", registry.default_route());
            }
            registry.default_route().to_string()
        };

        let debug = query
            .map(|q| q.split_once('#').map_or(q, |(q, _)| q))
            .map(|q| {
                q.split('&')
                    .any(|pair| pair.split('=').next() == Some("debug"))
            })
            .unwrap_or(false);

        Self { route, debug }
    }
}
