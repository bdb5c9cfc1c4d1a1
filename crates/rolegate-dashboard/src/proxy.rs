//! Development proxy routing.
//!
//! Requests under a configured prefix (`/api`, `/uploads` by default) are
//! forwarded unchanged to a single upstream origin. This module decides where
//! a request goes and logs every request, response and error with the label
//! of the route that handled it. It does not perform network I/O.

use rolegate_config::{ProxyConfig, ProxyRouteConfig};
use tracing::{error, info};

/// Where one request is forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardTarget {
    /// Label of the matching route.
    pub label: String,
    pub method: String,
    /// Original request path, including any query string.
    pub path: String,
    /// Upstream URL the request is sent to.
    pub url: String,
    /// `Host` header to send, when origin rewriting is on.
    pub host_header: Option<String>,
}

/// Route table for the development proxy.
#[derive(Debug, Clone)]
pub struct DevProxy {
    upstream: String,
    host: String,
    change_origin: bool,
    routes: Vec<ProxyRouteConfig>,
}

impl DevProxy {
    /// Builds the proxy from its configuration section.
    pub fn from_config(config: &ProxyConfig) -> Self {
        let upstream = config.upstream.trim().trim_end_matches('/').to_string();
        let host = authority(&upstream).to_string();
        Self {
            upstream,
            host,
            change_origin: config.change_origin,
            routes: config.routes.clone(),
        }
    }

    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    pub fn routes(&self) -> &[ProxyRouteConfig] {
        &self.routes
    }

    /// Returns the route handling `path`, if any.
    ///
    /// A prefix matches only on a segment boundary (`/api` matches `/api`,
    /// `/api/users` and `/api?x=1`, not `/apiary`). The longest matching
    /// prefix wins.
    pub fn route_for(&self, path: &str) -> Option<&ProxyRouteConfig> {
        self.routes
            .iter()
            .filter(|route| matches_prefix(path, &route.prefix))
            .max_by_key(|route| route.prefix.len())
    }

    /// Resolves the upstream target for a request and logs it.
    ///
    /// Returns `None` for paths no route handles; those are served locally.
    pub fn forward(&self, method: &str, path: &str) -> Option<ForwardTarget> {
        let route = self.route_for(path)?;
        let target = ForwardTarget {
            label: route.label.clone(),
            method: method.to_string(),
            path: path.to_string(),
            url: format!("{}{path}", self.upstream),
            host_header: self.change_origin.then(|| self.host.clone()),
        };

        info!(
            route = %target.label,
            method = %target.method,
            path = %target.path,
            target = %target.url,
            "Proxying request"
        );

        Some(target)
    }

    /// Logs the upstream's response to a forwarded request.
    pub fn log_response(&self, target: &ForwardTarget, status: u16) {
        info!(
            route = %target.label,
            method = %target.method,
            path = %target.path,
            status,
            "Proxy response"
        );
    }

    /// Logs a failed forward (e.g. upstream unreachable).
    pub fn log_error(&self, target: &ForwardTarget, err: &dyn std::error::Error) {
        error!(
            route = %target.label,
            method = %target.method,
            path = %target.path,
            target = %target.url,
            error = %err,
            "Proxy error"
        );
    }
}

fn matches_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with(['/', '?', '#']),
        None => false,
    }
}

/// Returns the `host[:port]` part of an origin URL.
fn authority(origin: &str) -> &str {
    let without_scheme = origin
        .split_once("://")
        .map_or(origin, |(_, rest)| rest);
    without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(without_scheme)
}
