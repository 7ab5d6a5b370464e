//! Radix-tree request router.
//!
//! One tree per verb. O(path-length) lookup. Compiled routes are inserted
//! once at startup by [`compiler::bind`](crate::compiler::bind); the router
//! is read-only afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::error::BindError;
use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;
use crate::verb::Verb;

/// The application router.
///
/// URL templates use `:name` markers for path parameters (`/user/:id`).
#[derive(Default)]
pub struct Router {
    routes: HashMap<Verb, MatchitRouter<BoxedHandler>>,
    len: usize,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts a plain handler function. Returns `self` for chaining.
    ///
    /// ```rust
    /// # use roost::{Request, Router, Verb, health};
    /// Router::new()
    ///     .on(Verb::Get, "/healthz", health::liveness)
    ///     .on(Verb::Get, "/readyz",  health::readiness);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the path is malformed or already taken for this verb.
    pub fn on(mut self, verb: Verb, path: &str, handler: impl Handler) -> Self {
        if let Err(e) = self.try_insert(verb, path, handler.into_boxed_handler()) {
            panic!("{e}");
        }
        self
    }

    /// Inserts a handler, failing instead of panicking when the router
    /// rejects the path. The first registration of a verb and path wins.
    pub(crate) fn try_insert(&mut self, verb: Verb, path: &str, handler: BoxedHandler) -> Result<(), BindError> {
        self.routes
            .entry(verb)
            .or_default()
            .insert(tree_path(path), handler)
            .map_err(|source| BindError::Route { verb, url: path.to_owned(), source })?;
        self.len += 1;
        Ok(())
    }

    /// Number of bound routes across all verbs.
    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub(crate) fn lookup(
        &self,
        verb: Verb,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&verb)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Routes one request: `404 Not Found` when nothing matches.
    pub async fn handle(&self, mut req: Request) -> Response {
        match self.lookup(req.verb(), req.path()) {
            Some((handler, params)) => {
                req.set_params(params);
                handler.call(req).await
            }
            None => Response::status(Status::NotFound),
        }
    }
}

/// Rewrites `:name` segments into the `{name}` syntax the radix tree expects.
fn tree_path(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => format!("{{{name}}}"),
            _ => segment.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn show(req: Request) -> String {
        req.param("id").unwrap_or("none").to_owned()
    }

    async fn list(_req: Request) -> &'static str { "list" }

    #[test]
    fn colon_markers_become_tree_params() {
        assert_eq!(tree_path("/user/:id"), "/user/{id}");
        assert_eq!(tree_path("/:id"), "/{id}");
        assert_eq!(tree_path("/my-custom-method/"), "/my-custom-method/");
        assert_eq!(tree_path("/"), "/");
    }

    #[tokio::test]
    async fn params_reach_the_handler() {
        let router = Router::new()
            .on(Verb::Get, "/user/:id", show)
            .on(Verb::Get, "/user/", list);

        let res = router.handle(Request::new(Verb::Get, "/user/7")).await;
        assert_eq!(res.body(), b"7");

        let res = router.handle(Request::new(Verb::Get, "/user/")).await;
        assert_eq!(res.body(), b"list");

        let res = router.handle(Request::new(Verb::Post, "/user/")).await;
        assert_eq!(res.status_code(), 404);
        assert_eq!(router.len(), 2);
    }

    #[test]
    fn duplicate_routes_keep_the_first() {
        let mut router = Router::new().on(Verb::Get, "/", list);
        let err = router.try_insert(Verb::Get, "/", list.into_boxed_handler()).unwrap_err();
        assert!(matches!(err, BindError::Route { verb: Verb::Get, .. }));
        assert_eq!(router.len(), 1);
    }
}
