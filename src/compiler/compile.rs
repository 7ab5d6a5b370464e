//! Route compilation for one action.

use std::collections::BTreeMap;

use tracing::info;

use super::classify::matches;
use super::url::make_url;
use super::{ActionDescriptor, RouteRecord};
use crate::verb::Verb;

/// Method names grouped by verb, each group in declaration order. Iterates
/// GET, POST, PATCH, DELETE.
pub type MethodsByVerb = BTreeMap<Verb, Vec<&'static str>>;

/// Groups `method_names` by the verbs they match.
pub(crate) fn methods_by_verb(method_names: &[&'static str]) -> MethodsByVerb {
    let mut by_verb = MethodsByVerb::new();
    for verb in Verb::ALL {
        let names: Vec<_> = method_names.iter().copied().filter(|name| matches(verb, name)).collect();
        if !names.is_empty() {
            by_verb.insert(verb, names);
        }
    }
    by_verb
}

/// Compiles the routes of one loaded action.
///
/// Methods that follow no naming rule are skipped. A descriptor without an
/// action compiles to no routes.
pub fn compile(descriptor: &ActionDescriptor, index_path_name: &str) -> Vec<RouteRecord> {
    let Some(action) = descriptor.action() else {
        info!(file = %descriptor.file_name(), "no routes found, action was not loaded");
        return Vec::new();
    };

    methods_by_verb(&action.method_names())
        .into_iter()
        .flat_map(|(verb, names)| {
            names.into_iter().map(move |method_name| RouteRecord {
                method_name,
                verb,
                url: make_url(descriptor.path_name(), method_name, index_path_name),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::action::{Action, Methods};
    use crate::compiler::{Registry, load};
    use crate::request::{Body, Request};

    #[derive(Default)]
    struct Crud;

    impl Crud {
        async fn fetch_all(self: Arc<Self>, _req: Request) {}
        async fn fetch_single(self: Arc<Self>, _id: String, _req: Request) {}
        async fn create(self: Arc<Self>, _body: Body, _req: Request) {}
        async fn update(self: Arc<Self>, _id: String, _body: Body, _req: Request) {}
        async fn delete(self: Arc<Self>, _id: String, _req: Request) {}
        async fn helper(self: Arc<Self>, _req: Request) {}
    }

    impl Action for Crud {
        fn methods() -> Methods<Self> {
            Methods::new()
                .method("delete", Self::delete)
                .method("update", Self::update)
                .method("helper", Self::helper)
                .method("create", Self::create)
                .method("fetchSingle", Self::fetch_single)
                .method("fetchAll", Self::fetch_all)
        }
    }

    fn loaded(path_name: &str) -> ActionDescriptor {
        let registry = Registry::new().action::<Crud>(path_name);
        load(ActionDescriptor::new(format!("{path_name}.rs"), path_name), &registry)
    }

    fn route(method_name: &'static str, verb: Verb, url: &str) -> RouteRecord {
        RouteRecord { method_name, verb, url: url.to_owned() }
    }

    #[test]
    fn crud_index_compiles_in_verb_order() {
        let routes = compile(&loaded("index"), "index");
        assert_eq!(
            routes,
            [
                route("fetchSingle", Verb::Get, "/:id"),
                route("fetchAll", Verb::Get, "/"),
                route("create", Verb::Post, "/"),
                route("update", Verb::Patch, "/:id"),
                route("delete", Verb::Delete, "/:id"),
            ]
        );
    }

    #[test]
    fn non_index_resource_is_prefixed() {
        let urls: Vec<_> = compile(&loaded("user"), "index").into_iter().map(|r| r.url).collect();
        assert_eq!(urls, ["/user/:id", "/user/", "/user/", "/user/:id", "/user/:id"]);
    }

    #[test]
    fn unloaded_descriptor_has_no_routes() {
        assert!(compile(&ActionDescriptor::new("index.rs", "index"), "index").is_empty());
    }

    #[test]
    fn grouping_keeps_declaration_order_within_a_verb() {
        let by_verb = methods_by_verb(&["getB", "helper", "fetchAll", "getA", "delete"]);
        assert_eq!(by_verb.keys().copied().collect::<Vec<_>>(), [Verb::Get, Verb::Delete]);
        assert_eq!(by_verb[&Verb::Get], ["getB", "fetchAll", "getA"]);
    }
}
