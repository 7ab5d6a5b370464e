//! Router binding and the route listing.

use std::fmt::Write as _;

use tracing::{error, info};

use super::compile::compile;
use super::dispatch::to_handler;
use super::ActionDescriptor;
use crate::router::Router;

/// Compiles every descriptor and registers its routes on `router`.
///
/// A route that cannot be bound (its method is not callable, or the router
/// already holds the same verb and URL) is logged and skipped; the rest of
/// the action still binds. The routes that did bind are stored on their
/// descriptor for [`route_table`].
pub fn bind(router: &mut Router, descriptors: &mut [ActionDescriptor], index_path_name: &str) {
    for descriptor in descriptors.iter_mut() {
        let compiled = compile(descriptor, index_path_name);
        if compiled.is_empty() {
            info!(path_name = %descriptor.path_name, "no routes found for `{}`", descriptor.path_name);
            descriptor.routes.clear();
            continue;
        }

        let Some(action) = descriptor.action.as_deref() else {
            continue;
        };

        let mut bound = Vec::with_capacity(compiled.len());
        for route in compiled {
            let result = to_handler(action, route.method_name)
                .and_then(|handler| router.try_insert(route.verb, &route.url, handler));
            match result {
                Ok(()) => bound.push(route),
                Err(e) => error!(
                    method = route.method_name,
                    action = action.type_name(),
                    path_name = %descriptor.path_name,
                    verb = %route.verb,
                    url = %route.url,
                    error = %e,
                    "unable to bind route",
                ),
            }
        }
        descriptor.routes = bound;
    }
}

/// Renders the bound routes as an aligned, human-readable table:
///
/// ```text
/// GET     /user/       user.rs   fetchAll
/// GET     /user/:id    user.rs   fetchSingle
/// ```
pub fn route_table(descriptors: &[ActionDescriptor]) -> String {
    let rows: Vec<_> = descriptors
        .iter()
        .flat_map(|d| d.routes.iter().map(move |r| (r.verb.as_str(), r.url.as_str(), d.file_name.as_str(), r.method_name)))
        .collect();

    let url_width = rows.iter().map(|row| row.1.len()).max().unwrap_or(0);
    let file_width = rows.iter().map(|row| row.2.len()).max().unwrap_or(0);

    let mut table = String::new();
    for (verb, url, file, method) in rows {
        let _ = writeln!(table, "{verb:<7} {url:<url_width$}  {file:<file_width$}  {method}");
    }
    table
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::action::{Action, Methods};
    use crate::compiler::{Registry, load};
    use crate::request::Request;
    use crate::verb::Verb;

    #[derive(Default)]
    struct Cart;

    impl Cart {
        async fn get_cart_total(self: Arc<Self>, _req: Request) -> &'static str { "0" }
        async fn get_cart_total_again(self: Arc<Self>, _req: Request) -> &'static str { "1" }
        async fn delete(self: Arc<Self>, _req: Request) {}
        async fn fetch_all(self: Arc<Self>, _req: Request) -> &'static str { "[]" }
    }

    impl Action for Cart {
        fn methods() -> Methods<Self> {
            Methods::new()
                .method("getCartTotal", Self::get_cart_total)
                // Same slug as `getCartTotal`.
                .method("getcartTotal", Self::get_cart_total_again)
                .method("fetchAll", Self::fetch_all)
                .method("delete", Self::delete)
        }
    }

    fn descriptors(names: &[&str]) -> Vec<ActionDescriptor> {
        let registry = Registry::new().action::<Cart>("index").action::<Cart>("cart");
        names
            .iter()
            .map(|name| load(ActionDescriptor::new(format!("{name}.rs"), *name), &registry))
            .collect()
    }

    #[test]
    fn failing_routes_are_skipped_individually() {
        let mut router = Router::new();
        let mut actions = descriptors(&["index"]);
        bind(&mut router, &mut actions, "index");

        // `delete` has the wrong shape and is dropped; the rest bind.
        let bound: Vec<_> = actions[0].routes().iter().map(|r| (r.verb, r.url.as_str())).collect();
        assert_eq!(bound, [(Verb::Get, "/cart-total/"), (Verb::Get, "/")]);
        assert!(router.lookup(Verb::Get, "/cart-total/").is_some());
        assert!(router.lookup(Verb::Delete, "/7").is_none());
    }

    #[test]
    fn unloaded_actions_do_not_block_others() {
        let mut router = Router::new();
        let mut actions = descriptors(&["broken", "cart"]);
        bind(&mut router, &mut actions, "index");

        assert!(actions[0].routes().is_empty());
        assert_eq!(actions[1].routes().len(), 2);
        assert!(router.lookup(Verb::Get, "/cart/").is_some());
    }

    #[test]
    fn table_lists_verb_url_file_and_method() {
        let mut router = Router::new();
        let mut actions = descriptors(&["cart", "index"]);
        bind(&mut router, &mut actions, "index");

        let table = route_table(&actions);
        let lines: Vec<_> = table.lines().map(|l| l.split_whitespace().collect::<Vec<_>>()).collect();
        assert_eq!(lines[0], ["GET", "/cart/cart-total/", "cart.rs", "getCartTotal"]);
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.len() == 4));
    }
}
