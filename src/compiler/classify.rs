//! Method classification: which verb a method name routes to, and which
//! arguments it is called with.
//!
//! | Name | Verb | Shape |
//! |---|---|---|
//! | `get<Suffix>` | GET | context |
//! | `fetchAll` | GET | context |
//! | `fetchSingle` | GET | id + context |
//! | `set<Suffix>` | POST | body + context |
//! | `create` | POST | body + context |
//! | `update` | PATCH | id + body + context |
//! | `delete` | DELETE | id + context |
//!
//! Every rule matches the whole name. Names that match no rule are private
//! helpers as far as routing is concerned and are skipped silently.

use std::fmt;

use crate::verb::Verb;

/// The arguments an action method takes before the request itself.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Shape {
    /// `(ctx)`
    Context,
    /// `(id, ctx)`
    Id,
    /// `(body, ctx)`
    Body,
    /// `(id, body, ctx)`
    IdBody,
}

impl Shape {
    pub fn needs_id(self) -> bool {
        matches!(self, Self::Id | Self::IdBody)
    }

    pub fn needs_body(self) -> bool {
        matches!(self, Self::Body | Self::IdBody)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Context => "(ctx)",
            Self::Id      => "(id, ctx)",
            Self::Body    => "(body, ctx)",
            Self::IdBody  => "(id, body, ctx)",
        })
    }
}

/// The suffix of a custom `get<Suffix>` / `set<Suffix>` method, if `name` is one.
pub(crate) fn custom_suffix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    name.strip_prefix(prefix).filter(|suffix| !suffix.is_empty())
}

/// Whether `method_name` routes to `verb`. Each verb is tested on its own.
pub fn matches(verb: Verb, method_name: &str) -> bool {
    match verb {
        Verb::Get => {
            custom_suffix(method_name, "get").is_some()
                || method_name == "fetchAll"
                || method_name == "fetchSingle"
        }
        Verb::Post => custom_suffix(method_name, "set").is_some() || method_name == "create",
        Verb::Patch => method_name == "update",
        Verb::Delete => method_name == "delete",
    }
}

/// The verb `method_name` routes to, or `None` if it is not a route.
pub fn classify(method_name: &str) -> Option<Verb> {
    Verb::ALL.into_iter().find(|verb| matches(*verb, method_name))
}

/// The argument shape `method_name` is dispatched with, or `None` if it is
/// not a route.
pub fn shape(method_name: &str) -> Option<Shape> {
    match method_name {
        "fetchAll" => Some(Shape::Context),
        "fetchSingle" | "delete" => Some(Shape::Id),
        "create" => Some(Shape::Body),
        "update" => Some(Shape::IdBody),
        name if custom_suffix(name, "get").is_some() => Some(Shape::Context),
        name if custom_suffix(name, "set").is_some() => Some(Shape::Body),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_names_route_to_their_verb() {
        for name in ["getMyCustomMethod", "getX", "fetchAll", "fetchSingle"] {
            assert_eq!(classify(name), Some(Verb::Get), "{name}");
        }
        for name in ["setYourMagicMethod", "setY", "create"] {
            assert_eq!(classify(name), Some(Verb::Post), "{name}");
        }
        assert_eq!(classify("update"), Some(Verb::Patch));
        assert_eq!(classify("delete"), Some(Verb::Delete));
    }

    #[test]
    fn anything_else_is_excluded_from_every_verb() {
        for name in ["get", "set", "fetch", "fetchAllUsers", "Update", "remove", "helper", "new", ""] {
            assert_eq!(classify(name), None, "{name}");
            assert!(Verb::ALL.iter().all(|verb| !matches(*verb, name)), "{name}");
            assert_eq!(shape(name), None, "{name}");
        }
    }

    #[test]
    fn rules_are_mutually_exclusive_for_conventional_names() {
        for name in ["getThing", "fetchAll", "fetchSingle", "setThing", "create", "update", "delete"] {
            let hits = Verb::ALL.iter().filter(|verb| matches(**verb, name)).count();
            assert_eq!(hits, 1, "{name}");
        }
    }

    #[test]
    fn shapes_follow_the_name() {
        assert_eq!(shape("getCartTotal"), Some(Shape::Context));
        assert_eq!(shape("fetchAll"), Some(Shape::Context));
        assert_eq!(shape("fetchSingle"), Some(Shape::Id));
        assert_eq!(shape("delete"), Some(Shape::Id));
        assert_eq!(shape("setAddProductToCart"), Some(Shape::Body));
        assert_eq!(shape("create"), Some(Shape::Body));
        assert_eq!(shape("update"), Some(Shape::IdBody));
        assert!(Shape::IdBody.needs_id() && Shape::IdBody.needs_body());
        assert!(!Shape::Context.needs_id() && !Shape::Context.needs_body());
    }
}
