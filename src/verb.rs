//! The four HTTP verbs a route can be compiled to.
//!
//! The variant order is the bind order: every action's routes are grouped
//! GET, then POST, then PATCH, then DELETE. Any other request method is
//! rejected at the server level with `405 Method Not Allowed` before it
//! reaches the router.

use std::fmt;
use std::str::FromStr;

/// A routable HTTP verb.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

impl Verb {
    /// All verbs, in bind order.
    pub const ALL: [Verb; 4] = [Self::Get, Self::Post, Self::Patch, Self::Delete];

    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get    => "GET",
            Self::Post   => "POST",
            Self::Patch  => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Parses an uppercase verb string (e.g. `"GET"`). Case-sensitive per RFC 9110 §9.1.
impl FromStr for Verb {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET"    => Ok(Self::Get),
            "POST"   => Ok(Self::Post),
            "PATCH"  => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _        => Err(()),
        }
    }
}

impl TryFrom<&http::Method> for Verb {
    type Error = ();

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

impl From<Verb> for http::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get    => http::Method::GET,
            Verb::Post   => http::Method::POST,
            Verb::Patch  => http::Method::PATCH,
            Verb::Delete => http::Method::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_sort_in_bind_order() {
        let mut verbs = vec![Verb::Delete, Verb::Patch, Verb::Get, Verb::Post];
        verbs.sort();
        assert_eq!(verbs, Verb::ALL);
    }

    #[test]
    fn only_the_four_routable_methods_parse() {
        assert_eq!(Verb::try_from(&http::Method::PATCH), Ok(Verb::Patch));
        assert_eq!(Verb::try_from(&http::Method::PUT), Err(()));
        assert_eq!("get".parse::<Verb>(), Err(()));
        assert_eq!(http::Method::from(Verb::Delete), http::Method::DELETE);
    }
}
