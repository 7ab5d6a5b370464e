//! The route compiler.
//!
//! Turns a folder of action files into bound routes, once, at startup:
//!
//! ```text
//! discover   actions/*.rs            → ActionDescriptor { file_name, path_name }
//!     ↓
//! load       Registry[path_name]     → descriptor.action = Some(instance)
//!     ↓
//! compile    method names            → [RouteRecord { method_name, verb, url }]
//!     ↓
//! to_handler (instance, method name) → BoxedHandler
//!     ↓
//! bind       Router                  ← (verb, url, handler)
//! ```
//!
//! Every step degrades instead of failing: an unreadable folder yields no
//! actions, a file that cannot be loaded yields no routes, a method that
//! cannot be bound is skipped. Each decision is logged.

mod bind;
mod classify;
mod compile;
mod discover;
mod dispatch;
mod load;
mod url;

use std::fmt;

pub use bind::{bind, route_table};
pub use classify::{Shape, classify, matches, shape};
pub use compile::{MethodsByVerb, compile};
pub use discover::{DiskFolder, ListFiles, discover};
pub use dispatch::to_handler;
pub use load::{Registry, load};
pub use url::make_url;

use crate::action::LoadedAction;
use crate::verb::Verb;

/// One compiled route: a method name on an action, the verb it answers and
/// its URL template.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RouteRecord {
    pub method_name: &'static str,
    pub verb: Verb,
    pub url: String,
}

/// One action file as it moves through the pipeline.
///
/// `path_name` is fixed at discovery. The loaded action is absent when the
/// file could not be loaded; such a descriptor simply contributes no routes.
pub struct ActionDescriptor {
    file_name: String,
    path_name: String,
    action: Option<Box<dyn LoadedAction>>,
    routes: Vec<RouteRecord>,
}

impl ActionDescriptor {
    pub fn new(file_name: impl Into<String>, path_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            path_name: path_name.into(),
            action: None,
            routes: Vec::new(),
        }
    }

    pub fn file_name(&self) -> &str { &self.file_name }
    pub fn path_name(&self) -> &str { &self.path_name }
    pub fn action(&self) -> Option<&dyn LoadedAction> { self.action.as_deref() }
    pub fn is_loaded(&self) -> bool { self.action.is_some() }

    /// The routes bound for this action by the last [`bind`].
    pub fn routes(&self) -> &[RouteRecord] { &self.routes }
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("file_name", &self.file_name)
            .field("path_name", &self.path_name)
            .field("action", &self.action.as_ref().map(|a| a.type_name()))
            .field("routes", &self.routes)
            .finish()
    }
}
