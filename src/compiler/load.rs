//! Action loading through a startup-time registry.
//!
//! Files cannot be imported at runtime, so every action type is listed once
//! in a [`Registry`] under the name of the file it lives in. Discovery still
//! decides *which* actions are mounted: a registered action whose file is
//! missing from the actions folder contributes nothing.

use std::collections::HashMap;

use tracing::{error, info, warn};

use super::ActionDescriptor;
use crate::action::{Action, BoxError, Instance, LoadedAction};
use crate::error::LoadError;

type Factory = Box<dyn Fn() -> Result<Box<dyn LoadedAction>, BoxError> + Send + Sync>;

/// Maps resource path names to action constructors.
///
/// ```rust
/// use roost::{Action, Methods, Registry};
///
/// #[derive(Default)]
/// struct Index;
///
/// impl Action for Index {
///     fn methods() -> Methods<Self> { Methods::new() }
/// }
///
/// let registry = Registry::new()
///     .action::<Index>("index")
///     .factory("auth", || Ok(Index));
/// assert!(registry.contains("auth"));
/// ```
#[derive(Default)]
pub struct Registry {
    factories: HashMap<String, Factory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `A`, constructed with [`Default`], under `path_name`.
    pub fn action<A: Action + Default>(self, path_name: &str) -> Self {
        self.factory(path_name, || Ok(A::default()))
    }

    /// Registers a fallible constructor under `path_name`. It runs every time
    /// the app compiles its routes.
    pub fn factory<A, F>(mut self, path_name: &str, init: F) -> Self
    where
        A: Action,
        F: Fn() -> Result<A, BoxError> + Send + Sync + 'static,
    {
        let factory: Factory = Box::new(move || {
            let action = init()?;
            Ok(Box::new(Instance::new(action)) as Box<dyn LoadedAction>)
        });
        if self.factories.insert(path_name.to_owned(), factory).is_some() {
            warn!(path_name, "action registered twice, keeping the last");
        }
        self
    }

    pub fn contains(&self, path_name: &str) -> bool {
        self.factories.contains_key(path_name)
    }

    pub fn len(&self) -> usize { self.factories.len() }
    pub fn is_empty(&self) -> bool { self.factories.is_empty() }

    fn instantiate(&self, path_name: &str) -> Result<Box<dyn LoadedAction>, LoadError> {
        let factory = self
            .factories
            .get(path_name)
            .ok_or_else(|| LoadError::NotRegistered(path_name.to_owned()))?;
        factory().map_err(|source| LoadError::Init { path_name: path_name.to_owned(), source })
    }
}

/// Instantiates the action for `descriptor`.
///
/// On failure the error is logged with the file name and the descriptor is
/// returned without an action.
pub fn load(mut descriptor: ActionDescriptor, registry: &Registry) -> ActionDescriptor {
    match registry.instantiate(&descriptor.path_name) {
        Ok(action) => {
            info!(file = %descriptor.file_name, action = action.type_name(), "loaded action");
            descriptor.action = Some(action);
        }
        Err(e) => {
            error!(file = %descriptor.file_name, error = %e, "unable to load action");
            descriptor.action = None;
        }
    }
    descriptor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Methods;

    #[derive(Default)]
    struct Index;

    impl Action for Index {
        fn methods() -> Methods<Self> { Methods::new() }
    }

    #[test]
    fn registered_action_loads() {
        let registry = Registry::new().action::<Index>("index");
        let loaded = load(ActionDescriptor::new("index.rs", "index"), &registry);
        assert!(loaded.is_loaded());
        assert!(loaded.action().unwrap().type_name().ends_with("Index"));
    }

    #[test]
    fn unregistered_file_loads_without_action() {
        let loaded = load(ActionDescriptor::new("stray.rs", "stray"), &Registry::new());
        assert!(!loaded.is_loaded());
        assert_eq!(loaded.path_name(), "stray");
    }

    #[test]
    fn failing_constructor_is_isolated() {
        let registry = Registry::new().factory::<Index, _>("broken", || Err("database unreachable".into()));
        let loaded = load(ActionDescriptor::new("broken.rs", "broken"), &registry);
        assert!(!loaded.is_loaded());

        match registry.instantiate("broken") {
            Err(LoadError::Init { path_name, source }) => {
                assert_eq!(path_name, "broken");
                assert_eq!(source.to_string(), "database unreachable");
            }
            other => panic!("expected init error, got {:?}", other.map(|a| a.type_name())),
        }
    }
}
