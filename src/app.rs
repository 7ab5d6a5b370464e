//! The app: configuration, action registry and the startup pipeline.

use tracing::{error, info};

use crate::compiler::{self, ActionDescriptor, DiskFolder, ListFiles, Registry, RouteRecord};
use crate::config::{Config, Mode};
use crate::error::Error;
use crate::handler::Handler;
use crate::health;
use crate::router::Router;
use crate::server::Server;
use crate::verb::Verb;

/// A convention-routed HTTP app.
///
/// ```rust,no_run
/// use roost::{App, Config, Mode, Registry};
///
/// # #[derive(Default)] struct Index;
/// # impl roost::Action for Index { fn methods() -> roost::Methods<Self> { roost::Methods::new() } }
/// #[tokio::main]
/// async fn main() -> Result<(), roost::Error> {
///     let registry = Registry::new().action::<Index>("index");
///     App::new(Config::default(), registry)
///         .run(Mode::Production)
///         .await
/// }
/// ```
pub struct App<F = DiskFolder> {
    config: Config,
    registry: Registry,
    files: F,
    health_checks: bool,
}

impl App {
    /// An app that discovers action files on the local disk.
    pub fn new(config: Config, registry: Registry) -> Self {
        Self { config, registry, files: DiskFolder, health_checks: false }
    }
}

impl<F: ListFiles> App<F> {
    /// Replaces the collaborator used to list the actions folder.
    pub fn with_files<G: ListFiles>(self, files: G) -> App<G> {
        App {
            config: self.config,
            registry: self.registry,
            files,
            health_checks: self.health_checks,
        }
    }

    /// Also mount `/healthz` and `/readyz`.
    pub fn health_checks(mut self, enabled: bool) -> Self {
        self.health_checks = enabled;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Discovers the action files and loads each one, strictly in order.
    pub async fn load_actions(&self) -> Vec<ActionDescriptor> {
        let discovered = compiler::discover(
            &self.files,
            &self.config.actions_folder,
            &self.config.actions_file_ext,
        )
        .await;

        let mut loaded = Vec::with_capacity(discovered.len());
        for descriptor in discovered {
            loaded.push(compiler::load(descriptor, &self.registry));
        }
        loaded
    }

    /// Runs the whole pipeline: discover, load, compile and bind.
    ///
    /// Never fails. Whatever could not be discovered, loaded or bound has
    /// been logged and is missing from the result.
    pub async fn compile(&self) -> Compiled {
        let mut actions = self.load_actions().await;
        let mut router = Router::new();
        compiler::bind(&mut router, &mut actions, &self.config.actions_index_file);

        if self.health_checks {
            mount(&mut router, health::LIVENESS_PATH, health::liveness);
            mount(&mut router, health::READINESS_PATH, health::readiness);
        }

        Compiled { router, actions }
    }

    /// Compiles the routes and logs the listing.
    pub async fn log_routes(&self) -> Compiled {
        let compiled = self.compile().await;
        compiled.log_routes();
        compiled
    }

    /// Compiles the routes and serves them until a shutdown signal.
    ///
    /// Development mode serves on `dev_port` and logs the route listing;
    /// production mode serves on `port`.
    pub async fn run(self, mode: Mode) -> Result<(), Error> {
        let compiled = self.compile().await;
        if mode == Mode::Development {
            compiled.log_routes();
        }

        let port = self.config.port_for(mode);
        info!(%mode, port, "starting");
        Server::bind(([0, 0, 0, 0], port)).serve(compiled.into_router()).await
    }
}

fn mount(router: &mut Router, path: &str, handler: impl Handler) {
    if let Err(e) = router.try_insert(Verb::Get, path, handler.into_boxed_handler()) {
        error!(path, error = %e, "unable to mount health check");
    }
}

/// The result of one compilation pass.
pub struct Compiled {
    router: Router,
    actions: Vec<ActionDescriptor>,
}

impl Compiled {
    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    /// Every discovered action, loaded or not, in file name order.
    pub fn actions(&self) -> &[ActionDescriptor] {
        &self.actions
    }

    /// Every bound route, in bind order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteRecord> {
        self.actions.iter().flat_map(|action| action.routes())
    }

    pub fn route_table(&self) -> String {
        compiler::route_table(&self.actions)
    }

    pub fn log_routes(&self) {
        let table = self.route_table();
        if table.is_empty() {
            info!("no routes bound");
            return;
        }
        info!("available routes:");
        for line in table.lines() {
            info!("{line}");
        }
    }
}
