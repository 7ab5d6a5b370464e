//! # roost
//!
//! Convention-over-configuration routing for small HTTP services.
//!
//! Write one type per resource, name its methods after the convention, and
//! roost compiles the routing table at startup. There are no route
//! declarations:
//!
//! | Method name | Route for `actions/user.rs` | Called with |
//! |---|---|---|
//! | `fetchAll` | `GET /user/` | `(req)` |
//! | `fetchSingle` | `GET /user/:id` | `(id, req)` |
//! | `create` | `POST /user/` | `(body, req)` |
//! | `update` | `PATCH /user/:id` | `(id, body, req)` |
//! | `delete` | `DELETE /user/:id` | `(id, req)` |
//! | `getCartTotal` | `GET /user/cart-total/` | `(req)` |
//! | `setAddProduct` | `POST /user/add-product/` | `(body, req)` |
//!
//! The action whose file name matches `actions_index_file` (default
//! `index`) is mounted at `/` instead of `/<name>/`. Methods named any
//! other way are ignored.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use roost::{Action, App, Config, Methods, Mode, Registry, Request};
//!
//! // actions/index.rs
//! #[derive(Default)]
//! struct Index;
//!
//! impl Index {
//!     async fn fetch_all(self: Arc<Self>, _req: Request) -> &'static str {
//!         "hello"
//!     }
//!
//!     async fn fetch_single(self: Arc<Self>, id: String, _req: Request) -> String {
//!         format!("hello {id}")
//!     }
//! }
//!
//! impl Action for Index {
//!     fn methods() -> Methods<Self> {
//!         Methods::new()
//!             .method("fetchAll", Self::fetch_all)
//!             .method("fetchSingle", Self::fetch_single)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), roost::Error> {
//!     let registry = Registry::new().action::<Index>("index");
//!     App::new(Config::default(), registry).run(Mode::Development).await
//! }
//! ```
//!
//! ## Failure policy
//!
//! Startup never fails because of an action. An unreadable actions folder,
//! a file with no registered action, a constructor that errors, or a method
//! that cannot be bound are each logged through `tracing` and skipped, and
//! the app serves whatever did compile.

mod action;
mod app;
mod config;
mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;
mod status;
mod verb;

pub mod compiler;
pub mod health;

pub use action::{Action, ActionMethod, Arguments, BoxError, LoadedAction, Methods};
pub use app::{App, Compiled};
pub use compiler::{ActionDescriptor, Registry, RouteRecord, Shape};
pub use config::{Config, ConfigError, Mode};
pub use error::{BindError, Error, LoadError};
pub use handler::Handler;
pub use request::{Body, Request};
pub use response::{ContentType, IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use verb::Verb;
