//! Liveness and readiness probe handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can it serve traffic? |
//!
//! [`App::health_checks`](crate::App::health_checks) mounts both next to the
//! compiled routes. They are plain handlers, so they can also be mounted by
//! hand:
//!
//! ```rust
//! use roost::{Router, Verb, health};
//!
//! let router = Router::new()
//!     .on(Verb::Get, health::LIVENESS_PATH, health::liveness)
//!     .on(Verb::Get, health::READINESS_PATH, health::readiness);
//! ```

use crate::{Request, Response};

pub const LIVENESS_PATH: &str = "/healthz";
pub const READINESS_PATH: &str = "/readyz";

/// Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"`. The router only exists once every action
/// has been compiled and bound, so answering at all means startup finished.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
