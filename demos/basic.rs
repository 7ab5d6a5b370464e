//! A small convention-routed service: a shopping cart mounted at `/` and a
//! user resource at `/user/`.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl -X POST http://localhost:3000/add-product-to-cart/ \
//!        -d '{"product":"Ducati Panigale","cost":25000}'
//!   curl http://localhost:3000/cart-contents/
//!   curl http://localhost:3000/cart-total/
//!   curl http://localhost:3000/user/
//!   curl http://localhost:3000/user/1
//!   curl -X PATCH http://localhost:3000/user/0 -d '{"last_name":"Flanders"}'
//!   curl -X DELETE http://localhost:3000/user/1
//!
//! Settings come from `demos/roost.toml`. `ROOST_ENV=production` serves on
//! `port` instead of `dev_port` and skips the route listing.

#[path = "actions/index.rs"]
mod index;
#[path = "actions/user.rs"]
mod user;

use roost::{App, Config, Mode, Registry};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), roost::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_file("demos/roost.toml")?;
    let registry = Registry::new()
        .action::<index::Index>("index")
        .factory("user", || Ok(user::User::seeded()));

    let mode = Mode::from_name(std::env::var("ROOST_ENV").ok().as_deref());
    App::new(config, registry).health_checks(true).run(mode).await
}
