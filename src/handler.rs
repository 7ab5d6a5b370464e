//! Handler trait and type erasure.
//!
//! # How handlers are stored
//!
//! The router holds handlers of many concrete types in one tree per verb:
//! plain `async fn`s mounted by hand (health probes) and the dispatchers the
//! route compiler builds for action methods. Both are hidden behind
//! [`ErasedHandler`] and stored as a [`BoxedHandler`].
//!
//! ```text
//! async fn liveness(req: Request) -> Response { … }   ← plain function
//!        ↓ router.on(Verb::Get, "/healthz", liveness)
//! Arc::new(FnHandler(liveness))                       ← Handler blanket impl
//!
//! Users::fetch_single                                 ← action method
//!        ↓ compiler::to_handler(action, "fetchSingle")
//! Arc::new(Dispatch { shape, method })                ← argument extraction
//!
//!        ↓  both stored as BoxedHandler = Arc<dyn ErasedHandler>
//! handler.call(req)  at request time                  ← one vtable dispatch
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
#[doc(hidden)]
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every function that can be mounted on a [`Router`](crate::Router)
/// by hand:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// Action methods do not go through this trait; they are registered on
/// [`Methods`](crate::Methods) and wrapped by the route compiler.
///
/// The trait is sealed: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

/// Bridges a concrete handler function to [`ErasedHandler`].
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
