//! Actions and their method tables.
//!
//! An action is a plain type representing one resource. Its routes are never
//! declared: each method is registered under its conventional name and the
//! route compiler derives verb, URL and argument shape from that name.
//!
//! ```rust
//! use std::sync::Arc;
//! use roost::{Action, Body, Methods, Request, Status};
//!
//! #[derive(Default)]
//! struct Users;
//!
//! impl Users {
//!     async fn fetch_all(self: Arc<Self>, _req: Request) -> &'static str { "everyone" }
//!     async fn fetch_single(self: Arc<Self>, id: String, _req: Request) -> String { id }
//!     async fn create(self: Arc<Self>, _body: Body, _req: Request) -> Status { Status::Created }
//!     async fn update(self: Arc<Self>, _id: String, _body: Body, _req: Request) {}
//!     async fn delete(self: Arc<Self>, _id: String, _req: Request) {}
//! }
//!
//! impl Action for Users {
//!     fn methods() -> Methods<Self> {
//!         Methods::new()
//!             .method("fetchAll", Self::fetch_all)
//!             .method("fetchSingle", Self::fetch_single)
//!             .method("create", Self::create)
//!             .method("update", Self::update)
//!             .method("delete", Self::delete)
//!     }
//! }
//! ```
//!
//! Registration order is declaration order: it decides the order routes are
//! bound and listed within one verb.

use std::future::Future;
use std::sync::Arc;

use crate::compiler::Shape;
use crate::handler::BoxFuture;
use crate::request::{Body, Request};
use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// Error type action constructors may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A resource whose routes are compiled from its method names.
pub trait Action: Send + Sync + Sized + 'static {
    /// The action's methods in declaration order.
    ///
    /// Called once each time the action is loaded; the result is cached for
    /// the lifetime of the loaded instance.
    fn methods() -> Methods<Self>;
}

/// The arguments the dispatcher extracted for one call, in shape order.
#[derive(Debug)]
pub enum Arguments {
    Context(Request),
    Id(String, Request),
    Body(Body, Request),
    IdBody(String, Body, Request),
}

impl Arguments {
    pub fn shape(&self) -> Shape {
        match self {
            Self::Context(..) => Shape::Context,
            Self::Id(..)      => Shape::Id,
            Self::Body(..)    => Shape::Body,
            Self::IdBody(..)  => Shape::IdBody,
        }
    }
}

/// An ordered table of `(name, method)` pairs.
pub struct Methods<A> {
    entries: Vec<(&'static str, Arc<dyn ErasedMethod<A> + Send + Sync>)>,
}

impl<A: Send + Sync + 'static> Methods<A> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Registers `method` under `name`. Returns `self` for chaining.
    ///
    /// `method` takes the action as `Arc<Self>` followed by the arguments of
    /// one of the four shapes, and returns a future of anything that
    /// implements [`IntoResponse`]:
    ///
    /// | Shape | Signature |
    /// |---|---|
    /// | context | `(Arc<Self>, Request)` |
    /// | id | `(Arc<Self>, String, Request)` |
    /// | body | `(Arc<Self>, Body, Request)` |
    /// | id + body | `(Arc<Self>, String, Body, Request)` |
    ///
    /// Registering a name twice keeps the first registration. Names
    /// containing `{` or `}` would read as route parameters and are skipped.
    pub fn method<M, Args>(mut self, name: &'static str, method: M) -> Self
    where
        M: ActionMethod<A, Args>,
    {
        if name.contains(['{', '}']) {
            tracing::warn!(method = name, "method name contains a brace, skipping");
            return self;
        }
        if self.get(name).is_some() {
            tracing::warn!(method = name, "method registered twice, keeping the first");
            return self;
        }
        self.entries.push((name, method.into_erased()));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub(crate) fn get(&self, name: &str) -> Option<&Arc<dyn ErasedMethod<A> + Send + Sync>> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, m)| m)
    }
}

impl<A: Send + Sync + 'static> Default for Methods<A> {
    fn default() -> Self { Self::new() }
}

// ── Method trait ──────────────────────────────────────────────────────────────

/// Implemented for every function that can be registered on [`Methods`].
///
/// `Args` is a marker naming the argument shape; it is inferred from the
/// function's signature. Sealed: only the four blanket impls satisfy it.
pub trait ActionMethod<A, Args>: private::Sealed<A, Args> + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_erased(self) -> Arc<dyn ErasedMethod<A> + Send + Sync>;
}

mod private {
    pub trait Sealed<A, Args> {}
}

/// A registered method with its concrete type hidden.
#[doc(hidden)]
pub trait ErasedMethod<A> {
    /// The argument shape the method was written with.
    fn shape(&self) -> Shape;
    fn call(&self, action: Arc<A>, args: Arguments) -> BoxFuture;
}

struct MethodFn<F, Args> {
    f: F,
    _args: std::marker::PhantomData<fn() -> Args>,
}

fn mismatch(expected: Shape, args: &Arguments) -> BoxFuture {
    tracing::error!(%expected, found = %args.shape(), "method called with the wrong argument shape");
    Box::pin(async { Response::status(Status::InternalServerError) })
}

macro_rules! impl_action_method {
    ($marker:ty, $shape:expr, $variant:ident ( $($arg:ident : $ty:ty),* )) => {
        impl<A, F, Fut, R> private::Sealed<A, $marker> for F
        where
            F: Fn(Arc<A>, $($ty,)* Request) -> Fut + Send + Sync + 'static,
            Fut: Future<Output = R> + Send + 'static,
            R: IntoResponse + Send + 'static,
        {
        }

        impl<A, F, Fut, R> ActionMethod<A, $marker> for F
        where
            A: Send + Sync + 'static,
            F: Fn(Arc<A>, $($ty,)* Request) -> Fut + Send + Sync + 'static,
            Fut: Future<Output = R> + Send + 'static,
            R: IntoResponse + Send + 'static,
        {
            fn into_erased(self) -> Arc<dyn ErasedMethod<A> + Send + Sync> {
                Arc::new(MethodFn { f: self, _args: std::marker::PhantomData::<fn() -> $marker> })
            }
        }

        impl<A, F, Fut, R> ErasedMethod<A> for MethodFn<F, $marker>
        where
            F: Fn(Arc<A>, $($ty,)* Request) -> Fut + Send + Sync,
            Fut: Future<Output = R> + Send + 'static,
            R: IntoResponse + Send + 'static,
        {
            fn shape(&self) -> Shape { $shape }

            fn call(&self, action: Arc<A>, args: Arguments) -> BoxFuture {
                match args {
                    Arguments::$variant($($arg,)* req) => {
                        let fut = (self.f)(action, $($arg,)* req);
                        Box::pin(async move { fut.await.into_response() })
                    }
                    other => mismatch($shape, &other),
                }
            }
        }
    };
}

impl_action_method!((Request,),                 Shape::Context, Context());
impl_action_method!((String, Request),          Shape::Id,      Id(id: String));
impl_action_method!((Body, Request),            Shape::Body,    Body(body: Body));
impl_action_method!((String, Body, Request),    Shape::IdBody,  IdBody(id: String, body: Body));

// ── Loaded actions ────────────────────────────────────────────────────────────

/// A method bound to its action instance, ready to be called per request.
#[doc(hidden)]
pub type BoundMethod = Arc<dyn Fn(Arguments) -> BoxFuture + Send + Sync>;

/// An instantiated action with its type erased, as stored on a descriptor.
pub trait LoadedAction: Send + Sync {
    /// The Rust type name of the action, for logs.
    fn type_name(&self) -> &'static str;

    /// Method names in declaration order.
    fn method_names(&self) -> Vec<&'static str>;

    #[doc(hidden)]
    fn bind_method(&self, name: &str) -> Option<(Shape, BoundMethod)>;
}

pub(crate) struct Instance<A> {
    action: Arc<A>,
    methods: Arc<Methods<A>>,
}

impl<A: Action> Instance<A> {
    pub(crate) fn new(action: A) -> Self {
        Self { action: Arc::new(action), methods: Arc::new(A::methods()) }
    }
}

impl<A: Action> LoadedAction for Instance<A> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<A>()
    }

    fn method_names(&self) -> Vec<&'static str> {
        self.methods.names().collect()
    }

    fn bind_method(&self, name: &str) -> Option<(Shape, BoundMethod)> {
        let method = Arc::clone(self.methods.get(name)?);
        let action = Arc::clone(&self.action);
        let shape = method.shape();
        let bound: BoundMethod = Arc::new(move |args: Arguments| method.call(Arc::clone(&action), args));
        Some((shape, bound))
    }
}
