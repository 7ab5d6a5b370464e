//! Dispatcher factory: wraps one action method in a request handler.

use std::sync::Arc;

use tracing::warn;

use super::classify;
use crate::action::{Arguments, BoundMethod, LoadedAction};
use crate::compiler::Shape;
use crate::error::BindError;
use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Builds the request handler for `method_name` on `action`.
///
/// The argument shape is derived from the name once, here. Per request the
/// handler pulls out the `:id` parameter and the body as that shape requires,
/// always followed by the request itself, and returns the method's future
/// as is.
///
/// Fails when the name follows no convention, when the action has no method
/// of that name, or when the method was written for a different shape.
pub fn to_handler(action: &dyn LoadedAction, method_name: &str) -> Result<BoxedHandler, BindError> {
    let shape = classify::shape(method_name)
        .ok_or_else(|| BindError::Unconventional(method_name.to_owned()))?;

    let (found, method) = action.bind_method(method_name).ok_or_else(|| BindError::NotCallable {
        method: method_name.to_owned(),
        action: action.type_name(),
    })?;

    if found != shape {
        return Err(BindError::ShapeMismatch { method: method_name.to_owned(), expected: shape, found });
    }

    Ok(Arc::new(Dispatch { shape, method }))
}

struct Dispatch {
    shape: Shape,
    method: BoundMethod,
}

impl Dispatch {
    fn arguments(&self, req: Request) -> Result<Arguments, Response> {
        let id = if self.shape.needs_id() {
            match req.param("id") {
                Some(id) => Some(id.to_owned()),
                None => {
                    warn!(path = %req.path(), "request reached an id route without an id");
                    return Err(Response::status(Status::BadRequest));
                }
            }
        } else {
            None
        };
        let body = self.shape.needs_body().then(|| req.body().clone());

        Ok(match (id, body) {
            (None, None) => Arguments::Context(req),
            (Some(id), None) => Arguments::Id(id, req),
            (None, Some(body)) => Arguments::Body(body, req),
            (Some(id), Some(body)) => Arguments::IdBody(id, body, req),
        })
    }
}

impl ErasedHandler for Dispatch {
    fn call(&self, req: Request) -> BoxFuture {
        match self.arguments(req) {
            Ok(args) => (self.method)(args),
            Err(res) => Box::pin(async move { res }),
        }
    }
}
