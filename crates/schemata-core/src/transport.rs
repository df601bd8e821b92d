//! Collaborator traits implemented outside the core.
//!
//! Both return a boxed future so they stay object-safe without pulling in
//! `async_trait`.

use std::{future::Future, pin::Pin, sync::Arc};

use crate::{
    error::{ContentError, TransportError},
    reply::RawReply,
    request::Request,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Performs the network exchange for one [`Request`].
///
/// Retries, timeouts and connection limits are the transport's business; the
/// core calls `send` exactly once per request.
pub trait Transport: Send + Sync {
    fn send<'a>(&'a self, request: &'a Request) -> BoxFuture<'a, Result<RawReply, TransportError>>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send<'a>(&'a self, request: &'a Request) -> BoxFuture<'a, Result<RawReply, TransportError>> {
        (**self).send(request)
    }
}

/// Produces plain text for a locator (URL, path, key …).
pub trait ContentSource: Send + Sync {
    fn fetch<'a>(&'a self, locator: &'a str) -> BoxFuture<'a, Result<String, ContentError>>;
}
