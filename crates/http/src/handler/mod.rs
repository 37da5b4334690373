//! Request handler abstraction.
//!
//! A handler turns one decoded [`RequestMessage`] into one [`ResponseMessage`].
//! The connection worker invokes it at most once per connection, and only for
//! requests that decoded successfully. A handler error is reported as a `500`
//! response by the worker.

use std::error::Error;
use std::future::Future;

use crate::protocol::{RequestMessage, ResponseMessage};

#[trait_variant::make(Handler: Send)]
pub trait LocalHandler {
    type Error: Into<Box<dyn Error + Send + Sync>>;

    async fn call(&self, req: RequestMessage) -> Result<ResponseMessage, Self::Error>;
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<Err, F, Fut> Handler for HandlerFn<F>
where
    F: Fn(RequestMessage) -> Fut + Send + Sync,
    Err: Into<Box<dyn Error + Send + Sync>>,
    Fut: Future<Output = Result<ResponseMessage, Err>> + Send,
{
    type Error = Err;

    fn call(&self, req: RequestMessage) -> impl Future<Output = Result<ResponseMessage, Self::Error>> + Send {
        (self.f)(req)
    }
}

pub fn make_handler<F, Err, Ret>(f: F) -> HandlerFn<F>
where
    Err: Into<Box<dyn Error + Send + Sync>>,
    Ret: Future<Output = Result<ResponseMessage, Err>>,
    F: Fn(RequestMessage) -> Ret,
{
    HandlerFn { f }
}
