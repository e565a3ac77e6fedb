//! Transport abstraction for issuing CloudStack API commands.
//!
//! The [`Transport`] trait is the only seam through which the client talks
//! to the management server. [`HttpTransport`] is the production
//! implementation; tests drive the poller and client with scripted doubles.

use std::future::Future;
use std::pin::Pin;

mod error;
mod http;
mod params;

pub use error::TransportError;
pub use http::HttpTransport;
pub use params::CommandParams;

/// Future returned by transport operations.
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>, TransportError>> + Send + 'a>>;

/// Sends one API command and returns the raw response body.
pub trait Transport: Send + Sync {
    /// Invokes `command` with `params` and yields the JSON body on success.
    fn invoke<'a>(&'a self, command: &'a str, params: &'a CommandParams) -> TransportFuture<'a>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn invoke<'a>(&'a self, command: &'a str, params: &'a CommandParams) -> TransportFuture<'a> {
        (**self).invoke(command, params)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn invoke<'a>(&'a self, command: &'a str, params: &'a CommandParams) -> TransportFuture<'a> {
        (**self).invoke(command, params)
    }
}
