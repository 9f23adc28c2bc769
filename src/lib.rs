//! Bishop treats HTTP as a first-class application protocol.
//!
//! Instead of hand-picking status codes, a handler declares a *resource*:
//! the representations it can serve plus a table of decision callbacks.
//! [`run`] then walks the full HTTP/1.1 decision diagram — method checks,
//! authorization, content negotiation, conditional requests, and the
//! PUT/POST/DELETE lifecycles — and produces the correct status, headers,
//! and body for each request.
//!
//! The engine is synchronous and shares nothing between invocations: the
//! host hands in one prepared [`Request`] per call and gets back one
//! [`Response`]. Parsing, sockets, and routing stay with the host.
//!
//! ```
//! use bishop::{resource, run, Request};
//!
//! let hello = resource([("text/html", "<h1>hello</h1>")]);
//!
//! let mut request = Request::builder().header("Accept", "text/html").build();
//! let response = run(&mut request, &hello).unwrap();
//!
//! assert_eq!(response.status().unwrap(), 200);
//! assert_eq!(response.header("Content-Type"), Some("text/html; charset=utf8"));
//! ```

pub mod date;
pub mod encoding;
pub mod flow;
pub mod header;
pub mod request;
pub mod resource;
pub mod response;

mod assembler;
mod error;
mod negotiation;

pub use encoding::Encoder;
pub use error::BishopError;
pub use flow::run;
pub use header::Headers;
pub use request::{ReqBody, Request};
pub use resource::{error_resource, halt_resource, resource, Callback, CallbackOut, Resource, Responder};
pub use response::{Body, Fragment, Response};
