//! Resource definitions: representations plus decision callbacks.
//!
//! A resource pairs a response table (media type to responder) with a
//! table of named callbacks the decision flow consults. Callbacks a
//! resource does not override fall back to the defaults below, which give
//! a read-only resource that exists, is available, and serves `text/html`
//! in `utf8`.
//!
//! Callback returns are polymorphic by design: a plain boolean, a forced
//! status code, a string (authentication challenge, redirect location, or
//! created path, depending on the call site), a partial response to merge,
//! or a `(decision, partial response)` pair. Each call site accepts only
//! the shapes that make sense for it and reports anything else as a
//! protocol violation.

use crate::encoding::Encoder;
use crate::request::Request;
use crate::response::{Body, Fragment};
use http::{Method, StatusCode};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// The value a callback hands back to the flow.
#[derive(Debug, Clone)]
pub enum CallbackOut {
    /// The plain decision.
    Bool(bool),
    /// Force this exact status.
    Status(StatusCode),
    /// A string whose meaning depends on the call site.
    Text(String),
    /// A method set (`known-methods`, `allowed-methods`).
    Methods(Vec<Method>),
    /// An ordered offering (`languages-provided`, `charsets-provided`,
    /// `variances`).
    Values(Vec<String>),
    /// Named encoders (`encodings-provided`).
    Encodings(Vec<(String, Encoder)>),
    /// A timestamp (`last-modified`, `expires`).
    Date(SystemTime),
    /// A partial response: decision true, map merged into the accumulator.
    Fragment(Fragment),
    /// Decision plus a partial response to merge.
    Both(bool, Fragment),
    /// Nothing; the call site's default behavior applies.
    Nil,
}

impl CallbackOut {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Status(_) => "status",
            Self::Text(_) => "text",
            Self::Methods(_) => "methods",
            Self::Values(_) => "values",
            Self::Encodings(_) => "encodings",
            Self::Date(_) => "date",
            Self::Fragment(_) => "fragment",
            Self::Both(_, _) => "pair",
            Self::Nil => "nil",
        }
    }
}

/// The named decision callbacks of the flow diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Callback {
    ServiceAvailable,
    KnownMethods,
    UriTooLong,
    AllowedMethods,
    ValidateContentChecksum,
    MalformedRequest,
    IsAuthorized,
    Forbidden,
    ValidContentHeaders,
    KnownContentType,
    ValidEntityLength,
    Options,
    LanguagesProvided,
    CharsetsProvided,
    EncodingsProvided,
    Variances,
    ResourceExists,
    GenerateEtag,
    LastModified,
    Expires,
    MovedPermanently,
    MovedTemporarily,
    PreviouslyExisted,
    AllowMissingPost,
    DeleteResource,
    DeleteCompleted,
    PostIsCreate,
    CreatePath,
    BaseUri,
    ProcessPost,
    IsConflict,
    MultipleRepresentations,
}

impl Callback {
    /// The diagram name of the callback, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ServiceAvailable => "service-available?",
            Self::KnownMethods => "known-methods",
            Self::UriTooLong => "uri-too-long?",
            Self::AllowedMethods => "allowed-methods",
            Self::ValidateContentChecksum => "validate-content-checksum",
            Self::MalformedRequest => "malformed-request?",
            Self::IsAuthorized => "is-authorized?",
            Self::Forbidden => "forbidden?",
            Self::ValidContentHeaders => "valid-content-headers?",
            Self::KnownContentType => "known-content-type?",
            Self::ValidEntityLength => "valid-entity-length?",
            Self::Options => "options",
            Self::LanguagesProvided => "languages-provided",
            Self::CharsetsProvided => "charsets-provided",
            Self::EncodingsProvided => "encodings-provided",
            Self::Variances => "variances",
            Self::ResourceExists => "resource-exists?",
            Self::GenerateEtag => "generate-etag",
            Self::LastModified => "last-modified",
            Self::Expires => "expires",
            Self::MovedPermanently => "moved-permanently?",
            Self::MovedTemporarily => "moved-temporarily?",
            Self::PreviouslyExisted => "previously-existed?",
            Self::AllowMissingPost => "allow-missing-post?",
            Self::DeleteResource => "delete-resource",
            Self::DeleteCompleted => "delete-completed?",
            Self::PostIsCreate => "post-is-create?",
            Self::CreatePath => "create-path",
            Self::BaseUri => "base-uri",
            Self::ProcessPost => "process-post",
            Self::IsConflict => "is-conflict?",
            Self::MultipleRepresentations => "multiple-representations",
        }
    }
}

pub type CallbackFn = dyn Fn(&mut Request) -> CallbackOut + Send + Sync;

/// The callback table: resource overrides atop the defaults.
#[derive(Clone)]
pub struct Handlers {
    table: HashMap<Callback, Arc<CallbackFn>>,
}

impl Handlers {
    /// The default table of §-defaults; every callback is present.
    pub fn defaults() -> Self {
        let mut table: HashMap<Callback, Arc<CallbackFn>> = HashMap::new();

        fn constant(value: CallbackOut) -> Arc<CallbackFn> {
            Arc::new(move |_: &mut Request| value.clone())
        }

        table.insert(Callback::ServiceAvailable, constant(CallbackOut::Bool(true)));
        table.insert(
            Callback::KnownMethods,
            constant(CallbackOut::Methods(vec![
                Method::GET,
                Method::HEAD,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::TRACE,
                Method::CONNECT,
                Method::OPTIONS,
            ])),
        );
        table.insert(Callback::UriTooLong, constant(CallbackOut::Bool(false)));
        table.insert(Callback::AllowedMethods, constant(CallbackOut::Methods(vec![Method::GET, Method::HEAD])));
        table.insert(Callback::ValidateContentChecksum, constant(CallbackOut::Nil));
        table.insert(Callback::MalformedRequest, constant(CallbackOut::Bool(false)));
        table.insert(Callback::IsAuthorized, constant(CallbackOut::Bool(true)));
        table.insert(Callback::Forbidden, constant(CallbackOut::Bool(false)));
        table.insert(Callback::ValidContentHeaders, constant(CallbackOut::Bool(true)));
        table.insert(Callback::KnownContentType, constant(CallbackOut::Bool(true)));
        table.insert(Callback::ValidEntityLength, constant(CallbackOut::Bool(true)));
        table.insert(Callback::Options, constant(CallbackOut::Fragment(Fragment::new())));
        table.insert(Callback::LanguagesProvided, constant(CallbackOut::Values(vec![])));
        table.insert(Callback::CharsetsProvided, constant(CallbackOut::Values(vec!["utf8".to_string()])));
        table.insert(
            Callback::EncodingsProvided,
            constant(CallbackOut::Encodings(vec![("identity".to_string(), Encoder::Identity)])),
        );
        table.insert(Callback::Variances, constant(CallbackOut::Values(vec![])));
        table.insert(Callback::ResourceExists, constant(CallbackOut::Bool(true)));
        table.insert(Callback::GenerateEtag, constant(CallbackOut::Nil));
        table.insert(Callback::LastModified, constant(CallbackOut::Nil));
        table.insert(Callback::Expires, constant(CallbackOut::Nil));
        table.insert(Callback::MovedPermanently, constant(CallbackOut::Bool(false)));
        table.insert(Callback::MovedTemporarily, constant(CallbackOut::Bool(false)));
        table.insert(Callback::PreviouslyExisted, constant(CallbackOut::Bool(false)));
        table.insert(Callback::AllowMissingPost, constant(CallbackOut::Bool(false)));
        table.insert(Callback::DeleteResource, constant(CallbackOut::Bool(false)));
        table.insert(Callback::DeleteCompleted, constant(CallbackOut::Bool(true)));
        table.insert(Callback::PostIsCreate, constant(CallbackOut::Bool(false)));
        table.insert(Callback::CreatePath, constant(CallbackOut::Bool(false)));
        table.insert(Callback::BaseUri, constant(CallbackOut::Nil));
        table.insert(Callback::ProcessPost, constant(CallbackOut::Nil));
        table.insert(Callback::IsConflict, constant(CallbackOut::Bool(false)));
        table.insert(Callback::MultipleRepresentations, constant(CallbackOut::Bool(false)));

        Self { table }
    }

    pub fn set<F>(&mut self, callback: Callback, f: F)
    where
        F: Fn(&mut Request) -> CallbackOut + Send + Sync + 'static,
    {
        self.table.insert(callback, Arc::new(f));
    }

    pub(crate) fn invoke(&self, callback: Callback, request: &mut Request) -> CallbackOut {
        // defaults() populates every key, so the lookup cannot miss
        let f = Arc::clone(&self.table[&callback]);
        f(request)
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers").field("overridden", &self.table.len()).finish()
    }
}

pub type ResponderFn = dyn Fn(&mut Request) -> ResponderOut + Send + Sync;

/// What a responder function produces: a body or a partial response.
#[derive(Debug, Clone)]
pub enum ResponderOut {
    Body(Body),
    Fragment(Fragment),
}

impl From<Body> for ResponderOut {
    fn from(value: Body) -> Self {
        Self::Body(value)
    }
}

impl From<&str> for ResponderOut {
    fn from(value: &str) -> Self {
        Self::Body(Body::from(value))
    }
}

impl From<String> for ResponderOut {
    fn from(value: String) -> Self {
        Self::Body(Body::from(value))
    }
}

impl From<i64> for ResponderOut {
    fn from(value: i64) -> Self {
        Self::Body(Body::from(value))
    }
}

impl From<Fragment> for ResponderOut {
    fn from(value: Fragment) -> Self {
        Self::Fragment(value)
    }
}

/// The value stored under a media type in the response table.
#[derive(Clone)]
pub enum Responder {
    /// A literal body served as-is.
    Literal(Body),
    /// A partial response merged into the accumulator.
    Partial(Fragment),
    /// A pure function of the request.
    Func(Arc<ResponderFn>),
}

impl Responder {
    pub fn func<F, O>(f: F) -> Self
    where
        F: Fn(&mut Request) -> O + Send + Sync + 'static,
        O: Into<ResponderOut>,
    {
        Self::Func(Arc::new(move |request| f(request).into()))
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(body) => f.debug_tuple("Literal").field(body).finish(),
            Self::Partial(fragment) => f.debug_tuple("Partial").field(fragment).finish(),
            Self::Func(_) => f.write_str("Func"),
        }
    }
}

impl From<&str> for Responder {
    fn from(value: &str) -> Self {
        Self::Literal(Body::from(value))
    }
}

impl From<String> for Responder {
    fn from(value: String) -> Self {
        Self::Literal(Body::from(value))
    }
}

impl From<Body> for Responder {
    fn from(value: Body) -> Self {
        Self::Literal(value)
    }
}

impl From<Fragment> for Responder {
    fn from(value: Fragment) -> Self {
        Self::Partial(value)
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Table {
    /// Media type to responder, in declaration order.
    Representations(Vec<(String, Responder)>),
    /// Terminate immediately with this status, merging the fragment.
    Halt(StatusCode, Option<Fragment>),
    /// Terminate with 500 and the term as body.
    Error(String),
}

/// A declarative resource: representations plus decision callbacks.
///
/// Shared freely across concurrent engine invocations; nothing in it is
/// mutated by a walk.
#[derive(Debug, Clone)]
pub struct Resource {
    pub(crate) table: Table,
    pub(crate) handlers: Handlers,
}

impl Resource {
    /// Overrides one callback, consuming and returning the resource so
    /// overrides chain off [`resource`].
    pub fn handler<F>(mut self, callback: Callback, f: F) -> Self
    where
        F: Fn(&mut Request) -> CallbackOut + Send + Sync + 'static,
    {
        self.handlers.set(callback, f);
        self
    }

    /// The media types this resource offers, derived from the response
    /// table. An empty table offers `text/html`.
    pub(crate) fn content_types_provided(&self) -> Vec<String> {
        match &self.table {
            Table::Representations(entries) if !entries.is_empty() => {
                entries.iter().map(|(media, _)| media.clone()).collect()
            }
            _ => vec![mime::TEXT_HTML.to_string()],
        }
    }

    /// Finds the responder for a chosen media type, falling back to a
    /// `*/*` entry when the exact type is absent.
    pub(crate) fn responder_for(&self, media_type: &str) -> Option<&Responder> {
        let Table::Representations(entries) = &self.table else {
            return None;
        };
        entries
            .iter()
            .find(|(media, _)| media.eq_ignore_ascii_case(media_type))
            .or_else(|| entries.iter().find(|(media, _)| media == "*/*"))
            .map(|(_, responder)| responder)
    }
}

/// Constructs a resource from a response table. Callback overrides chain
/// on via [`Resource::handler`].
pub fn resource<I, K, R>(table: I) -> Resource
where
    I: IntoIterator<Item = (K, R)>,
    K: Into<String>,
    R: Into<Responder>,
{
    let entries = table.into_iter().map(|(media, responder)| (media.into(), responder.into())).collect();
    Resource { table: Table::Representations(entries), handlers: Handlers::defaults() }
}

/// A resource that terminates every request with `status`, merged with an
/// optional response fragment.
pub fn halt_resource(status: StatusCode, fragment: Option<Fragment>) -> Resource {
    Resource { table: Table::Halt(status, fragment), handlers: Handlers::defaults() }
}

/// A resource that always responds 500 with `term` as the body.
pub fn error_resource(term: impl Into<String>) -> Resource {
    Resource { table: Table::Error(term.into()), handlers: Handlers::defaults() }
}
