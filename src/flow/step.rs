//! Per-node decision logic.
//!
//! Every node has the same shape: invoke the relevant callback, interpret
//! the shapes it is allowed to return, and produce a [`Transition`]. The
//! node labels and branch targets follow the Webmachine diagram.

use super::{Flow, Node, Transition};
use crate::assembler;
use crate::date;
use crate::error::StepError;
use crate::header;
use crate::negotiation;
use crate::resource::{Callback, CallbackOut};
use http::{Method, StatusCode};
use std::time::SystemTime;
use tracing::debug;

/// A boolean decision, or a status forced by the callback.
enum Decision {
    Truth(bool),
    Forced(StatusCode),
}

impl Flow<'_> {
    pub(super) fn step(&mut self, node: Node) -> Result<Transition, StepError> {
        use Transition::{Done, Next};

        match node {
            Node::B13 => self.branch(node, Callback::ServiceAvailable, Next(Node::B12), Done(StatusCode::SERVICE_UNAVAILABLE)),
            Node::B12 => {
                let known = self.methods(Callback::KnownMethods)?;
                let outcome = known.contains(self.request.method());
                self.trace.record(node, outcome);
                Ok(if outcome { Next(Node::B11) } else { Done(StatusCode::NOT_IMPLEMENTED) })
            }
            Node::B11 => self.branch(node, Callback::UriTooLong, Done(StatusCode::URI_TOO_LONG), Next(Node::B10)),
            Node::B10 => {
                let allowed = self.methods(Callback::AllowedMethods)?;
                let outcome = allowed.contains(self.request.method());
                self.trace.record(node, outcome);
                if outcome {
                    Ok(Next(Node::B9))
                } else {
                    let names: Vec<&str> = allowed.iter().map(Method::as_str).collect();
                    self.response.headers.set("Allow", names.join(", "));
                    Ok(Done(StatusCode::METHOD_NOT_ALLOWED))
                }
            }
            Node::B9 => {
                let has_checksum = self.request.header("content-md5").is_some();
                self.trace.record(node, has_checksum);
                Ok(Next(if has_checksum { Node::B9a } else { Node::B9b }))
            }
            Node::B9a => match self.invoke(Callback::ValidateContentChecksum) {
                CallbackOut::Bool(true) => Ok(Next(Node::B9b)),
                CallbackOut::Bool(false) => Ok(self.checksum_mismatch()),
                CallbackOut::Nil => {
                    let expected = self.request.header("content-md5").unwrap_or_default().trim().to_string();
                    let body = self.request.body_bytes()?;
                    let digest = format!("{:x}", md5::compute(&body));
                    let outcome = digest.eq_ignore_ascii_case(&expected);
                    self.trace.record(node, outcome);
                    Ok(if outcome { Next(Node::B9b) } else { self.checksum_mismatch() })
                }
                other => Err(self.unexpected(Callback::ValidateContentChecksum, &other)),
            },
            Node::B9b => self.branch(node, Callback::MalformedRequest, Done(StatusCode::BAD_REQUEST), Next(Node::B8)),
            Node::B8 => match self.invoke(Callback::IsAuthorized) {
                CallbackOut::Bool(true) => Ok(Next(Node::B7)),
                CallbackOut::Bool(false) => Ok(Done(StatusCode::UNAUTHORIZED)),
                CallbackOut::Text(challenge) => {
                    self.response.headers.set("WWW-Authenticate", challenge);
                    Ok(Done(StatusCode::UNAUTHORIZED))
                }
                CallbackOut::Status(status) => Ok(Done(status)),
                CallbackOut::Fragment(fragment) => {
                    self.response.merge(fragment);
                    Ok(Next(Node::B7))
                }
                CallbackOut::Both(decision, fragment) => {
                    self.response.merge(fragment);
                    Ok(if decision { Next(Node::B7) } else { Done(StatusCode::UNAUTHORIZED) })
                }
                other => Err(self.unexpected(Callback::IsAuthorized, &other)),
            },
            Node::B7 => self.branch(node, Callback::Forbidden, Done(StatusCode::FORBIDDEN), Next(Node::B6)),
            Node::B6 => {
                self.branch(node, Callback::ValidContentHeaders, Next(Node::B5), Done(StatusCode::NOT_IMPLEMENTED))
            }
            Node::B5 => {
                self.branch(node, Callback::KnownContentType, Next(Node::B4), Done(StatusCode::UNSUPPORTED_MEDIA_TYPE))
            }
            Node::B4 => {
                self.branch(node, Callback::ValidEntityLength, Next(Node::B3), Done(StatusCode::PAYLOAD_TOO_LARGE))
            }
            Node::B3 => {
                let is_options = self.request.method() == Method::OPTIONS;
                self.trace.record(node, is_options);
                if !is_options {
                    return Ok(Next(Node::C3));
                }
                match self.invoke(Callback::Options) {
                    CallbackOut::Fragment(fragment) => self.response.merge(fragment),
                    CallbackOut::Nil => {}
                    other => return Err(self.unexpected(Callback::Options, &other)),
                }
                Ok(Done(StatusCode::OK))
            }
            Node::C3 => {
                let has_accept = self.request.header("accept").is_some();
                self.trace.record(node, has_accept);
                if has_accept {
                    Ok(Next(Node::C4))
                } else {
                    let provided = self.resource.content_types_provided();
                    self.request.acceptable_type = provided.first().cloned();
                    Ok(Next(Node::D4))
                }
            }
            Node::C4 => {
                let provided = self.resource.content_types_provided();
                let accept = self.request.header("accept").unwrap_or("*/*").to_string();
                match negotiation::best_media_type(&provided, &accept) {
                    Some(chosen) => {
                        debug!(media_type = %chosen, "negotiated media type");
                        self.request.acceptable_type = Some(chosen);
                        self.trace.record(node, true);
                        Ok(Next(Node::D4))
                    }
                    None => {
                        self.trace.record(node, false);
                        Ok(Done(StatusCode::NOT_ACCEPTABLE))
                    }
                }
            }
            Node::D4 => {
                let has_header = self.request.header("accept-language").is_some();
                self.trace.record(node, has_header);
                Ok(Next(if has_header { Node::D5 } else { Node::E5 }))
            }
            Node::D5 => {
                let provided = self.values(Callback::LanguagesProvided)?;
                let accept = self.request.header("accept-language").unwrap_or("*").to_string();
                if provided.is_empty() {
                    // an empty offering leaves the dimension unconstrained
                    self.request.acceptable_language = negotiation::preferred(&accept);
                    self.trace.record(node, true);
                    return Ok(Next(Node::E5));
                }
                match negotiation::best_value(&provided, &accept) {
                    Some(chosen) => {
                        self.request.acceptable_language = Some(chosen);
                        self.trace.record(node, true);
                        Ok(Next(Node::E5))
                    }
                    None => {
                        self.trace.record(node, false);
                        Ok(Done(StatusCode::NOT_ACCEPTABLE))
                    }
                }
            }
            Node::E5 => {
                let has_header = self.request.header("accept-charset").is_some();
                self.trace.record(node, has_header);
                if has_header {
                    Ok(Next(Node::E6))
                } else {
                    let provided = self.values(Callback::CharsetsProvided)?;
                    self.request.acceptable_charset = provided.first().cloned();
                    Ok(Next(Node::F6))
                }
            }
            Node::E6 => {
                let provided = self.values(Callback::CharsetsProvided)?;
                let accept = self.request.header("accept-charset").unwrap_or("*").to_string();
                match negotiation::best_value(&provided, &accept) {
                    Some(chosen) => {
                        self.request.acceptable_charset = Some(chosen);
                        self.trace.record(node, true);
                        Ok(Next(Node::F6))
                    }
                    None => {
                        self.trace.record(node, false);
                        Ok(Done(StatusCode::NOT_ACCEPTABLE))
                    }
                }
            }
            Node::F6 => {
                let has_header = self.request.header("accept-encoding").is_some();
                self.trace.record(node, has_header);
                if has_header {
                    Ok(Next(Node::F7))
                } else {
                    self.request.acceptable_encoding = Some("identity".to_string());
                    Ok(Next(Node::G7))
                }
            }
            Node::F7 => {
                let provided: Vec<String> = self.encoding_names()?;
                let accept = self.request.header("accept-encoding").unwrap_or("identity").to_string();
                match negotiation::best_encoding(&provided, &accept) {
                    Some(chosen) => {
                        self.request.acceptable_encoding = Some(chosen);
                        self.trace.record(node, true);
                        Ok(Next(Node::G7))
                    }
                    None => {
                        self.trace.record(node, false);
                        Ok(Done(StatusCode::NOT_ACCEPTABLE))
                    }
                }
            }
            Node::G7 => {
                self.set_vary()?;
                self.branch(node, Callback::ResourceExists, Next(Node::G8), Next(Node::H7))
            }
            Node::G8 => {
                let present = self.request.header("if-match").is_some();
                self.trace.record(node, present);
                Ok(Next(if present { Node::G9 } else { Node::H10 }))
            }
            Node::G9 => {
                let star = self.request.header("if-match").map(str::trim) == Some("*");
                self.trace.record(node, star);
                Ok(Next(if star { Node::H10 } else { Node::G11 }))
            }
            Node::G11 => {
                let matched = self.etag_matches("if-match")?;
                self.trace.record(node, matched);
                Ok(if matched { Next(Node::H10) } else { Done(StatusCode::PRECONDITION_FAILED) })
            }
            Node::H7 => {
                let star = self.request.header("if-match").map(str::trim) == Some("*");
                self.trace.record(node, star);
                Ok(if star { Done(StatusCode::PRECONDITION_FAILED) } else { Next(Node::I7) })
            }
            Node::H10 => {
                let present = self.request.header("if-unmodified-since").is_some();
                self.trace.record(node, present);
                Ok(Next(if present { Node::H11 } else { Node::I12 }))
            }
            Node::H11 => {
                let parsed = self.request.header("if-unmodified-since").and_then(date::parse_http_date);
                self.trace.record(node, parsed.is_some());
                match parsed {
                    Some(when) => {
                        self.request.if_unmodified_since = Some(when);
                        Ok(Next(Node::H12))
                    }
                    // an unparseable date means the header is not usable
                    None => Ok(Next(Node::I12)),
                }
            }
            Node::H12 => {
                let last_modified = self.date_opt(Callback::LastModified)?;
                let outcome = match (last_modified, self.request.if_unmodified_since) {
                    (Some(modified), Some(since)) => modified > since,
                    _ => false,
                };
                self.trace.record(node, outcome);
                Ok(if outcome { Done(StatusCode::PRECONDITION_FAILED) } else { Next(Node::I12) })
            }
            Node::I4 => self.moved(node, Callback::MovedPermanently, StatusCode::MOVED_PERMANENTLY, Next(Node::P3)),
            Node::I7 => {
                let is_put = self.request.method() == Method::PUT;
                self.trace.record(node, is_put);
                Ok(Next(if is_put { Node::I4 } else { Node::K7 }))
            }
            Node::I12 => {
                let present = self.request.header("if-none-match").is_some();
                self.trace.record(node, present);
                Ok(Next(if present { Node::I13 } else { Node::L13 }))
            }
            Node::I13 => {
                let star = self.request.header("if-none-match").map(str::trim) == Some("*");
                self.trace.record(node, star);
                Ok(Next(if star { Node::J18 } else { Node::K13 }))
            }
            Node::J18 => {
                let read_only = matches!(self.request.method(), &Method::GET | &Method::HEAD);
                self.trace.record(node, read_only);
                Ok(Done(if read_only { StatusCode::NOT_MODIFIED } else { StatusCode::PRECONDITION_FAILED }))
            }
            Node::K5 => self.moved(node, Callback::MovedPermanently, StatusCode::MOVED_PERMANENTLY, Next(Node::L5)),
            Node::K7 => self.branch(node, Callback::PreviouslyExisted, Next(Node::K5), Next(Node::L7)),
            Node::K13 => {
                let matched = self.etag_matches("if-none-match")?;
                self.trace.record(node, matched);
                Ok(Next(if matched { Node::J18 } else { Node::L13 }))
            }
            Node::L5 => self.moved(node, Callback::MovedTemporarily, StatusCode::TEMPORARY_REDIRECT, Next(Node::M5)),
            Node::L7 => {
                let is_post = self.request.method() == Method::POST;
                self.trace.record(node, is_post);
                Ok(if is_post { Next(Node::M7) } else { Done(StatusCode::NOT_FOUND) })
            }
            Node::L13 => {
                let present = self.request.header("if-modified-since").is_some();
                self.trace.record(node, present);
                Ok(Next(if present { Node::L14 } else { Node::M16 }))
            }
            Node::L14 => {
                let parsed = self.request.header("if-modified-since").and_then(date::parse_http_date);
                self.trace.record(node, parsed.is_some());
                match parsed {
                    Some(when) => {
                        self.request.if_modified_since = Some(when);
                        Ok(Next(Node::L15))
                    }
                    None => Ok(Next(Node::M16)),
                }
            }
            Node::L15 => {
                // a date from the future makes the request unconditional
                let in_future = self.request.if_modified_since.is_some_and(|since| since > SystemTime::now());
                self.trace.record(node, in_future);
                Ok(Next(if in_future { Node::M16 } else { Node::L17 }))
            }
            Node::L17 => {
                let last_modified = self.date_opt(Callback::LastModified)?;
                let outcome = match (last_modified, self.request.if_modified_since) {
                    (Some(modified), Some(since)) => modified > since,
                    _ => false,
                };
                self.trace.record(node, outcome);
                Ok(if outcome { Next(Node::M16) } else { Done(StatusCode::NOT_MODIFIED) })
            }
            Node::M5 => {
                let is_post = self.request.method() == Method::POST;
                self.trace.record(node, is_post);
                Ok(if is_post { Next(Node::N5) } else { Done(StatusCode::GONE) })
            }
            Node::M7 => self.branch(node, Callback::AllowMissingPost, Next(Node::N11), Done(StatusCode::NOT_FOUND)),
            Node::M16 => {
                let is_delete = self.request.method() == Method::DELETE;
                self.trace.record(node, is_delete);
                Ok(Next(if is_delete { Node::M20 } else { Node::N16 }))
            }
            Node::M20 => {
                self.branch(node, Callback::DeleteResource, Next(Node::M20b), Done(StatusCode::INTERNAL_SERVER_ERROR))
            }
            Node::M20b => self.branch(node, Callback::DeleteCompleted, Next(Node::O20), Done(StatusCode::ACCEPTED)),
            Node::N5 => self.branch(node, Callback::AllowMissingPost, Next(Node::N11), Done(StatusCode::GONE)),
            Node::N11 => self.post_dispatch(node),
            Node::N16 => {
                let is_post = self.request.method() == Method::POST;
                self.trace.record(node, is_post);
                Ok(Next(if is_post { Node::N11 } else { Node::O16 }))
            }
            Node::O14 => match self.predicate(node, Callback::IsConflict)? {
                Decision::Truth(true) => Ok(Done(StatusCode::CONFLICT)),
                Decision::Truth(false) => {
                    assembler::materialize(self.request, self.resource, &mut self.response)?;
                    Ok(Next(Node::P11))
                }
                Decision::Forced(status) => Ok(Done(status)),
            },
            Node::O16 => {
                let is_put = self.request.method() == Method::PUT;
                self.trace.record(node, is_put);
                Ok(Next(if is_put { Node::O14 } else { Node::O18 }))
            }
            Node::O18 => {
                if matches!(self.request.method(), &Method::GET | &Method::HEAD) {
                    assembler::materialize(self.request, self.resource, &mut self.response)?;
                    self.caching_headers()?;
                }
                Ok(Next(Node::O18b))
            }
            Node::O18b => {
                self.branch(node, Callback::MultipleRepresentations, Done(StatusCode::MULTIPLE_CHOICES), Done(StatusCode::OK))
            }
            Node::O20 => {
                let has_body = self.response.has_body();
                self.trace.record(node, has_body);
                Ok(if has_body { Next(Node::O18) } else { Done(StatusCode::NO_CONTENT) })
            }
            Node::P3 => match self.predicate(node, Callback::IsConflict)? {
                Decision::Truth(true) => Ok(Done(StatusCode::CONFLICT)),
                Decision::Truth(false) => {
                    assembler::materialize(self.request, self.resource, &mut self.response)?;
                    Ok(Next(Node::P11))
                }
                Decision::Forced(status) => Ok(Done(status)),
            },
            Node::P11 => {
                let created = self.response.headers.contains("location");
                self.trace.record(node, created);
                Ok(if created { Done(StatusCode::CREATED) } else { Next(Node::O20) })
            }
        }
    }

    fn invoke(&mut self, callback: Callback) -> CallbackOut {
        self.resource.handlers.invoke(callback, self.request)
    }

    fn unexpected(&self, callback: Callback, out: &CallbackOut) -> StepError {
        StepError::violation(format!("{} returned an unexpected {}", callback.name(), out.kind()))
    }

    /// Interprets the common predicate shapes: a plain boolean, a forced
    /// status, or a partial response counting as true.
    fn predicate(&mut self, node: Node, callback: Callback) -> Result<Decision, StepError> {
        let decision = match self.invoke(callback) {
            CallbackOut::Bool(value) => Decision::Truth(value),
            CallbackOut::Status(status) => Decision::Forced(status),
            CallbackOut::Fragment(fragment) => {
                self.response.merge(fragment);
                Decision::Truth(true)
            }
            CallbackOut::Both(value, fragment) => {
                self.response.merge(fragment);
                Decision::Truth(value)
            }
            other => return Err(self.unexpected(callback, &other)),
        };
        if let Decision::Truth(outcome) = decision {
            self.trace.record(node, outcome);
        }
        Ok(decision)
    }

    fn branch(
        &mut self,
        node: Node,
        callback: Callback,
        yes: Transition,
        no: Transition,
    ) -> Result<Transition, StepError> {
        Ok(match self.predicate(node, callback)? {
            Decision::Truth(true) => yes,
            Decision::Truth(false) => no,
            Decision::Forced(status) => Transition::Done(status),
        })
    }

    fn methods(&mut self, callback: Callback) -> Result<Vec<Method>, StepError> {
        match self.invoke(callback) {
            CallbackOut::Methods(methods) => Ok(methods),
            other => Err(self.unexpected(callback, &other)),
        }
    }

    fn values(&mut self, callback: Callback) -> Result<Vec<String>, StepError> {
        match self.invoke(callback) {
            CallbackOut::Values(values) => Ok(values),
            other => Err(self.unexpected(callback, &other)),
        }
    }

    fn text_opt(&mut self, callback: Callback) -> Result<Option<String>, StepError> {
        match self.invoke(callback) {
            CallbackOut::Text(text) => Ok(Some(text)),
            CallbackOut::Nil => Ok(None),
            other => Err(self.unexpected(callback, &other)),
        }
    }

    fn date_opt(&mut self, callback: Callback) -> Result<Option<SystemTime>, StepError> {
        match self.invoke(callback) {
            CallbackOut::Date(when) => Ok(Some(when)),
            CallbackOut::Nil => Ok(None),
            other => Err(self.unexpected(callback, &other)),
        }
    }

    fn encoding_names(&mut self) -> Result<Vec<String>, StepError> {
        match self.invoke(Callback::EncodingsProvided) {
            CallbackOut::Encodings(encodings) => Ok(encodings.into_iter().map(|(name, _)| name).collect()),
            other => Err(self.unexpected(Callback::EncodingsProvided, &other)),
        }
    }

    /// Redirect probes (`moved-permanently?`, `moved-temporarily?`): a
    /// string is the new location, false means not moved.
    fn moved(
        &mut self,
        node: Node,
        callback: Callback,
        status: StatusCode,
        otherwise: Transition,
    ) -> Result<Transition, StepError> {
        match self.invoke(callback) {
            CallbackOut::Text(location) => {
                self.trace.record(node, true);
                self.response.headers.set("Location", location);
                Ok(Transition::Done(status))
            }
            CallbackOut::Bool(false) | CallbackOut::Nil => {
                self.trace.record(node, false);
                Ok(otherwise)
            }
            CallbackOut::Status(forced) => Ok(Transition::Done(forced)),
            other => Err(self.unexpected(callback, &other)),
        }
    }

    fn etag_matches(&mut self, header_name: &str) -> Result<bool, StepError> {
        let Some(etag) = self.text_opt(Callback::GenerateEtag)? else {
            return Ok(false);
        };
        let Some(header_value) = self.request.header(header_name).map(str::to_string) else {
            return Ok(false);
        };
        let matches = header::etag_members(&header_value).any(|member| member == header::unquote(&etag));
        Ok(matches)
    }

    /// The Vary header: engine-negotiated dimensions first, then
    /// resource-declared variances, deduplicated.
    fn set_vary(&mut self) -> Result<(), StepError> {
        let mut names: Vec<String> = Vec::new();
        if self.request.acceptable_type.is_some() {
            names.push("accept".to_string());
        }
        if self.request.acceptable_language.is_some() {
            names.push("accept-language".to_string());
        }
        if self.request.acceptable_charset.is_some() {
            names.push("accept-charset".to_string());
        }
        if self.request.acceptable_encoding.is_some() {
            names.push("accept-encoding".to_string());
        }
        for declared in self.values(Callback::Variances)? {
            names.push(declared);
        }

        let mut seen = Vec::new();
        names.retain(|name| {
            let fresh = !seen.iter().any(|kept: &String| kept.eq_ignore_ascii_case(name));
            if fresh {
                seen.push(name.clone());
            }
            fresh
        });

        if !names.is_empty() {
            self.response.headers.set("Vary", names.join(", "));
        }
        Ok(())
    }

    fn checksum_mismatch(&mut self) -> Transition {
        self.response.body = Some("content-md5 header does not match request body".into());
        Transition::Done(StatusCode::BAD_REQUEST)
    }

    /// Caching headers for GET/HEAD bodies: quoted ETag, Expires and
    /// Last-Modified in IMF-fixdate.
    fn caching_headers(&mut self) -> Result<(), StepError> {
        if let Some(etag) = self.text_opt(Callback::GenerateEtag)? {
            self.response.headers.set("ETag", header::quote(&etag));
        }
        if let Some(expires) = self.date_opt(Callback::Expires)? {
            self.response.headers.set("Expires", date::fmt_http_date(expires));
        }
        if let Some(modified) = self.date_opt(Callback::LastModified)? {
            self.response.headers.set("Last-Modified", date::fmt_http_date(modified));
        }
        Ok(())
    }

    /// N11: the POST dispatch.
    ///
    /// Creation rewrites the request into a PUT against the new path,
    /// materializes the representation, and answers 303 unless the
    /// responder forced another status. Plain processing delegates to
    /// `process-post`.
    fn post_dispatch(&mut self, node: Node) -> Result<Transition, StepError> {
        let create = match self.predicate(node, Callback::PostIsCreate)? {
            Decision::Truth(value) => value,
            Decision::Forced(status) => return Ok(Transition::Done(status)),
        };

        if create {
            let path = match self.invoke(Callback::CreatePath) {
                CallbackOut::Text(path) => path,
                other => {
                    return Err(StepError::violation(format!(
                        "create-path must return the new path when post-is-create? holds, got {}",
                        other.kind()
                    )))
                }
            };
            let target = join_uri(self.request.uri(), &path);
            let location = match self.text_opt(Callback::BaseUri)? {
                Some(base) => format!("{}{}", base.trim_end_matches('/'), target),
                None => target.clone(),
            };
            self.response.headers.set("Location", location);
            self.request.rewrite(Method::PUT, target);
            assembler::materialize(self.request, self.resource, &mut self.response)?;

            return Ok(match self.response.status {
                Some(status) if status != StatusCode::SEE_OTHER => {
                    self.response.headers.remove("location");
                    Transition::Done(status)
                }
                _ => Transition::Done(StatusCode::SEE_OTHER),
            });
        }

        match self.invoke(Callback::ProcessPost) {
            CallbackOut::Status(status) => Ok(Transition::Done(status)),
            CallbackOut::Bool(true) => Ok(Transition::Done(StatusCode::NO_CONTENT)),
            CallbackOut::Fragment(fragment) => {
                let status = fragment.status_code();
                self.response.merge(fragment);
                Ok(match status {
                    Some(status) => Transition::Done(status),
                    None => Transition::Next(Node::P11),
                })
            }
            CallbackOut::Bool(false) | CallbackOut::Nil => {
                Err(StepError::violation("process-post did not produce a result"))
            }
            other => Err(self.unexpected(Callback::ProcessPost, &other)),
        }
    }
}

/// Joins a request path and a created sub-path with exactly one slash.
fn join_uri(uri: &str, path: &str) -> String {
    format!("{}/{}", uri.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::join_uri;

    #[test]
    fn join_uri_normalizes_slashes() {
        assert_eq!(join_uri("/", "testing/new"), "/testing/new");
        assert_eq!(join_uri("/orders/", "/17"), "/orders/17");
        assert_eq!(join_uri("/orders", "17"), "/orders/17");
    }
}
