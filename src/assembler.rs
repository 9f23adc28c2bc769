//! Response assembly: materializing the chosen representation and putting
//! the final polish on the accumulator before it leaves the engine.
//!
//! Materialization runs mid-walk, at the nodes that need a body (O18 for
//! GET/HEAD, the conflict-check fallthroughs for PUT, the create branch of
//! N11). Finalization runs once, after the walk terminates: Content-Type,
//! output encoding, and canonical header names.

use crate::error::StepError;
use crate::request::Request;
use crate::resource::{Callback, CallbackOut, Resource, Responder, ResponderOut};
use crate::response::Response;
use tracing::debug;

/// Runs the responder for the negotiated media type and folds its output
/// into the accumulator.
pub(crate) fn materialize(request: &mut Request, resource: &Resource, response: &mut Response) -> Result<(), StepError> {
    let media_type = match request.acceptable_type() {
        Some(media_type) => media_type.to_string(),
        None => return Err(StepError::violation("no media type negotiated before materializing a body")),
    };

    let responder = resource
        .responder_for(&media_type)
        .ok_or_else(|| StepError::violation(format!("no representation provided for {media_type}")))?
        .clone();

    match responder {
        Responder::Literal(body) => response.body = Some(body),
        Responder::Partial(fragment) => response.merge(fragment),
        Responder::Func(f) => match f(request) {
            ResponderOut::Body(body) => response.body = Some(body),
            ResponderOut::Fragment(fragment) => response.merge(fragment),
        },
    }
    Ok(())
}

/// Finalizes the response: Content-Type with the negotiated charset,
/// non-identity output encoding, canonical header names.
pub(crate) fn finalize(request: &mut Request, resource: &Resource, response: &mut Response) -> Result<(), StepError> {
    finalize_content_type(request, response);
    apply_encoding(request, resource, response)?;
    response.headers.canonicalize();
    debug!(status = ?response.status, "response finalized");
    Ok(())
}

fn finalize_content_type(request: &Request, response: &mut Response) {
    let Some(media_type) = request.acceptable_type() else {
        return;
    };

    let existing = response.headers.get("content-type").map(str::to_string);
    match existing {
        None => {
            let value = match request.acceptable_charset() {
                Some(charset) => format!("{media_type}; charset={charset}"),
                None => media_type.to_string(),
            };
            response.headers.set("Content-Type", value);
        }
        // an explicit charset set by an earlier stage is preserved
        Some(existing) if !existing.contains("charset=") => {
            if let Some(charset) = request.acceptable_charset() {
                let value = format!("{existing}; charset={charset}");
                response.headers.set("Content-Type", value);
            }
        }
        Some(_) => {}
    }
}

fn apply_encoding(request: &mut Request, resource: &Resource, response: &mut Response) -> Result<(), StepError> {
    let Some(encoding) = request.acceptable_encoding().map(str::to_string) else {
        return Ok(());
    };
    if encoding == "identity" || !response.has_body() {
        return Ok(());
    }

    let encoder = match resource.handlers.invoke(Callback::EncodingsProvided, request) {
        CallbackOut::Encodings(encodings) => encodings
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&encoding))
            .map(|(_, encoder)| encoder)
            .ok_or_else(|| StepError::violation(format!("negotiated encoding {encoding} is not provided"))),
        other => {
            Err(StepError::violation(format!("encodings-provided returned {} instead of encodings", other.kind())))
        }
    }?;

    if let Some(body) = response.body.take() {
        response.body = Some(encoder.encode(body.into_bytes())?.into());
        response.headers.set("Content-Encoding", encoding);
    }
    Ok(())
}
