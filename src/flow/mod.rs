//! The HTTP decision flow.
//!
//! Request handling is a walk over the labeled decision diagram: each node
//! consults at most one resource callback, merges whatever partial
//! response the callback contributed, and either hands off to a successor
//! node or terminates with a status code. The walk is an explicit loop
//! over a [`Node`] enumeration; there is no recursion and no trampoline.
//!
//! [`run`] is the single entry point: it walks a prepared request against
//! a resource and returns the finished response. Only request-body I/O
//! errors escape as `Err`; callback protocol violations become synthetic
//! 500 responses carrying the decision trace.

mod step;

use crate::assembler;
use crate::error::{BishopError, StepError};
use crate::request::Request;
use crate::resource::{Resource, Table};
use crate::response::{Body, Response};
use http::StatusCode;
use std::fmt;
use tracing::{trace, warn};

/// The labeled nodes of the decision diagram. B13 is the entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    B13,
    B12,
    B11,
    B10,
    B9,
    B9a,
    B9b,
    B8,
    B7,
    B6,
    B5,
    B4,
    B3,
    C3,
    C4,
    D4,
    D5,
    E5,
    E6,
    F6,
    F7,
    G7,
    G8,
    G9,
    G11,
    H7,
    H10,
    H11,
    H12,
    I4,
    I7,
    I12,
    I13,
    J18,
    K5,
    K7,
    K13,
    L5,
    L7,
    L13,
    L14,
    L15,
    L17,
    M5,
    M7,
    M16,
    M20,
    M20b,
    N5,
    N11,
    N16,
    O14,
    O16,
    O18,
    O18b,
    O20,
    P3,
    P11,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format!("{self:?}").to_ascii_lowercase())
    }
}

/// Outcome of one decision step.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Transition {
    Next(Node),
    Done(StatusCode),
}

/// The ordered record of visited nodes and their boolean outcomes.
/// Surfaced only in the body of synthetic 500 responses.
#[derive(Debug, Default)]
pub(crate) struct Trace {
    visits: Vec<(Node, bool)>,
}

impl Trace {
    pub(crate) fn record(&mut self, node: Node, outcome: bool) {
        self.visits.push((node, outcome));
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (node, outcome) in &self.visits {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{node}:{outcome}")?;
            first = false;
        }
        Ok(())
    }
}

pub(crate) struct Flow<'a> {
    request: &'a mut Request,
    resource: &'a Resource,
    response: Response,
    trace: Trace,
}

/// Walks the decision flow for one request against one resource.
///
/// The request's scratch fields are filled in as negotiation proceeds;
/// the returned response always carries a status code. The only `Err`
/// this function produces is an I/O failure while draining the request
/// body for checksum validation.
pub fn run(request: &mut Request, resource: &Resource) -> Result<Response, BishopError> {
    match &resource.table {
        Table::Halt(status, fragment) => {
            let mut response = Response::new();
            if let Some(fragment) = fragment {
                response.merge(fragment.clone());
            }
            response.status = Some(*status);
            response.headers.canonicalize();
            return Ok(response);
        }
        Table::Error(term) => {
            let mut response = Response::new();
            response.status = Some(StatusCode::INTERNAL_SERVER_ERROR);
            response.body = Some(Body::from(term.clone()));
            return Ok(response);
        }
        Table::Representations(_) => {}
    }

    let mut flow = Flow { request, resource, response: Response::new(), trace: Trace::default() };
    let mut node = Node::B13;
    let status = loop {
        match flow.step(node) {
            Ok(Transition::Next(next)) => {
                trace!(from = %node, to = %next, "transition");
                node = next;
            }
            Ok(Transition::Done(status)) => {
                trace!(node = %node, status = status.as_u16(), "terminal");
                break status;
            }
            Err(StepError::Violation { reason }) => {
                warn!(node = %node, %reason, "callback protocol violation");
                return Ok(violation_response(&reason, &flow.trace));
            }
            Err(StepError::Io { source }) => return Err(BishopError::from(source)),
        }
    };

    let Flow { request, resource, mut response, trace } = flow;
    if response.status.is_none() {
        response.status = Some(status);
    }

    if let Err(error) = assembler::finalize(request, resource, &mut response) {
        match error {
            StepError::Violation { reason } => {
                warn!(%reason, "callback protocol violation while finalizing");
                return Ok(violation_response(&reason, &trace));
            }
            StepError::Io { source } => return Err(BishopError::from(source)),
        }
    }
    Ok(response)
}

fn violation_response(reason: &str, trace: &Trace) -> Response {
    let mut response = Response::new();
    response.status = Some(StatusCode::INTERNAL_SERVER_ERROR);
    response.body = Some(Body::from(format!("{reason}\n\ndecision trace: {trace}")));
    response
}
