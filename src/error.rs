//! Error types for the decision flow engine.
//!
//! Only one kind of failure ever escapes [`run`](crate::flow::run): an I/O
//! error raised while draining the request body for checksum validation.
//! Every other abnormal condition is translated into an HTTP status by the
//! node that detected it, or folded into a synthetic 500 response carrying
//! the decision trace.

use std::io;
use thiserror::Error;

/// The error type returned by the engine API.
#[derive(Debug, Error)]
pub enum BishopError {
    /// I/O error while reading the request body
    #[error("error reading request body: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Abnormal outcome of a single decision step.
///
/// `Violation` means a callback returned a shape its call site does not
/// accept; the engine converts it into a 500 response rather than leaking
/// it to the host.
#[derive(Debug, Error)]
pub(crate) enum StepError {
    #[error("callback protocol violation: {reason}")]
    Violation { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl StepError {
    /// Creates a new Violation error
    pub(crate) fn violation<S: ToString>(reason: S) -> Self {
        Self::Violation { reason: reason.to_string() }
    }
}
