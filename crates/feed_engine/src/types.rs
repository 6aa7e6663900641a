use std::fmt;

use swipe_core::{JobListing, TimerId};

use crate::decode::FallbackReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    JobsFetched(Result<FetchedJobs, FetchError>),
    TimerElapsed { timer: TimerId },
}

/// Decoded listings plus a record of everything that needed a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchedJobs {
    pub listings: Vec<JobListing>,
    pub report: DecodeReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodeReport {
    /// Records present in the response, including skipped ones.
    pub records: usize,
    /// Records that were not JSON objects and were dropped.
    pub skipped: usize,
    pub fallbacks: Vec<FieldFallback>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFallback {
    /// Path such as `job[3].benefits`.
    pub field: String,
    pub reason: FallbackReason,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    /// Body was not a JSON array of records.
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "malformed job list"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
