//! Background XML transform worker
//!
//! This module runs structured-markup pretty-printing off the main line of
//! control. Requests and replies travel over `std::sync::mpsc` channels;
//! the worker never shares mutable state with the caller. Replies carry the
//! entry key and the requesting pane id so the caller can match them even
//! when multiple requests complete out of order.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use thiserror::Error;

use crate::split::PaneId;

/// Sender for transform requests (thread-safe, non-async)
pub type TransformRequestSender = Sender<TransformRequest>;

/// Receiver for transform replies (thread-safe, non-async)
pub type TransformReplyReceiver = Receiver<TransformReply>;

/// Default number of worker threads.
pub const DEFAULT_TRANSFORM_WORKERS: usize = 1;

/// Indentation applied per nesting level of formatted XML.
const INDENT_SIZE: usize = 2;

/// Errors that can occur while formatting or talking to the worker
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The input is not well-formed XML
    #[error("XML parse error: {0}")]
    Parse(String),

    /// Writing the formatted output failed
    #[error("Failed to write formatted output: {0}")]
    Write(String),

    /// The formatted output is not valid UTF-8
    #[error("Formatted output is not valid UTF-8")]
    Utf8,

    /// The worker pool has already been started
    #[error("Transform worker already started")]
    AlreadyStarted,

    /// The worker pool has not been started
    #[error("Transform worker not started")]
    NotStarted,

    /// A channel to the worker pool is closed
    #[error("Transform channel closed: {0}")]
    Channel(String),
}

/// A request to format one entry's text for one pane.
#[derive(Debug, Clone)]
pub struct TransformRequest {
    /// Raw entry text to format
    pub text: String,
    /// Entry key the text came from
    pub key: String,
    /// Name shown on the tab once the reply lands
    pub display_name: String,
    /// Pane that asked for the content
    pub pane: PaneId,
}

/// Outcome of one transform request.
///
/// Both variants carry the key and pane so replies can be routed no matter
/// the order they arrive in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformReply {
    /// The text was formatted
    Success {
        /// Entry key from the request
        key: String,
        /// Pane from the request
        pane: PaneId,
        /// Formatted text
        transformed: String,
    },
    /// Formatting failed
    Failure {
        /// Entry key from the request
        key: String,
        /// Pane from the request
        pane: PaneId,
        /// What went wrong
        error: TransformError,
    },
}

impl TransformReply {
    /// The entry key this reply answers.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Success { key, .. } | Self::Failure { key, .. } => key,
        }
    }

    /// The pane this reply targets.
    #[must_use]
    pub const fn pane(&self) -> PaneId {
        match self {
            Self::Success { pane, .. } | Self::Failure { pane, .. } => *pane,
        }
    }
}

/// Handle to a pool of background formatting threads.
///
/// Requests are submitted non-blocking and replies polled non-blocking, so
/// the single-threaded workspace loop never stalls on a slow format. The
/// pool shuts down when the handle is dropped or [`shutdown`] is called;
/// worker threads exit once the request channel closes.
///
/// [`shutdown`]: Self::shutdown
#[derive(Debug)]
pub struct TransformWorker {
    /// Channel for submitting requests (None until started)
    request_tx: Option<Sender<TransformRequest>>,
    /// Channel for polling replies (None until started)
    reply_rx: Option<Receiver<TransformReply>>,
    /// Number of threads spawned on start
    worker_count: usize,
}

impl TransformWorker {
    /// Creates a stopped pool with one worker thread.
    #[must_use]
    pub fn new() -> Self {
        Self::with_workers(DEFAULT_TRANSFORM_WORKERS)
    }

    /// Creates a stopped pool with the given number of worker threads.
    ///
    /// A count of zero is treated as one.
    #[must_use]
    pub fn with_workers(worker_count: usize) -> Self {
        Self {
            request_tx: None,
            reply_rx: None,
            worker_count: worker_count.max(1),
        }
    }

    /// Spawns the worker threads.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::AlreadyStarted`] if the pool is running.
    pub fn start(&mut self) -> Result<(), TransformError> {
        if self.request_tx.is_some() {
            return Err(TransformError::AlreadyStarted);
        }

        let (request_tx, request_rx) = std::sync::mpsc::channel::<TransformRequest>();
        let (reply_tx, reply_rx) = std::sync::mpsc::channel::<TransformReply>();
        let request_rx = Arc::new(Mutex::new(request_rx));

        for worker in 0..self.worker_count {
            let requests = Arc::clone(&request_rx);
            let replies = reply_tx.clone();
            std::thread::spawn(move || {
                tracing::debug!(worker, "transform worker started");
                worker_loop(&requests, &replies);
                tracing::debug!(worker, "transform worker stopped");
            });
        }

        self.request_tx = Some(request_tx);
        self.reply_rx = Some(reply_rx);
        Ok(())
    }

    /// Returns true while the pool is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.request_tx.is_some()
    }

    /// Returns the number of worker threads the pool spawns.
    #[must_use]
    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Submits a request to the pool (non-blocking).
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NotStarted`] if the pool is stopped, or
    /// [`TransformError::Channel`] if every worker has exited.
    pub fn submit(&self, request: TransformRequest) -> Result<(), TransformError> {
        let tx = self.request_tx.as_ref().ok_or(TransformError::NotStarted)?;
        tx.send(request)
            .map_err(|e| TransformError::Channel(e.to_string()))
    }

    /// Polls for the next reply (non-blocking).
    ///
    /// Returns `None` if no reply is ready or the pool is stopped.
    #[must_use]
    pub fn try_recv_reply(&self) -> Option<TransformReply> {
        self.reply_rx.as_ref()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next reply.
    ///
    /// Returns `None` on timeout or if the pool is stopped.
    #[must_use]
    pub fn recv_reply_timeout(&self, timeout: Duration) -> Option<TransformReply> {
        self.reply_rx.as_ref()?.recv_timeout(timeout).ok()
    }

    /// Stops the pool. Worker threads exit once they drain the channel;
    /// undelivered replies are discarded.
    pub fn shutdown(&mut self) {
        self.request_tx = None;
        self.reply_rx = None;
    }
}

impl Default for TransformWorker {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives requests until the channel closes, formatting each one.
fn worker_loop(
    requests: &Arc<Mutex<Receiver<TransformRequest>>>,
    replies: &Sender<TransformReply>,
) {
    loop {
        let request = {
            let Ok(rx) = requests.lock() else {
                return;
            };
            rx.recv()
        };
        let Ok(request) = request else {
            return;
        };

        tracing::trace!(
            key = %request.key,
            pane = %request.pane,
            name = %request.display_name,
            bytes = request.text.len(),
            "formatting entry"
        );

        let reply = match format_xml(&request.text) {
            Ok(transformed) => TransformReply::Success {
                key: request.key,
                pane: request.pane,
                transformed,
            },
            Err(error) => {
                tracing::debug!(key = %request.key, error = %error, "format failed");
                TransformReply::Failure {
                    key: request.key,
                    pane: request.pane,
                    error,
                }
            }
        };

        if replies.send(reply).is_err() {
            return;
        }
    }
}

/// Pretty-prints an XML document with two-space indentation.
///
/// Whitespace-only text between elements is dropped and rebuilt from the
/// element nesting; text with content stays inline with its element.
///
/// # Errors
///
/// Returns [`TransformError::Parse`] for malformed input.
pub fn format_xml(text: &str) -> Result<String, TransformError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => writer
                .write_event(event)
                .map_err(|e| TransformError::Write(e.to_string()))?,
            Err(e) => return Err(TransformError::Parse(e.to_string())),
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|_| TransformError::Utf8)
}
