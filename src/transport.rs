//! Where serialized command strings go.
//!
//! Sending is fire-and-forget: [`Transport::send`] returns immediately and the
//! caller never sees whether the plotter received anything. Failures are only
//! logged.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use enum_dispatch::enum_dispatch;
use reqwest::Client;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::log::{info, warn};

#[enum_dispatch]
pub trait Transport {
    /// Hand `body` off for delivery to `url`.
    fn send(&self, url: &str, body: String);
}

/// All transports, dispatched statically.
#[enum_dispatch(Transport)]
#[derive(Debug)]
pub enum AnyTransport {
    Http(HttpTransport),
    Recording(RecordingTransport),
    Stdout(StdoutTransport),
}

/// POSTs each body as raw text on a tokio runtime.
///
/// Requests are spawned onto the runtime the transport was built with. The
/// handles are kept so a short-lived process can wait for them with
/// [`HttpTransport::wait_idle`] before exiting.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    runtime: Handle,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl HttpTransport {
    pub fn new(runtime: Handle) -> Self {
        Self {
            client: Client::new(),
            runtime,
            in_flight: Mutex::new(Vec::new()),
        }
    }

    /// Transport on the runtime the caller is running in, if any.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    fn in_flight(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait until every request sent so far has finished, successfully or not.
    pub async fn wait_idle(&self) {
        let pending = std::mem::take(&mut *self.in_flight());
        for handle in pending {
            if let Err(err) = handle.await {
                warn!(%err, "post task did not complete");
            }
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, url: &str, body: String) {
        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(body);
        let url = url.to_owned();
        let handle = self.runtime.spawn(async move {
            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    info!(%url, status = %response.status(), "post succeeded");
                }
                Ok(response) => {
                    warn!(%url, status = %response.status(), "plotter rejected post");
                }
                Err(err) => {
                    warn!(%url, %err, "post failed");
                }
            }
        });
        let mut in_flight = self.in_flight();
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(handle);
    }
}

/// A request captured by [`RecordingTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostRequest {
    pub url: String,
    pub body: String,
}

/// Keeps every request in memory. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<PostRequest>>>,
}

impl RecordingTransport {
    /// Everything sent so far, oldest first
    pub fn requests(&self) -> Vec<PostRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, url: &str, body: String) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(PostRequest {
                url: url.to_owned(),
                body,
            });
    }
}

/// Prints requests instead of sending them (dry runs).
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutTransport;

impl Transport for StdoutTransport {
    fn send(&self, url: &str, body: String) {
        println!("POST {url}\n{body}");
    }
}
