//! The polling loop: enumerate, diff and persist, notify.
//!
//! [`Watcher`] owns the only mutable state of the program, the encoded
//! snapshot that was last accepted ([`LatestBytes`]). Each [`Watcher::tick`]
//! captures a new snapshot, compares its encoding with that state and, on a
//! difference, writes the new bytes and optionally sends them to the
//! notification endpoint. Every failure is logged and absorbed; nothing is
//! retried.

use std::future::Future;
use std::time::Duration;

use crate::network::InterfaceSource;
use crate::notify::Notifier;
use crate::output::SnapshotWriter;
use crate::snapshot::{capture, encode};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// The encoded snapshot last accepted by the watcher.
///
/// Empty until the first successful capture, which is therefore always
/// treated as a change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestBytes(Option<Vec<u8>>);

impl LatestBytes {
    /// Returns true until a snapshot has been accepted.
    #[must_use]
    pub const fn is_first_run(&self) -> bool {
        self.0.is_none()
    }

    /// Returns true if `bytes` equal the accepted snapshot.
    #[must_use]
    pub fn matches(&self, bytes: &[u8]) -> bool {
        self.0.as_deref() == Some(bytes)
    }

    /// Returns the accepted bytes, if any.
    #[must_use]
    pub fn get(&self) -> Option<&[u8]> {
        self.0.as_deref()
    }

    /// Accepts `bytes` as the new reference and returns them.
    fn replace(&mut self, bytes: Vec<u8>) -> &[u8] {
        self.0.insert(bytes)
    }
}

/// Outcome of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iteration {
    /// The interface list could not be read; state is untouched.
    FetchFailed,
    /// The snapshot could not be encoded; state is untouched.
    EncodeFailed,
    /// The snapshot encodes to the accepted bytes; nothing was written or sent.
    Unchanged,
    /// The snapshot changed but writing it failed.
    ///
    /// The new bytes are already accepted, so the same interface state on
    /// the next poll is reported as [`Iteration::Unchanged`] and the write
    /// is not attempted again.
    WriteFailed,
    /// The snapshot changed and was written.
    Published {
        /// Whether a notification was attempted (regardless of its outcome).
        notified: bool,
    },
}

impl Iteration {
    /// Returns true if new bytes were written to the output.
    #[must_use]
    pub const fn is_published(self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Sequential snapshot watcher.
///
/// # Type Parameters
///
/// * `S` - The [`InterfaceSource`] to poll (usually already name-filtered)
/// * `W` - The [`SnapshotWriter`] receiving changed snapshots
/// * `N` - The [`Notifier`] used when a notification endpoint is configured
#[derive(Debug)]
pub struct Watcher<S, W, N> {
    source: S,
    writer: W,
    notifier: Option<N>,
    latest: LatestBytes,
}

impl<S, W, N> Watcher<S, W, N> {
    /// Creates a watcher in the "first run" state.
    #[must_use]
    pub fn new(source: S, writer: W, notifier: Option<N>) -> Self {
        Self {
            source,
            writer,
            notifier,
            latest: LatestBytes::default(),
        }
    }

    /// Returns the interface source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the snapshot writer.
    #[must_use]
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Returns the notifier, if notifications are enabled.
    #[must_use]
    pub const fn notifier(&self) -> Option<&N> {
        self.notifier.as_ref()
    }

    /// Returns the accepted snapshot bytes.
    #[must_use]
    pub const fn latest(&self) -> &LatestBytes {
        &self.latest
    }
}

impl<S, W, N> Watcher<S, W, N>
where
    S: InterfaceSource,
    W: SnapshotWriter,
    N: Notifier,
{
    /// Runs one poll: capture, compare, write, notify.
    ///
    /// Strictly sequential; the notification (if any) has completed or
    /// failed by the time this returns.
    pub async fn tick(&mut self) -> Iteration {
        let snapshot = match capture(&self.source) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("{e}");
                return Iteration::FetchFailed;
            }
        };

        let bytes = match encode(&snapshot) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("{e}");
                return Iteration::EncodeFailed;
            }
        };

        if self.latest.matches(&bytes) {
            tracing::debug!("No change in {} interface(s)", snapshot.len());
            return Iteration::Unchanged;
        }

        let current = self.latest.replace(bytes);

        if let Err(e) = self.writer.write(current).await {
            tracing::error!("{e}");
            return Iteration::WriteFailed;
        }

        let notified = match &self.notifier {
            Some(notifier) => {
                send_notification(notifier, current).await;
                true
            }
            None => false,
        };

        tracing::info!("ip lookup success ({} interface(s))", snapshot.len());
        Iteration::Published { notified }
    }

    /// Polls forever, sleeping `interval` between polls.
    ///
    /// The first poll happens immediately. `shutdown` is only observed while
    /// sleeping, so a poll in progress always runs to completion.
    pub async fn run<F>(&mut self, interval: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            self.tick().await;

            tokio::select! {
                biased;

                () = &mut shutdown => {
                    tracing::info!("Shutdown signal received, stopping...");
                    return;
                }

                () = tokio::time::sleep(interval) => {}
            }
        }
    }
}

/// Sends one notification and logs its outcome.
async fn send_notification<N: Notifier>(notifier: &N, body: &[u8]) {
    match notifier.notify(body).await {
        Ok(response) => {
            tracing::info!("restful response status: {}", response.status);
        }
        Err(e) => {
            tracing::error!("restful request failed: {e}");
        }
    }
}
