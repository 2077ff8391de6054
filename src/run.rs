//! Application execution logic.
//!
//! This module wires the validated configuration into a [`Watcher`] and
//! runs it until a shutdown signal arrives.

use std::future::Future;

use thiserror::Error;
use tokio::signal;

use ifwatch::config::{RestfulTarget, WatchConfig};
use ifwatch::network::filter::FilteredSource;
use ifwatch::network::platform::PlatformSource;
use ifwatch::notify::{ReqwestClient, RestfulNotifier};
use ifwatch::output::FileOutput;
use ifwatch::watcher::Watcher;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to install an OS signal handler.
    #[error("Failed to install {signal} handler: {source}")]
    SignalHandler {
        /// Name of the signal
        signal: &'static str,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Executes the main application loop.
///
/// This function:
/// 1. Creates the interface source with the configured name filter
/// 2. Creates the snapshot file output
/// 3. Creates the notifier (if a REST endpoint is configured)
/// 4. Polls until a shutdown signal (Ctrl+C or SIGTERM)
///
/// # Errors
///
/// Returns an error if a signal handler cannot be installed.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Platform-specific network APIs
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: WatchConfig) -> Result<(), RunError> {
    let shutdown = shutdown_signal()?;

    let notifier = config.restful.as_ref().map(create_notifier);
    let source = FilteredSource::new(PlatformSource::new(), config.filter);
    let output = FileOutput::new(config.output);

    match &notifier {
        None => tracing::debug!("No restful url configured, notifications disabled"),
        Some(notifier) => warn_if_unbuildable(notifier),
    }
    tracing::info!(
        "Watching network interfaces (interval: {}s)",
        config.interval.as_secs()
    );

    let mut watcher = Watcher::new(source, output, notifier);
    watcher.run(config.interval, shutdown).await;

    Ok(())
}

/// Creates the REST notifier for a configured target.
fn create_notifier(target: &RestfulTarget) -> RestfulNotifier<ReqwestClient> {
    RestfulNotifier::new(ReqwestClient::new(), target.url.clone())
        .with_method(target.method.clone())
        .with_header(target.header.clone())
}

/// Logs once at startup when the configured target cannot form a request.
///
/// Every notification will fail the same way and be logged; the snapshot
/// file is still maintained.
fn warn_if_unbuildable<H>(notifier: &RestfulNotifier<H>) {
    if let Err(e) = notifier.build_request(&[]) {
        tracing::warn!("restful notifications will fail: {e}");
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Handlers are installed eagerly so that a failure is reported before
/// the first poll instead of being discovered later.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
fn shutdown_signal() -> Result<impl Future<Output = ()>, RunError> {
    #[cfg(unix)]
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate()).map_err(
        |source| RunError::SignalHandler {
            signal: "SIGTERM",
            source,
        },
    )?;

    Ok(async move {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            terminate.recv().await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {}
            () = terminate => {}
        }
    })
}
