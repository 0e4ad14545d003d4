//! Termination signals turned into cancellation of the running transformer.

use std::future::Future;
use std::io;
use std::thread;

use jsxt_platform::CancelToken;
use tokio::runtime::{Builder, Runtime};

/// Cancel `token` on the first SIGINT or SIGTERM.
///
/// Handlers are registered before this returns; the wait happens on a
/// background thread driving a single-threaded runtime.
#[cfg(unix)]
pub fn cancel_on_signal(token: CancelToken) -> io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let runtime = Builder::new_current_thread().enable_all().build()?;
    let (mut interrupt, mut terminate) = {
        let _guard = runtime.enter();
        (
            signal(SignalKind::interrupt())?,
            signal(SignalKind::terminate())?,
        )
    };

    spawn_listener(runtime, token, async move {
        tokio::select! {
            _ = interrupt.recv() => "SIGINT",
            _ = terminate.recv() => "SIGTERM",
        }
    })
}

/// Cancel `token` on the first Ctrl-C.
#[cfg(not(unix))]
pub fn cancel_on_signal(token: CancelToken) -> io::Result<()> {
    let runtime = Builder::new_current_thread().enable_all().build()?;
    spawn_listener(runtime, token, async {
        let _ = tokio::signal::ctrl_c().await;
        "Ctrl-C"
    })
}

fn spawn_listener<F>(runtime: Runtime, token: CancelToken, signal: F) -> io::Result<()>
where
    F: Future<Output = &'static str> + Send + 'static,
{
    thread::Builder::new()
        .name("jsxt-signals".to_string())
        .spawn(move || {
            let name = runtime.block_on(signal);
            tracing::warn!("{name} received, stopping the JSX transformer");
            token.cancel();
        })?;
    Ok(())
}
