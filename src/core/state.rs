//! Server state tracking.
//!
//! Two orthogonal states:
//! - `SERVING`: Have the static paths been pre-generated? (startup complete)
//! - `SHUTDOWN`: Has shutdown been requested? (Ctrl+C received)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tiny_http::Server;

/// Startup pre-generation is done
/// - `false`: Answer episode routes with the loading page
/// - `true`: Serve from the page cache
static SERVING: AtomicBool = AtomicBool::new(false);

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// HTTP server reference for graceful shutdown
static SERVER: OnceLock<Arc<Server>> = OnceLock::new();

// =============================================================================
// SERVING state
// =============================================================================

/// Check if the site is ready to serve requests
pub fn is_serving() -> bool {
    SERVING.load(Ordering::SeqCst)
}

/// Mark the site as ready to serve (call after startup pre-generation)
pub fn set_serving() {
    SERVING.store(true, Ordering::SeqCst);
}

// =============================================================================
// SHUTDOWN state
// =============================================================================

/// Setup the global Ctrl+C handler. Call once at program start
///
/// The handler behavior depends on whether a server has been registered:
/// - Before `register_server()`: exit immediately
/// - After `register_server()`: unblock the request loop so `serve` returns
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if let Some(server) = SERVER.get() {
            crate::log!("serve"; "shutting down...");
            server.unblock();
        } else {
            // Nothing to drain: `build` and `fetch` hold no server.
            std::process::exit(0);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register the HTTP server for graceful shutdown
///
/// Call this after binding the server, before entering the request loop
pub fn register_server(server: Arc<Server>) {
    let _ = SERVER.set(server);
}

/// Check if shutdown has been requested
///
/// Uses Relaxed ordering: worst case a few more requests are handled
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serving() {
        set_serving();
        assert!(is_serving());
    }

    #[test]
    fn test_not_shutdown_by_default() {
        assert!(!is_shutdown());
    }
}
