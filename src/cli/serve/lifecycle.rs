//! Server lifecycle management.

use crate::{core::register_server, log};
use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use tiny_http::Server;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind to the specified interface and port, with automatic port retry.
///
/// Port 0 asks the OS for a free port and is never retried.
pub fn bind_with_retry(
    interface: std::net::IpAddr,
    base_port: u16,
) -> Result<(Server, SocketAddr)> {
    let attempts = if base_port == 0 { 1 } else { MAX_PORT_RETRIES };
    let mut last_error = None;

    for offset in 0..attempts {
        let port = base_port.saturating_add(offset);
        match Server::http(SocketAddr::new(interface, port)) {
            Ok(server) => {
                let addr = server
                    .server_addr()
                    .to_ip()
                    .unwrap_or_else(|| SocketAddr::new(interface, port));
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        attempts,
        base_port,
        base_port.saturating_add(attempts - 1),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Register server for graceful shutdown.
///
/// When Ctrl+C is pressed, the handler installed in `main` unblocks it.
pub fn register_server_for_shutdown(server: Arc<Server>) {
    register_server(server);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[test]
    fn test_bind_ephemeral_port() {
        let (_server, addr) = bind_with_retry(LOCALHOST, 0).unwrap();
        assert_ne!(addr.port(), 0);
    }

    #[test]
    fn test_bind_skips_taken_port() {
        let (_taken, taken_addr) = bind_with_retry(LOCALHOST, 0).unwrap();
        let (_server, addr) = bind_with_retry(LOCALHOST, taken_addr.port()).unwrap();
        assert_ne!(addr.port(), taken_addr.port());
    }
}
