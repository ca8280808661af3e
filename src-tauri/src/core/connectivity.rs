use crate::core::app_log;
use crate::core::ui_emit;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tauri::AppHandle;
use tokio::net::TcpStream;

pub const NO_CONNECTIVITY_EVENT: &str = "showNoConnectivityError";

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);
const LOG_SCOPE: &str = "connectivity";

/// Public DNS resolvers; any one accepting a TCP connection counts as online.
const PROBE_TARGETS: [SocketAddr; 3] = [
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)), 53),
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53),
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(208, 67, 222, 222)), 53),
];

pub async fn is_online(targets: &[SocketAddr], timeout: Duration) -> bool {
    for target in targets {
        if let Ok(Ok(_)) = tokio::time::timeout(timeout, TcpStream::connect(target)).await {
            return true;
        }
    }
    false
}

/// Detached: nobody awaits the result. The only effect is one event to the
/// main window when offline.
pub fn spawn_probe(app_handle: AppHandle) {
    tauri::async_runtime::spawn(async move {
        if is_online(&PROBE_TARGETS, PROBE_TIMEOUT).await {
            app_log::info(LOG_SCOPE, "got access to the internet");
            return;
        }
        app_log::error(LOG_SCOPE, "got no access to the internet");
        ui_emit::emit_to_main(&app_handle, NO_CONNECTIVITY_EVENT, ());
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn reachable_listener_counts_as_online() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        assert!(is_online(&[addr], Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn closed_ports_count_as_offline() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
            listener.local_addr().expect("addr")
        };
        assert!(!is_online(&[addr], Duration::from_millis(500)).await);
        assert!(!is_online(&[], Duration::from_millis(500)).await);
    }
}
