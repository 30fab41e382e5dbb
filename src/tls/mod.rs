//! TLS handshake probing.
//!
//! Establishes a webpki-verified TLS connection to the target host on port
//! 443. The transport signal only needs to know whether a verified handshake
//! succeeds; certificate fields are not surfaced.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use crate::config::{TCP_CONNECT_TIMEOUT_SECS, TLS_HANDSHAKE_TIMEOUT_SECS};

/// Attempts a verified TLS handshake with `host:443`.
///
/// # Errors
///
/// Returns an error if the host name is invalid, the TCP connection fails
/// or times out, or the handshake fails verification. Callers map any error
/// to the "https but unverifiable" signal value.
pub async fn probe_tls(host: &str) -> Result<()> {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let server_name = ServerName::try_from(host.to_string())
        .map_err(|e| anyhow::anyhow!("Invalid server name {host}: {e}"))?;

    let sock = match tokio::time::timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        TcpStream::connect((host.to_string(), 443)),
    )
    .await
    {
        Ok(Ok(sock)) => sock,
        Ok(Err(e)) => return Err(anyhow::anyhow!("Failed to connect to {host}:443 - {e}")),
        Err(_) => {
            return Err(anyhow::anyhow!(
                "TCP connection timeout for {host}:443 ({TCP_CONNECT_TIMEOUT_SECS}s)"
            ))
        }
    };

    let connector = TlsConnector::from(Arc::new(config));
    match tokio::time::timeout(
        Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
        connector.connect(server_name, sock),
    )
    .await
    {
        Ok(Ok(stream)) => {
            let (_, session) = stream.get_ref();
            log::debug!(
                "TLS established for {host} ({:?})",
                session.protocol_version()
            );
            Ok(())
        }
        Ok(Err(e)) => Err(anyhow::anyhow!("TLS handshake failed for {host}: {e}")),
        Err(_) => Err(anyhow::anyhow!(
            "TLS handshake timeout for {host} ({TLS_HANDSHAKE_TIMEOUT_SECS}s)"
        )),
    }
}
