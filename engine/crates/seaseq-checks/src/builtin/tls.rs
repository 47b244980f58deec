//! TLS handshake check

use super::TLS_VALIDITY;
use native_tls::TlsConnector;
use seaseq_core::{Check, CheckOutcome, ValidationTarget};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

/// Opens a verified TLS session on the secure port and reports the
/// certificate subject CN.
///
/// SNI is only sent for hostnames. Certificate chain and name verification
/// stay on, so a self-signed or mismatched certificate fails the check.
pub struct TlsHandshakeCheck {
    port: u16,
    timeout: Duration,
}

impl TlsHandshakeCheck {
    pub fn new(timeout: Duration) -> Self {
        Self { port: 443, timeout }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Complete a handshake and return the peer certificate's CN, if any
    fn handshake(&self, target: &ValidationTarget) -> Result<Option<String>, String> {
        let host = target.host();

        let addr = (host, self.port)
            .to_socket_addrs()
            .map_err(|e| format!("cannot resolve {}: {}", host, e))?
            .next()
            .ok_or_else(|| format!("no address for {}", host))?;

        let stream = TcpStream::connect_timeout(&addr, self.timeout).map_err(|e| e.to_string())?;
        stream
            .set_read_timeout(Some(self.timeout))
            .and_then(|_| stream.set_write_timeout(Some(self.timeout)))
            .map_err(|e| e.to_string())?;

        let connector = TlsConnector::builder()
            .use_sni(!target.host_is_ip())
            .build()
            .map_err(|e| e.to_string())?;

        debug!("TLS handshake with {} ({})", host, addr);
        let tls = connector.connect(host, stream).map_err(|e| e.to_string())?;

        let cn = tls
            .peer_certificate()
            .ok()
            .flatten()
            .and_then(|cert| cert.to_der().ok())
            .and_then(|der| subject_common_name(&der));

        Ok(cn)
    }
}

/// Extract the subject CN from a DER-encoded certificate
pub fn subject_common_name(der: &[u8]) -> Option<String> {
    let (_, cert) = x509_parser::parse_x509_certificate(der).ok()?;
    let cn = cert.subject().iter_common_name().next()?;
    cn.as_str().ok().map(str::to_string)
}

fn success_message(cn: Option<&str>) -> String {
    format!("TLS ok; CN={}", cn.unwrap_or("<none>"))
}

impl Check for TlsHandshakeCheck {
    fn name(&self) -> &str {
        TLS_VALIDITY
    }

    fn description(&self) -> &str {
        "TLS handshake on port 443 completes with a trusted certificate"
    }

    fn run(&self, target: &ValidationTarget) -> CheckOutcome {
        match self.handshake(target) {
            Ok(cn) => CheckOutcome::pass(success_message(cn.as_deref())),
            Err(e) => CheckOutcome::fail(format!("TLS error: {}", e)),
        }
    }
}
