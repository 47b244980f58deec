//! Port probe - TCP connect to a small fixed set of well-known ports
//!
//! Informational only: the check passes whether or not anything is open.

use super::PORT_SCAN_TOP;
use seaseq_core::{Check, CheckOutcome, ValidationTarget};
use std::net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, trace};

pub struct PortProbeCheck {
    ports: Vec<u16>,
    timeout: Duration,
}

impl PortProbeCheck {
    pub fn new(ports: Vec<u16>, timeout: Duration) -> Self {
        Self { ports, timeout }
    }

    /// Ports that accepted a connection, in probe order
    pub fn open_ports(&self, host: &str) -> Vec<u16> {
        let addrs = resolve(host);
        if addrs.is_empty() {
            debug!("Port probe could not resolve {}", host);
            return Vec::new();
        }
        self.open_ports_on(host, &addrs)
    }

    /// A port counts as open when any of the addresses accepts it
    fn open_ports_on(&self, host: &str, addrs: &[IpAddr]) -> Vec<u16> {
        self.ports
            .iter()
            .copied()
            .filter(|&port| {
                addrs.iter().any(|&ip| {
                    let addr = SocketAddr::new(ip, port);
                    match TcpStream::connect_timeout(&addr, self.timeout) {
                        Ok(_) => {
                            debug!("Port {} ({}) is open", addr, host);
                            true
                        }
                        Err(e) => {
                            trace!("Port {} ({}) not open: {}", addr, host, e);
                            false
                        }
                    }
                })
            })
            .collect()
    }
}

/// Every distinct address of `host`, in resolver order
fn resolve(host: &str) -> Vec<IpAddr> {
    let Ok(addrs) = (host, 0).to_socket_addrs() else {
        return Vec::new();
    };
    let mut ips: Vec<IpAddr> = Vec::new();
    for addr in addrs {
        if !ips.contains(&addr.ip()) {
            ips.push(addr.ip());
        }
    }
    ips
}

impl Check for PortProbeCheck {
    fn name(&self) -> &str {
        PORT_SCAN_TOP
    }

    fn description(&self) -> &str {
        "Reports which common service ports accept connections"
    }

    fn run(&self, target: &ValidationTarget) -> CheckOutcome {
        let open = self.open_ports(target.host());
        if open.is_empty() {
            CheckOutcome::pass("No common ports open")
        } else {
            CheckOutcome::pass(format!("Open: {:?}", open))
        }
    }
}
