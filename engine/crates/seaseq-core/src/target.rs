//! Validation target definitions

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Placeholder IP used when only a website was selected
pub const UNSPECIFIED_IP: &str = "0.0.0.0";

/// The unit every check runs against: an IP address and an optional
/// hostname (used as HTTP host and TLS SNI value).
///
/// The IP is kept as text and is not validated at construction; callers
/// selecting from extracted or inventory lists already hold validated values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationTarget {
    ip: String,
    #[serde(default)]
    website: Option<String>,
}

impl ValidationTarget {
    /// Create a target from an IP address string
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            website: None,
        }
    }

    /// Create a target with an associated website/hostname
    pub fn with_website(ip: impl Into<String>, website: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            website: Some(website.into()),
        }
    }

    /// Create a target for a website when no IP was chosen
    pub fn website_only(website: impl Into<String>) -> Self {
        Self::with_website(UNSPECIFIED_IP, website)
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    /// Host that network checks should contact: the website if set, else the IP
    pub fn host(&self) -> &str {
        self.website.as_deref().unwrap_or(&self.ip)
    }

    /// Whether the contact host is a literal IP address
    pub fn host_is_ip(&self) -> bool {
        is_ip(self.host())
    }
}

impl std::fmt::Display for ValidationTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.website {
            Some(site) => write!(f, "{} ({})", self.ip, site),
            None => write!(f, "{}", self.ip),
        }
    }
}

/// Strict IPv4/IPv6 syntax check
pub fn is_ip(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}
