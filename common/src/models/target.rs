//! # Target Domain
//!
//! The registrable domain a run enumerates, e.g. `vulnweb.com`. Parsed once
//! from user input and shared read-only by every stage afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::hostname;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn label_count(&self) -> usize {
        hostname::label_count(&self.0)
    }

    /// True if `host` is the domain itself or any name below it.
    ///
    /// `host` is expected in canonical form; `notvulnweb.com` is not within
    /// `vulnweb.com` even though it shares the string suffix.
    pub fn contains(&self, host: &str) -> bool {
        match host.strip_suffix(self.0.as_str()) {
            Some("") => true,
            Some(prefix) => prefix.ends_with('.'),
            None => false,
        }
    }
}

impl FromStr for Domain {
    type Err = String;

    /// Parses a domain the same way tool output is canonicalized, so
    /// `HTTPS://VulnWeb.com/` and `vulnweb.com` name the same target.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = hostname::normalize(s).ok_or_else(|| format!("invalid domain: {s}"))?;

        if !canonical.contains('.') {
            return Err(format!("domain must have at least two labels: {canonical}"));
        }

        if canonical.parse::<std::net::Ipv4Addr>().is_ok() {
            return Err(format!("expected a domain name, got an IP address: {canonical}"));
        }

        Ok(Domain(canonical))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_full_parsing() {
        assert_eq!(Domain::from_str("vulnweb.com").unwrap().as_str(), "vulnweb.com");
        assert_eq!(Domain::from_str("HTTPS://TestFire.net/").unwrap().as_str(), "testfire.net");
        assert_eq!(Domain::from_str("co.uk.").unwrap().label_count(), 2);

        assert!(Domain::from_str("").is_err());
        assert!(Domain::from_str("localhost").is_err());
        assert!(Domain::from_str("10.0.0.1").is_err());
        assert!(Domain::from_str("not a domain").is_err());
    }

    #[test]
    fn contains_respects_label_boundaries() {
        let domain: Domain = "vulnweb.com".parse().unwrap();

        assert!(domain.contains("vulnweb.com"));
        assert!(domain.contains("test.vulnweb.com"));
        assert!(domain.contains("api.test.vulnweb.com"));

        assert!(!domain.contains("notvulnweb.com"));
        assert!(!domain.contains("vulnweb.com.evil.com"));
        assert!(!domain.contains("evil.com"));
        assert!(!domain.contains("com"));
    }
}
