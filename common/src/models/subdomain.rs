use std::fmt;

use serde::{Deserialize, Serialize};

use super::target::Domain;

/// Depth of a hostname below its target.
///
/// Everything two or more labels below the apex shares the [`Level::L3`]
/// bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "APEX")]
    Apex,
    L2,
    L3,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Apex => "APEX",
            Level::L2 => "L2",
            Level::L3 => "L3",
        };
        f.write_str(s)
    }
}

/// A canonical hostname that belongs to the target.
///
/// Ordering is by hostname first, which is the order reports are written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subdomain {
    pub hostname: String,
    pub target: Domain,
    pub level: Level,
}

impl Subdomain {
    pub fn new(hostname: String, target: Domain, level: Level) -> Self {
        Self {
            hostname,
            target,
            level,
        }
    }
}

impl fmt::Display for Subdomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.hostname, self.level)
    }
}
