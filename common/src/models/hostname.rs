//! # Canonical Hostnames
//!
//! Discovery tools emit hostnames with all kinds of noise: URL schemes,
//! trailing slashes, wildcard markers, ports, upper case. Everything is reduced
//! to one canonical form here so the rest of the pipeline compares plain
//! strings.

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;
const SCHEMES: [&str; 2] = ["http://", "https://"];

/// Reduces a raw hostname to its canonical form.
///
/// Returns `None` when nothing usable remains, e.g. for empty input or
/// strings that contain characters a hostname cannot carry.
///
/// ```
/// use subrecon_common::models::hostname::normalize;
///
/// assert_eq!(normalize("HTTP://Admin.testfire.net/"), Some("admin.testfire.net".into()));
/// assert_eq!(normalize("*.shop.testfire.net"), Some("shop.testfire.net".into()));
/// assert_eq!(normalize("   "), None);
/// ```
pub fn normalize(raw: &str) -> Option<String> {
    let lowered: String = raw.trim().to_lowercase();

    let mut host: &str = lowered.as_str();
    for scheme in SCHEMES {
        if let Some(rest) = host.strip_prefix(scheme) {
            host = rest;
            break;
        }
    }

    host = host.split(['/', '?', '#']).next().unwrap_or_default();
    host = strip_port(host);
    host = host.trim_end_matches('.');

    while let Some(rest) = host.strip_prefix("*.") {
        host = rest;
    }
    host = host.trim_start_matches('.');

    is_valid(host).then(|| host.to_string())
}

/// Number of dot-separated labels in a canonical hostname.
pub fn label_count(host: &str) -> usize {
    host.split('.').count()
}

fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

fn is_valid(host: &str) -> bool {
    if host.is_empty() || host.len() > MAX_HOSTNAME_LEN {
        return false;
    }

    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && label
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
