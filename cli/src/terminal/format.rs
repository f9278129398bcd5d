use crate::terminal::colors;
use colored::*;
use subrecon_common::models::record::ValidationRecord;

pub fn status_to_colored(status: Option<u16>) -> ColoredString {
    match status {
        Some(code @ 200..=299) => code.to_string().color(colors::STATUS_OK).bold(),
        Some(code @ 300..=399) => code.to_string().color(colors::STATUS_REDIRECT),
        Some(code @ 400..=499) => code.to_string().color(colors::STATUS_CLIENT_ERROR),
        Some(code) => code.to_string().color(colors::STATUS_SERVER_ERROR),
        None => "inactive".color(colors::INACTIVE),
    }
}

/// Detail rows printed under a host in the summary tree.
pub fn record_to_key_value_pair(record: &ValidationRecord) -> Vec<(String, ColoredString)> {
    let mut pairs: Vec<(String, ColoredString)> = vec![
        (String::from("Level"), record.level.to_string().color(colors::ACCENT)),
        (String::from("HTTP"), status_to_colored(record.http_status)),
    ];

    if let Some(ip) = &record.ip {
        let key = if ip.contains(':') { "IPv6" } else { "IPv4" };
        pairs.push((String::from(key), ip.color(colors::IP_ADDR)));
    }

    if let Some(cname) = &record.cname {
        pairs.push((String::from("CNAME"), cname.color(colors::CNAME)));
    }

    pairs
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
