use crate::terminal::colors;
use colored::*;
use subrecon_common::log::PRINT_TARGET;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }

    let title = format!("⟦ SUBRECON v{} ⟧", env!("CARGO_PKG_VERSION"));
    print(&rule(&title, "═", |t| t.bright_green().bold()));
    centerln(&format!(
        "{}",
        "subdomain enumeration and liveness checks".italic().bright_black()
    ));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let title = format!("⟦ {} ⟧", msg.to_uppercase());
    print(&rule(&title, "─", |t| t.bright_green()));
}

/// `title` centred on a `TOTAL_WIDTH` line of `fill`.
fn rule(title: &str, fill: &str, paint: fn(ColoredString) -> ColoredString) -> String {
    let free = TOTAL_WIDTH.saturating_sub(UnicodeWidthStr::width(title));
    let left = free / 2;

    format!(
        "{}{}{}",
        fill.repeat(left).color(colors::SEPARATOR),
        paint(title.into()),
        fill.repeat(free - left).color(colors::SEPARATOR)
    )
}

pub fn fat_separator() {
    print(&"═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR).to_string());
}

/// Dot leader padding `key` to `width`, then the colon.
fn leader(key: &str, width: usize) -> String {
    format!(
        "{}{}",
        ".".repeat(width + 1 - key.len().min(width)).color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    )
}

/// `> key....: value` rows, dots padded to the longest key of the block.
pub fn key_values(rows: &[(&str, ColoredString)]) {
    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    for (key, value) in rows {
        print(&format!(
            "{} {}{} {}",
            ">".color(colors::SEPARATOR),
            key.color(colors::PRIMARY),
            leader(key, width),
            value
        ));
    }
}

/// A host as `[idx] name` with its details hanging off it as branches.
pub fn host_tree(idx: usize, name: &str, details: &[(String, ColoredString)]) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));

    let width = details.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (i, (key, value)) in details.iter().enumerate() {
        let branch = if i + 1 == details.len() { "└─" } else { "├─" };
        print(&format!(
            " {} {}{} {}",
            branch.color(colors::SEPARATOR),
            key.color(colors::TEXT_DEFAULT),
            leader(key, width),
            value
        ));
    }
}

pub fn centerln(msg: &str) {
    let pad = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{pad}{msg}"));
}

const NO_RESULTS: &str = r#"
          _  _  ___    _    _ __   __ ___
         | \| |/ _ \  | |  |_|\ \ / /| __|
         | .` | (_) | | |__| | \ V / | _|
         |_|\_|\___/  |____|_|  \_/  |___|
                _  _   ___   ___  _____  ___
               | || | / _ \ / __||_   _|/ __|
               | __ || (_) |\__ \  | |  \__ \
               |_||_| \___/ |___/  |_|  |___/
"#;

pub fn no_results() {
    print(&format!("{}", NO_RESULTS.red().bold()));
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
    fn rule_fills_the_full_width() {
        colored::control::set_override(false);
        let line = rule("⟦ LIVE ⟧", "─", |t| t);
        assert_eq!(console::measure_text_width(&line), TOTAL_WIDTH);
        assert!(line.contains("⟦ LIVE ⟧"));
    }

    #[test]
    fn leader_pads_keys_to_a_common_column() {
        colored::control::set_override(false);
        let short = format!("Level{}", leader("Level", 5));
        let long = format!("IPv4{}", leader("IPv4", 5));
        assert_eq!(short, "Level.:");
        assert_eq!(long, "IPv4..:");
    }
}
