use subrecon_common::error::InvalidHostnameError;
use subrecon_common::models::hostname;
use subrecon_common::models::subdomain::Level;
use subrecon_common::models::target::Domain;

/// Buckets a canonical hostname by how many labels it sits below `target`.
///
/// Anything two or more labels deep is [`Level::L3`].
pub fn classify(host: &str, target: &Domain) -> Result<Level, InvalidHostnameError> {
    if !target.contains(host) {
        return Err(InvalidHostnameError {
            hostname: host.to_string(),
            target: target.to_string(),
        });
    }

    let extra = hostname::label_count(host) - target.label_count();
    Ok(match extra {
        0 => Level::Apex,
        1 => Level::L2,
        _ => Level::L3,
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
