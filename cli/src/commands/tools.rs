use colored::*;
use tracing::debug;

use crate::terminal::{colors, print};
use subrecon_common::config::DEFAULT_TOOL_TIMEOUT;
use subrecon_core::sources::external::{CATALOGUE, ExternalTool};

pub async fn tools(q_level: u8) {
    let mut rows: Vec<(&str, ColoredString)> = Vec::with_capacity(CATALOGUE.len());
    let mut installed: usize = 0;
    for spec in CATALOGUE {
        let tool = ExternalTool::new(*spec, DEFAULT_TOOL_TIMEOUT);
        let status: ColoredString = match tool.check_available().await {
            Ok(()) => {
                installed += 1;
                "installed".green().bold()
            }
            Err(e) => {
                debug!("{e}");
                "not found".red()
            }
        };

        let selection: ColoredString = if spec.default {
            "default".color(colors::TEXT_DEFAULT)
        } else {
            "opt-in".color(colors::SEPARATOR)
        };

        rows.push((spec.name, format!("{status} ({selection})").normal()));
    }

    print::key_values(&rows);

    if q_level == 0 {
        print::fat_separator();
        print::centerln(&format!(
            "{} of {} tools available",
            installed.to_string().bold().green(),
            CATALOGUE.len()
        ));
    }
}
