use std::time::{Duration, Instant};

use chrono::Utc;
use colored::*;
use tracing::{Instrument, info_span, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::{mprint, terminal::{colors, format, print, spinner}};
use subrecon_common::{config::Config, models::record::ValidationRecord, success};
use subrecon_common::error::RunError;
use subrecon_core::recon::{ReconOutcome, ReconService};
use subrecon_core::shutdown::{self, ShutdownTrigger};
use subrecon_core::validator::ProgressCallback;

pub async fn enumerate(cfg: &Config) -> anyhow::Result<()> {
    let service = ReconService::from_config(cfg)?;
    print_plan(&service, cfg);

    let (trigger, shutdown) = shutdown::channel();
    listen_for_interrupt(trigger.clone());
    if let Some(deadline) = cfg.run_timeout {
        trigger.trigger_after(deadline);
    }

    let started_at = Utc::now();
    let start_time: Instant = Instant::now();

    let discovery_span = info_span!("discovery", indicatif.pb_show = true);
    discovery_span.pb_set_style(&spinner::spinner_style());
    discovery_span.pb_set_message("Running discovery tools...");

    let aggregation = match service.discover(&cfg.target, &shutdown).instrument(discovery_span).await {
        Ok(aggregation) => aggregation,
        Err(e @ RunError::NoSubdomains(_)) => {
            no_subdomains_found(cfg);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let validation_span = info_span!("validation", indicatif.pb_show = true);
    validation_span.pb_set_style(&spinner::progress_style());
    validation_span.pb_set_length(aggregation.len() as u64);
    validation_span.pb_set_message("Validating");

    let progress_span = validation_span.clone();
    let on_validated: ProgressCallback = Box::new(move |_done| progress_span.pb_inc(1));

    let validation = service
        .validate(&aggregation, &shutdown, Some(on_validated))
        .instrument(validation_span)
        .await;

    if validation.skipped > 0 {
        warn!("{} hosts were not validated before shutdown", validation.skipped);
    }

    let outcome = service
        .finish(&cfg.target, aggregation, validation, started_at)
        .await?;
    enumeration_ends(&outcome, start_time.elapsed(), cfg);
    Ok(())
}

/// First Ctrl-C drains in-flight hosts and still writes the reports; a second
/// one exits immediately.
fn listen_for_interrupt(trigger: ShutdownTrigger) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("Interrupted, finishing hosts already in flight (Ctrl-C again to abort)");
        trigger.trigger();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
}

fn print_plan(service: &ReconService, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    let mut rows: Vec<(&str, ColoredString)> = vec![
        ("Target", cfg.target.to_string().color(colors::ACCENT)),
        ("Sources", service.source_names().join(", ").color(colors::TEXT_DEFAULT)),
        ("Concurrency", cfg.concurrency_limit.to_string().color(colors::TEXT_DEFAULT)),
        (
            "Timeouts",
            format!(
                "dns {}s, http {}s, tool {}s",
                cfg.dns_timeout.as_secs(),
                cfg.http_timeout.as_secs(),
                cfg.tool_timeout.as_secs()
            )
            .color(colors::TEXT_DEFAULT),
        ),
    ];
    if let Some(deadline) = cfg.run_timeout {
        rows.push(("Run limit", format!("{}s", deadline.as_secs()).color(colors::TEXT_DEFAULT)));
    }
    rows.push(("Output", service.output_dir().display().to_string().color(colors::TEXT_DEFAULT)));
    print::key_values(&rows);
}

fn enumeration_ends(outcome: &ReconOutcome, total_time: Duration, cfg: &Config) {
    let active: Vec<&ValidationRecord> = outcome.report.active_records().collect();

    if active.is_empty() {
        print::header("no live hosts", cfg.quiet);
        print::no_results();
    } else {
        if cfg.quiet > 0 {
            mprint!();
        }
        print::header("Live Subdomains", cfg.quiet);
        print_records(&active, cfg);
    }

    print_files(outcome, cfg);
    print_summary(outcome, total_time, cfg);
}

fn no_subdomains_found(cfg: &Config) {
    print::header("zero subdomains found", cfg.quiet);
    print::no_results();
}

fn print_records(records: &[&ValidationRecord], cfg: &Config) {
    for (idx, record) in records.iter().enumerate() {
        match cfg.quiet {
            2 => {}
            _ => {
                print::host_tree(idx, &record.hostname, &format::record_to_key_value_pair(record));
            }
        }
        if idx + 1 != records.len() && cfg.quiet < 2 {
            mprint!();
        }
    }
}

fn print_files(outcome: &ReconOutcome, cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }

    let files = &outcome.files;
    let path = |p: &std::path::Path| p.display().to_string().color(colors::TEXT_DEFAULT);

    mprint!();
    print::key_values(&[
        ("All JSON", path(&files.all_json)),
        ("All text", path(&files.all_txt)),
        ("Active JSON", path(&files.active_json)),
        ("Active text", path(&files.active_txt)),
    ]);
}

fn print_summary(outcome: &ReconOutcome, total_time: Duration, cfg: &Config) {
    let report = &outcome.report;
    let active: ColoredString = format!("{} active", report.total_active).bold().green();
    let found: ColoredString = format!("{} subdomains", report.total_found).bold();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: &ColoredString = &format!("Enumeration Complete: {active} of {found} in {total_time}")
        .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(output);
            let levels = &report.subdomains_by_level;
            print::centerln(&format!(
                "{}",
                format!("APEX {} / L2 {} / L3 {}", levels.apex, levels.l2, levels.l3).bright_black()
            ));
            print::fat_separator();
        }
        _ => {
            mprint!();
            success!("{}", output)
        }
    }
}
