//! Report rendering: console tables and the JSON report file.

use std::fs;
use std::io::Write;
use std::path::Path;

use domain::models::AuditReport;
use tracing::info;

use crate::error::AuditError;

/// Writes the human-readable report.
pub fn write_console(out: &mut impl Write, report: &AuditReport) -> std::io::Result<()> {
    writeln!(out, "\nFleet Audit Report")?;
    if let Some(controller) = &report.controller {
        writeln!(out, "  Controller : {}", controller)?;
    }
    writeln!(out, "  Run        : {}", report.run_id)?;
    writeln!(
        out,
        "  Generated  : {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    if report.devices.is_empty() {
        writeln!(out, "\nNo managed devices found.")?;
        return Ok(());
    }

    if !report.versions.is_empty() {
        writeln!(out, "\nDynamic Update Status")?;
        for device in &report.devices {
            writeln!(out, "\nFirewall: {}", device)?;
            for record in report.versions_for(device) {
                writeln!(
                    out,
                    "  {:<18}: {} vs {} => {}",
                    record.package.label(),
                    record.current_version,
                    record.latest_version,
                    record.status
                )?;
            }
        }
    }

    if !report.licenses.is_empty() {
        writeln!(out, "\nLicense Status")?;
        for device in &report.devices {
            writeln!(out, "\nFirewall: {}", device)?;
            for record in report.licenses_for(device) {
                writeln!(out, "  {:<15}: {}", record.feature.label(), record.message)?;
            }
        }
    }

    writeln!(out, "\nPolicy Push Outcomes\n")?;
    if report.job_outcomes.is_empty() {
        writeln!(out, "No completed commit/push/template jobs found.")?;
    }
    for outcome in &report.job_outcomes {
        writeln!(
            out,
            "Device: {:20} | Serial: {:18} | Outcome: {:20} | Deployment Status: {:12} | Job Result: {}",
            outcome.device_name,
            outcome.serial_number,
            outcome.push_outcome.to_string(),
            outcome.deployment_status,
            outcome.job_result.as_deref().unwrap_or("-")
        )?;
    }

    let summary = &report.summary;
    writeln!(out, "\nSummary")?;
    writeln!(out, "  Devices            : {}", summary.devices)?;
    writeln!(out, "  Outdated packages  : {}", summary.outdated_packages)?;
    writeln!(out, "  Unknown versions   : {}", summary.unknown_versions)?;
    writeln!(out, "  Expired licenses   : {}", summary.expired_licenses)?;
    writeln!(out, "  Expiring licenses  : {}", summary.expiring_licenses)?;
    writeln!(out, "  Missing licenses   : {}", summary.missing_licenses)?;
    writeln!(out, "  Failed pushes      : {}", summary.failed_jobs)?;
    writeln!(out, "  Pushes w/ warnings : {}", summary.jobs_with_warnings)?;
    Ok(())
}

/// Writes the full report as pretty JSON, creating parent directories as needed.
pub fn write_json(path: &Path, report: &AuditReport) -> Result<(), AuditError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(report)?;
    let mut file = fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    info!(path = %path.display(), "Wrote JSON report");
    Ok(())
}
