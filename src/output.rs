// Terminal output for scan and delete results

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cleaner::{DeleteReport, FoundDirectory, ScanResult, Stats};

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable size, base 1024, one decimal place above bytes.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    // 1023.95 and up prints as 1024.0, so move to the next unit
    if (size * 10.0).round() >= 10240.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

pub fn format_directory_line(dir: &FoundDirectory) -> String {
    let size = format!("({})", format_size(dir.size));
    format!("  📁 {:<50} {}", dir.relative_path, size.yellow())
}

pub fn print_directory_list(directories: &[FoundDirectory]) {
    println!();
    println!("{}", format!("Found {} directories to clean:", directories.len()).bold());
    println!();

    for dir in directories {
        println!("{}", format_directory_line(dir));
    }

    println!();
}

pub fn print_total(total_size: u64) {
    println!("{} {}", "Total:".bold(), format_size(total_size).yellow().bold());
    println!();
}

pub fn print_json(result: &ScanResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("Failed to serialize scan result")?;
    println!("{}", json);
    Ok(())
}

/// Progress bar message while `dir` is being removed, with the running totals so far.
pub fn delete_progress_message(dir: &FoundDirectory, stats: &Stats) -> String {
    let mut message = format!("Deleting {} ({} freed", dir.relative_path, format_size(stats.bytes()));
    if stats.failed() > 0 {
        message.push_str(&format!(", {} failed", stats.failed()));
    }
    message.push(')');
    message
}

/// Failure lines, one per directory that could not be deleted.
pub fn failure_lines(report: &DeleteReport) -> Vec<String> {
    report
        .failures()
        .map(|r| {
            format!(
                "  - {}: {}",
                r.path.display(),
                r.error.as_deref().unwrap_or("unknown error")
            )
        })
        .collect()
}

pub fn summary_line(report: &DeleteReport) -> String {
    format!(
        "Deleted {} directories, freed {}",
        report.deleted,
        format_size(report.freed_bytes).bold()
    )
}

pub fn print_delete_summary(report: &DeleteReport) {
    let failures = failure_lines(report);
    if !failures.is_empty() {
        println!();
        println!("{} Some directories could not be deleted:", "⚠️".yellow());
        for line in failures {
            println!("{}", line.red());
        }
    }

    println!();
    println!("{} {}", "✅".green(), summary_line(report));
}
