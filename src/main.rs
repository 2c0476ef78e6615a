use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use depclean::cleaner::{self, config::parse_list, DiagnosticKind, FoundDirectory, DEFAULT_TARGETS};
use depclean::output;
use depclean::ui::run_selector;

#[derive(Parser, Debug)]
#[command(
    name = "depclean",
    author,
    version,
    about = "Find and delete dependency/cache directories like node_modules, venv, __pycache__",
    after_help = default_targets_help()
)]
struct Args {
    /// Target directory to scan
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Skip the selection screen and delete everything found
    #[arg(short = 'y', long)]
    yes: bool,

    /// Only delete specified types (comma-separated)
    #[arg(long, value_name = "ITEMS")]
    only: Option<String>,

    /// Exclude specified types (comma-separated)
    #[arg(long, value_name = "ITEMS")]
    exclude: Option<String>,

    /// List directories without deleting
    #[arg(long)]
    dry_run: bool,

    /// Print the scan result as JSON (never deletes)
    #[arg(long)]
    json: bool,

    /// Do not descend more than N levels below the target directory
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Descend into symlinked directories (loops are detected and skipped)
    #[arg(long)]
    follow_symlinks: bool,

    /// Increase log verbosity (-v shows skipped paths, -vv debug logs)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn default_targets_help() -> String {
    format!("Default targets:\n  {}", DEFAULT_TARGETS.join(", "))
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = run(args) {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("depclean={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_config(args: &Args) -> cleaner::Config {
    cleaner::Config::new()
        .with_only(args.only.as_deref().map(parse_list).unwrap_or_default())
        .with_exclude(args.exclude.as_deref().map(parse_list).unwrap_or_default())
        .with_follow_symlinks(args.follow_symlinks)
        .with_max_depth(args.max_depth)
}

fn run(args: Args) -> Result<()> {
    let root = std::path::absolute(&args.directory)
        .with_context(|| format!("Failed to resolve {}", args.directory.display()))?;
    let config = build_config(&args);

    if config.effective_targets().is_empty() {
        bail!(cleaner::CleanError::InvalidArguments {
            message: "--only and --exclude leave no directory names to look for".to_string(),
        });
    }

    if !args.json {
        println!();
        println!("{} Scanning {}...", "🔍".blue(), root.display().to_string().bold());
    }

    let result = scan_with_spinner(&root, config, args.verbose > 0, args.json)?;

    if args.json {
        return output::print_json(&result);
    }

    if result.is_empty() {
        println!();
        println!("{} No directories found to clean.", "✅".green());
        return Ok(());
    }

    output::print_directory_list(&result.directories);
    output::print_total(result.total_size);

    if args.dry_run {
        println!("{}  Dry run mode - no files deleted.", "ℹ️".blue());
        return Ok(());
    }

    if args.yes {
        perform_delete(&result.directories);
        return Ok(());
    }

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        bail!("Interactive selection needs a terminal; pass --yes to delete everything or --dry-run to list only");
    }

    match run_selector(result.directories)? {
        None => println!("{}", "Cancelled.".yellow()),
        Some(selected) if selected.is_empty() => println!("{}", "No directories selected.".yellow()),
        Some(selected) => perform_delete(&selected),
    }

    Ok(())
}

fn scan_with_spinner(
    root: &Path,
    config: cleaner::Config,
    show_skipped: bool,
    quiet: bool,
) -> Result<cleaner::ScanResult> {
    let pb = ProgressBar::new_spinner();
    if quiet || !io::stdout().is_terminal() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Scanning directories...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let pb_progress = pb.clone();
    let mut scanner = cleaner::Scanner::new(Arc::new(config)).with_progress_callback(move |p| {
        pb_progress.set_message(format!(
            "Scanning directories... {} visited, {} found",
            p.dirs_visited, p.found
        ));
    });

    if show_skipped {
        let pb_diag = pb.clone();
        scanner = scanner.with_diagnostics(move |d| {
            let reason = match &d.kind {
                DiagnosticKind::Unreadable { message } => message.clone(),
                DiagnosticKind::SymlinkLoop => "symlink loop".to_string(),
            };
            pb_diag.suspend(|| eprintln!("{} {}: {}", "skipped".dimmed(), d.path.display(), reason));
        });
    }

    let result = scanner.scan(root);
    pb.finish_and_clear();

    let result = result.context("Failed to scan directories")?;
    tracing::info!(
        "visited {} directories in {:.2}s ({} unreadable, {} loops skipped)",
        result.stats.dirs_visited,
        result.stats.duration.as_secs_f64(),
        result.stats.unreadable,
        result.stats.loops_skipped
    );
    Ok(result)
}

fn perform_delete(directories: &[FoundDirectory]) {
    println!();
    let pb = ProgressBar::new(directories.len() as u64);
    if !io::stdout().is_terminal() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    pb.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let deleter = cleaner::Deleter::new(Arc::new(cleaner::Stats::new()), false);
    let report = deleter.delete_all(directories, |current, _total, dir| {
        pb.set_position(current as u64 - 1);
        pb.set_message(output::delete_progress_message(dir, deleter.stats()));
    });
    pb.finish_and_clear();

    output::print_delete_summary(&report);
}
