use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;

use dirparity_diff::{write_html_diff, DiffError, HtmlDiffOptions, OutputTarget};
use dirparity_run::{RunConfig, RunContext, RunReport};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Check(args) => {
            let passed = cmd_check(args, &cli.format)?;
            Ok(if passed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Command::HtmlDiff(args) => {
            cmd_html_diff(args, &cli.format)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Start from the config file (if any) and apply command-line overrides.
fn build_config(args: CheckArgs) -> anyhow::Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_toml_file(path)?,
        None => RunConfig::default(),
    };

    if let Some(dir) = args.from_dir { config.from_dir = Some(dir); }
    if let Some(dir) = args.to_dir { config.to_dir = Some(dir); }
    if let Some(dir) = args.output_dir { config.output_dir = Some(dir); }
    if args.do_not_generate_output_timestamp { config.timestamp_output = false; }
    if args.skip_tree_comparison { config.skip_tree_comparison = true; }
    if args.context { config.diff.context_only = true; }
    if let Some(n) = args.context_lines { config.diff.context_lines = n; }
    if !args.ignore.is_empty() { config.ignore = args.ignore; }
    if let Some(jobs) = args.jobs { config.jobs = jobs; }

    Ok(config)
}

/// Returns whether every check passed.
fn cmd_check(args: CheckArgs, format: &OutputFormat) -> anyhow::Result<bool> {
    let config = build_config(args)?;
    let ctx = RunContext::new(config).context("cannot start comparison")?;
    let report = ctx.run()?;

    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => print_report(&ctx, &report),
    }

    Ok(report.passed)
}

fn print_report(ctx: &RunContext, report: &RunReport) {
    let (from, to) = (ctx.from_root(), ctx.to_root());

    match &report.tree {
        None => println!("Tree comparison: {}", "skipped".dimmed()),
        Some(tree) => match tree.describe(from, to) {
            None => println!("Tree comparison: {}", "✓ same shape".green()),
            Some(msg) => {
                println!("Tree comparison: {}", "✗ different".red().bold());
                for line in msg.lines() {
                    println!("  {line}");
                }
            }
        },
    }

    for check in report.failures() {
        println!("{} {}", "✗".red().bold(), check.file.to_string().yellow());
        if let Some(msg) = check.describe(from, to) {
            for line in msg.lines() {
                println!("  {line}");
            }
        }
    }

    let failed = report.failed_count();
    let summary = format!("{} files compared, {} differ", report.files.len(), failed);
    if report.passed {
        println!("{} {}", "✓".green().bold(), summary);
    } else {
        println!("{} {}", "✗".red().bold(), summary);
    }
}

/// Reject anything that is not an existing regular file.
fn existing_file(path: &Path) -> Result<&Path, DiffError> {
    if path.is_dir() {
        Err(DiffError::NotAFile(path.to_path_buf()))
    } else if !path.is_file() {
        Err(DiffError::PathNotFound(path.to_path_buf()))
    } else {
        Ok(path)
    }
}

/// A content difference is not an error here; only invalid inputs and
/// write failures are.
fn cmd_html_diff(args: HtmlDiffArgs, format: &OutputFormat) -> anyhow::Result<PathBuf> {
    let from = existing_file(&args.from_file)?;
    let to = existing_file(&args.to_file)?;
    let output = match args.output {
        Some(path) => path,
        None => default_diff_dir()?,
    };
    let options = HtmlDiffOptions {
        context_only: args.context,
        context_lines: args.context_lines,
    };

    let path = write_html_diff(from, to, &OutputTarget::from_path(output), &options)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "artifact": path })),
        OutputFormat::Text => println!("Diff is written to {}", path.display().to_string().bold()),
    }
    Ok(path)
}

fn default_diff_dir() -> anyhow::Result<PathBuf> {
    Ok(std::env::current_dir()
        .context("cannot resolve working directory")?
        .join("outputs"))
}
