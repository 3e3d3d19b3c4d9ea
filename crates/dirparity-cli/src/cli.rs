use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dirparity",
    about = "Check that two directory trees hold the same files with the same content",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two directory trees and their common files
    Check(CheckArgs),
    /// Write an HTML diff of two text files
    HtmlDiff(HtmlDiffArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Path to the 'from' directory, usually the expected (gold) file set
    #[arg(long)]
    pub from_dir: Option<PathBuf>,
    /// Path to the 'to' directory, usually the actual (new) file set
    #[arg(long)]
    pub to_dir: Option<PathBuf>,
    /// Directory receiving diff files of failed comparisons [default: ./outputs/testing]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Write diff files directly into the output directory instead of a
    /// per-run timestamped subdirectory
    #[arg(long)]
    pub do_not_generate_output_timestamp: bool,
    /// Compare common files only, skipping the directory tree comparison
    #[arg(long)]
    pub skip_tree_comparison: bool,
    /// Show only changed regions with surrounding context in diff files
    #[arg(long)]
    pub context: bool,
    /// Context lines around each change when --context is given
    #[arg(long)]
    pub context_lines: Option<usize>,
    /// Entry name to exclude from the tree comparison (repeatable; replaces the defaults)
    #[arg(long = "ignore")]
    pub ignore: Vec<String>,
    /// Worker threads for file comparisons (0 = one per core)
    #[arg(short, long)]
    pub jobs: Option<usize>,
    /// TOML configuration file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct HtmlDiffArgs {
    /// Path to 'from' file selected for comparison
    pub from_file: PathBuf,
    /// Path to 'to' file selected for comparison
    pub to_file: PathBuf,
    /// Output directory, or an explicit .html file path [default: ./outputs]
    #[arg(long = "out")]
    pub output: Option<PathBuf>,
    /// Show only changed regions with surrounding context
    #[arg(long)]
    pub context: bool,
    #[arg(long, default_value = "5")]
    pub context_lines: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_check() {
        let cli = Cli::try_parse_from(["dirparity", "check", "--from-dir", "gold", "--to-dir", "new"]).unwrap();
        if let Command::Check(args) = cli.command {
            assert_eq!(args.from_dir, Some(PathBuf::from("gold")));
            assert_eq!(args.to_dir, Some(PathBuf::from("new")));
            assert!(!args.skip_tree_comparison);
            assert!(!args.do_not_generate_output_timestamp);
            assert!(args.ignore.is_empty());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_check_flags() {
        let cli = Cli::try_parse_from([
            "dirparity", "check", "--from-dir", "a", "--to-dir", "b",
            "--output-dir", "out", "--do-not-generate-output-timestamp",
            "--skip-tree-comparison", "--context", "--context-lines", "2",
            "--ignore", ".git", "--ignore", "target", "-j", "4",
        ]).unwrap();
        if let Command::Check(args) = cli.command {
            assert_eq!(args.output_dir, Some(PathBuf::from("out")));
            assert!(args.do_not_generate_output_timestamp);
            assert!(args.skip_tree_comparison);
            assert!(args.context);
            assert_eq!(args.context_lines, Some(2));
            assert_eq!(args.ignore, vec![".git", "target"]);
            assert_eq!(args.jobs, Some(4));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_html_diff() {
        let cli = Cli::try_parse_from(["dirparity", "html-diff", "a.txt", "b.txt", "--out", "diff.html"]).unwrap();
        if let Command::HtmlDiff(args) = cli.command {
            assert_eq!(args.from_file, PathBuf::from("a.txt"));
            assert_eq!(args.to_file, PathBuf::from("b.txt"));
            assert_eq!(args.output, Some(PathBuf::from("diff.html")));
            assert_eq!(args.context_lines, 5);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn html_diff_requires_two_files() {
        assert!(Cli::try_parse_from(["dirparity", "html-diff", "a.txt"]).is_err());
    }

    #[test]
    fn parse_verbose_and_json() {
        let cli = Cli::try_parse_from(["dirparity", "--verbose", "--format", "json", "check"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
