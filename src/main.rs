//! header-lint CLI
//!
//! Lints serialized Glimmer template ASTs for misuse of header components.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use glob::glob;
use header_lint::config::{ColorMode, Config, OutputFormat};
use header_lint::engine::Engine;
use header_lint::output::{formatter_for, OutputFormatter};
use header_lint::rule::{Rule, RuleMeta};
use header_lint::rules::{builtin_metas, find_meta};
use header_lint::source::is_template_ast_path;
use header_lint::Severity;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "header-lint",
    version,
    about = "Header component linter for Glimmer templates",
    long_about = "Lints Glimmer template ASTs (as JSON, next to their .hbs source) for \
                  string actions on the main header and missing header operation arguments."
)]
struct Cli {
    /// AST files, directories or glob patterns to lint
    files: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Lint files one after another
    #[arg(long)]
    no_parallel: bool,

    /// Enable rules without a configuration file (comma-separated)
    #[arg(long, value_delimiter = ',')]
    enable: Option<Vec<String>>,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Show detailed information about a specific rule
    #[arg(long)]
    explain: Option<String>,

    /// Exit with 0 even if errors are found
    #[arg(long)]
    exit_zero: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Compact,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Compact => OutputFormat::Compact,
        }
    }
}

fn severity_label(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Error => "error".red(),
        Severity::Warning => "warning".yellow(),
        Severity::Info => "info".blue(),
    }
}

fn print_rule(meta: &RuleMeta) {
    println!(
        "    {} [{}] ({})",
        meta.id.cyan(),
        severity_label(meta.severity),
        meta.category
    );
    if let Some(desc) = &meta.description {
        println!("      {}", desc);
    }
}

fn explain_rule(meta: &RuleMeta) {
    println!("{}", "Rule Details".bold());
    println!();
    println!("  {}: {}", "ID".bold(), meta.id.cyan());
    println!("  {}: {}", "Severity".bold(), severity_label(meta.severity));
    println!("  {}: {}", "Category".bold(), meta.category);

    if let Some(desc) = &meta.description {
        println!();
        println!("  {}", "Description".bold());
        println!("  {}", desc);
    }

    if let Some(bad) = &meta.example_bad {
        println!();
        println!("  {} {}", "Example".bold(), "(incorrect)".red());
        for line in bad.lines() {
            println!("    {}", line);
        }
    }

    if let Some(good) = &meta.example_good {
        println!();
        println!("  {} {}", "Example".bold(), "(correct)".green());
        for line in good.lines() {
            println!("    {}", line);
        }
    }

    for note in &meta.notes {
        println!();
        println!("  {}: {}", "Note".bold(), note);
    }
}

/// Expand arguments into AST files
///
/// Directories contribute the template ASTs below them (`*.hbs.json`, or
/// `*.json` next to a `.hbs`); files and globs are taken as given.
fn collect_files(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let is_dir = Path::new(pattern).is_dir();
        let pattern = if is_dir {
            format!("{}/**/*.json", pattern.trim_end_matches('/'))
        } else {
            pattern.clone()
        };

        let paths = glob(&pattern).with_context(|| format!("Invalid pattern '{}'", pattern))?;
        for entry in paths.flatten() {
            if !entry.is_file() {
                continue;
            }
            if is_dir && !is_template_ast_path(&entry) {
                log::debug!("skipping {}: not a template AST", entry.display());
                continue;
            }
            files.push(entry);
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    if cli.list_rules {
        println!("{}", "Available rules:".bold());
        println!();
        for meta in builtin_metas() {
            print_rule(&meta);
        }
        return Ok(0);
    }

    if let Some(rule_id) = &cli.explain {
        let Some(meta) = find_meta(rule_id) else {
            bail!("Rule '{}' not found (see --list-rules)", rule_id);
        };
        explain_rule(&meta);
        return Ok(0);
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_default().context("Failed to load config")?,
    };

    config.merge_cli(
        cli.format.map(OutputFormat::from),
        cli.jobs,
        cli.enable.clone(),
    );
    if cli.no_parallel {
        config.engine.parallel = false;
    }
    if cli.no_color {
        config.output.color = ColorMode::Never;
    }

    match config.output.color {
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Auto => {}
    }

    if cli.files.is_empty() {
        bail!("No files specified\n\nUsage: header-lint [OPTIONS] <FILES>...");
    }

    let files = collect_files(&cli.files)?;
    if files.is_empty() {
        bail!("No files found to lint");
    }

    let engine = Engine::new(config).context("Invalid rule configuration")?;
    if !engine.rules().iter().any(|rule| rule.is_enabled()) {
        log::warn!("no rule is enabled; set `rules: {{header-main: true}}` or pass --enable");
    }

    log::info!("linting {} file(s)", files.len());
    let result = engine.lint(&files);

    let output = engine.config().output.clone();
    let colored = output.color != ColorMode::Never;
    print!("{}", formatter_for(output.format, colored).format(&result));

    Ok(if cli.exit_zero { 0 } else { result.exit_code() })
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}
