use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vulntrack::{
    config::Config,
    output::{format_result_to_string, print_result, OutputFormat, ProjectSection, TrackReport},
    requirement::{extract_identifier, requirement_lines},
    ProjectDraft, Severity, Tracker,
};

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const HIGH_VULN: u8 = 3;
    pub const MEDIUM_VULN: u8 = 4;
    pub const LOW_VULN: u8 = 5;
}

#[derive(Parser)]
#[command(name = "vulntrack")]
#[command(
    author,
    version,
    about = "Track known vulnerabilities in Python project dependencies"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register projects from requirements files and report their risk
    Scan {
        /// Requirements files, one project per file
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Project name (only with a single file)
        #[arg(short, long)]
        name: Option<String>,

        /// Project description
        #[arg(short, long)]
        description: Option<String>,

        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Write output to file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit with error if a project reaches this severity
        #[arg(long, value_enum)]
        fail_on: Option<FailLevel>,

        /// Include each project's dependencies in the report
        #[arg(long)]
        show_deps: bool,
    },

    /// Look up vulnerabilities for individual packages
    Check {
        /// Package names or requirement specifiers
        #[arg(required = true)]
        packages: Vec<String>,

        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FailLevel {
    High,
    Medium,
    Low,
}

impl FailLevel {
    fn threshold(self) -> Severity {
        match self {
            FailLevel::High => Severity::High,
            FailLevel::Medium => Severity::Medium,
            FailLevel::Low => Severity::Low,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<u8> {
    let cli = Cli::parse();
    let config = Config::load_from_or_default(&Config::config_path());

    match cli.command {
        Commands::Scan {
            files,
            name,
            description,
            format,
            output,
            fail_on,
            show_deps,
        } => {
            let format = parse_format(format, &config)?;
            let options = ScanOptions {
                name,
                description: description.unwrap_or_default(),
                show_deps,
            };
            run_scan(&config, &files, options, format, output, fail_on).await
        }
        Commands::Check { packages, format } => {
            let format = parse_format(format, &config)?;
            run_check(&config, &packages, format).await?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { init, path } => {
            handle_config(&config, init, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

struct ScanOptions {
    name: Option<String>,
    description: String,
    show_deps: bool,
}

async fn run_scan(
    config: &Config,
    files: &[PathBuf],
    options: ScanOptions,
    format: OutputFormat,
    output_file: Option<PathBuf>,
    fail_on: Option<FailLevel>,
) -> Result<u8> {
    if options.name.is_some() && files.len() > 1 {
        anyhow::bail!("--name can only be used with a single requirements file");
    }

    // Read everything up front so a missing file fails before any lookup
    let mut inputs = Vec::with_capacity(files.len());
    for path in files {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read requirements file {}", path.display()))?;
        let name = options
            .name
            .clone()
            .unwrap_or_else(|| project_name(path));
        let draft = ProjectDraft::new(name, options.description.clone());
        inputs.push((draft, requirement_lines(&content)));
    }

    let tracker = Tracker::from_config(config)?;
    let progress = spinner(format == OutputFormat::Table, "Resolving dependencies...")?;

    let mut projects = Vec::with_capacity(inputs.len());
    for (draft, lines) in inputs {
        if let Some(pb) = &progress {
            pb.set_message(format!("Resolving {}...", draft.name));
        }
        projects.push(tracker.register(draft, &lines[..]).await);
    }

    if let Some(pb) = progress {
        pb.finish_with_message(format!(
            "Resolved {} dependencies",
            tracker.all_dependencies().len()
        ));
    }

    let mut report = TrackReport::new();
    for project in &projects {
        let dependencies = if options.show_deps {
            Some(tracker.project_dependencies(&project.id)?)
        } else {
            None
        };
        report.projects.push(ProjectSection {
            project: tracker.report(project),
            dependencies,
        });
    }

    if let Some(path) = output_file {
        let content = format_result_to_string(&report, format)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if format == OutputFormat::Table {
            println!("Results written to: {}", path.display());
        }
    } else {
        print_result(&report, format)?;
    }

    Ok(determine_exit_code(&report, fail_on))
}

async fn run_check(config: &Config, packages: &[String], format: OutputFormat) -> Result<()> {
    let identifiers: Vec<String> = packages.iter().map(|p| extract_identifier(p)).collect();

    let tracker = Tracker::from_config(config)?;
    let progress = spinner(format == OutputFormat::Table, "Checking packages...")?;

    let dependencies = tracker.resolve_dependencies(&identifiers).await;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let report = TrackReport {
        dependencies,
        ..TrackReport::new()
    };
    print_result(&report, format)
}

fn parse_format(format: Option<String>, config: &Config) -> Result<OutputFormat> {
    let format = format.unwrap_or_else(|| config.default_format.clone());
    OutputFormat::from_str(&format).map_err(|e| anyhow::anyhow!(e))
}

fn spinner(enabled: bool, message: &'static str) -> Result<Option<ProgressBar>> {
    if !enabled {
        return Ok(None);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    Ok(Some(pb))
}

/// Names a project after the directory holding its requirements file, or
/// after the file itself when there is no such directory.
fn project_name(path: &Path) -> String {
    path.canonicalize()
        .ok()
        .and_then(|p| p.parent()?.file_name().map(|n| n.to_string_lossy().into_owned()))
        .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| path.display().to_string())
}

/// Determine the exit code based on project severities and --fail-on setting
fn determine_exit_code(report: &TrackReport, fail_on: Option<FailLevel>) -> u8 {
    let fail_on = match fail_on {
        Some(level) => level,
        None => return exit_codes::SUCCESS,
    };

    let highest = report
        .projects
        .iter()
        .map(|s| s.project.severity)
        .max()
        .unwrap_or(Severity::None);

    if highest < fail_on.threshold() {
        return exit_codes::SUCCESS;
    }

    match highest {
        Severity::High => exit_codes::HIGH_VULN,
        Severity::Medium => exit_codes::MEDIUM_VULN,
        Severity::Low => exit_codes::LOW_VULN,
        Severity::None => exit_codes::SUCCESS,
    }
}

fn handle_config(config: &Config, init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
        } else {
            Config::default().save()?;
            println!("Created config file at: {}", config_path.display());
        }
        return Ok(());
    }

    if config_path.exists() {
        println!("# Loaded from {}", config_path.display());
    } else {
        println!("# No config file at {}, using defaults", config_path.display());
        println!("# Run 'vulntrack config --init' to create one");
    }
    println!();
    print!("{}", config.to_toml()?);
    println!();
    println!(
        "# cache ttl: {:?}, request timeout: {:?}",
        config.cache_ttl(),
        config.request_timeout()
    );

    Ok(())
}
