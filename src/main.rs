// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! fairbot CLI - fair-software.eu compliance checker

use clap::{Parser, ValueEnum};
use fairbot::config::DEFAULT_CONFIG;
use fairbot::report::JsonReport;
use fairbot::{CheckRequest, HttpClient, RepoOptions, Reporter};
use std::error::Error;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

/// fairbot: fair-software.eu compliance checker
///
/// Determine compliance with the recommendations from fair-software.eu for
/// the GitHub or GitLab repository at URL.
#[derive(Parser)]
#[command(name = "fairbot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Repository URL
    #[arg(required_unless_present = "show_default_config")]
    url: Option<String>,

    /// Git branch to use; also accepts other references like a SHA or tag
    #[arg(short, long)]
    branch: Option<String>,

    /// Local configuration file controlling fairbot's behavior
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Show the default configuration and exit
    #[arg(short = 'd', long)]
    show_default_config: bool,

    /// Ignore any configuration file on the remote
    #[arg(short, long, conflicts_with = "remote_config_file")]
    ignore_remote_config: bool,

    /// Subdirectory on the remote holding the README and configuration file
    #[arg(short, long)]
    path: Option<String>,

    /// Name of the configuration file on the remote (default: .howfairis.yml)
    #[arg(short, long)]
    remote_config_file: Option<String>,

    /// Show the full error chain on failure
    #[arg(short = 't', long)]
    show_trace: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Pretty)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.show_default_config {
        print!("{}", DEFAULT_CONFIG);
        return ExitCode::SUCCESS;
    }

    init_logging(&cli.log_level);

    let color = !cli.no_color && std::io::stdout().is_terminal();
    let reporter = Reporter::new(color);

    // clap requires a URL unless -d was given
    let url = cli.url.clone().unwrap_or_default();

    let pretty = cli.format == Format::Pretty;
    if pretty {
        print_request(&cli, &url);
    }

    let request = CheckRequest {
        url,
        options: RepoOptions {
            branch: cli.branch.clone(),
            path: cli.path.clone(),
            config_file: cli.remote_config_file.clone(),
        },
        config_file: cli.config_file.clone(),
        ignore_remote_config: cli.ignore_remote_config,
        ..Default::default()
    };

    let client = match HttpClient::new() {
        Ok(c) => c,
        Err(e) => return fail(&e, cli.show_trace),
    };

    let assessment = match fairbot::check(&client, &request).await {
        Ok(a) => a,
        Err(e) => return fail(&e, cli.show_trace),
    };

    if pretty {
        reporter.print(&assessment);
    } else {
        match serde_json::to_string_pretty(&JsonReport::new(&assessment)) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        }
    }

    ExitCode::from(assessment.verdict().exit_code())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn print_request(cli: &Cli, url: &str) {
    println!("Checking compliance with fair-software.eu...");
    println!("url: {}", url);
    if let Some(ref branch) = cli.branch {
        println!("branch: {}", branch);
    }
    if let Some(ref path) = cli.path {
        println!("path: {}", path);
    }
    if cli.ignore_remote_config {
        println!("Ignoring any configuration files on the remote.");
    } else if let Some(ref name) = cli.remote_config_file {
        println!("Remote configuration filename: {}", name);
    }
    if let Some(ref file) = cli.config_file {
        println!("Local configuration file: {}", file.display());
    }
}

fn fail(error: &fairbot::FairbotError, show_trace: bool) -> ExitCode {
    eprintln!("Error: {}", error);
    if show_trace {
        let mut source = error.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
    }
    ExitCode::FAILURE
}
