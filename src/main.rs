use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use planner_smoke::artifacts::ArtifactStore;
use planner_smoke::checks::planner_checks;
use planner_smoke::config::{self, ArtifactSettings, Config, TargetSettings, WaitSettings};
use planner_smoke::runner::types::{Check, CheckOutcome, RunReport};
use planner_smoke::session::Session;

/// planner-smoke - browser smoke checks for the Smart Study Planner
#[derive(Parser, Debug)]
#[command(
    name = "planner-smoke",
    about = "Browser smoke checks for the Smart Study Planner web page",
    after_help = "ENVIRONMENT VARIABLES:\n\
        PLANNER_SMOKE_BASE_URL        Target page URL\n\
        PLANNER_SMOKE_WEBDRIVER_URL   WebDriver endpoint\n\
        PLANNER_SMOKE_HEADLESS        Run the browser headless (default: true)\n\
        PLANNER_SMOKE_WAIT_TIMEOUT    Locate/verify wait timeout in seconds\n\
        PLANNER_SMOKE_POLL_INTERVAL   Polling interval in milliseconds\n\
        PLANNER_SMOKE_ARTIFACT_DIR    Directory for screenshot artifacts"
)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the smoke checks against a live browser
    Run {
        /// Target page URL (overrides PLANNER_SMOKE_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// WebDriver endpoint, e.g. a running chromedriver
        /// (overrides PLANNER_SMOKE_WEBDRIVER_URL)
        #[arg(long)]
        webdriver_url: Option<String>,

        /// Show the browser window instead of running headless
        #[arg(long)]
        headed: bool,

        /// Locate/verify wait timeout in seconds
        /// (overrides PLANNER_SMOKE_WAIT_TIMEOUT)
        #[arg(long, short = 't')]
        timeout: Option<u64>,

        /// Polling interval in milliseconds
        /// (overrides PLANNER_SMOKE_POLL_INTERVAL)
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Directory for screenshot artifacts
        /// (overrides PLANNER_SMOKE_ARTIFACT_DIR)
        #[arg(long, short = 'a')]
        artifacts: Option<PathBuf>,

        /// Skip screenshot capture entirely
        #[arg(long)]
        no_capture: bool,

        /// Run only the named checks (repeatable)
        #[arg(long, short = 'c')]
        check: Vec<String>,

        /// Output the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the defined checks without running them
    List,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Some(Commands::Run {
            base_url,
            webdriver_url,
            headed,
            timeout,
            poll_interval,
            artifacts,
            no_capture,
            check,
            json,
        }) => {
            // CLI flags override the environment-backed defaults.
            let defaults = config::get();
            let config = Config {
                target: TargetSettings {
                    base_url: base_url.unwrap_or_else(|| defaults.target.base_url.clone()),
                    webdriver_url: webdriver_url
                        .unwrap_or_else(|| defaults.target.webdriver_url.clone()),
                    headless: !headed && defaults.target.headless,
                },
                wait: WaitSettings {
                    timeout_secs: timeout.unwrap_or(defaults.wait.timeout_secs),
                    poll_interval_ms: poll_interval.unwrap_or(defaults.wait.poll_interval_ms),
                },
                artifacts: ArtifactSettings {
                    dir: artifacts
                        .map(|p| p.to_string_lossy().to_string())
                        .unwrap_or_else(|| defaults.artifacts.dir.clone()),
                },
            };

            let checks = select_checks(planner_checks(), &check)?;

            let mut session = Session::open(&config).await?;
            if !no_capture {
                let store = ArtifactStore::new(&config.artifacts.dir)?;
                session = session.artifacts(store);
            }

            let report = session.run(&checks).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }

            if !report.all_green() {
                std::process::exit(1);
            }
        }

        Some(Commands::List) => {
            for check in planner_checks() {
                let tag = if check.optional { " (optional)" } else { "" };
                println!("{}{} - {}", check.name, tag, check.description);
            }
        }

        None => {
            println!("planner-smoke - browser smoke checks for the Smart Study Planner");
            println!();
            println!("Usage: planner-smoke <COMMAND>");
            println!();
            println!("Commands:");
            println!("  run   Run the smoke checks against a live browser");
            println!("  list  List the defined checks without running them");
            println!();
            println!("Run with --help for more information.");
        }
    }

    Ok(())
}

/// Restrict the check list to the requested names, preserving run order
fn select_checks(all: Vec<Check>, names: &[String]) -> Result<Vec<Check>, Box<dyn Error>> {
    if names.is_empty() {
        return Ok(all);
    }
    for name in names {
        if !all.iter().any(|c| &c.name == name) {
            return Err(format!("unknown check: {}", name).into());
        }
    }
    Ok(all.into_iter().filter(|c| names.contains(&c.name)).collect())
}

fn print_report(report: &RunReport) {
    for result in &report.results {
        let tag = match result.outcome {
            CheckOutcome::Passed => "PASS",
            CheckOutcome::Failed => "FAIL",
            CheckOutcome::Skipped => "SKIP",
        };
        let detail = result
            .detail
            .as_ref()
            .map(|d| format!(" ({})", d))
            .unwrap_or_default();
        println!("{} {}{}", tag, result.name, detail);
        if let Some(artifact) = &result.artifact {
            println!("     screenshot: {}", artifact.display());
        }
    }
    println!();
    println!(
        "{} passed, {} failed, {} skipped in {:.1}s",
        report.passed,
        report.failed,
        report.skipped,
        report.duration_ms as f64 / 1000.0
    );
}
