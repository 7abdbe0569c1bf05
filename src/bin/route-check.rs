use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use route_harness::fixture::run_fixture_server;
use route_harness::harness::{run_suite, CaseSuite, SuiteReport};
use route_harness::RunnerConfig;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("route-check error: {err:?}");
            ExitCode::from(1)
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "route-check", about = "Contract-test harness CLI for mock HTTP routes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn execute(self) -> Result<()> {
        match self.command {
            Command::Check(args) => check_command(args),
            Command::Serve(args) => serve_command(args),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a case suite against its fixture router and print a report.
    Check(CheckArgs),
    /// Serve a fixture router on a local address until Ctrl+C.
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct CheckArgs {
    /// Path to a JSON case suite; omit to run the built-in smoke suite.
    #[arg(long)]
    suite: Option<PathBuf>,
    /// Optional runner config file (JSON); defaults apply when missing.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format for the suite report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    format: ReportFormat,
    /// Destination file for the JSON report.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    /// Host interface for the fixture router.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to serve the fixture on.
    #[arg(long, default_value_t = 8_787)]
    port: u16,
    /// Serve the fixture declared by this suite file instead of the
    /// canonical users fixture.
    #[arg(long)]
    suite: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum ReportFormat {
    Json,
    Table,
}

fn check_command(args: CheckArgs) -> Result<()> {
    let suite = load_suite(args.suite.as_deref())?;
    let config = args
        .config
        .as_ref()
        .map(RunnerConfig::load_from_file)
        .unwrap_or_default();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    let report = runtime.block_on(run_suite(&suite, &config))?;

    emit_report(&report, &args)?;

    if !report.passed() {
        bail!(
            "{} of {} cases failed",
            report.failed_count(),
            report.outcomes.len()
        );
    }
    Ok(())
}

fn emit_report(report: &SuiteReport, args: &CheckArgs) -> Result<()> {
    if let Some(path) = &args.out {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("creating report output directory")?;
        }
        let json = serde_json::to_string_pretty(report).context("serializing suite report")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing report to {}", path.display()))?;
        return Ok(());
    }

    match args.format {
        ReportFormat::Json => report.print_json().context("rendering JSON report")?,
        ReportFormat::Table => report.print_table(),
    }
    Ok(())
}

fn serve_command(args: ServeArgs) -> Result<()> {
    let fixture = load_suite(args.suite.as_deref())?.fixture;
    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("parsing listen address")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    runtime.block_on(async move {
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            let _ = shutdown_tx.send(());
        });
        println!("Fixture router running on http://{addr}");
        println!("Press Ctrl+C to stop.");
        run_fixture_server(&fixture, addr, shutdown_rx).await
    })
}

fn load_suite(path: Option<&std::path::Path>) -> Result<CaseSuite> {
    match path {
        Some(path) => CaseSuite::load_from_file(path)
            .with_context(|| format!("loading suite {}", path.display())),
        None => Ok(CaseSuite::users_smoke()),
    }
}
