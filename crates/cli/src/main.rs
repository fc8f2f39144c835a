use clap::Parser;
use dnscheck_application::{conformance_suite, ScenarioRunner};
use dnscheck_domain::CliOverrides;
use dnscheck_infrastructure::{EmbeddedResolver, UdpProber};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

mod bootstrap;

#[derive(Parser)]
#[command(name = "dnscheck")]
#[command(version)]
#[command(about = "Conformance harness for definition-driven DNS resolvers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Resolver host (the embedded resolver binds here)
    #[arg(long)]
    host: Option<String>,

    /// Resolver port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Zone the conformance record names live under
    #[arg(long)]
    zone: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit one JSON object per scenario instead of text lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        resolver_host: cli.host.clone(),
        resolver_port: cli.port,
        zone: cli.zone.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting dnscheck v{}", env!("CARGO_PKG_VERSION"));

    let bind: SocketAddr =
        format!("{}:{}", config.resolver.host, config.resolver.port).parse()?;
    let resolver = Arc::new(EmbeddedResolver::start(bind).await?);

    let prober = Arc::new(UdpProber::new(config.timing.query_timeout()));
    let runner = Arc::new(ScenarioRunner::new(
        prober,
        resolver.clone(),
        resolver.clone(),
        resolver.clone(),
        resolver.addr(),
        config.timing.clone(),
    ));

    let run_id = format!("{:08x}", fastrand::u32(..));
    let scenarios = conformance_suite(&config.resolver.zone, &run_id);
    info!(
        scenarios = scenarios.len(),
        run_id = %run_id,
        resolver = %resolver.addr(),
        "running conformance suite"
    );

    let reports = runner.run_all(scenarios).await;

    let mut failed = 0usize;
    for report in &reports {
        if cli.json {
            let line = serde_json::json!({
                "scenario": report.scenario,
                "namespace": report.namespace,
                "state": report.state.to_string(),
                "passed": report.passed,
                "failure": report.failure_message(),
                "elapsed_ms": report.elapsed.as_millis() as u64,
            });
            println!("{}", line);
        } else if report.passed {
            println!(
                "PASS {} ({} ms)",
                report.scenario,
                report.elapsed.as_millis()
            );
        } else {
            println!(
                "FAIL {}: {}",
                report.scenario,
                report
                    .failure_message()
                    .unwrap_or_else(|| "unknown failure".to_string())
            );
        }

        if !report.passed {
            failed += 1;
        }
    }

    resolver.shutdown();

    if failed > 0 {
        error!(failed, total = reports.len(), "conformance suite failed");
        std::process::exit(1);
    }

    info!(total = reports.len(), "conformance suite passed");
    Ok(())
}
