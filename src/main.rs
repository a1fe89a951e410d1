use discovery_harness::alert::service::alert_hook;
use discovery_harness::config::types::HarnessConfig;
use discovery_harness::monitor::service::LivenessMonitor;
use discovery_harness::passive::service::ListenerPool;
use discovery_harness::probe::service::ProbePool;
use discovery_harness::report::service::ReportLog;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let report = ReportLog::stdout();

    report.log(format!("Arguments:: {}", args[1..].join(" ")));

    let config = match HarnessConfig::from_args(&args[1..]) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!();
            eprintln!("{}", HarnessConfig::usage(&args[0]));
            std::process::exit(1);
        }
    };

    report.log(config.describe());

    // Every passive listener must be healthy before monitoring begins.
    let pool = match ListenerPool::start(
        config.passive_listeners,
        config.endpoint,
        config.wait_timeout,
        report.clone(),
    )
    .await
    {
        Ok(pool) => pool,
        Err(e) => {
            report.log(format!("Failed to start passive listeners: {:#}", e));
            std::process::exit(1);
        }
    };

    let alert = alert_hook(config.alert_script.as_deref(), report.clone());
    ProbePool::start(
        config.active_probes,
        config.endpoint,
        config.wait_timeout,
        config.probe_pause,
        config.budget,
        alert,
        report.clone(),
    );

    // The monitor owns the main task and never returns.
    LivenessMonitor::new(pool.trackers().to_vec(), config.wait_timeout, report)
        .run()
        .await
}
