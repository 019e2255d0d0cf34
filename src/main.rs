use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;

use quota_notify::core::monitor::{run, TokioScheduler};
use quota_notify::core::{report_warnings, MonitorLoop, Notifier};
use quota_notify::platform::{default_resolver, SysinfoVolumes};
use quota_notify::ui::{format_check_outcome, format_config_summary, ConsoleNotifier};

fn main() -> Result<()> {
    quota_notify::init_logging();

    let matches = Command::new("quota-notify")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Warns when monitored drives run low on free space")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("JSON configuration file (default: <config dir>/quota-notify/config.json)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .help("Check all drives immediately, once, then exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("show-config")
                .long("show-config")
                .help("Print the effective configuration and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("With --show-config, print the configuration as JSON")
                .requires("show-config")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("console")
                .long("console")
                .help("Print alerts to the terminal instead of showing dialogs")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    execute(&matches)
}

fn execute(matches: &ArgMatches) -> Result<()> {
    let notifier = select_notifier(matches.get_flag("console"));

    let resolver = default_resolver(matches.get_one::<PathBuf>("config").cloned());
    let resolution = resolver.resolve();
    report_warnings(&resolution.warnings, notifier.as_ref());
    let config = Arc::new(resolution.config);

    if matches.get_flag("show-config") {
        if matches.get_flag("json") {
            println!("{}", serde_json::to_string_pretty(config.as_ref())?);
        } else {
            print!("{}", format_config_summary(&config, &resolver.source_names()));
        }
        notifier.wait_idle();
        return Ok(());
    }

    let mut monitor = MonitorLoop::new(config);
    let mut volumes = SysinfoVolumes::new();

    if matches.get_flag("once") {
        let report = monitor.tick(&mut volumes, notifier.as_ref());
        if let Some(outcome) = format_check_outcome(&report, &monitor.drive_list()) {
            println!("{}", outcome);
        }
        notifier.wait_idle();
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(());
    })
    .context("Failed to install Ctrl-C handler")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .thread_name("quota-notify")
        .build()
        .context("Failed to build the timer runtime")?;

    let mut scheduler = TokioScheduler::new(shutdown_rx);
    runtime.block_on(run(
        &mut monitor,
        &mut scheduler,
        &mut volumes,
        notifier.as_ref(),
    ));

    Ok(())
}

#[cfg(windows)]
fn select_notifier(console: bool) -> Box<dyn Notifier> {
    use quota_notify::platform::MessageBoxNotifier;

    if console {
        Box::new(ConsoleNotifier::new())
    } else {
        Box::new(MessageBoxNotifier::new())
    }
}

#[cfg(not(windows))]
fn select_notifier(_console: bool) -> Box<dyn Notifier> {
    Box::new(ConsoleNotifier::new())
}
