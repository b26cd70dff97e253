// Wed Aug 05 2026 - Alex

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use unity_asset_probe::{
    config::ProbeConfig,
    output::{self, ProbeReport},
    probe::ProbeRunner,
    ui::banner::Banner,
    utils::logging,
};

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Probe a dynamic module's asset-extraction export", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "UnityAssets.dll")]
    module: PathBuf,

    #[arg(short, long, default_value = "GetPngFromHero")]
    symbol: String,

    #[arg(short, long, default_value = "2470")]
    key: String,

    #[arg(short, long)]
    payload: Option<PathBuf>,

    #[arg(long)]
    report: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,

    #[arg(long)]
    no_spinner: bool,

    #[arg(long)]
    no_banner: bool,
}

fn main() {
    let args = Args::parse();

    if std::env::var("RUST_LOG").is_ok() {
        logging::init_from_env();
    } else {
        logging::init_logger(args.verbose);
    }

    let mut config = ProbeConfig::new()
        .with_module_path(args.module)
        .with_symbol_name(args.symbol)
        .with_asset_key(args.key);
    if let Some(path) = args.payload {
        config = config.with_payload_output(path);
    }
    if let Some(path) = args.report {
        config = config.with_report_output(path);
    }
    config.enable_verbose_output = args.verbose;
    config.enable_spinner = !args.no_spinner;
    config.show_banner = !args.no_banner;

    if let Err(e) = config.validate() {
        eprintln!("{} Invalid arguments: {}", "[!]".red(), e);
        std::process::exit(1);
    }

    if config.show_banner {
        Banner::new("Unity Asset Probe").with_version("1.0.0").print();
    }

    let symbol_name = config.symbol_name.clone();
    let report_path = config.report_output.clone();
    let use_spinner = config.enable_spinner;
    let mut runner = ProbeRunner::new(config);

    println!("Loading dll...");
    if let Err(e) = runner.load() {
        eprintln!("{} {}", "[!]".red(), e);
        std::process::exit(1);
    }
    eprintln!("{} Module loaded", "[+]".green());

    println!("Call {}", symbol_name);

    let spinner = if use_spinner { Some(make_spinner()) } else { None };
    let returned = match runner.extract() {
        Ok(size) => size,
        Err(e) => {
            if let Some(pb) = &spinner {
                pb.finish_and_clear();
            }
            eprintln!("{} {}", "[!]".red(), e);
            std::process::exit(1);
        }
    };
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    eprintln!("{} Export returned", "[+]".green());

    println!("Output size: {}", returned);

    let report = match runner.finish() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} {}", "[!]".red(), e);
            std::process::exit(1);
        }
    };

    for line in report.summary_lines() {
        eprintln!("  {}", line.dimmed());
    }

    if let Some(path) = &report_path {
        if let Err(e) = save_report(&report, path) {
            eprintln!("{} {:#}", "[!]".red(), e);
            std::process::exit(1);
        }
        eprintln!("{} Report saved to: {}", "[+]".green(), path.display());
    }
}

fn make_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Waiting for callee...");
    pb
}

fn save_report(report: &ProbeReport, path: &Path) -> anyhow::Result<()> {
    output::save_json_report(report, path)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
