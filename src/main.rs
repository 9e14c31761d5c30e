use std::path::{Path, PathBuf};

use bitmapper::cdp::CdpEngine;
use bitmapper::{Config, RenderPlan};
use clap::Parser;

const DEFAULT_CONFIG: &str = "bitmapper.json";

#[derive(Parser, Debug)]
#[command(name = "bitmapper", version)]
#[command(about = "Render SVG cursors to PNG bitmaps through headless Chrome")]
struct Cli {
    /// Config file (JSON). Defaults to ./bitmapper.json when present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the .svg sources
    #[arg(long)]
    svg_dir: Option<PathBuf>,

    /// Directory bitmaps are written to
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Chrome/Chromium binary to launch
    #[arg(long)]
    chrome: Option<PathBuf>,

    /// Disable the browser sandbox (needed in some containers)
    #[arg(long)]
    no_sandbox: bool,

    /// Ceiling for the container wait, in milliseconds
    #[arg(long)]
    wait_timeout_ms: Option<u64>,

    /// Print the bitmaps that would be written and exit
    #[arg(long)]
    dry_run: bool,
}

fn load_config(cli: &Cli) -> bitmapper::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG).is_file() => Config::from_file(Path::new(DEFAULT_CONFIG))?,
        None => Config::default(),
    };

    if let Some(dir) = &cli.svg_dir {
        config.svgs_dir = dir.clone();
    }
    if let Some(dir) = &cli.out_dir {
        config.bitmaps_dir = dir.clone();
    }
    if let Some(chrome) = &cli.chrome {
        config.engine.chrome_path = Some(chrome.clone());
    }
    if cli.no_sandbox {
        config.engine.sandbox = false;
    }
    if cli.wait_timeout_ms.is_some() {
        config.engine.wait_timeout_ms = cli.wait_timeout_ms;
    }
    Ok(config)
}

fn run(cli: &Cli) -> bitmapper::Result<()> {
    let config = load_config(cli)?;

    if cli.dry_run {
        let plan = RenderPlan::from_config(&config)?;
        for name in plan.outputs() {
            println!("{}", config.bitmaps_dir.join(name).display());
        }
        return Ok(());
    }

    let report = bitmapper::render::run::<CdpEngine>(&config)?;
    println!(
        "\nBitmaps stored at {}\n\nRender done ({} files).",
        report.output_dir.display(),
        report.total()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
