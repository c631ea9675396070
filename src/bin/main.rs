use rust_raycaster::parsing::cameras::PRESETS;
use rust_raycaster::parsing::config::*;
use rust_raycaster::parsing::load_settings;
use rust_raycaster::renderer::render_to_file;

use std::path::PathBuf;

use anyhow::Context;
use structopt::StructOpt;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};

#[derive(Debug, StructOpt)]
#[structopt(rename_all = "kebab-case")]
struct Opt {
    #[structopt(short = "n", long, allow_hyphen_values = true)]
    pub threads: Option<i64>,
    #[structopt(long, allow_hyphen_values = true)]
    pub width: Option<i64>,
    #[structopt(long, allow_hyphen_values = true)]
    pub height: Option<i64>,
    #[structopt(short = "o", long)]
    pub output_file: Option<String>,
    #[structopt(short = "p", long)]
    pub preset: Option<String>,
    #[structopt(long)]
    pub seed: Option<u64>,
    #[structopt(long)]
    pub no_shuffle: bool,
    #[structopt(long, allow_hyphen_values = true)]
    pub batch_size: Option<i64>,
    /// don't draw the progress bar
    #[structopt(short = "q", long)]
    pub quiet: bool,
    #[structopt(long)]
    pub config_file: Option<PathBuf>,
    #[structopt(long, default_value = "info")]
    pub log_level: String,
    #[structopt(long)]
    pub list_presets: bool,
}

impl Opt {
    fn overrides(&self) -> TOMLConfig {
        TOMLConfig {
            threads: self.threads,
            width: self.width,
            height: self.height,
            preset: self.preset.clone(),
            output_file: self.output_file.clone(),
            seed: self.seed,
            shuffle: if self.no_shuffle { Some(false) } else { None },
            batch_size: self.batch_size,
            report_interval_ms: None,
            show_progress: if self.quiet { Some(false) } else { None },
        }
    }
}

fn parse_log_level(level: &str, default: LevelFilter) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "error" => LevelFilter::ERROR,
        "warn" => LevelFilter::WARN,
        "info" => LevelFilter::INFO,
        "debug" => LevelFilter::DEBUG,
        "trace" => LevelFilter::TRACE,
        _ => default,
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opt::from_args();
    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(&opts.log_level, LevelFilter::INFO))
        .with_writer(std::io::stderr)
        .init();

    if opts.list_presets {
        for preset in PRESETS.iter() {
            println!("{:<12} {}", preset.name, preset.mesh_file);
        }
        return Ok(());
    }

    let settings = load_settings(opts.config_file.as_deref(), opts.overrides())
        .inspect_err(|e| error!("{}", e))
        .context("invalid configuration")?;

    let stats = render_to_file(&settings).inspect_err(|e| error!("{}", e))?;
    info!("done, {} of {} pixels hit the mesh", stats.hits, stats.camera_rays);
    Ok(())
}
