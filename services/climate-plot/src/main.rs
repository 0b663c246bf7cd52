//! Climate map command-line tool.
//!
//! Renders yearly temperature maps from NetCDF model output and prints
//! area-mean and solar-forcing tables as CSV.

mod commands;
mod config;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use climate_frame::DEFAULT_WINDOW;
use projection::ProjectionKind;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use commands::AverageOptions;
use config::load_figure_config;

#[derive(Parser, Debug)]
#[command(name = "climate-plot")]
#[command(about = "Maps and tables from gridded climate-model temperature output")]
struct Cli {
    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "CLIMATE_LOG_JSON")]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one model year as a filled contour map
    Map(MapArgs),

    /// Print the area-mean temperature per year as CSV
    GlobalAverage(AverageArgs),

    /// Print the solar forcing table as CSV
    Forcing {
        /// NetCDF file with a TSI(time, lev, x) variable
        #[arg(short, long, env = "CLIMATE_FORCING_FILE")]
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct MapArgs {
    /// NetCDF file with a (time, lat, lon) temperature variable
    #[arg(short, long, env = "CLIMATE_INPUT")]
    input: PathBuf,

    /// Temperature variable name
    #[arg(long, default_value = "tas", env = "CLIMATE_VARIABLE")]
    variable: String,

    /// Model year (1-999)
    #[arg(short, long)]
    year: i64,

    /// Plot the departure from the all-years mean
    #[arg(long)]
    anomaly: bool,

    /// Output PNG
    #[arg(short, long)]
    output: PathBuf,

    /// Figure config YAML
    #[arg(short, long, env = "CLIMATE_FIGURE_CONFIG")]
    config: Option<PathBuf>,

    /// Lower color limit
    #[arg(long, allow_negative_numbers = true)]
    vmin: Option<f64>,

    /// Upper color limit
    #[arg(long, allow_negative_numbers = true)]
    vmax: Option<f64>,

    /// Map projection (platecarree, robinson)
    #[arg(long, env = "CLIMATE_PROJECTION")]
    projection: Option<ProjectionKind>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Skip the colorbar
    #[arg(long)]
    no_colorbar: bool,
}

#[derive(Args, Debug)]
struct AverageArgs {
    /// NetCDF file with a (time, lat, lon) temperature variable
    #[arg(short, long, env = "CLIMATE_INPUT")]
    input: PathBuf,

    /// Temperature variable name
    #[arg(long, default_value = "tas", env = "CLIMATE_VARIABLE")]
    variable: String,

    /// Rolling-mean window in years
    #[arg(short, long, default_value_t = DEFAULT_WINDOW, env = "CLIMATE_WINDOW")]
    window: usize,

    /// Trailing instead of centered window
    #[arg(long)]
    trailing: bool,

    /// Southern edge of a latitude band
    #[arg(long, requires = "lat_max", allow_negative_numbers = true)]
    lat_min: Option<f64>,

    /// Northern edge of a latitude band
    #[arg(long, requires = "lat_min", allow_negative_numbers = true)]
    lat_max: Option<f64>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    // Logs go to stderr so CSV on stdout stays clean
    if cli.json_logs {
        fmt().with_env_filter(filter).with_target(true).with_writer(io::stderr).json().init();
    } else {
        fmt().with_env_filter(filter).with_target(true).with_writer(io::stderr).init();
    }

    netcdf_parser::silence_hdf5_errors();

    match cli.command {
        Commands::Map(args) => run_map(args),
        Commands::GlobalAverage(args) => {
            let options = AverageOptions {
                window: args.window,
                center: !args.trailing,
                lat_band: args.lat_min.zip(args.lat_max),
            };
            let out = output_writer(args.output.as_ref())?;
            commands::write_global_average(&args.input, &args.variable, options, out)
        }
        Commands::Forcing { input, output } => {
            let out = output_writer(output.as_ref())?;
            commands::write_forcing(&input, out)
        }
    }
}

fn run_map(args: MapArgs) -> Result<()> {
    let mut config = load_figure_config(args.config.as_deref())?;
    if let Some(projection) = args.projection {
        config.projection = projection;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    config.vmin = args.vmin.or(config.vmin);
    config.vmax = args.vmax.or(config.vmax);
    if args.no_colorbar {
        config.colorbar = false;
    }

    info!(
        input = %args.input.display(),
        year = args.year,
        projection = %config.projection,
        "Rendering map"
    );
    commands::render_map(&args.input, &args.variable, args.year, args.anomaly, &config, &args.output)
}

fn output_writer(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {:?}", path))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}
