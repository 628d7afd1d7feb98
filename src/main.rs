use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use complex_fractal_explorer::{
    ExplorerLimits, FractalKind, PpmFilePresenter, RenderCommand, RenderSettings, ResolutionScale,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FractalArg {
    Mandelbrot,
    Tricorn,
    BurningShip,
    Newton,
}

impl From<FractalArg> for FractalKind {
    fn from(arg: FractalArg) -> Self {
        match arg {
            FractalArg::Mandelbrot => Self::Mandelbrot,
            FractalArg::Tricorn => Self::Tricorn,
            FractalArg::BurningShip => Self::BurningShip,
            FractalArg::Newton => Self::Newton,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResolutionArg {
    #[value(name = "100")]
    Full,
    #[value(name = "50")]
    Half,
    #[value(name = "25")]
    Quarter,
    #[value(name = "12.5")]
    Eighth,
    #[value(name = "6.25")]
    Sixteenth,
}

impl From<ResolutionArg> for ResolutionScale {
    fn from(arg: ResolutionArg) -> Self {
        match arg {
            ResolutionArg::Full => Self::Full,
            ResolutionArg::Half => Self::Half,
            ResolutionArg::Quarter => Self::Quarter,
            ResolutionArg::Eighth => Self::Eighth,
            ResolutionArg::Sixteenth => Self::Sixteenth,
        }
    }
}

/// Renders one fractal frame to a binary PPM file.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    #[arg(long, value_enum, default_value_t = FractalArg::Mandelbrot)]
    fractal: FractalArg,

    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Zoom is 10^power; clamped to the precision limit.
    #[arg(long, default_value_t = 0.0)]
    zoom_power: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    real: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    imag: f64,

    /// Iteration ceiling; the zoom-scaled budget never exceeds it.
    #[arg(long)]
    max_iterations: Option<i64>,

    /// Use the whole iteration ceiling regardless of zoom.
    #[arg(long)]
    full: bool,

    /// Percentage of the pixel area to compute.
    #[arg(long, value_enum, default_value_t = ResolutionArg::Full)]
    resolution: ResolutionArg,

    #[arg(short, long, default_value = "output/fractal.ppm")]
    output: PathBuf,
}

impl From<Args> for RenderSettings {
    fn from(args: Args) -> Self {
        Self {
            width: args.width,
            height: args.height,
            fractal: args.fractal.into(),
            zoom_power: args.zoom_power,
            real: args.real,
            imag: args.imag,
            max_iterations: args.max_iterations,
            full: args.full,
            resolution: args.resolution.into(),
            output: args.output,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let command = RenderCommand::new(PpmFilePresenter::new(), ExplorerLimits::default());

    command.run(&args.into())?;

    Ok(())
}
