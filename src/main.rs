use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixelsmith::models::AppConfig;
use pixelsmith::services::{parse_size, ConvertRequest, ImageService};
use pixelsmith_core::generate::{GRADIENT_HEIGHT, GRADIENT_WIDTH};
use pixelsmith_core::{ChannelMask, ColorSpace, DitheringType, PixelFormat, ScalingType};

#[derive(Parser)]
#[command(name = "pixelsmith")]
#[command(about = "Convert, re-gamma, dither and resample PNG and PNM images")]
struct Cli {
    /// YAML configuration file (defaults to $PIXELSMITH_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print format, dimensions and gamma of an image
    Info {
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render an image through the editing pipeline and save it
    Convert {
        input: PathBuf,

        /// Output file; .png, .pnm, .pgm (forces gray) or .ppm (forces rgb)
        output: PathBuf,

        /// Color space to work in (rgb, hsl, hsv, ycbcr601, ycbcr709, ycocg, cmy)
        #[arg(long)]
        color_space: Option<ColorSpace>,

        /// Channels to keep, e.g. "1,0,1"
        #[arg(long)]
        channels: Option<ChannelMask>,

        /// Re-encode the working image at this gamma
        #[arg(long)]
        gamma: Option<f32>,

        /// Render at this gamma
        #[arg(long)]
        output_gamma: Option<f32>,

        /// Dithering algorithm (none, ordered, random, floyd-steinberg, atkinson)
        #[arg(long)]
        dither: Option<DitheringType>,

        /// Bits per sample, 1-8
        #[arg(long)]
        depth: Option<u8>,

        /// Resample to WIDTHxHEIGHT first
        #[arg(long, value_parser = parse_resize)]
        resize: Option<(usize, usize)>,

        /// Resampling algorithm (nearest-neighbour, bilinear, lanczos3, bc-splines)
        #[arg(long)]
        scaling: Option<ScalingType>,

        /// B parameter of the bc-splines filter
        #[arg(long)]
        b: Option<f32>,

        /// C parameter of the bc-splines filter
        #[arg(long)]
        c: Option<f32>,
    },
    /// Write a horizontal black-to-white gradient
    Gradient {
        output: PathBuf,

        #[arg(long, default_value_t = GRADIENT_WIDTH)]
        width: usize,

        #[arg(long, default_value_t = GRADIENT_HEIGHT)]
        height: usize,

        /// Write three channels instead of one
        #[arg(long)]
        rgb: bool,
    },
}

fn parse_resize(s: &str) -> Result<(usize, usize), String> {
    parse_size(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelsmith=info,pixelsmith_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load(cli.config.as_deref());
    let service = ImageService::new(config);

    match cli.command {
        Commands::Info { input, json } => {
            let info = service.info(&input).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", input.display());
                println!("  format:       {}", info.format);
                println!("  size:         {}x{}", info.width, info.height);
                println!("  pixel format: {}", info.pixel_format);
                match info.gamma {
                    Some(gamma) => println!("  gamma:        {gamma}"),
                    None => println!("  gamma:        (not set)"),
                }
            }
        }
        Commands::Convert {
            input,
            output,
            color_space,
            channels,
            gamma,
            output_gamma,
            dither,
            depth,
            resize,
            scaling,
            b,
            c,
        } => {
            let report = service
                .convert(ConvertRequest {
                    input,
                    output,
                    color_space,
                    channels,
                    gamma,
                    output_gamma,
                    dithering: dither,
                    depth,
                    resize,
                    scaling,
                    b,
                    c,
                })
                .await?;
            println!(
                "Wrote {} ({} {}x{} {}, {} bytes)",
                report.output.display(),
                report.format,
                report.width,
                report.height,
                report.pixel_format,
                report.bytes
            );
        }
        Commands::Gradient {
            output,
            width,
            height,
            rgb,
        } => {
            let pixel_format = if rgb { PixelFormat::Rgb } else { PixelFormat::Gray };
            let bytes = service
                .write_gradient(&output, width, height, pixel_format)
                .await?;
            println!("Wrote {} ({} bytes)", output.display(), bytes);
        }
    }

    Ok(())
}
