use clap::{Parser, Subcommand};
use da_vinci::config::{self, OutputConfig};
use da_vinci::format::{Format, FormatError};
use da_vinci::image::format_from_path;
use da_vinci::imaging::{
    BackendError, Center, CropRequest, Direction, Filter, OutputSpec, Quality, ResizeMethod, ResizeRequest,
    Rotation, RustBackend, Transformed, convert_file, crop_file, describe_file, flip_file,
    operations, resize_file, rotate_file,
};
use da_vinci::{naming, output};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Input files shared by every image command.
#[derive(clap::Args, Clone)]
struct Inputs {
    /// Image files to process
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Parser)]
#[command(name = "da-vinci")]
#[command(about = "Open, resize, crop and save images with exact geometry")]
#[command(long_about = "\
Open, resize, crop and save images with exact geometry

Lengths are pixels (120) or percentages of the image extent (25%).

Resize methods:
  stretch  exactly the requested size; the aspect ratio may change
  fit      largest size inside the box, aspect ratio preserved
  fill     smallest size covering the box, aspect ratio preserved
Give only --width or --height to derive the other from the aspect ratio.

Crops are centered on --center (default 50%,50%) and shifted to stay
inside the image; an axis larger than the image keeps its full extent.

Outputs are written next to each source, or into --out-dir, named
{stem}{suffix}.{ext}. With no --out-dir, no --suffix and no --format the
source is overwritten. Two files never write the same output: a later
file whose output is already claimed fails instead.

Rotation is counterclockwise. Multiples of 90 are lossless; any other
angle keeps the canvas size and leaves the corners empty.

Run 'da-vinci gen-config' to generate a documented da-vinci.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing da-vinci.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Write outputs here instead of next to each source
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    /// Appended to each output file stem
    #[arg(long, global = true, allow_hyphen_values = true)]
    suffix: Option<String>,

    /// Output format (jpeg, png, gif, bmp, tiff, webp, avif)
    #[arg(long, global = true)]
    format: Option<Format>,

    /// Quality for lossy formats, 1-100
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=100))]
    quality: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print dimensions, format and pixel layout
    Info {
        #[command(flatten)]
        inputs: Inputs,
        /// Emit a JSON array instead of text
        #[arg(long)]
        json: bool,
    },
    /// Resize to a target width and/or height
    Resize {
        #[command(flatten)]
        inputs: Inputs,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        #[arg(long, value_enum)]
        method: Option<ResizeMethod>,
        #[arg(long, value_enum)]
        filter: Option<Filter>,
    },
    /// Cut a box of the given size around a center point
    Crop {
        #[command(flatten)]
        inputs: Inputs,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        /// Crop center as X,Y, e.g. 50%,25% or 120,80
        #[arg(long)]
        center: Option<Center>,
    },
    /// Mirror horizontally or vertically
    Flip {
        #[command(flatten)]
        inputs: Inputs,
        #[arg(long, value_enum)]
        direction: Direction,
    },
    /// Rotate counterclockwise; quarter turns are lossless
    Rotate {
        #[command(flatten)]
        inputs: Inputs,
        /// Any angle; other than multiples of 90 the canvas size is kept
        #[arg(long, allow_hyphen_values = true)]
        degrees: f64,
    },
    /// Re-encode into another format
    Convert {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Print a stock da-vinci.toml with all options documented
    GenConfig,
}

/// Output settings after merging CLI flags over the config file.
struct OutputSettings {
    out_dir: Option<PathBuf>,
    suffix: String,
    format: Option<Format>,
    quality: Option<Quality>,
}

impl OutputSettings {
    fn resolve(cli: &Cli, config: &OutputConfig) -> Self {
        Self {
            out_dir: cli.out_dir.clone(),
            suffix: cli.suffix.clone().unwrap_or_else(|| config.suffix.clone()),
            format: cli.format.or(config.format),
            quality: cli.quality.or(config.quality).map(Quality::new),
        }
    }

    /// Output for `source`; keeps the source format unless one was chosen.
    fn output_spec(&self, source: &Path) -> Result<OutputSpec, FormatError> {
        let format = match self.format.or_else(|| format_from_path(source)) {
            Some(format) => format,
            None => return Err(FormatError::Unknown(source.display().to_string())),
        };
        Ok(OutputSpec {
            path: naming::output_path(source, self.out_dir.as_deref(), &self.suffix, format),
            format,
            quality: self.quality,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
    let cli = Cli::parse();

    if matches!(cli.command, Command::GenConfig) {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.config)?;
    let settings = OutputSettings::resolve(&cli, &config.output);
    init_thread_pool(&config.processing);
    if let Some(dir) = &settings.out_dir {
        std::fs::create_dir_all(dir)?;
    }
    let backend = RustBackend::new();

    match cli.command {
        Command::Info { inputs, json } => run_info(&inputs.files, json),
        Command::Resize {
            inputs,
            width,
            height,
            method,
            filter,
        } => {
            let request = ResizeRequest::new(width, height, method.unwrap_or(config.resize.method));
            let filter = filter.unwrap_or(config.resize.filter);
            run_batch(&inputs.files, &settings, |source, out| {
                resize_file(&backend, source, out, &request, filter)
            })
        }
        Command::Crop {
            inputs,
            width,
            height,
            center,
        } => {
            let request =
                CropRequest::new(width, height).with_center(center.unwrap_or(config.crop.center));
            run_batch(&inputs.files, &settings, |source, out| {
                crop_file(&backend, source, out, &request)
            })
        }
        Command::Flip { inputs, direction } => {
            run_batch(&inputs.files, &settings, |source, out| {
                flip_file(&backend, source, out, direction)
            })
        }
        Command::Rotate { inputs, degrees } => {
            let rotation = Rotation::from_degrees(degrees)?;
            run_batch(&inputs.files, &settings, |source, out| {
                rotate_file(&backend, source, out, rotation)
            })
        }
        Command::Convert { inputs } => run_batch(&inputs.files, &settings, |source, out| {
            convert_file(&backend, source, out)
        }),
        Command::GenConfig => Ok(()),
    }
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the config can only lower it.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

fn run_info(files: &[PathBuf], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let results: Vec<_> = files.par_iter().map(|f| describe_file(f)).collect();

    let mut infos = Vec::new();
    let mut failed = 0;
    for (i, (source, result)) in files.iter().zip(results).enumerate() {
        match result {
            Ok(info) if json => infos.push(info),
            Ok(info) => output::print_info(i + 1, &info),
            Err(e) => {
                failed += 1;
                output::print_failure(i + 1, source, &e);
            }
        }
    }
    if json {
        println!("{}", output::format_info_json(&infos)?);
    }
    batch_status(failed, files.len())
}

/// Run `op` over every file in parallel, then report in input order.
///
/// A failing file does not stop the others. Outputs are planned up front so
/// two files never race for the same path.
fn run_batch<F>(
    files: &[PathBuf],
    settings: &OutputSettings,
    op: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Fn(&Path, &OutputSpec) -> operations::Result<Transformed> + Sync,
{
    let plans = plan_outputs(files, settings);
    let results: Vec<operations::Result<Transformed>> = files
        .par_iter()
        .zip(plans.into_par_iter())
        .map(|(source, plan)| -> operations::Result<Transformed> { op(source, &plan?) })
        .collect();

    let mut failed = 0;
    for (i, (source, result)) in files.iter().zip(results).enumerate() {
        match result {
            Ok(transformed) => output::print_transformed(i + 1, &transformed),
            Err(e) => {
                failed += 1;
                log::debug!("{}: {:?}", source.display(), e);
                output::print_failure(i + 1, source, &e);
            }
        }
    }
    output::print_summary(files.len() - failed, failed);
    batch_status(failed, files.len())
}

/// Output spec per file; files whose output collides with an earlier one,
/// or with another input, fail instead of overwriting it.
fn plan_outputs(
    files: &[PathBuf],
    settings: &OutputSettings,
) -> Vec<operations::Result<OutputSpec>> {
    let specs: Vec<_> = files.iter().map(|f| settings.output_spec(f)).collect();
    let outputs: Vec<Option<&Path>> = specs
        .iter()
        .map(|spec| spec.as_ref().ok().map(|out| out.path.as_path()))
        .collect();
    let conflicts = naming::output_conflicts(files, &outputs);

    specs
        .iter()
        .zip(conflicts)
        .map(|(spec, conflict)| -> operations::Result<OutputSpec> {
            let out = spec.clone()?;
            match conflict {
                Some(other) => Err(BackendError::OutputConflict {
                    path: out.path.display().to_string(),
                    other: files[other].display().to_string(),
                }),
                None => Ok(out),
            }
        })
        .collect()
}

fn batch_status(failed: usize, total: usize) -> Result<(), Box<dyn std::error::Error>> {
    if failed > 0 {
        return Err(format!("{failed} of {total} images failed").into());
    }
    Ok(())
}
