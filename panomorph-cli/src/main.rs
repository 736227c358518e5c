use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "panomorph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a single panoramic image between projections.
    Convert(ConvertArgs),
    /// Convert an image sequence, reusing one precomputed sample plan.
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input image path.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path (format chosen by extension).
    #[arg(long, default_value = "out.jpg")]
    out: PathBuf,

    #[command(flatten)]
    shared: SharedArgs,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Text file listing one input image path per line.
    #[arg(long)]
    list: PathBuf,

    /// Output directory for converted frames.
    #[arg(long = "out-dir", default_value = "out")]
    out_dir: PathBuf,

    #[command(flatten)]
    shared: SharedArgs,
}

#[derive(Args, Debug)]
struct SharedArgs {
    /// Input projection name, or `auto` to detect it from the aspect ratio.
    #[arg(long = "in-projection", default_value = "auto")]
    in_projection: String,

    /// Output projection (cubemap, equirectangular, hemispherical).
    #[arg(long = "out-projection")]
    out_projection: String,

    /// Output width in pixels (derived from the aspect ratio when omitted).
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels (derived from the aspect ratio when omitted).
    #[arg(long)]
    height: Option<u32>,

    /// Rotate sampled directions by `<x>,<y>,<z>` degrees.
    #[arg(long)]
    rotation: Option<String>,

    /// Supersampling factor; n*n samples are averaged per output pixel.
    #[arg(long, default_value_t = 1)]
    samples: u32,

    /// Horizontal field of view of the hemispherical projection, degrees.
    #[arg(long = "hemi-fov-x", default_value_t = 180.0)]
    hemi_fov_x: f64,

    /// Vertical field of view of the hemispherical projection, degrees.
    #[arg(long = "hemi-fov-y", default_value_t = 180.0)]
    hemi_fov_y: f64,

    /// Render output rows in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

impl SharedArgs {
    fn request(&self) -> anyhow::Result<panomorph::ConvertRequest> {
        let in_projection = if self.in_projection == "auto" {
            None
        } else {
            Some(self.in_projection.parse::<panomorph::ProjectionKind>()?)
        };
        let rotation = self
            .rotation
            .as_deref()
            .map(str::parse::<panomorph::Rotation>)
            .transpose()?;

        Ok(panomorph::ConvertRequest {
            in_projection,
            out_projection: self.out_projection.parse()?,
            width: self.width,
            height: self.height,
            rotation,
            samples: self.samples,
            projection_params: panomorph::ProjectionParams {
                hemi_fov_x_deg: self.hemi_fov_x,
                hemi_fov_y_deg: self.hemi_fov_y,
            },
        })
    }

    fn threading(&self) -> panomorph::RenderThreading {
        panomorph::RenderThreading {
            parallel: self.parallel,
            threads: self.threads,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Batch(args) => cmd_batch(args),
    }
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let request = args.shared.request()?;
    let source = panomorph::decode_image(&args.in_path)?;
    let settings = panomorph::RenderSettings::resolve(&request, source.size())?;

    let frame = panomorph::render_frame(&settings, &source, &args.shared.threading())?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    save_frame(&frame, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let list = std::fs::read_to_string(&args.list)
        .with_context(|| format!("read image list '{}'", args.list.display()))?;
    let paths: Vec<&str> = list
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if paths.is_empty() {
        anyhow::bail!("image list '{}' names no files", args.list.display());
    }

    let request = args.shared.request()?;
    if args.shared.samples > 1 {
        eprintln!("note: batch plans sample once per pixel; --samples is ignored");
    }

    // Settings are resolved against the first frame; every later frame must
    // share its dimensions.
    let first = panomorph::decode_image(Path::new(paths[0]))?;
    let settings = panomorph::RenderSettings::resolve(&request, first.size())?;

    eprintln!(
        "recording sample plan ({}x{} output)",
        settings.out_size.width, settings.out_size.height
    );
    let plan = panomorph::SamplePlan::record(&settings, &args.shared.threading())?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for (index, path) in paths.iter().enumerate() {
        eprintln!("processing file {}/{}", index + 1, paths.len());
        let source = panomorph::decode_image(Path::new(path))?;
        let frame = plan.apply(&source, source.size())?;

        let out_path = args.out_dir.join(format!("frame_{index:04}.jpg"));
        image::save_buffer_with_format(
            &out_path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Jpeg,
        )
        .with_context(|| format!("write jpeg '{}'", out_path.display()))?;
    }

    eprintln!("wrote {} frames to {}", paths.len(), args.out_dir.display());
    Ok(())
}

fn save_frame(frame: &panomorph::FrameRgb, path: &Path) -> anyhow::Result<()> {
    image::save_buffer(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgb8,
    )
    .with_context(|| format!("write image '{}'", path.display()))
}
