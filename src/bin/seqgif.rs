use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "seqgif", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble still images into a looping animated GIF.
    Create(CreateArgs),
    /// Draw the sequence indicator onto a single still image.
    Overlay(OverlayArgs),
    /// Print the indicator layout for an image size as JSON.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct CreateArgs {
    /// Request JSON (`image_path`, `duration`, `add_indicator`, ...). Flags below override it.
    #[arg(long)]
    request: Option<PathBuf>,

    /// Input image, in sequence order. Repeat for each frame.
    #[arg(long = "image")]
    images: Vec<PathBuf>,

    /// Display time in milliseconds, paired with `--image` by position.
    #[arg(long = "duration")]
    durations: Vec<u32>,

    /// Draw the sequence indicator on every frame.
    #[arg(long)]
    indicator: bool,

    /// Number of loops; 0 loops forever.
    #[arg(long = "loop")]
    loop_count: Option<u16>,

    /// What to do with images that fail to decode.
    #[arg(long, value_enum)]
    on_decode_failure: Option<FailureChoice>,

    /// Worker thread count (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,

    /// Process frames one after another on the calling thread.
    #[arg(long)]
    serial: bool,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Also write an HTML page showing the result, or the request errors.
    #[arg(long)]
    html: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// Input still image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output still image; its extension picks the encoder.
    #[arg(long)]
    out: PathBuf,

    /// Position of this image in the sequence (0-based).
    #[arg(long, allow_negative_numbers = true)]
    index: i64,

    /// Number of images in the sequence.
    #[arg(long, allow_negative_numbers = true)]
    total: i64,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[arg(long)]
    width: u32,

    #[arg(long)]
    height: u32,

    #[arg(long, allow_negative_numbers = true)]
    total: i64,

    #[arg(long, allow_negative_numbers = true, default_value_t = 0)]
    index: i64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FailureChoice {
    Skip,
    Abort,
}

impl From<FailureChoice> for seqgif::DecodeFailurePolicy {
    fn from(c: FailureChoice) -> Self {
        match c {
            FailureChoice::Skip => Self::Skip,
            FailureChoice::Abort => Self::Abort,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Create(args) => cmd_create(args),
        Command::Overlay(args) => cmd_overlay(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_request(args: &CreateArgs) -> anyhow::Result<seqgif::SequenceRequest> {
    let mut req = match &args.request {
        Some(path) => seqgif::SequenceRequest::from_json_file(path)?,
        None => seqgif::SequenceRequest::default(),
    };

    if !args.images.is_empty() {
        req.image_path = args.images.clone();
        req.duration.clear();
    }
    if !args.durations.is_empty() {
        req.duration = args.durations.iter().map(|&ms| ms.into()).collect();
    }
    if args.indicator {
        req.add_indicator = true;
    }
    if let Some(n) = args.loop_count {
        req.loop_count = n;
    }
    if let Some(choice) = args.on_decode_failure {
        req.on_decode_failure = choice.into();
    }
    Ok(req)
}

fn cmd_create(args: CreateArgs) -> anyhow::Result<()> {
    let req = build_request(&args)?;
    let threading = seqgif::SequenceThreading {
        parallel: !args.serial,
        threads: args.threads,
    };
    let mut assembler = seqgif::GifAssembler::new(req.background());

    let out = match seqgif::create_sequence(&req, threading, &mut assembler) {
        Ok(out) => out,
        Err(e) => {
            if let Some(html) = &args.html
                && let Some(msg) = e.validation_message()
            {
                let page = seqgif::render_error_page(&[msg.to_owned()], &req.image_path);
                write_file(html, page.as_bytes())?;
            }
            return Err(e.into());
        }
    };

    for p in out.rejected.iter().chain(&out.failed) {
        eprintln!("skipped {}", p.display());
    }

    write_file(&args.out, &out.gif)?;
    eprintln!("wrote {} ({} frames)", args.out.display(), out.frames);

    if let Some(html) = &args.html {
        write_file(html, seqgif::render_result_page(&out.gif).as_bytes())?;
        eprintln!("wrote {}", html.display());
    }
    Ok(())
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    let raster = seqgif::decode_raster(&args.in_path, seqgif::Rgb8::WHITE)?;
    let raster = seqgif::overlay_indicator(
        raster,
        args.total,
        args.index,
        &seqgif::IndicatorStyle::default(),
    );

    let kind = seqgif::ImageFormatKind::from_path(&args.out);
    if kind.is_fallback() {
        eprintln!(
            "warning: unrecognized output extension for '{}', writing JPEG",
            args.out.display()
        );
    }
    let bytes = seqgif::encode_still(&raster, kind)?;
    write_file(&args.out, &bytes)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let outcome = seqgif::plan_indicators(
        Some(args.width),
        Some(args.height),
        args.total,
        args.index,
    );
    let json = serde_json::to_string_pretty(&outcome).context("serialize indicator plan")?;
    println!("{json}");
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}
