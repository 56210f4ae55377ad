use std::path::PathBuf;

use clap::Parser;

use penline::text::wrap_text;
use penline::{
    Alignment, Color, Error, Handwriter, PageConfig, RenderOptions, ReplayGenerator, SizeSpec,
    StyleRef,
};

#[derive(Parser)]
#[command(name = "penline", version, about = "Lay out handwriting strokes as SVG or PDF")]
struct Args {
    /// Text file to write out; each input line is wrapped separately
    input: PathBuf,

    /// Output path (.svg or .pdf)
    output: PathBuf,

    /// Recorded stroke sequences (JSON) to replay
    #[arg(long)]
    strokes: PathBuf,

    /// Paper size name (A0-A6, Letter, Legal, Tabloid) or WIDTHxHEIGHT in mm
    #[arg(long, default_value = "A4")]
    page: String,

    /// Draw ruled lines and a left margin rule
    #[arg(long)]
    ruled: bool,

    /// Horizontal and vertical margins in mm
    #[arg(long, num_args = 2, value_names = ["H", "V"], allow_negative_numbers = true)]
    margins: Option<Vec<i64>>,

    /// Line spacing in mm
    #[arg(long)]
    line_spacing: Option<i64>,

    #[arg(long, default_value = "center")]
    align: String,

    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    #[arg(long, default_value = "black")]
    color: String,

    #[arg(long, default_value_t = penline::DEFAULT_STROKE_WIDTH)]
    stroke_width: f32,

    /// Legibility passed to the generator
    #[arg(long, default_value_t = penline::DEFAULT_BIAS)]
    bias: f32,

    #[arg(long)]
    style: Option<u32>,

    /// Maximum characters per line
    #[arg(long, default_value_t = 70)]
    wrap: usize,

    /// Seed for left-alignment jitter
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_page(spec: &str, ruled: bool) -> Result<PageConfig, Error> {
    if let Some((w, h)) = spec.split_once('x') {
        let parse = |v: &str| {
            v.trim()
                .parse::<f32>()
                .map_err(|_| Error::InvalidSize(format!("cannot parse page size {spec:?}")))
        };
        return PageConfig::new(SizeSpec::Dimensions(parse(w)?, parse(h)?), ruled);
    }
    PageConfig::new(spec, ruled)
}

fn run(args: &Args) -> Result<(), Error> {
    let mut page = parse_page(&args.page, args.ruled)?;
    if let Some(m) = &args.margins {
        page.set_margins(m[0], m[1])?;
    }
    if let Some(spacing) = args.line_spacing {
        page.set_ruling(
            page.rule_count() as i64,
            page.vertical_rule_count() as i64,
            spacing,
        )?;
    }
    let alignment: Alignment = args.align.parse()?;
    let color: Color = args.color.parse()?;

    let text = std::fs::read_to_string(&args.input).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", e, args.input.display()),
        ))
    })?;
    let lines: Vec<String> = text
        .lines()
        .flat_map(|l| {
            let wrapped = wrap_text(l, args.wrap);
            if wrapped.is_empty() { vec![String::new()] } else { wrapped }
        })
        .collect();

    let n = lines.len();
    let options = RenderOptions {
        page,
        biases: Some(vec![args.bias; n]),
        styles: args.style.map(|s| vec![StyleRef(s); n]),
        colors: Some(vec![color; n]),
        widths: Some(vec![args.stroke_width; n]),
        scale: args.scale,
        alignment,
        seed: args.seed,
    };

    let writer = Handwriter::new(ReplayGenerator::from_path(&args.strokes)?);
    let summary = writer.write(&args.output, &lines, &options)?;
    log::info!(
        "Wrote {} ({} paths, {} lines)",
        args.output.display(),
        summary.paths,
        summary.lines
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
