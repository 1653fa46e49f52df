use futures::executor::block_on;
use std::io::Read;
use std::str::FromStr;
#[cfg(feature = "raster")]
use svgfit::raster::{RasterError, RasterOptions};
use svgfit::{Normalizer, QuoteEscape, TransformOptions};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Transform(svgfit::Error),
    #[cfg(feature = "raster")]
    Raster(RasterError),
    #[cfg(not(feature = "raster"))]
    RasterUnavailable,
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Transform(err) => write!(f, "{err}"),
            #[cfg(feature = "raster")]
            CliError::Raster(err) => write!(f, "{err}"),
            #[cfg(not(feature = "raster"))]
            CliError::RasterUnavailable => write!(
                f,
                "PNG/JPG output needs svgfit-cli built with `--features raster`"
            ),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<svgfit::Error> for CliError {
    fn from(value: svgfit::Error) -> Self {
        Self::Transform(value)
    }
}

#[cfg(feature = "raster")]
impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
}

impl OutputFormat {
    #[cfg_attr(not(feature = "raster"), allow(dead_code))]
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(()),
        }
    }
}

#[derive(Debug)]
#[cfg_attr(not(feature = "raster"), allow(dead_code))]
struct Args {
    input: Option<String>,
    options_json: Option<String>,
    scale: Option<f64>,
    width: Option<f64>,
    preserve_text: bool,
    escape_all_quotes: bool,
    format: OutputFormat,
    raster_scale: f32,
    background: Option<String>,
    out: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input: None,
            options_json: None,
            scale: None,
            width: None,
            preserve_text: false,
            escape_all_quotes: false,
            format: OutputFormat::Svg,
            raster_scale: 1.0,
            background: None,
            out: None,
        }
    }
}

fn usage() -> &'static str {
    "svgfit-cli\n\
\n\
USAGE:\n\
  svgfit-cli [--scale <n>] [--width <n>] [--options <json>] [--preserve-text] [--escape-all-quotes] [--format svg|png|jpg] [--raster-scale <n>] [--background <color>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - --width fits the artwork into a <n>x<n> viewBox, centered; it overrides --scale.\n\
  - --options takes a JSON object with scale, width, preserveText, quoteEscape (first|all).\n\
  - Explicit flags win over --options.\n\
  - SVG is printed to stdout by default; use --out to write a file.\n\
  - PNG/JPG output needs the `raster` feature and defaults to writing next to the input file (or ./out.png, ./out.jpg for stdin).\n\
  - Set RUST_LOG (e.g. RUST_LOG=svgfit_core=debug) for diagnostics on stderr.\n\
"
}

fn next_number<'a, T: FromStr>(it: &mut impl Iterator<Item = &'a String>) -> Result<T, CliError> {
    let Some(raw) = it.next() else {
        return Err(CliError::Usage(usage()));
    };
    raw.parse::<T>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--scale" => args.scale = Some(next_number(&mut it)?),
            "--width" => args.width = Some(next_number(&mut it)?),
            "--options" => {
                let Some(json) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.options_json = Some(json.clone());
            }
            "--preserve-text" => args.preserve_text = true,
            "--escape-all-quotes" => args.escape_all_quotes = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--raster-scale" => {
                args.raster_scale = next_number(&mut it)?;
                if !(args.raster_scale.is_finite() && args.raster_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

/// `--options` first, then individual flags on top.
fn transform_options(args: &Args) -> Result<TransformOptions, CliError> {
    let mut options = match &args.options_json {
        Some(json) => TransformOptions::from_value(serde_json::from_str(json)?)?,
        None => TransformOptions::default(),
    };
    if let Some(scale) = args.scale {
        options = options.with_scale(scale);
    }
    if args.width.is_some() {
        options = options.with_width(args.width);
    }
    if args.preserve_text {
        options = options.with_preserve_text(true);
    }
    if args.escape_all_quotes {
        options = options.with_quote_escape(QuoteEscape::All);
    }
    Ok(options)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

#[cfg(feature = "raster")]
fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    use std::io::Write as _;

    if out == "-" {
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
    }
    Ok(())
}

#[cfg(feature = "raster")]
fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let normalizer = Normalizer::new(transform_options(&args)?)?;
    let text = read_input(args.input.as_deref())?;
    let svg = block_on(normalizer.transform(&text))?;
    tracing::debug!(
        input = args.input.as_deref().unwrap_or("-"),
        bytes = svg.len(),
        "normalized document"
    );

    match args.format {
        OutputFormat::Svg => write_text(&svg, args.out.as_deref()),
        OutputFormat::Png | OutputFormat::Jpeg => write_raster(&svg, &args),
    }
}

#[cfg(feature = "raster")]
fn write_raster(svg: &str, args: &Args) -> Result<(), CliError> {
    let raster = RasterOptions {
        scale: args.raster_scale,
        background: args.background.clone(),
        ..RasterOptions::default()
    };
    let bytes = match args.format {
        OutputFormat::Jpeg => svgfit::raster::svg_to_jpeg(svg, &raster)?,
        _ => svgfit::raster::svg_to_png(svg, &raster)?,
    };
    let out = args.out.clone().unwrap_or_else(|| {
        default_raster_out_path(args.input.as_deref(), args.format.extension())
            .to_string_lossy()
            .to_string()
    });
    write_bytes(&bytes, &out)
}

#[cfg(not(feature = "raster"))]
fn write_raster(_svg: &str, _args: &Args) -> Result<(), CliError> {
    Err(CliError::RasterUnavailable)
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_logging();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
