use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use palette_studio_wasm::{
    ExtractMethod, FileStore, Palette, PaletteLibrary, export, extract_from_image_bytes, parse_colors, share,
};

/// Generate, extract, export and share color palettes (native wrapper).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Log debug output (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// File holding saved palettes
    #[arg(long, env = "PALETTE_STORE", default_value = "palettes.json", global = true)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the dominant colors of an image
    Extract {
        image: PathBuf,

        /// Number of colors to extract
        #[arg(short = 'k', long, default_value_t = 10)]
        n_colors: usize,

        #[arg(short, long, value_enum, default_value_t = Method::Frequency)]
        method: Method,

        /// Longest side to shrink to before clustering
        #[arg(short, long)]
        downscale: Option<u32>,

        /// Print a JSON array instead of one color per line
        #[arg(long)]
        json: bool,
    },
    /// Print a random palette
    Random {
        #[arg(short = 'k', long, default_value_t = palette_studio_wasm::DEFAULT_SIZE)]
        n_colors: usize,
    },
    /// Build a share link for a palette
    Share {
        #[arg(long, default_value = "http://localhost:3000")]
        origin: String,
        #[arg(long, default_value = "/")]
        path: String,
        #[arg(required = true)]
        colors: Vec<String>,
    },
    /// Write a palette as JSON or as a PNG swatch strip
    Export {
        #[arg(required = true)]
        colors: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Output file (stdout for JSON when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Swatch size in pixels for PNG output
        #[arg(long, default_value_t = export::DEFAULT_SWATCH)]
        swatch: u32,
    },
    /// Save a palette to the store
    Save {
        #[arg(required = true)]
        colors: Vec<String>,
    },
    /// List saved palettes
    List,
    /// Delete a saved palette by index
    Delete { index: usize },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    Frequency,
    Cluster,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Png,
}

fn parse_palette(colors: &[String]) -> Result<Palette> {
    let parsed = parse_colors(colors).context("invalid color")?;
    Ok(Palette::from_colors(parsed)?)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Extract {
            image,
            n_colors,
            method,
            downscale,
            json,
        } => {
            let bytes = fs::read(&image).with_context(|| format!("reading {}", image.display()))?;
            let method = match method {
                Method::Frequency => ExtractMethod::Frequency,
                Method::Cluster => ExtractMethod::Cluster { downscale },
            };
            let colors = extract_from_image_bytes(&bytes, n_colors, method).context("palette extraction failed")?;
            if json {
                println!("{}", serde_json::to_string(&colors)?);
            } else {
                colors.iter().for_each(|c| println!("{c}"));
            }
        }
        Command::Random { n_colors } => {
            let palette = Palette::random(n_colors)?;
            println!("{}", palette.to_hex_strings().join(" "));
        }
        Command::Share { origin, path, colors } => {
            println!("{}", share::share_url(&origin, &path, &parse_palette(&colors)?));
        }
        Command::Export {
            colors,
            format,
            output,
            swatch,
        } => {
            let palette = parse_palette(&colors)?;
            match (format, output) {
                (Format::Json, None) => println!("{}", export::to_json(&palette)?),
                (Format::Json, Some(out)) => {
                    fs::write(&out, export::to_json(&palette)?)?;
                    println!("Saved → {}", out.display());
                }
                (Format::Png, Some(out)) => {
                    fs::write(&out, export::to_png(&palette, swatch)?)?;
                    println!("Saved → {}", out.display());
                }
                (Format::Png, None) => bail!("--output is required for PNG export"),
            }
        }
        Command::Save { colors } => {
            let mut lib = PaletteLibrary::open(FileStore::new(&args.store))?;
            lib.save(parse_palette(&colors)?)?;
            println!("Saved palette #{} → {}", lib.list().len() - 1, args.store.display());
        }
        Command::List => {
            let lib = PaletteLibrary::open(FileStore::new(&args.store))?;
            if lib.list().is_empty() {
                println!("No saved palettes.");
            }
            for (i, p) in lib.list().iter().enumerate() {
                println!("{i}: {}", p.to_hex_strings().join(" "));
            }
        }
        Command::Delete { index } => {
            let mut lib = PaletteLibrary::open(FileStore::new(&args.store))?;
            let removed = lib.delete(index)?;
            println!("Deleted {}", removed.to_hex_strings().join(" "));
        }
    }

    Ok(())
}
