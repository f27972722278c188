use clap::{Parser, Subcommand};
use favicon_kit::archive::{ZipArchiver, archive_filename};
use favicon_kit::imaging::RustBackend;
use favicon_kit::{BrandingParams, config, icons, output, pipeline};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Largest image accepted, matching a typical upload form limit.
const MAX_UPLOAD_BYTES: u64 = 32 << 20;

fn version_string() -> &'static str {
    let on_tag = env!("FAVICON_KIT_ON_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("FAVICON_KIT_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once; called exactly once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

/// Branding flags. Each overrides the same key from `--config`.
#[derive(clap::Args, Clone, Default)]
struct BrandingArgs {
    /// Application name
    #[arg(long)]
    name: Option<String>,
    /// Short application name for home screens
    #[arg(long)]
    short_name: Option<String>,
    /// Browser theme color, e.g. "#336699"
    #[arg(long)]
    theme_color: Option<String>,
    /// Splash screen background color
    #[arg(long)]
    background_color: Option<String>,
    /// Windows tile color (defaults to the theme color)
    #[arg(long)]
    tile_color: Option<String>,
}

impl From<BrandingArgs> for BrandingParams {
    fn from(args: BrandingArgs) -> Self {
        BrandingParams {
            name: args.name,
            short_name: args.short_name,
            theme_color: args.theme_color,
            background_color: args.background_color,
            tile_color: args.tile_color,
        }
    }
}

#[derive(Parser)]
#[command(name = "favicon-kit")]
#[command(about = "Generate a complete favicon set from one image")]
#[command(long_about = "\
Generate a complete favicon set from one image

The image is cropped to its largest centered square and resized into every
conventional favicon, Apple, Android and Windows tile size. The icons, a
favicon.ico, a web manifest, browserconfig.xml and a README are written into
a single favicons-<timestamp>.zip.

Branding (name, colors) can be given as flags or in a TOML file:

  favicon-kit gen-config > favicon.toml
  favicon-kit generate logo.png --config favicon.toml --theme-color '#336699'

Run 'favicon-kit icons' to list every generated file.")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the favicon archive from an image
    Generate {
        /// Source image (PNG, JPEG, GIF, BMP, TIFF, WebP or ICO)
        image: PathBuf,
        /// Directory the archive is written to
        #[arg(long, default_value = ".")]
        output: PathBuf,
        /// Branding config file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        branding: BrandingArgs,
    },
    /// List every file a run produces
    Icons,
    /// Print a stock favicon.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            image,
            output: out_dir,
            config: config_path,
            branding,
        } => {
            let params = config::load_params(config_path.as_deref(), &branding.into())?;
            let bytes = read_upload(&image)?;

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_pipeline_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let backend = RustBackend::new();
            let result =
                pipeline::generate_assets_with_backend(&backend, &bytes, &params, Some(&tx))
                    .and_then(|assets| {
                        let archive =
                            pipeline::assemble(&ZipArchiver::new(), &assets, Some(&tx))?;
                        Ok((assets, archive))
                    });
            drop(tx);
            printer.join().ok();

            let (assets, archive) = match result {
                Ok(generated) => generated,
                Err(e) if e.is_client_fault() => {
                    return Err(format!("{}: {}", image.display(), e).into());
                }
                Err(e) => return Err(e.into()),
            };

            std::fs::create_dir_all(&out_dir)?;
            let archive_path = out_dir.join(archive_filename(unix_timestamp()));
            std::fs::write(&archive_path, &archive)?;

            output::print_asset_listing(&assets);
            println!("==> Wrote {}", archive_path.display());
        }
        Command::Icons => {
            output::print_icon_table(icons::ICON_SPECS);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Read the source image, refusing anything above [`MAX_UPLOAD_BYTES`].
fn read_upload(path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let size = std::fs::metadata(path)?.len();
    if size > MAX_UPLOAD_BYTES {
        return Err(format!(
            "{}: {} exceeds the {} limit",
            path.display(),
            output::format_bytes(size as usize),
            output::format_bytes(MAX_UPLOAD_BYTES as usize)
        )
        .into());
    }
    Ok(std::fs::read(path)?)
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
