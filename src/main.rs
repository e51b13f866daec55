use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use imagemap::{
    default_config_path, init_logging, EditorConfig, EditorState, ImportReport, BUILD_DATE, VERSION,
};

/// Convert image-map areas between the editor's JSON document and HTML `<area>` markup
#[derive(Parser, Debug)]
#[command(name = "imagemap")]
#[command(version, about, long_about = None)]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
struct Args {
    /// Configuration file (JSON or TOML). Defaults to the user config directory
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the `<area>` elements of a JSON map document
    ToHtml {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Read `<area>` elements from an HTML file and print the JSON map document
    FromHtml {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Image URL recorded in the document
        #[arg(long, value_name = "URL")]
        img: Option<String>,

        /// Fail instead of skipping areas that cannot be read
        #[arg(long)]
        strict: bool,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<EditorConfig> {
    // An explicit path must exist; the default one is optional.
    if let Some(path) = path {
        return EditorConfig::load_from_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    Ok(EditorConfig::load_or_default(&default_config_path()?)?)
}

fn report_rejections(report: &ImportReport, strict: bool) -> Result<()> {
    for rejected in &report.rejected {
        eprintln!("skipped area {}: {}", rejected.index, rejected.error);
    }
    if strict && !report.is_complete() {
        bail!("{} area(s) could not be read", report.rejected.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_json)?;
    tracing::debug!("imagemap {} (built {})", VERSION, BUILD_DATE);

    let config = load_config(args.config)?;
    let mut editor = EditorState::headless(config);

    match args.command {
        Command::ToHtml { file } => {
            let report = editor.load_from_file(&file)?;
            report_rejections(&report, false)?;
            println!("{}", editor.html_markup());
        }
        Command::FromHtml { file, img, strict } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            if let Some(img) = img {
                editor.load_image(img);
            }
            let report = editor.import_html(&html);
            report_rejections(&report, strict)?;
            println!("{}", editor.to_json()?);
        }
    }

    Ok(())
}
