//! Plume CLI
//!
//! Renders a JSON element tree to a standalone SVG document.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use plume_render::Element;
use plume_svg::{FontBook, FontDescriptor, RenderOptions, inline_images, render_with_loader};
use serde::Deserialize;
use serde_json::Value;

/// Plume: render a box/text element tree to SVG
#[derive(Parser, Debug)]
#[command(name = "plume")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Render to stdout with a system font
    plume card.json

    # Render to a file with a custom font and size
    plume card.json -o card.svg --font Inter.ttf --width 800 --height 400

    # Draw text as <text> elements and outline every box
    plume card.json --no-embed-font --debug

    # Load fallback fonts for uncovered text from a directory
    plume card.json --fallback-fonts ./fonts

INPUT:
    Either an element ({"type": "div", "props": {...}}) or a document
    {"element": {...}, "options": {"width": 800, "embedFont": false}}.
    Command-line flags override document options.
"#)]
struct Cli {
    /// JSON input file (`-` reads stdin)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Write the SVG here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Document width in pixels
    #[arg(long)]
    width: Option<f32>,

    /// Document height in pixels
    #[arg(long)]
    height: Option<f32>,

    /// Font file to load; the family name is the file stem (repeatable)
    #[arg(long = "font", value_name = "FILE")]
    fonts: Vec<PathBuf>,

    /// Directory of fonts tried for text the loaded fonts cannot draw
    #[arg(long, value_name = "DIR")]
    fallback_fonts: Option<PathBuf>,

    /// Emit `<text>` elements instead of glyph outlines
    #[arg(long)]
    no_embed_font: bool,

    /// Outline every box and text segment
    #[arg(long)]
    debug: bool,
}

/// The input file: an element with optional render options.
#[derive(Deserialize)]
struct Document {
    element: Element,
    #[serde(default)]
    options: RenderOptions,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let source = read_input(&cli.input)?;
    let (mut element, mut options) = parse_document(&source)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;
    apply_flags(&cli, &mut options);

    let base_dir = cli
        .input
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    inline_images(&mut element, base_dir);

    let fonts = Rc::new(FontBook::new());
    for path in &cli.fonts {
        let data = fs::read(path).with_context(|| format!("failed to read font {}", path.display()))?;
        let family = path
            .file_stem()
            .map_or_else(|| "default".to_string(), |stem| stem.to_string_lossy().into_owned());
        let _ = fonts
            .add_font(FontDescriptor::regular(&family), data)
            .with_context(|| format!("failed to load font {}", path.display()))?;
        eprintln!("{} {family} from {}", "Loaded".green().bold(), path.display());
    }
    if fonts.is_empty() {
        match fonts.load_system_font("sans-serif") {
            Some(_) => eprintln!("{} system font", "Loaded".green().bold()),
            None if cli.fallback_fonts.is_some() => {
                eprintln!("{} no system font; relying on fallback fonts", "Warning:".yellow().bold());
            }
            None => eprintln!("{} no font loaded; text will fail to render", "Warning:".yellow().bold()),
        }
    }

    let fallback_dir = cli.fallback_fonts.clone();
    let svg = render_with_loader(&element, &fonts, &options, |missing| {
        eprintln!(
            "{} fallback fonts for {} text segment(s)",
            "Loading".cyan().bold(),
            missing.len()
        );
        fallback_dir.as_deref().map(read_font_dir).unwrap_or_default()
    })
    .context("render failed")?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &svg).with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "{} {}x{} document to {}",
                "Rendered".green().bold(),
                options.width,
                options.height,
                path.display()
            );
        }
        None => println!("{svg}"),
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        let _ = io::stdin().read_to_string(&mut source).context("failed to read stdin")?;
        return Ok(source);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Accept either a bare element or an `{element, options}` document.
fn parse_document(source: &str) -> Result<(Element, RenderOptions)> {
    let value: Value = serde_json::from_str(source)?;
    if value.get("element").is_some() {
        let document: Document = serde_json::from_value(value)?;
        return Ok((document.element, document.options));
    }
    if value.get("type").is_none() {
        bail!("expected an element with a `type` or a document with an `element`");
    }
    Ok((Element::from_value(value)?, RenderOptions::default()))
}

fn apply_flags(cli: &Cli, options: &mut RenderOptions) {
    if let Some(width) = cli.width {
        options.width = width;
    }
    if let Some(height) = cli.height {
        options.height = height;
    }
    if cli.no_embed_font {
        options.embed_font = false;
    }
    if cli.debug {
        options.debug = true;
    }
    if cli.fallback_fonts.is_some() {
        options.can_load_additional_assets = true;
    }
}

/// Every `.ttf` / `.otf` file in `dir`, keyed by file stem.
fn read_font_dir(dir: &Path) -> Vec<(FontDescriptor, Vec<u8>)> {
    let Ok(entries) = fs::read_dir(dir) else {
        log::warn!("cannot read fallback font directory {}", dir.display());
        return Vec::new();
    };
    let mut fonts: Vec<(FontDescriptor, Vec<u8>)> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
        })
        .filter_map(|path| {
            let data = fs::read(&path).ok()?;
            let family = path.file_stem()?.to_string_lossy().into_owned();
            Some((FontDescriptor::regular(&family), data))
        })
        .collect();
    fonts.sort_by(|a, b| a.0.family.cmp(&b.0.family));
    fonts
}
