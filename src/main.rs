use std::{error::Error, path::PathBuf};

use ab_glyph::FontArc;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use qrcraft::config::{DEFAULT_CORNER_RADIUS, DEFAULT_SIZE, PRESET_SIZES};
use qrcraft::{Color, DirTarget, ExportFormat, PadShape, Session, StyleKind};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Png,
    #[value(alias = "jpeg")]
    Jpg,
    Webp,
    Svg,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Png => Self::Png,
            FormatArg::Jpg => Self::Jpeg,
            FormatArg::Webp => Self::Webp,
            FormatArg::Svg => Self::Svg,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    #[value(alias = "default")]
    None,
    Logo,
    Emoji,
    Colors,
    Rounded,
}

impl From<StyleArg> for StyleKind {
    fn from(s: StyleArg) -> Self {
        match s {
            StyleArg::None => Self::None,
            StyleArg::Logo => Self::Logo,
            StyleArg::Emoji => Self::Emoji,
            StyleArg::Colors => Self::Colors,
            StyleArg::Rounded => Self::Rounded,
        }
    }
}

/// Render a customized QR code and save it as an image or SVG
#[derive(Parser, Debug)]
#[command(name = "qrcraft", version, about)]
struct Args {
    /// The text or URL to encode
    text: String,

    /// Canvas size in pixels (presets: 150, 250, 350)
    #[arg(long, default_value_t = DEFAULT_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,

    #[arg(long, value_enum, default_value_t = FormatArg::Png)]
    format: FormatArg,

    #[arg(long, value_enum, default_value_t = StyleArg::None)]
    style: StyleArg,

    /// Corner radius for the rounded style
    #[arg(long, default_value_t = DEFAULT_CORNER_RADIUS)]
    radius: u32,

    /// Foreground color for the colors style, as #rrggbb or #rrggbbaa
    #[arg(long, default_value = "#000000")]
    fg: Color,

    /// Background color for the colors style
    #[arg(long, default_value = "#ffffff")]
    bg: Color,

    /// Logo image for the logo style
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Logo side as a percentage of the canvas
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    logo_size: Option<u8>,

    /// Emoji for the emoji style
    #[arg(long)]
    emoji: Option<String>,

    /// Emoji side as a percentage of the canvas
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    emoji_size: Option<u8>,

    /// Font used to draw the emoji glyph
    #[arg(long)]
    font: Option<PathBuf>,

    /// Draw a round pad beneath the emoji instead of a square one
    #[arg(long)]
    circle_pad: bool,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    if !PRESET_SIZES.contains(&args.size) {
        info!(size = args.size, presets = ?PRESET_SIZES, "Using custom size");
    }

    let mut session = Session::new();
    session.set_format(args.format.into());

    // Only the config is touched here; the code is generated once at the end
    let cfg = session.config_mut();
    cfg.size(args.size)
        .style(args.style.into())
        .corner_radius(args.radius)
        .colors(args.fg, args.bg);
    if let Some(p) = args.logo_size {
        cfg.logo_size(p);
    }
    if let Some(glyph) = &args.emoji {
        cfg.emoji(glyph.as_str());
    }
    if let Some(p) = args.emoji_size {
        cfg.emoji_size(p);
    }
    if let Some(path) = &args.font {
        cfg.glyph_font(FontArc::try_from_vec(std::fs::read(path)?)?);
    }
    if args.circle_pad {
        cfg.emoji_pad(PadShape::Circle);
    }

    if let Some(path) = &args.logo {
        let bytes = std::fs::read(path)?;
        let ticket = session.begin_logo_load();
        session.finish_logo_load(ticket, &bytes)?;
    }

    session.set_text(args.text);
    session.generate()?;

    let dl = session.download(&DirTarget::new(&args.out))?;
    println!("{}", dl.message());
    println!("Saved to: {}", args.out.join(&dl.filename).display());

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use clap::{CommandFactory, Parser};
    use test_case::test_case;

    use super::Args;
    use qrcraft::{Color, ExportFormat, StyleKind};

    #[test]
    fn test_command() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["qrcraft", "Hello World!"]).unwrap();
        assert_eq!(args.text, "Hello World!");
        assert_eq!(args.size, 250);
        assert_eq!(ExportFormat::from(args.format), ExportFormat::Png);
        assert_eq!(StyleKind::from(args.style), StyleKind::None);
        assert_eq!((args.fg, args.bg), (Color::BLACK, Color::WHITE));
    }

    #[test_case("jpeg", ExportFormat::Jpeg; "jpeg alias")]
    #[test_case("jpg", ExportFormat::Jpeg; "jpg")]
    #[test_case("svg", ExportFormat::Svg; "svg")]
    fn test_format(s: &str, exp: ExportFormat) {
        let args = Args::try_parse_from(["qrcraft", "x", "--format", s]).unwrap();
        assert_eq!(ExportFormat::from(args.format), exp);
    }

    #[test]
    fn test_style_and_colors() {
        let args = Args::try_parse_from([
            "qrcraft", "x", "--style", "colors", "--fg", "#102030", "--bg", "ffffff",
        ])
        .unwrap();
        assert_eq!(StyleKind::from(args.style), StyleKind::Colors);
        assert_eq!(args.fg, Color::rgb(16, 32, 48));
    }

    #[test_case(&["qrcraft"]; "missing text")]
    #[test_case(&["qrcraft", "x", "--size", "0"]; "zero size")]
    #[test_case(&["qrcraft", "x", "--logo-size", "101"]; "percent out of range")]
    #[test_case(&["qrcraft", "x", "--fg", "#fff"]; "short color")]
    #[test_case(&["qrcraft", "x", "--format", "gif"]; "unknown format")]
    #[test_case(&["qrcraft", "x", "y"]; "second positional")]
    fn test_rejected(argv: &[&str]) {
        assert!(Args::try_parse_from(argv).is_err());
    }
}
