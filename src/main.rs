//! CLI entry point for bfinfo

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use bfinfo::{BfFile, DisplayConfig, MetaFormatter, Selector, StokesSelector, Theme};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

/// Terminal background the palette is picked for
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ThemeMode {
    /// Palette for dark terminal backgrounds
    #[default]
    Dark,
    /// Palette for light terminal backgrounds
    Light,
}

impl From<ThemeMode> for Theme {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::Light => Theme::Light,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bfinfo")]
#[command(about = "Print the metadata tree of a LOFAR beamformed (BF) HDF5 file")]
#[command(version)]
struct Args {
    /// Beamformed HDF5 file to inspect
    file: PathBuf,

    /// Sub-array pointings to show: "all", an index, or a list like "0,2"
    #[arg(long, value_name = "SEL", default_value = "all")]
    sap: String,

    /// Beams to show: "all", an index, or a list like "0,2"
    #[arg(long, value_name = "SEL", default_value = "all")]
    beam: String,

    /// Stokes components to show: "all" or component names like "I" or "I,Q"
    #[arg(long, value_name = "SEL", default_value = "all")]
    stokes: String,

    /// Expand only N schema levels (0 = root only, 6 = everything)
    #[arg(short = 'L', long = "level", default_value_t = 6,
          value_parser = clap::value_parser!(u8).range(0..=6))]
    level: u8,

    /// Indent with four spaces per level instead of tabs
    #[arg(long = "no-tabs")]
    no_tabs: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Pick the color palette for a dark or light terminal background
    #[arg(long = "theme", value_name = "THEME", default_value = "dark")]
    theme: ThemeMode,

    /// Report the opened file on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Selectors are validated before the file is touched; a bad selector
    // never fails mid-traversal.
    let sap = Selector::parse(&args.sap).unwrap_or_else(|e| {
        eprintln!("bfinfo: {e}");
        process::exit(1);
    });
    let beam = Selector::parse(&args.beam).unwrap_or_else(|e| {
        eprintln!("bfinfo: {e}");
        process::exit(1);
    });
    let stokes = StokesSelector::parse(&args.stokes).unwrap_or_else(|e| {
        eprintln!("bfinfo: {e}");
        process::exit(1);
    });

    let config = DisplayConfig {
        use_tabs: !args.no_tabs,
        use_color: should_use_color(args.color),
        theme: args.theme.into(),
        level: args.level,
        sap,
        beam,
        stokes,
        verbose: args.verbose,
    };

    let file = BfFile::open(&args.file).unwrap_or_else(|e| {
        eprintln!("bfinfo: cannot open '{}': {e}", args.file.display());
        process::exit(1);
    });
    if args.verbose {
        eprintln!("bfinfo: reading {}", args.file.display());
    }

    let formatter = MetaFormatter::new(config);
    if let Err(e) = formatter.print(&file) {
        eprintln!("bfinfo: error writing output: {e}");
        process::exit(1);
    }
}
