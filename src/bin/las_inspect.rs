//! Print a summary of a LAS file and optionally export its log view.
//!
//! ```text
//! las_inspect <file> [--curves GR,ILD] [--svg out.svg] [--subset out.las] [--config welllog.json]
//! ```

use anyhow::{bail, Context, Result};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::PathBuf;

use welllog::classify::{classify, classify_mnemonic, describe, Classification};
use welllog::config::AppConfig;
use welllog::parsers::{load_las_file, write_las, LasFile};
use welllog::render::LogTrackRenderer;
use welllog::tracks::build_tracks;
use welllog::units::{format_depth_range, format_file_size};
use welllog::validate::validate_las_file;

const USAGE: &str =
    "usage: las_inspect <file> [--curves GR,ILD] [--svg out.svg] [--subset out.las] [--config welllog.json]";

struct Args {
    input: PathBuf,
    curves: Vec<String>,
    svg: Option<PathBuf>,
    subset: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut input = None;
    let mut curves = Vec::new();
    let mut svg = None;
    let mut subset = None;
    let mut config = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            "--curves" => {
                let list = args.next().context("--curves needs a comma-separated list")?;
                curves = list
                    .split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect();
            }
            "--svg" => svg = Some(args.next().context("--svg needs an output path")?.into()),
            "--subset" => subset = Some(args.next().context("--subset needs an output path")?.into()),
            "--config" => config = Some(args.next().context("--config needs a path")?.into()),
            other if other.starts_with("--") => bail!("unknown option {}\n{}", other, USAGE),
            other => {
                if input.is_some() {
                    bail!("only one input file is supported\n{}", USAGE);
                }
                input = Some(PathBuf::from(other));
            }
        }
    }

    Ok(Args {
        input: input.context(USAGE)?,
        curves,
        svg,
        subset,
        config,
    })
}

fn print_header(file: &LasFile, config: &AppConfig) {
    let well = &file.well;
    let field = |label: &str, value: Option<&str>| {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            println!("{:<16}{}", label, value);
        }
    };

    println!("\n=== Header ===");
    field(
        "LAS version:",
        Some(&format!(
            "{}{}",
            file.version.version,
            if file.version.wrap { " (wrapped)" } else { "" }
        )),
    );
    field("Well:", well.well_name.as_deref());
    field("UWI:", well.uwi.as_deref());
    field("Company:", well.company.as_deref());
    field("Field:", well.field.as_deref());
    field("Location:", well.location.as_deref());
    field("Service co.:", well.service_company.as_deref());
    field("Date:", well.date.as_deref());
    println!("{:<16}{}", "Null value:", file.null_value());
    if let Some((top, bottom)) = file.depth_range() {
        println!(
            "{:<16}{}",
            "Depth range:",
            format_depth_range(top, bottom, file.depth_unit(), config.depth_display_unit)
        );
    }
    println!("{:<16}{}", "Rows:", file.row_count());
}

fn print_curves(file: &LasFile) {
    println!("\n=== Curves ({}) ===", file.curves.len());
    for (i, curve) in file.curves.iter().enumerate() {
        let category = match classify_mnemonic(&curve.mnemonic) {
            Classification::Category(category) => category.as_ref().to_string(),
            Classification::Index => "Index".to_string(),
        };
        println!(
            "  {:>3}. {:<10} {:<8} {:<12} {:>8} pts  {}",
            i + 1,
            curve.mnemonic,
            curve.unit,
            category,
            file.data_point_count(&curve.mnemonic),
            describe(&curve.mnemonic, &curve.description)
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };

    let size = fs::metadata(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?
        .len();
    println!("Reading file: {} ({})", args.input.display(), format_file_size(size));

    let file = load_las_file(&args.input)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;

    print_header(&file, &config);
    print_curves(&file);

    let report = validate_las_file(&file);
    println!("\n=== Validation ===");
    println!("Valid: {}", if report.valid { "yes" } else { "no" });
    for error in &report.errors {
        println!("  error:   {}", error);
    }
    for warning in &report.warnings {
        println!("  warning: {}", warning);
    }

    let selected: Option<BTreeSet<String>> = if args.curves.is_empty() {
        None
    } else {
        Some(args.curves.iter().cloned().collect())
    };

    if let Some(path) = &args.svg {
        let (top, bottom) = file
            .depth_range()
            .context("file has no depth values to plot")?;
        let groups = classify(&file.curves);
        let tracks = build_tracks(&file, &groups, selected.as_ref(), &config.track_options());
        let renderer = config.configure_renderer(LogTrackRenderer::new(
            tracks,
            top,
            bottom,
            file.depth_unit(),
            config.viewport_height,
        ));
        fs::write(path, renderer.to_svg())
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nWrote log view to {}", path.display());
    }

    if let Some(path) = &args.subset {
        let output = if args.curves.is_empty() {
            write_las(&file)
        } else {
            write_las(&file.subset(&args.curves))
        };
        fs::write(path, output).with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote LAS file to {}", path.display());
    }

    if !report.valid {
        std::process::exit(2);
    }
    Ok(())
}
