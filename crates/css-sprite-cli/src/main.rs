use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use css_sprite_core::config::{Arrange, GeneratorConfig};
use css_sprite_core::generator::SpriteSheetGenerator;
use globset::{Glob, GlobSetBuilder};
use serde::Deserialize;
use tracing::{error, info};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "css-sprite",
    about = "Pack images into a CSS sprite sheet",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --no-progress or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack images into a sprite sheet (writes PNG + CSS)
    Pack(PackArgs),
    /// Layout-only: compute placements and export JSON/CSS (no PNG)
    Layout(PackArgs),
    /// Simple timing bench (builds once, prints time + occupancy)
    Bench(BenchArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Input file or directory
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Sprite sheet base name (files will be name.png/.css)
    #[arg(short, long, default_value = "sprites", help_heading = "Input/Output")]
    name: String,
    /// YAML config file path (overrides layout-related options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Layout
    /// Arrangement: horizontal | vertical | optimal
    #[arg(long, value_parser = ["horizontal", "vertical", "optimal"], default_value = "horizontal", help_heading = "Layout")]
    arrange: String,
    /// Horizontal spacing between sheets (px)
    #[arg(long, default_value_t = 0, help_heading = "Layout")]
    horizontal_offset: u32,
    /// Vertical spacing between sheets (px)
    #[arg(long, default_value_t = 0, help_heading = "Layout")]
    vertical_offset: u32,

    // Export
    /// Layout-only: compute placements and export JSON/CSS (no PNG)
    #[arg(long, default_value_t = false, help_heading = "Export")]
    layout_only: bool,
    /// Also write the layout as JSON (name.json)
    #[arg(long, default_value_t = false, help_heading = "Export")]
    layout_json: bool,
    /// Save the sheet/sprite model (JSON) to this file for later editing
    #[arg(long, help_heading = "Export")]
    save_project: Option<PathBuf>,
    /// Export packing stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compute layout and stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct BenchArgs {
    /// Input directory
    input: PathBuf,
    /// Arrangement: horizontal | vertical | optimal
    #[arg(long, value_parser = ["horizontal", "vertical", "optimal"], default_value = "optimal")]
    arrange: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args, cli.progress && !cli.quiet),
        Commands::Layout(args) => {
            let mut a = args.clone();
            a.layout_only = true;
            run_pack(&a, false)
        }
        Commands::Bench(b) => run_bench(b),
    }
}

fn run_pack(cli: &PackArgs, show_progress: bool) -> anyhow::Result<()> {
    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create out_dir {}", cli.out_dir.display()))?;

    // Load config file if provided; config file sets layout options en bloc
    let base = GeneratorConfig {
        arrange: parse_arrange(&cli.arrange)?,
        horizontal_offset: cli.horizontal_offset,
        vertical_offset: cli.vertical_offset,
    };
    let cfg = if let Some(path) = &cli.config {
        let file = fs::read_to_string(path)?;
        let y: YamlConfig = serde_yaml::from_str(&file)?;
        y.into_generator_config(base)
    } else {
        base
    };

    if cli.print_config {
        match cli.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    let paths = gather_paths(&cli.input, &cli.include, &cli.exclude)?;
    let mut generator = SpriteSheetGenerator::new(cfg);
    add_sheets_with_progress(&mut generator, &paths, show_progress)?;
    info!(count = generator.sheets().len(), "loaded input images");

    let mapping = generator.build();
    let stats = mapping.stats();
    info!(
        sheets = stats.items,
        width = stats.width,
        height = stats.height,
        occupancy = format!("{:.2}%", stats.occupancy * 100.0),
        "stats"
    );

    if cli.layout_only {
        let json_path = cli.out_dir.join(format!("{}.json", cli.name));
        fs::write(&json_path, serde_json::to_string_pretty(&layout_value(&generator))?)
            .with_context(|| format!("write {}", json_path.display()))?;
        let css_path = cli.out_dir.join(format!("{}.css", cli.name));
        generator
            .save_css(&css_path)
            .with_context(|| format!("write {}", css_path.display()))?;
        info!(?json_path, ?css_path, "layout written (layout-only)");
        write_stats(cli, &generator, false)?;
        return Ok(());
    }

    if !cli.dry_run {
        let png_path = cli.out_dir.join(format!("{}.png", cli.name));
        generator
            .save_image(&png_path)
            .with_context(|| format!("write {}", png_path.display()))?;
        info!(?png_path, "wrote sprite sheet");

        let css_path = cli.out_dir.join(format!("{}.css", cli.name));
        generator
            .save_css(&css_path)
            .with_context(|| format!("write {}", css_path.display()))?;
        info!(?css_path, "wrote stylesheet");

        if cli.layout_json {
            let json_path = cli.out_dir.join(format!("{}.json", cli.name));
            fs::write(&json_path, serde_json::to_string_pretty(&layout_value(&generator))?)
                .with_context(|| format!("write {}", json_path.display()))?;
            info!(?json_path, "wrote layout");
        }

        if let Some(project_path) = &cli.save_project {
            generator
                .save_project(project_path)
                .with_context(|| format!("write {}", project_path.display()))?;
            info!(?project_path, "wrote project");
        }
    }

    write_stats(cli, &generator, cli.dry_run)?;
    Ok(())
}

fn write_stats(cli: &PackArgs, generator: &SpriteSheetGenerator, dry_run: bool) -> anyhow::Result<()> {
    let Some(stats_path) = &cli.export_stats else {
        return Ok(());
    };
    let (used_area, total_area) = compute_stats(generator);
    let occupancy = if total_area > 0 {
        used_area as f64 / total_area as f64
    } else {
        0.0
    };
    let value = serde_json::json!({
        "sheets": generator.sheets().len(),
        "used_area": used_area,
        "total_area": total_area,
        "occupancy": occupancy,
    });
    if !dry_run {
        fs::write(stats_path, serde_json::to_string_pretty(&value)?)
            .with_context(|| format!("write {}", stats_path.display()))?;
        info!(?stats_path, "stats exported");
    } else {
        println!(
            "sheets={} used_area={} total_area={} occupancy={:.2}%",
            generator.sheets().len(),
            used_area,
            total_area,
            occupancy * 100.0
        );
    }
    Ok(())
}

fn run_bench(b: &BenchArgs) -> anyhow::Result<()> {
    use std::time::Instant;
    // Minimal bench: add every image once; build and print time + occupancy
    let paths = gather_paths(&b.input, &[], &[])?;
    let cfg = GeneratorConfig {
        arrange: parse_arrange(&b.arrange)?,
        ..Default::default()
    };
    let mut generator = SpriteSheetGenerator::new(cfg);
    add_sheets_with_progress(&mut generator, &paths, false)?;
    let start = Instant::now();
    let mapping = generator.build();
    let dur = start.elapsed();
    let stats = mapping.stats();
    println!(
        "sheets={} area={}x{} occupancy={:.2}% time={}",
        stats.items,
        stats.width,
        stats.height,
        stats.occupancy * 100.0,
        bench_fmt_dur(dur)
    );
    Ok(())
}

fn bench_fmt_dur(d: Duration) -> String {
    let ms = d.as_secs_f64() * 1000.0;
    if ms >= 1.0 {
        format!("{:.1}ms", ms)
    } else {
        format!("{}us", d.as_micros())
    }
}

fn parse_arrange(s: &str) -> anyhow::Result<Arrange> {
    Ok(match s.to_ascii_lowercase().as_str() {
        "horizontal" | "h" => Arrange::Horizontal,
        "vertical" | "v" => Arrange::Vertical,
        "optimal" | "o" => Arrange::Optimal,
        other => anyhow::bail!("unknown arrangement: {}", other),
    })
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    // Build glob matchers
    let mut inc_set = None;
    if !include.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in include {
            b.add(Glob::new(pat)?);
        }
        inc_set = Some(b.build()?);
    }
    let mut exc_set = None;
    if !exclude.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in exclude {
            b.add(Glob::new(pat)?);
        }
        exc_set = Some(b.build()?);
    }
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_image(path) {
            list.push(path.to_path_buf());
        }
    } else {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_image(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    Ok(list)
}

fn should_skip(
    p: &Path,
    include: Option<&globset::GlobSet>,
    exclude: Option<&globset::GlobSet>,
) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if let Some(ex) = exclude {
        if ex.is_match(&s) {
            return true;
        }
    }
    if let Some(inc) = include {
        if !inc.is_match(&s) {
            return true;
        }
    }
    false
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "bmp" | "tga" | "gif")
    )
}

/// Adds each image as a sheet plus a sprite covering the whole sheet, named
/// after the file stem. Undecodable files are skipped with an error log.
fn add_sheets_with_progress(
    generator: &mut SpriteSheetGenerator,
    paths: &[PathBuf],
    progress: bool,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
            )
            .unwrap(),
        );
        Some(b)
    } else {
        None
    };
    for p in paths {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        match generator.add_sheet_from_file(p, 0, 0) {
            Ok(id) => {
                let (w, h) = generator
                    .sheet(id)
                    .map(|s| (s.width, s.height))
                    .unwrap_or((0, 0));
                let stem = p.file_stem().and_then(|s| s.to_str()).unwrap_or("sprite");
                generator.add_sprite_in(id, stem, 0, 0, w, h)?;
            }
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(())
}

fn layout_value(generator: &SpriteSheetGenerator) -> serde_json::Value {
    let sheets: Vec<serde_json::Value> = generator
        .sheets()
        .iter()
        .map(|s| {
            serde_json::json!({
                "class_name": s.class_name,
                "image_file": s.image_file,
                "x": s.x,
                "y": s.y,
                "width": s.width,
                "height": s.height,
            })
        })
        .collect();
    serde_json::json!({ "sheets": sheets })
}

fn compute_stats(generator: &SpriteSheetGenerator) -> (u64, u64) {
    let mut used: u64 = 0;
    let mut width: u64 = 0;
    let mut height: u64 = 0;
    for s in generator.sheets() {
        used += (s.width as u64) * (s.height as u64);
        width = width.max((s.x + s.width) as u64);
        height = height.max((s.y + s.height) as u64);
    }
    (used, width * height)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    arrange: Option<String>,
    horizontal_offset: Option<u32>,
    vertical_offset: Option<u32>,
}

impl YamlConfig {
    fn into_generator_config(self, mut cfg: GeneratorConfig) -> GeneratorConfig {
        if let Some(v) = self.arrange {
            cfg.arrange = v.parse().unwrap_or(cfg.arrange);
        }
        if let Some(v) = self.horizontal_offset {
            cfg.horizontal_offset = v;
        }
        if let Some(v) = self.vertical_offset {
            cfg.vertical_offset = v;
        }
        cfg
    }
}
