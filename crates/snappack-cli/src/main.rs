use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use globset::{Glob, GlobSetBuilder};
use serde::Deserialize;
use snappack_core::config::{ComposeConfig, ResampleFilter};
use snappack_core::label::{TextFace, TrueTypeFace};
use snappack_core::{ComposeJob, Composer, PackageId, SourceImage};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "snappack",
    about = "Compose a photo into a print-ready 4x6 inch package sheet",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        global = true,
        help_heading = "Logging/UX"
    )]
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
    /// Compose one photo into a package sheet
    Compose(ComposeArgs),
    /// Compose every photo found under a directory
    Batch(BatchArgs),
    /// Layout-only export (no photo): cells and cut lines as JSON
    Layout(LayoutArgs),
    /// Print the package catalogue as JSON
    Packages,
}

#[derive(Args, Debug, Clone)]
struct RenderArgs {
    // Package
    /// Package: A | B | C | D | E | F | G | H
    #[arg(short, long, help_heading = "Package")]
    package: String,
    /// Name printed under passport photos (packages D and F only)
    #[arg(short, long, help_heading = "Package")]
    name: Option<String>,
    /// TrueType/OpenType font for the name label (default: embedded DejaVu Sans Bold)
    #[arg(long, help_heading = "Package")]
    font: Option<PathBuf>,

    // Rendering
    /// Print resolution (dots per inch)
    #[arg(long, help_heading = "Rendering")]
    dpi: Option<u32>,
    /// Do not draw dashed cut guides
    #[arg(long, default_value_t = false, help_heading = "Rendering")]
    no_cut_lines: bool,
    /// Do not stroke borders around passport cells
    #[arg(long, default_value_t = false, help_heading = "Rendering")]
    no_borders: bool,
    /// Resampling filter: nearest | triangle | catmullrom | gaussian | lanczos3
    #[arg(long, default_value = "lanczos3", help_heading = "Rendering")]
    filter: String,
    /// YAML config file path (overrides rendering options)
    #[arg(long, help_heading = "Rendering")]
    config: Option<PathBuf>,

    // Export
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compose and report but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct ComposeArgs {
    /// Photo to compose (JPEG, PNG, WEBP)
    #[arg(help_heading = "Input/Output")]
    photo: PathBuf,
    /// Output PNG (default: <package file name>.png)
    #[arg(short, long, help_heading = "Input/Output")]
    output: Option<PathBuf>,
    /// Also write the layout as JSON to this file
    #[arg(long, help_heading = "Export")]
    layout_json: Option<PathBuf>,
    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Parser, Debug, Clone)]
struct BatchArgs {
    /// Input file or directory
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,
    /// Compose sheets in parallel (requires core feature `parallel`)
    #[arg(long, default_value_t = false, help_heading = "Rendering")]
    parallel: bool,
    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Parser, Debug, Clone)]
struct LayoutArgs {
    /// Package: A | B | C | D | E | F | G | H
    #[arg(short, long)]
    package: String,
    /// Print resolution (dots per inch)
    #[arg(long, default_value_t = 300)]
    dpi: u32,
    /// Output JSON file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Compose(args) => run_compose(args),
        Commands::Batch(args) => run_batch(args, cli.progress && !cli.quiet),
        Commands::Layout(args) => run_layout(args),
        Commands::Packages => {
            let catalog = snappack_core::catalog_to_json();
            println!("{}", serde_json::to_string_pretty(&catalog)?);
            Ok(())
        }
    }
}

fn run_compose(args: &ComposeArgs) -> anyhow::Result<()> {
    let r = &args.render;
    let package = parse_package(&r.package)?;
    let cfg = build_config(r, false)?;
    if r.print_config {
        return print_config(&cfg, &r.print_config_format);
    }
    let name = label_name(package, r.name.as_deref());
    let composer = build_composer(cfg, r.font.as_deref())?;

    let source = SourceImage::open(&args.photo)
        .with_context(|| format!("read {}", args.photo.display()))?;
    debug!(w = source.width(), h = source.height(), "photo decoded");

    let start = Instant::now();
    let sheet = composer.compose(package, &source, name);
    let stats = sheet.layout.stats();
    info!(
        package = %package,
        cells = stats.num_cells,
        cut_lines = stats.num_cut_lines,
        coverage = format!("{:.2}%", stats.coverage * 100.0),
        ms = start.elapsed().as_millis() as u64,
        "sheet composed"
    );

    if r.dry_run {
        let (w, h) = sheet.physical_size_in();
        println!(
            "package={} size={}x{}px ({:.2}x{:.2}in @ {} dpi) {}",
            package,
            sheet.rgb.width(),
            sheet.rgb.height(),
            w,
            h,
            sheet.dpi,
            stats.summary()
        );
        return Ok(());
    }

    let png_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.png", package.file_stem())));
    ensure_parent(&png_path)?;
    snappack_core::save_png(&sheet, &png_path)
        .with_context(|| format!("write {}", png_path.display()))?;
    info!(?png_path, "sheet written");

    if let Some(json_path) = &args.layout_json {
        let value = snappack_core::layout_to_json(&sheet.layout, sheet.dpi);
        ensure_parent(json_path)?;
        fs::write(json_path, serde_json::to_string_pretty(&value)?)
            .with_context(|| format!("write {}", json_path.display()))?;
        info!(?json_path, "layout written");
    }
    Ok(())
}

fn run_batch(args: &BatchArgs, show_progress: bool) -> anyhow::Result<()> {
    let r = &args.render;
    let package = parse_package(&r.package)?;
    let cfg = build_config(r, args.parallel)?;
    if r.print_config {
        return print_config(&cfg, &r.print_config_format);
    }
    if args.parallel && !cfg!(feature = "parallel") {
        warn!("--parallel has no effect: built without the `parallel` feature");
    }
    let name = label_name(package, r.name.as_deref());
    let composer = build_composer(cfg, r.font.as_deref())?;

    let paths = gather_paths(&args.input, &args.include, &args.exclude)?;
    if paths.is_empty() {
        anyhow::bail!("no photos found under {}", args.input.display());
    }
    let jobs = load_jobs_with_progress(&args.input, &paths, package, name, show_progress)?;
    info!(count = jobs.len(), "loaded photos");

    let start = Instant::now();
    let sheets = composer.compose_many(&jobs);
    info!(
        sheets = sheets.len(),
        ms = start.elapsed().as_millis() as u64,
        "batch composed"
    );
    if r.dry_run {
        for (job, sheet) in jobs.iter().zip(&sheets) {
            println!("{} -> {}", job.key, sheet.layout.stats().summary());
        }
        return Ok(());
    }

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create out_dir {}", args.out_dir.display()))?;
    for (job, sheet) in jobs.iter().zip(&sheets) {
        let png_path = args
            .out_dir
            .join(format!("{}-{}.png", job.key, package.file_stem()));
        snappack_core::save_png(sheet, &png_path)
            .with_context(|| format!("write {}", png_path.display()))?;
        info!(?png_path, "sheet written");
    }
    Ok(())
}

fn run_layout(args: &LayoutArgs) -> anyhow::Result<()> {
    let package = parse_package(&args.package)?;
    let cfg = ComposeConfig::builder().dpi(args.dpi).build();
    let composer = Composer::new(cfg)?;
    let layout = composer.layout(package);
    let value = snappack_core::layout_to_json(&layout, args.dpi);
    let json = serde_json::to_string_pretty(&value)?;
    match &args.output {
        Some(path) => {
            ensure_parent(path)?;
            fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            info!(?path, cells = layout.cells.len(), "layout written");
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn parse_package(s: &str) -> anyhow::Result<PackageId> {
    s.trim()
        .to_ascii_uppercase()
        .parse::<PackageId>()
        .with_context(|| format!("unknown package '{}' (expected one of A..H)", s))
}

/// The name to print, if the package has label strips and the name is not blank.
fn label_name(package: PackageId, name: Option<&str>) -> Option<&str> {
    match name {
        Some(n) if !n.trim().is_empty() => {
            if package.is_passport() {
                Some(n)
            } else {
                warn!(package = %package, "package has no name strip; --name ignored");
                None
            }
        }
        _ => None,
    }
}

fn build_config(r: &RenderArgs, parallel: bool) -> anyhow::Result<ComposeConfig> {
    let filter: ResampleFilter = r
        .filter
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown filter: {}", r.filter))?;
    let mut cfg = ComposeConfig::builder()
        .cut_lines(!r.no_cut_lines)
        .cell_borders(!r.no_borders)
        .filter(filter)
        .parallel(parallel)
        .build();
    if let Some(dpi) = r.dpi {
        cfg.dpi = dpi;
    }
    // YAML sets rendering options en bloc
    if let Some(path) = &r.config {
        let file = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let y: YamlConfig =
            serde_yaml::from_str(&file).with_context(|| format!("parse {}", path.display()))?;
        cfg = y.into_compose_config(cfg)?;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn print_config(cfg: &ComposeConfig, format: &str) -> anyhow::Result<()> {
    match format {
        "yaml" => println!("{}", serde_yaml::to_string(cfg)?),
        _ => println!("{}", serde_json::to_string_pretty(cfg)?),
    }
    Ok(())
}

fn build_composer(cfg: ComposeConfig, font: Option<&Path>) -> anyhow::Result<Composer> {
    let composer = Composer::new(cfg)?;
    match font {
        Some(path) => {
            let face = TrueTypeFace::open(path)
                .with_context(|| format!("load font {}", path.display()))?;
            debug!(?path, "using font");
            let face: Arc<dyn TextFace> = Arc::new(face);
            Ok(composer.with_face(face))
        }
        None => Ok(composer),
    }
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    Ok(())
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let inc_set = build_globset(include)?;
    let exc_set = build_globset(exclude)?;
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
    list.sort();
    Ok(list)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<Option<globset::GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat).with_context(|| format!("bad glob '{}'", pat))?);
    }
    Ok(Some(b.build()?))
}

fn should_skip(
    p: &Path,
    include: Option<&globset::GlobSet>,
    exclude: Option<&globset::GlobSet>,
) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if exclude.is_some_and(|ex| ex.is_match(&s)) {
        return true;
    }
    if include.is_some_and(|inc| !inc.is_match(&s)) {
        return true;
    }
    false
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "webp")
    )
}

/// Output keys for batch photos: the path below `root` without its extension,
/// components joined with `-`. Repeated keys get a `-2`, `-3`, ... suffix.
fn batch_keys(root: &Path, paths: &[PathBuf]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::with_capacity(paths.len());
    for p in paths {
        let rel = match p.strip_prefix(root) {
            Ok(r) if !r.as_os_str().is_empty() => r,
            _ => Path::new(p.file_name().unwrap_or_default()),
        };
        let parts: Vec<String> = rel
            .with_extension("")
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let base = if parts.is_empty() {
            "photo".to_string()
        } else {
            parts.join("-")
        };
        let mut key = base.clone();
        let mut n = 2;
        while !seen.insert(key.clone()) {
            key = format!("{}-{}", base, n);
            n += 1;
        }
        keys.push(key);
    }
    keys
}

fn load_jobs_with_progress(
    root: &Path,
    paths: &[PathBuf],
    package: PackageId,
    name: Option<&str>,
    progress: bool,
) -> anyhow::Result<Vec<ComposeJob>> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };
    let mut jobs = Vec::with_capacity(paths.len());
    for (p, key) in paths.iter().zip(batch_keys(root, paths)) {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        match SourceImage::open(p) {
            Ok(source) => {
                jobs.push(ComposeJob {
                    key,
                    package,
                    source: Arc::new(source),
                    name: name.map(str::to_string),
                });
            }
            Err(e) => {
                error!(?p, error = %e, "skip photo");
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(jobs)
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
    dpi: Option<u32>,
    cut_lines: Option<bool>,
    cut_line_color: Option<[u8; 3]>,
    cut_line_opacity: Option<f32>,
    cut_line_width: Option<u32>,
    cut_line_dash: Option<u32>,
    cut_line_gap: Option<u32>,
    cell_borders: Option<bool>,
    border_color: Option<[u8; 3]>,
    label_color: Option<[u8; 3]>,
    max_label_chars: Option<usize>,
    filter: Option<String>,
    parallel: Option<bool>,
}

impl YamlConfig {
    fn into_compose_config(self, mut cfg: ComposeConfig) -> anyhow::Result<ComposeConfig> {
        if let Some(v) = self.dpi {
            cfg.dpi = v;
        }
        if let Some(v) = self.cut_lines {
            cfg.cut_lines = v;
        }
        if let Some(v) = self.cut_line_color {
            cfg.cut_line_style.color = v;
        }
        if let Some(v) = self.cut_line_opacity {
            cfg.cut_line_style.opacity = v;
        }
        if let Some(v) = self.cut_line_width {
            cfg.cut_line_style.width = v;
        }
        if let Some(v) = self.cut_line_dash {
            cfg.cut_line_style.dash = v;
        }
        if let Some(v) = self.cut_line_gap {
            cfg.cut_line_style.gap = v;
        }
        if let Some(v) = self.cell_borders {
            cfg.cell_borders = v;
        }
        if let Some(v) = self.border_color {
            cfg.border_color = v;
        }
        if let Some(v) = self.label_color {
            cfg.label_color = v;
        }
        if let Some(v) = self.max_label_chars {
            cfg.max_label_chars = v;
        }
        if let Some(v) = self.filter {
            cfg.filter = v
                .parse()
                .map_err(|_| anyhow::anyhow!("unknown filter in config: {}", v))?;
        }
        if let Some(v) = self.parallel {
            cfg.parallel = v;
        }
        Ok(cfg)
    }
}
