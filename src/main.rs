// 条码生物命令行入口
// 生成、渲染、稀有度分析，以及基于JSON文件的收藏管理

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, LevelFilter};

use barcode_creatures::creature_engine::DEFAULT_TABLES;
use barcode_creatures::{
    render_svg, Barcode, Capture, CollectedCreature, Collection, CreatureEngine, CreatureRecord,
    DigitStats, EngineConfig, MemoryStore, Rarity, SortOrder,
};

/// Deterministic creatures from 12-digit barcodes
#[derive(Parser, Debug)]
#[command(name = "creatures", version, about, long_about = None)]
struct Cli {
    /// Engine configuration file (created with defaults if missing)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Generation tables file, overriding the configured one
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the creature for a barcode
    Generate {
        barcode: String,
        /// Emit the full record as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Draw the creature as an SVG file
    Render {
        barcode: String,
        #[arg(short, long)]
        output: PathBuf,
        /// Canvas edge in pixels
        #[arg(long)]
        size: Option<u32>,
    },
    /// Explain the rarity of a barcode
    Rarity { barcode: String },
    /// Add a creature to a collection file
    Capture {
        barcode: String,
        #[arg(long)]
        collection: PathBuf,
        /// Item the barcode was scanned from
        #[arg(long, default_value = "")]
        source: String,
    },
    /// List a collection file
    List {
        #[arg(long)]
        collection: PathBuf,
        #[arg(long)]
        rarity: Option<String>,
        /// recent, name or rarity
        #[arg(long, default_value = "recent")]
        sort: String,
    },
    /// Write the built-in generation tables as TOML
    DumpTables {
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 日志先于配置初始化，加载配置时的日志才不会丢失
    // 过滤器放开到 trace，实际级别由 max_level 控制
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("barcode_creatures=trace,creatures=trace"),
    )
    .init();
    if let Some(level) = startup_level(cli.verbose, rust_log_set) {
        log::set_max_level(level);
    }

    let config = load_config(&cli)?;
    if let Some(level) = configured_level(cli.verbose, rust_log_set, &config.log_level) {
        log::set_max_level(level);
    }
    debug!("{} v{} 配置: {:?}", barcode_creatures::NAME, barcode_creatures::VERSION, config);

    let engine = match &config.tables_path {
        Some(path) => CreatureEngine::from_tables_file(path)
            .with_context(|| format!("failed to load generation tables from {}", path.display()))?,
        None => CreatureEngine::default(),
    };

    match cli.command {
        Command::Generate { barcode, json } => {
            let record = engine.generate(&scan(&barcode)?);
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_record(&record);
            }
        }
        Command::Render { barcode, output, size } => {
            let record = engine.generate(&scan(&barcode)?);
            let mut settings = config.render.clone();
            if let Some(size) = size {
                settings.canvas_size = size;
            }
            let svg = render_svg(&record, &settings)?;
            write_file(&output, &svg)?;
            info!("rendered {} to {}", record.scientific_name, output.display());
        }
        Command::Rarity { barcode } => {
            let barcode = scan(&barcode)?;
            let stats = DigitStats::of(&barcode);
            println!("{}: {}", barcode, stats.rarity());
            println!("  digit sum       {}", stats.sum);
            println!("  unique digits   {}", stats.unique_count);
            println!("  pair run        {}", stats.pair_run);
            println!("  sequential run  {}", stats.seq_run);
        }
        Command::Capture { barcode, collection, source } => {
            let barcode = scan(&barcode)?;
            let mut creatures = open_collection(engine, &collection)?;
            match creatures.capture(&barcode, &source)? {
                Capture::New(entry) => println!("New discovery: {}", summary(&entry)),
                Capture::AlreadyCollected(entry) => println!("Already in collection: {}", summary(&entry)),
            }
            write_file(&collection, &creatures.export_json()?)?;
        }
        Command::List { collection, rarity, sort } => {
            let rarity = rarity.as_deref().map(Rarity::from_str).transpose()?;
            let order = SortOrder::from_str(&sort)?;
            let creatures = open_collection(engine, &collection)?;

            for entry in creatures.browse(rarity, order)? {
                println!("{}", summary(&entry));
            }
            let counts = creatures.rarity_counts()?;
            let breakdown: Vec<String> = counts.iter().rev().map(|(r, n)| format!("{} {}", n, r)).collect();
            println!("{} creatures ({})", creatures.count()?, breakdown.join(", "));
        }
        Command::DumpTables { output } => {
            write_file(&output, &DEFAULT_TABLES.to_toml_string()?)?;
            info!("wrote built-in tables to {}", output.display());
        }
    }

    Ok(())
}

/// Level used while the config file is still loading. `None` leaves
/// `RUST_LOG` in charge.
fn startup_level(verbose: bool, rust_log_set: bool) -> Option<LevelFilter> {
    match (rust_log_set, verbose) {
        (true, _) => None,
        (false, true) => Some(LevelFilter::Debug),
        (false, false) => Some(LevelFilter::Info),
    }
}

/// Level once the config is known. `--verbose` and `RUST_LOG` beat the file.
fn configured_level(verbose: bool, rust_log_set: bool, config_level: &str) -> Option<LevelFilter> {
    if verbose || rust_log_set {
        return None;
    }
    Some(config_level.parse().unwrap_or(LevelFilter::Info))
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    config.apply_env_overrides()?;
    if let Some(tables) = &cli.tables {
        config.tables_path = Some(tables.clone());
    }
    Ok(config)
}

fn scan(input: &str) -> Result<Barcode> {
    Barcode::from_scan(input).with_context(|| format!("not a usable barcode: {:?}", input))
}

fn open_collection(engine: CreatureEngine, path: &Path) -> Result<Collection<MemoryStore>> {
    let mut collection = Collection::new(engine, MemoryStore::new());
    if path.exists() {
        let json = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let imported = collection
            .import_json(&json)
            .with_context(|| format!("collection {} is invalid", path.display()))?;
        debug!("loaded {} creatures from {}", imported, path.display());
    }
    Ok(collection)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

fn summary(entry: &CollectedCreature) -> String {
    let mut line = format!(
        "{}  {:<24} {:<10} {}",
        entry.record.id, entry.record.scientific_name, entry.record.rarity.as_str(), entry.record.common_name
    );
    if !entry.source_item.is_empty() {
        line.push_str(&format!("  [{}]", entry.source_item));
    }
    line
}

fn print_record(record: &CreatureRecord) {
    println!("{} ({})", record.scientific_name, record.common_name);
    println!("  barcode     {}", record.id);
    println!("  rarity      {}", record.rarity);
    println!("  body        {} ({})", record.body_type, record.body_descriptor);
    println!("  limbs       {} {} ({})", record.limb_count, record.limb_type, record.limb_descriptor);
    println!("  eyes        {} {} ({})", record.eye_count, record.eye_style, record.eye_descriptor);
    println!("  features    {}", record.feature_descriptor);
    println!("  pattern     {}", record.pattern);
    println!(
        "  colors      {} / {} / {} [{}]",
        record.colors.primary, record.colors.secondary, record.colors.accent, record.colors.palette_name
    );
    let stats = &record.stats;
    println!(
        "  stats       VIT {} MOB {} AWR {} DEF {} ADP {}",
        stats.vitality, stats.mobility, stats.awareness, stats.defense, stats.adaptability
    );
    println!("  temperament {}", stats.temperament);
}
