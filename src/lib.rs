// 条码生物库入口
// 同一个12位条码永远生成同一只生物：稀有度、特征、命名、配色、属性
// 核心库不做IO，文件读写和日志初始化由调用方（CLI）负责

pub mod core;
pub mod utils;
pub mod creature_engine;
pub mod graphics;
pub mod collection;

// 重新导出核心类型
pub use self::core::{CreatureError, EngineConfig, ErrorSeverity, RenderSettings, Result};
pub use creature_engine::{
    generate, Barcode, CreatureEngine, CreatureRecord, DigitStats, GenerationTables, Rarity,
};
pub use graphics::{render_svg, CreatureRenderer, RecordingSurface, Surface, SvgSurface};
pub use collection::{Capture, CollectedCreature, Collection, CreatureStore, MemoryStore, SortOrder};

// 版本信息
pub const VERSION: &str = "0.1.0";
pub const NAME: &str = "barcode-creatures";

// 生成常量
pub mod constants {
    pub use crate::creature_engine::barcode::{BARCODE_LEN, SEED_DIGITS};
    pub use crate::creature_engine::generator::DRAWS_PER_CREATURE;
    pub use crate::graphics::LOGICAL_SIZE;

    pub const DEFAULT_CANVAS_SIZE: u32 = 280;
    pub const DEFAULT_OUTLINE: &str = "#2c3e50";
}

/// Installs the `env_logger` backend. `RUST_LOG` wins; otherwise the
/// crate logs at info. Safe to call more than once.
pub fn init() -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("barcode_creatures=info");
    if env_logger::Builder::from_env(env).try_init().is_ok() {
        log::info!("条码生物初始化完成 v{}", VERSION);
    }
    Ok(())
}
