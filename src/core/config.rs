/*
* 配置管理：
* 1. 引擎配置来自 TOML 文件，文件不存在时写出默认配置
* 2. 环境变量可以覆盖日志级别和数据表路径
* 3. 加载后统一校验，渲染参数错误在启动时暴露
*/

use serde::{Deserialize, Serialize};
use std::{
    env,
    fs,
    path::{Path, PathBuf},
};
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use crate::core::error::{CreatureError, Result};

pub const ENV_LOG_LEVEL: &str = "CREATURES_LOG_LEVEL";
pub const ENV_TABLES: &str = "CREATURES_TABLES";

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Replacement generation tables; the built-in set when absent.
    pub tables_path: Option<PathBuf>,
    pub render: RenderSettings,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Square canvas edge in pixels.
    pub canvas_size: u32,
    /// Outline and pupil-ring colour as `#rrggbb`.
    pub outline: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tables_path: None,
            render: RenderSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            canvas_size: 280,
            outline: "#2c3e50".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("配置文件不存在，创建默认配置: {:?}", path);
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)
            .map_err(|e| CreatureError::ConfigError(format!("解析配置文件失败: {}", e)))?;

        config.validate()?;
        info!("成功加载配置文件: {:?}", path);
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CreatureError::ConfigError(format!("序列化配置失败: {}", e)))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, content)?;
        debug!("配置已保存到: {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.render.canvas_size == 0 {
            return Err(CreatureError::ConfigError("画布尺寸必须大于0".to_string()));
        }

        if !HEX_COLOR.is_match(&self.render.outline) {
            return Err(CreatureError::ConfigError(format!(
                "轮廓颜色必须是 #rrggbb 格式: {}",
                self.render.outline
            )));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(CreatureError::ConfigError(format!("未知的日志级别: {}", self.log_level)));
        }

        Ok(())
    }

    /// Applies `CREATURES_LOG_LEVEL` and `CREATURES_TABLES` from the process
    /// environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| env::var(key).ok())
    }

    fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            debug!("{} 覆盖日志级别: {}", ENV_LOG_LEVEL, level);
            self.log_level = level.trim().to_string();
        }

        if let Some(tables) = lookup(ENV_TABLES).filter(|v| !v.trim().is_empty()) {
            debug!("{} 覆盖数据表路径: {}", ENV_TABLES, tables);
            self.tables_path = Some(PathBuf::from(tables.trim()));
        }

        self.validate()
    }
}
