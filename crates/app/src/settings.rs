//! # 配置加载
//!
//! 按 默认值 → 配置文件 → 环境变量 的顺序逐层覆盖，最后做业务校验。

use config::{Config, Environment, File};
use labeler_core::config::{AppConfig, ConfigError};

/// 配置文件路径的环境变量名
pub const CONFIG_PATH_ENV: &str = "LABELER_CONFIG";
/// 默认配置文件路径 (可省略扩展名)
pub const DEFAULT_CONFIG_PATH: &str = "labeler.toml";
/// 环境变量前缀，例如 `LABELER_DATA__PAGE_SIZE=100`
pub const ENV_PREFIX: &str = "LABELER";

/// # Summary
/// 加载并校验应用配置。
///
/// # Arguments
/// * `path` - 配置文件路径，文件不存在时跳过。
///
/// # Returns
/// 合并后的配置；任一来源格式错误或校验失败时返回 `ConfigError`。
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let defaults = Config::try_from(&AppConfig::default()).map_err(load_error)?;
    let config: AppConfig = Config::builder()
        .add_source(defaults)
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .and_then(Config::try_deserialize)
        .map_err(load_error)?;
    config.validate()?;
    Ok(config)
}

fn load_error(e: config::ConfigError) -> ConfigError {
    ConfigError::Load(e.to_string())
}
