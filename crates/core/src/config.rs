use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// 每页默认展示的 K 线数量
pub const DEFAULT_PAGE_SIZE: usize = 200;

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 数据文件与分页配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    // MT5 原始导出文件 (制表符分隔)
    pub input_file: PathBuf,
    // 标注进度文件，存在时优先加载
    pub output_file: PathBuf,
    // 每页 K 线数量，必须大于 0
    pub page_size: usize,
}

/// 配置校验错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("page_size must be greater than 0")]
    InvalidPageSize,
    #[error("Config load error: {0}")]
    Load(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8050,
            },
            data: DataConfig {
                input_file: PathBuf::from("mt5_data.csv"),
                output_file: PathBuf::from("labeled_data.csv"),
                page_size: DEFAULT_PAGE_SIZE,
            },
        }
    }
}

impl AppConfig {
    /// # Summary
    /// 校验配置的业务约束。
    ///
    /// # Logic
    /// 1. 分页大小为 0 时无法计算页数，直接拒绝。
    ///
    /// # Returns
    /// 合法返回 Ok，否则返回 `ConfigError`。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        Ok(())
    }

    /// 服务监听地址，形如 `0.0.0.0:8050`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
