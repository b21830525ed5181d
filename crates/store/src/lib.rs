//! # `labeler-store` - 数据文件适配层
//!
//! 实现 `labeler_core::dataset::port::DatasetStore`：
//! - `mt5`: 解析 MT5 导出的制表符分隔原始文件
//! - `progress`: 读写标注进度 CSV
//! - `file`: 按 "进度文件优先" 规则选择数据源，并以原子替换方式保存

pub mod file;
pub mod mt5;
pub mod progress;
mod record;

pub use file::FileDatasetStore;
