use std::path::PathBuf;
use thiserror::Error;

/// # Summary
/// 标注领域错误枚举，覆盖数据加载与进度持久化的失败场景。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 无效跳页、未命中的点击不是错误，不会出现在此枚举中。
#[derive(Error, Debug)]
pub enum LabelError {
    // 进度文件与原始导出文件均不存在，会话无法启动
    #[error(
        "No data file found: neither {} nor {} exists",
        .output.display(),
        .input.display()
    )]
    MissingData { input: PathBuf, output: PathBuf },
    // 数据文件无法解析为预期的列或格式
    #[error("Data format error: {0}")]
    DataFormat(String),
    // 保存进度失败，内存中的数据不受影响
    #[error("Persistence error: {0}")]
    Persistence(String),
}
