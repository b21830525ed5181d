use async_trait::async_trait;
use labeler_core::config::DataConfig;
use labeler_core::dataset::entity::Dataset;
use labeler_core::dataset::error::LabelError;
use labeler_core::dataset::port::DatasetStore;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

use crate::{mt5, progress};

/// DatasetStore 的本地文件实现。
///
/// # Summary
/// 在 "原始导出文件" 与 "标注进度文件" 两个候选源之间选择数据源，
/// 保存时只写进度文件，原始导出文件永远只读。
///
/// # Invariants
/// * 进度文件存在时总是优先于原始导出文件，保证已保存的进度不会被静默丢弃。
/// * 保存先写入同目录临时文件再重命名，失败时不会留下半截的进度文件。
pub struct FileDatasetStore {
    input_file: PathBuf,
    output_file: PathBuf,
}

impl FileDatasetStore {
    /// 创建新的 FileDatasetStore 实例。
    ///
    /// # Arguments
    /// * `input_file` - MT5 原始导出文件路径。
    /// * `output_file` - 标注进度文件路径。
    pub fn new(input_file: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            input_file: input_file.into(),
            output_file: output_file.into(),
        }
    }

    /// 从数据配置构建
    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(config.input_file.clone(), config.output_file.clone())
    }

    pub fn input_file(&self) -> &Path {
        &self.input_file
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    async fn read_source(&self, path: &Path) -> Result<Vec<u8>, LabelError> {
        tokio::fs::read(path)
            .await
            .map_err(|e| LabelError::DataFormat(format!("cannot read {}: {}", path.display(), e)))
    }
}

#[async_trait]
impl DatasetStore for FileDatasetStore {
    /// # Summary
    /// 解析数据源并加载数据集。
    ///
    /// # Logic
    /// 1. 进度文件存在：按进度格式解析，作为唯一数据源。
    /// 2. 否则原始导出文件存在：按 MT5 格式解析，标注全部为 false。
    /// 3. 两者都不存在：返回 `MissingData`。
    /// 4. 统一稳定排序，并对重复时间戳给出告警。
    ///
    /// # Returns
    /// * `Result<Dataset, LabelError>`
    async fn load(&self) -> Result<Dataset, LabelError> {
        let parsed = if path_exists(&self.output_file).await? {
            info!(
                "🔄 Loading existing progress from {}...",
                self.output_file.display()
            );
            let bytes = self.read_source(&self.output_file).await?;
            progress::parse_progress(&bytes)
        } else if path_exists(&self.input_file).await? {
            info!("📂 Loading fresh data from {}...", self.input_file.display());
            let bytes = self.read_source(&self.input_file).await?;
            mt5::parse_mt5_export(&bytes)
        } else {
            error!("❌ No data file found.");
            return Err(LabelError::MissingData {
                input: self.input_file.clone(),
                output: self.output_file.clone(),
            });
        };
        let candles = parsed.inspect_err(|e| error!("❌ Error parsing data file: {}", e))?;

        let dataset = Dataset::from_unsorted(candles);
        let duplicates = dataset.duplicate_time_count();
        if duplicates > 0 {
            warn!(
                "{} candles share a timestamp with the previous row; clicks will toggle the first of each group",
                duplicates
            );
        }
        info!(
            "✅ Loaded {} candles ({} labeled)!",
            dataset.len(),
            dataset.labeled_count()
        );
        Ok(dataset)
    }

    /// # Summary
    /// 将完整数据集覆盖写入进度文件。
    ///
    /// # Logic
    /// 1. 编码全部行。
    /// 2. 写入同目录临时文件并落盘。
    /// 3. 原子重命名覆盖目标文件。
    ///
    /// # Returns
    /// * `Result<(), LabelError>`
    async fn save(&self, dataset: &Dataset) -> Result<(), LabelError> {
        let bytes = progress::encode_progress(dataset)?;
        atomic_write(&self.output_file, &bytes).await?;
        info!(
            "💾 Saved {} candles ({} labeled) to {}",
            dataset.len(),
            dataset.labeled_count(),
            self.output_file.display()
        );
        Ok(())
    }
}

/// 无法确认是否存在时视为错误，不能当作文件缺失
async fn path_exists(path: &Path) -> Result<bool, LabelError> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|e| LabelError::DataFormat(format!("cannot access {}: {}", path.display(), e)))
}

async fn atomic_write(path: &Path, bytes: &[u8]) -> Result<(), LabelError> {
    let file_name = path.file_name().ok_or_else(|| {
        LabelError::Persistence(format!("invalid output path {}", path.display()))
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let tmp = dir.join(format!(".{}.tmp", file_name.to_string_lossy()));

    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| LabelError::Persistence(format!("create dir {}: {}", dir.display(), e)))?;

    let written = write_and_sync(&tmp, bytes).await;
    let result = match written {
        Ok(()) => tokio::fs::rename(&tmp, path).await.map_err(|e| {
            LabelError::Persistence(format!(
                "rename {} -> {}: {}",
                tmp.display(),
                path.display(),
                e
            ))
        }),
        Err(e) => Err(e),
    };

    if result.is_err() && path_exists(&tmp).await.unwrap_or(false) {
        if let Err(e) = tokio::fs::remove_file(&tmp).await {
            warn!("Failed to clean up {}: {}", tmp.display(), e);
        }
    }
    result
}

async fn write_and_sync(tmp: &Path, bytes: &[u8]) -> Result<(), LabelError> {
    let map = |e: std::io::Error| LabelError::Persistence(format!("write {}: {}", tmp.display(), e));
    let mut file = tokio::fs::File::create(tmp).await.map_err(map)?;
    file.write_all(bytes).await.map_err(map)?;
    file.sync_all().await.map_err(map)?;
    Ok(())
}
