use crate::dataset::entity::Dataset;
use crate::dataset::error::LabelError;
use async_trait::async_trait;

/// # Summary
/// 标注数据集的存取接口 (Port)。
///
/// # Invariants
/// - `load` 在每个会话开始时调用一次，已保存的进度优先于原始导出文件。
/// - `save` 以整表覆盖的方式写出，对调用方而言要么完整成功，要么失败且不留下半成品文件。
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// # Summary
    /// 解析可用的数据源并加载为规范化数据集。
    ///
    /// # Logic
    /// 1. 进度文件存在时，将其作为唯一数据源。
    /// 2. 否则读取原始导出文件，并将全部标注初始化为 false。
    /// 3. 均不存在时返回 `LabelError::MissingData`。
    /// 4. 结果按时间升序排列。
    ///
    /// # Returns
    /// 成功返回数据集，解析失败返回 `LabelError::DataFormat`。
    async fn load(&self) -> Result<Dataset, LabelError>;

    /// # Summary
    /// 将完整数据集 (全部分页) 写入进度文件。
    ///
    /// # Arguments
    /// * `dataset`: 当前会话持有的数据集。
    ///
    /// # Returns
    /// 成功返回 Ok，写入失败返回 `LabelError::Persistence`。
    async fn save(&self, dataset: &Dataset) -> Result<(), LabelError>;
}
