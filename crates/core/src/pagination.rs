//! # 分页引擎
//!
//! 计算页数、页码边界与当前页切片。页码在内部一律从 0 开始，
//! 只有跳页输入与展示文案使用从 1 开始的页码。

use crate::dataset::entity::{Candle, Dataset};

/// # Summary
/// 固定页大小的分页规则。
///
/// # Invariants
/// - `page_size` 至少为 1。
/// - 任意数据集的页数至少为 1，空数据集对应一张空白页。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
}

impl Pagination {
    /// 创建分页规则，页大小为 0 时按 1 处理
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// # Summary
    /// 计算数据集的总页数。
    ///
    /// # Logic
    /// 1. 空数据集返回 1，保证界面永远不会出现 0 页。
    /// 2. 否则向上取整 `len / page_size`。
    pub fn page_count(&self, dataset: &Dataset) -> usize {
        self.page_count_for(dataset.len())
    }

    pub fn page_count_for(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// 将任意页码收敛到 `[0, page_count - 1]`
    pub fn clamp_page(&self, page: usize, page_count: usize) -> usize {
        page.min(page_count.saturating_sub(1))
    }

    /// 上一页，已在首页时保持不动
    pub fn previous(&self, page: usize) -> usize {
        page.saturating_sub(1)
    }

    /// 下一页，已在末页时保持不动
    pub fn next(&self, page: usize, page_count: usize) -> usize {
        self.clamp_page(page.saturating_add(1), page_count)
    }

    /// # Summary
    /// 将用户输入的 1 起始页码转换为合法的 0 起始页码。
    ///
    /// # Logic
    /// 1. `target = requested - 1`。
    /// 2. 仅当 `0 <= target < page_count` 时返回 `Some(target)`。
    ///
    /// # Arguments
    /// * `requested`: 跳页输入框中的页码，可能为 0 或负数。
    /// * `page_count`: 当前总页数。
    ///
    /// # Returns
    /// 越界返回 `None`，调用方应保持当前页不变。
    pub fn jump_target(&self, requested: i64, page_count: usize) -> Option<usize> {
        let target = requested.checked_sub(1)?;
        usize::try_from(target)
            .ok()
            .filter(|target| *target < page_count)
    }

    /// # Summary
    /// 取出指定页的 K 线切片。
    ///
    /// # Logic
    /// 1. 起点为 `page * page_size`，终点不超过数据集末尾。
    /// 2. 起点越界时返回空切片。
    pub fn slice<'a>(&self, dataset: &'a Dataset, page: usize) -> &'a [Candle] {
        let candles = dataset.candles();
        let start = page.saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size).min(candles.len());
        candles.get(start..end).unwrap_or(&[])
    }
}
