use labeler_core::view::{ChartPayload, page_indicator, project};
use serde::Serialize;

use crate::state::LabelSession;

/// # Summary
/// 一次渲染的完整输出：图表、页码提示、保存状态与跳转框回显。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub chart: ChartPayload,
    // 例如 "Page 1 / 3"
    pub page_info: String,
    pub save_status: String,
    // 跳转输入框回显的 1 起始页码
    pub jump_value: usize,
    pub current_page: usize,
    pub page_count: usize,
    pub total_candles: usize,
    pub labeled_candles: usize,
}

/// # Summary
/// 从会话状态派生视图，不修改任何状态。
///
/// # Invariants
/// - 相同的会话状态总是得到相同的视图。
pub fn render(session: &LabelSession) -> SessionView {
    let page_count = session.page_count();
    let current_page = session.current_page();
    let page = session.pagination().slice(session.dataset(), current_page);

    SessionView {
        chart: project(page, current_page, page_count),
        page_info: page_indicator(current_page, page_count),
        save_status: session.save_status().to_string(),
        jump_value: current_page + 1,
        current_page,
        page_count,
        total_candles: session.dataset().len(),
        labeled_candles: session.dataset().labeled_count(),
    }
}
