use labeler_core::common::parse_timestamp;
use labeler_core::dataset::entity::Dataset;
use labeler_core::dataset::error::LabelError;
use labeler_core::dataset::port::DatasetStore;
use labeler_core::pagination::Pagination;
use labeler_core::toggle::toggle;
use tracing::{debug, warn};

use crate::action::SessionAction;
use crate::view::{SessionView, render};

/// 保存成功后的状态文案
pub const SAVED_STATUS: &str = "Saved!";

/// # Summary
/// 单个标注会话的全部可变状态。
///
/// # Invariants
/// - `current_page` 始终满足 `0 <= current_page < page_count`。
/// - 数据集的行数与顺序在会话内不变，只有 `label_breakout` 会被翻转。
/// - 未显式保存前，所有修改只存在于内存中。
#[derive(Debug, Clone)]
pub struct LabelSession {
    // 完整数据集
    dataset: Dataset,
    // 0 起始的当前页码
    current_page: usize,
    // 分页规则
    pagination: Pagination,
    // 保存状态文案，空串表示无提示
    save_status: String,
}

impl LabelSession {
    /// # Summary
    /// 以加载完成的数据集创建会话，从第一页开始。
    ///
    /// # Arguments
    /// * `dataset`: 数据集。
    /// * `page_size`: 每页 K 线数量。
    pub fn new(dataset: Dataset, page_size: usize) -> Self {
        Self {
            dataset,
            current_page: 0,
            pagination: Pagination::new(page_size),
            save_status: String::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(&self.dataset)
    }

    pub fn save_status(&self) -> &str {
        &self.save_status
    }

    /// 翻到上一页，首页时不动
    pub fn previous(&mut self) {
        self.current_page = self.pagination.previous(self.current_page);
    }

    /// 翻到下一页，末页时不动
    pub fn next(&mut self) {
        self.current_page = self.pagination.next(self.current_page, self.page_count());
    }

    /// # Summary
    /// 跳转到用户输入的页码。
    ///
    /// # Logic
    /// 1. 输入为空时忽略。
    /// 2. 将 1 起始页码换算为 0 起始，越界时保持当前页不变。
    ///
    /// # Returns
    /// 是否发生了跳转。
    pub fn jump_to(&mut self, requested: Option<i64>) -> bool {
        let Some(requested) = requested else {
            debug!("Jump without a page number, ignored");
            return false;
        };
        match self.pagination.jump_target(requested, self.page_count()) {
            Some(target) => {
                self.current_page = target;
                true
            }
            None => {
                debug!(
                    "Jump to page {} out of range 1..={}, ignored",
                    requested,
                    self.page_count()
                );
                false
            }
        }
    }

    /// # Summary
    /// 处理图表点击，翻转对应 K 线的突破标注。
    ///
    /// # Logic
    /// 1. 解析点击坐标文本，无法识别时静默忽略。
    /// 2. 在完整数据集中查找时间完全相等的第一行并翻转。
    ///
    /// # Arguments
    /// * `clicked`: 渲染端上报的时间坐标。
    ///
    /// # Returns
    /// 被翻转行的索引，未命中返回 `None`。
    pub fn click(&mut self, clicked: &str) -> Option<usize> {
        let Some(time) = parse_timestamp(clicked) else {
            debug!("Click coordinate {:?} is not a timestamp, ignored", clicked);
            return None;
        };
        toggle(&mut self.dataset, time)
    }

    /// # Summary
    /// 将完整数据集写入进度文件，并更新保存状态文案。
    ///
    /// # Logic
    /// 1. 调用存储端口整表写出。
    /// 2. 成功时文案为 `Saved!`，失败时文案为错误描述，内存数据保持不变。
    ///
    /// # Returns
    /// 存储端口的原始结果，便于调用方记录日志。
    pub async fn save(&mut self, store: &dyn DatasetStore) -> Result<(), LabelError> {
        let result = store.save(&self.dataset).await;
        self.save_status = match &result {
            Ok(()) => SAVED_STATUS.to_string(),
            Err(e) => {
                warn!("Save failed, in-memory labels kept: {}", e);
                format!("Save failed: {}", e)
            }
        };
        result
    }

    /// # Summary
    /// 分派一个用户动作并返回重新渲染的视图。
    ///
    /// # Logic
    /// 1. 清空上一次的保存状态文案。
    /// 2. 将动作交给唯一对应的处理器。
    /// 3. 通过 `render` 派生新视图。
    ///
    /// # Arguments
    /// * `action`: 用户动作。
    /// * `store`: 保存动作使用的存储端口。
    pub async fn apply(&mut self, action: SessionAction, store: &dyn DatasetStore) -> SessionView {
        self.save_status.clear();
        match action {
            SessionAction::Previous => self.previous(),
            SessionAction::Next => self.next(),
            SessionAction::JumpTo(requested) => {
                self.jump_to(requested);
            }
            SessionAction::ClickCandle(clicked) => {
                self.click(&clicked);
            }
            SessionAction::Save => {
                // 失败已体现在保存状态文案中，会话继续
                if self.save(store).await.is_err() {
                    debug!("Save error surfaced to status indicator");
                }
            }
        }
        render(self)
    }

    /// 纯函数式地派生当前视图
    pub fn render(&self) -> SessionView {
        render(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use labeler_core::dataset::entity::Candle;

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 9, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    fn session_of(len: usize, page_size: usize) -> LabelSession {
        let candles = (0..len)
            .map(|i| {
                let t = base() + Duration::minutes(15 * i64::try_from(i).unwrap());
                Candle::unlabeled(t, 1.0, 2.0, 0.5, 1.5)
            })
            .collect();
        LabelSession::new(Dataset::from_unsorted(candles), page_size)
    }

    #[test]
    fn test_navigation_scenario() {
        let mut session = session_of(450, 200);
        assert_eq!(session.page_count(), 3);
        let mut pages = Vec::new();
        for _ in 0..3 {
            session.next();
            pages.push(session.current_page());
        }
        assert_eq!(pages, vec![1, 2, 2]);

        session.previous();
        session.previous();
        session.previous();
        assert_eq!(session.current_page(), 0);
    }

    #[test]
    fn test_jump_rules() {
        let mut session = session_of(450, 200);
        assert!(session.jump_to(Some(3)));
        assert_eq!(session.current_page(), 2);

        assert!(!session.jump_to(Some(0)));
        assert!(!session.jump_to(Some(4)));
        assert!(!session.jump_to(Some(-1)));
        assert!(!session.jump_to(None));
        assert_eq!(session.current_page(), 2);

        assert!(session.jump_to(Some(1)));
        assert_eq!(session.current_page(), 0);
    }

    #[test]
    fn test_empty_dataset_session() {
        let mut session = session_of(0, 200);
        assert_eq!(session.page_count(), 1);
        assert!(session.jump_to(Some(1)));
        assert_eq!(session.current_page(), 0);
        session.next();
        assert_eq!(session.current_page(), 0);
        assert!(session.render().chart.primary.points.is_empty());
    }

    #[test]
    fn test_click_parses_renderer_coordinates() {
        let mut session = session_of(4, 200);
        // 渲染端省略了秒
        assert_eq!(session.click("2023-09-01 00:15"), Some(1));
        assert!(session.dataset().candles()[1].label_breakout);
        assert_eq!(session.click("2023-09-01 00:15:00"), Some(1));
        assert!(!session.dataset().candles()[1].label_breakout);

        assert_eq!(session.click("not a time"), None);
        assert_eq!(session.click("2030-01-01 00:00:00"), None);
        assert_eq!(session.dataset().labeled_count(), 0);
    }

    #[test]
    fn test_click_on_other_page_row_only_affects_that_row() {
        let mut session = session_of(450, 200);
        let target = session.dataset().candles()[300].time;
        assert_eq!(session.current_page(), 0);
        assert_eq!(session.click(&target.to_string()), Some(300));
        assert_eq!(session.dataset().labeled_count(), 1);
        assert_eq!(session.current_page(), 0);
    }
}
