use labeler_core::dataset::error::LabelError;
use labeler_core::dataset::port::DatasetStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::action::SessionAction;
use crate::state::LabelSession;
use crate::view::SessionView;

/// # Summary
/// 标注会话管理器，系统的应用服务层门面 (Facade)。
/// 编译期仅依赖 `labeler-core` 中的 Trait 定义，存储实现通过构造函数注入。
///
/// # Invariants
/// - 会话状态由互斥锁保护，动作严格串行处理。
/// - 进程生命周期内只有这一个会话。
pub struct SessionManager {
    // 数据集持久化接口
    store: Arc<dyn DatasetStore>,
    // 每页 K 线数量
    page_size: usize,
    // 唯一的会话状态
    session: Mutex<LabelSession>,
}

impl SessionManager {
    /// # Summary
    /// 加载数据集并创建管理器。
    ///
    /// # Logic
    /// 1. 通过存储端口加载数据集，失败时直接返回错误，不创建任何会话。
    /// 2. 以第一页为初始页创建会话。
    ///
    /// # Arguments
    /// * `store` - 数据集持久化接口的具体实现。
    /// * `page_size` - 每页 K 线数量。
    ///
    /// # Returns
    /// * `Arc<Self>` - 可共享的管理器实例。
    pub async fn start(
        store: Arc<dyn DatasetStore>,
        page_size: usize,
    ) -> Result<Arc<Self>, LabelError> {
        let dataset = store.load().await.inspect_err(|e| {
            error!("Failed to load dataset, session not started: {}", e);
        })?;
        info!(
            "🚀 Labeling session ready: {} candles, page size {}",
            dataset.len(),
            page_size
        );
        Ok(Arc::new(Self {
            store,
            page_size,
            session: Mutex::new(LabelSession::new(dataset, page_size)),
        }))
    }

    /// 分派一个动作，返回处理后的视图
    pub async fn dispatch(&self, action: SessionAction) -> SessionView {
        let mut session = self.session.lock().await;
        debug!("Dispatching action: {}", action.name());
        session.apply(action, self.store.as_ref()).await
    }

    /// 渲染当前视图，不改变任何状态
    pub async fn view(&self) -> SessionView {
        self.session.lock().await.render()
    }

    /// # Summary
    /// 从存储重新加载数据集，放弃未保存的修改。
    ///
    /// # Logic
    /// 1. 加载成功时以新数据集替换会话并回到第一页。
    /// 2. 加载失败时原会话保持不变。
    pub async fn reload(&self) -> Result<SessionView, LabelError> {
        let mut session = self.session.lock().await;
        let dataset = self.store.load().await.inspect_err(|e| {
            error!("Reload failed, keeping current session: {}", e);
        })?;
        info!("🔄 Session reloaded with {} candles", dataset.len());
        *session = LabelSession::new(dataset, self.page_size);
        Ok(session.render())
    }
}
