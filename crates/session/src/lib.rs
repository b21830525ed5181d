//! # `labeler-session` - 标注会话状态机
//!
//! 持有完整数据集与当前页码，每个用户动作只分派给一个处理器，
//! 处理完成后总是通过纯函数 `render` 重新派生视图。
//! `SessionManager` 作为门面 (Facade) 保证同一时刻只处理一个动作。

pub mod action;
pub mod manager;
pub mod state;
pub mod view;

pub use action::SessionAction;
pub use manager::SessionManager;
pub use state::LabelSession;
pub use view::SessionView;
