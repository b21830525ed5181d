//! # `labeler-core` - 标注领域核心
//!
//! 定义 K 线标注会话所需的全部领域实体、错误类型与端口 (Port)，
//! 以及不依赖任何 IO 的纯逻辑：分页、标记翻转与图表视图投影。
//! 具体的文件读写由 `labeler-store` 实现，会话状态机由 `labeler-session` 组装。

pub mod common;
pub mod config;
pub mod pagination;
pub mod toggle;
pub mod view;

pub mod dataset {
    pub mod entity;
    pub mod error;
    pub mod port;
}
