//! # `labeler-api` - HTTP API 网关
//!
//! 本 crate 是 K 线突破标注工具的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 将浏览器端的翻页、跳转、点击、保存请求转换为会话动作
//! - 调用下层 `SessionManager` 串行处理动作
//! - 将会话视图转换为 DTO 返回给前端

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
