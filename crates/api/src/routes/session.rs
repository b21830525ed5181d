//! # 标注会话路由控制器
//!
//! 实现 `/api/v1/session` 路径下的 REST 接口。
//! 每个请求对应一个会话动作，返回动作处理后重新渲染的完整视图。

use axum::Json;
use axum::extract::State;
use labeler_session::SessionAction;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, ClickRequest, JumpRequest, SessionViewResponse};

/// 动作处理后统一转换为响应
async fn dispatch(
    state: &AppState,
    action: SessionAction,
) -> Json<ApiResponse<SessionViewResponse>> {
    let view = state.session_manager.dispatch(action).await;
    Json(ApiResponse::ok(SessionViewResponse::from(&view)))
}

/// 获取当前会话视图
///
/// 仅渲染，不清除保存状态。
#[utoipa::path(
    get,
    path = "/api/v1/session",
    tag = "会话 (Session)",
    responses(
        (status = 200, description = "视图获取成功", body = ApiResponse<SessionViewResponse>)
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionViewResponse>>, ApiError> {
    let view = state.session_manager.view().await;
    Ok(Json(ApiResponse::ok(SessionViewResponse::from(&view))))
}

/// 上一页，首页时不动
#[utoipa::path(
    post,
    path = "/api/v1/session/previous",
    tag = "会话 (Session)",
    responses(
        (status = 200, description = "翻页完成", body = ApiResponse<SessionViewResponse>)
    )
)]
pub async fn previous_page(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionViewResponse>>, ApiError> {
    Ok(dispatch(&state, SessionAction::Previous).await)
}

/// 下一页，末页时不动
#[utoipa::path(
    post,
    path = "/api/v1/session/next",
    tag = "会话 (Session)",
    responses(
        (status = 200, description = "翻页完成", body = ApiResponse<SessionViewResponse>)
    )
)]
pub async fn next_page(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionViewResponse>>, ApiError> {
    Ok(dispatch(&state, SessionAction::Next).await)
}

/// 跳转到指定页
///
/// 页码为 1 起始，越界或缺省时保持当前页。
#[utoipa::path(
    post,
    path = "/api/v1/session/jump",
    tag = "会话 (Session)",
    request_body = JumpRequest,
    responses(
        (status = 200, description = "跳转完成", body = ApiResponse<SessionViewResponse>)
    )
)]
pub async fn jump_to_page(
    State(state): State<AppState>,
    Json(req): Json<JumpRequest>,
) -> Result<Json<ApiResponse<SessionViewResponse>>, ApiError> {
    Ok(dispatch(&state, SessionAction::JumpTo(req.page_number())).await)
}

/// 点击 K 线，翻转其突破标注
///
/// 无法识别或不匹配任何 K 线的时间坐标会被忽略。
#[utoipa::path(
    post,
    path = "/api/v1/session/click",
    tag = "会话 (Session)",
    request_body = ClickRequest,
    responses(
        (status = 200, description = "点击已处理", body = ApiResponse<SessionViewResponse>)
    )
)]
pub async fn click_candle(
    State(state): State<AppState>,
    Json(req): Json<ClickRequest>,
) -> Result<Json<ApiResponse<SessionViewResponse>>, ApiError> {
    Ok(dispatch(&state, SessionAction::ClickCandle(req.time)).await)
}

/// 保存进度
///
/// 保存失败不是 HTTP 错误，失败原因体现在 `save_status` 中。
#[utoipa::path(
    post,
    path = "/api/v1/session/save",
    tag = "会话 (Session)",
    responses(
        (status = 200, description = "保存已执行", body = ApiResponse<SessionViewResponse>)
    )
)]
pub async fn save_progress(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionViewResponse>>, ApiError> {
    Ok(dispatch(&state, SessionAction::Save).await)
}

/// 从磁盘重新加载，放弃未保存的修改
#[utoipa::path(
    post,
    path = "/api/v1/session/reload",
    tag = "会话 (Session)",
    responses(
        (status = 200, description = "重新加载成功", body = ApiResponse<SessionViewResponse>),
        (status = 500, description = "数据文件缺失或格式错误，原会话保持不变")
    )
)]
pub async fn reload_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionViewResponse>>, ApiError> {
    let view = state.session_manager.reload().await?;
    Ok(Json(ApiResponse::ok(SessionViewResponse::from(&view))))
}
