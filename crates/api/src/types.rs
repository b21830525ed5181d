//! # DTO (Data Transfer Object) 层
//!
//! 将会话视图转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use labeler_core::common::format_timestamp;
use labeler_core::view::{
    CandlePoint, ChartLayout, ChartPayload, Margin, MarkerPoint, MarkerSeries, MarkerStyle,
    OhlcSeries,
};
use labeler_session::SessionView;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

// ============================================================
//  图表相关 DTO
// ============================================================

/// 单根 K 线渲染点
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CandlePointResponse {
    /// K 线开盘时间
    #[schema(example = "2023-09-01 00:15:00")]
    pub time: String,
    #[schema(example = 1.0841)]
    pub open: f64,
    #[schema(example = 1.0849)]
    pub high: f64,
    #[schema(example = 1.0838)]
    pub low: f64,
    #[schema(example = 1.0846)]
    pub close: f64,
}

impl From<&CandlePoint> for CandlePointResponse {
    fn from(p: &CandlePoint) -> Self {
        Self {
            time: format_timestamp(&p.time),
            open: p.open,
            high: p.high,
            low: p.low,
            close: p.close,
        }
    }
}

/// 突破标记点，位于 K 线最高价
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarkerPointResponse {
    #[schema(example = "2023-09-01 00:15:00")]
    pub time: String,
    #[schema(example = 1.0849)]
    pub y: f64,
}

impl From<&MarkerPoint> for MarkerPointResponse {
    fn from(p: &MarkerPoint) -> Self {
        Self {
            time: format_timestamp(&p.time),
            y: p.y,
        }
    }
}

/// 标记样式
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarkerStyleResponse {
    #[schema(example = "triangle-down")]
    pub symbol: String,
    #[schema(example = 15)]
    pub size: u32,
    #[schema(example = "blue")]
    pub color: String,
}

impl From<&MarkerStyle> for MarkerStyleResponse {
    fn from(s: &MarkerStyle) -> Self {
        Self {
            symbol: s.symbol.clone(),
            size: s.size,
            color: s.color.clone(),
        }
    }
}

/// 主 OHLC 序列
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OhlcSeriesResponse {
    #[schema(example = "OHLC")]
    pub name: String,
    pub points: Vec<CandlePointResponse>,
}

impl From<&OhlcSeries> for OhlcSeriesResponse {
    fn from(s: &OhlcSeries) -> Self {
        Self {
            name: s.name.clone(),
            points: s.points.iter().map(CandlePointResponse::from).collect(),
        }
    }
}

/// 突破标记层
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarkerSeriesResponse {
    #[schema(example = "Breakout")]
    pub name: String,
    pub style: MarkerStyleResponse,
    pub points: Vec<MarkerPointResponse>,
}

impl From<&MarkerSeries> for MarkerSeriesResponse {
    fn from(s: &MarkerSeries) -> Self {
        Self {
            name: s.name.clone(),
            style: MarkerStyleResponse::from(&s.style),
            points: s.points.iter().map(MarkerPointResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarginResponse {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl From<&Margin> for MarginResponse {
    fn from(m: &Margin) -> Self {
        Self {
            left: m.left,
            right: m.right,
            top: m.top,
            bottom: m.bottom,
        }
    }
}

/// 图表布局提示
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartLayoutResponse {
    /// 视图标识，页码不变时前端应保留缩放/平移状态
    #[schema(example = "page-0")]
    pub view_revision: String,
    #[schema(example = "Page 1 of 3")]
    pub title: String,
    pub range_slider_visible: bool,
    #[schema(example = "pan")]
    pub drag_mode: String,
    pub margin: MarginResponse,
}

impl From<&ChartLayout> for ChartLayoutResponse {
    fn from(l: &ChartLayout) -> Self {
        Self {
            view_revision: l.view_revision.clone(),
            title: l.title.clone(),
            range_slider_visible: l.range_slider_visible,
            drag_mode: l.drag_mode.clone(),
            margin: MarginResponse::from(&l.margin),
        }
    }
}

/// 完整图表载荷
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartResponse {
    pub primary: OhlcSeriesResponse,
    /// 当前页无标注时为 null
    pub markers: Option<MarkerSeriesResponse>,
    pub layout: ChartLayoutResponse,
}

impl From<&ChartPayload> for ChartResponse {
    fn from(c: &ChartPayload) -> Self {
        Self {
            primary: OhlcSeriesResponse::from(&c.primary),
            markers: c.markers.as_ref().map(MarkerSeriesResponse::from),
            layout: ChartLayoutResponse::from(&c.layout),
        }
    }
}

// ============================================================
//  会话相关 DTO
// ============================================================

/// 会话视图 DTO - 每次动作后前端整体刷新
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionViewResponse {
    pub chart: ChartResponse,
    /// 次级页码提示
    #[schema(example = "Page 1 / 3")]
    pub page_info: String,
    /// 保存状态，空串表示无提示
    #[schema(example = "Saved!")]
    pub save_status: String,
    /// 跳转输入框回显的 1 起始页码
    #[schema(example = 1)]
    pub jump_value: usize,
    /// 0 起始的当前页码
    #[schema(example = 0)]
    pub current_page: usize,
    #[schema(example = 3)]
    pub page_count: usize,
    #[schema(example = 450)]
    pub total_candles: usize,
    #[schema(example = 12)]
    pub labeled_candles: usize,
}

impl From<&SessionView> for SessionViewResponse {
    fn from(v: &SessionView) -> Self {
        Self {
            chart: ChartResponse::from(&v.chart),
            page_info: v.page_info.clone(),
            save_status: v.save_status.clone(),
            jump_value: v.jump_value,
            current_page: v.current_page,
            page_count: v.page_count,
            total_candles: v.total_candles,
            labeled_candles: v.labeled_candles,
        }
    }
}

/// 跳转请求，页码为 1 起始，缺省时忽略
///
/// 数字输入框可能上报 `2`、`2.0` 或 `"2"`，统一截断为整数页码。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JumpRequest {
    #[schema(value_type = Option<f64>, example = 2)]
    pub page: Option<Value>,
}

impl JumpRequest {
    pub fn new(page: impl Into<Value>) -> Self {
        Self {
            page: Some(page.into()),
        }
    }

    /// 解析后的页码，无法识别时为 None，跳转随之忽略
    pub fn page_number(&self) -> Option<i64> {
        match self.page.as_ref()? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(truncate))
            }
            _ => None,
        }
    }
}

fn truncate(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    format!("{:.0}", value.trunc()).parse().ok()
}

/// 点击请求，携带图表上报的时间坐标
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClickRequest {
    #[schema(example = "2023-09-01 00:15:00")]
    pub time: String,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}
