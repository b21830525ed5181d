//! # 视图投影
//!
//! 将当前页切片投影为渲染端可直接消费的图表载荷。渲染端被视为黑盒：
//! 它接收有序的 OHLC 点与标记层，并回报点击坐标。

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::dataset::entity::Candle;

/// 主序列名称
pub const PRIMARY_SERIES_NAME: &str = "OHLC";
/// 突破标记层名称
pub const MARKER_SERIES_NAME: &str = "Breakout";

/// 单根 K 线的渲染点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlePoint {
    pub time: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// 突破标记点，纵坐标取 K 线最高价
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPoint {
    pub time: NaiveDateTime,
    pub y: f64,
}

/// 标记点的固定视觉样式
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerStyle {
    pub symbol: String,
    pub size: u32,
    pub color: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            symbol: "triangle-down".to_string(),
            size: 15,
            color: "blue".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OhlcSeries {
    pub name: String,
    pub points: Vec<CandlePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSeries {
    pub name: String,
    pub style: MarkerStyle,
    pub points: Vec<MarkerPoint>,
}

/// 图表四周留白
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margin {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

/// # Summary
/// 图表布局提示。
///
/// # Invariants
/// - `view_revision` 仅随页码变化，渲染端据此决定保留还是重置缩放/平移状态。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub view_revision: String,
    pub title: String,
    pub range_slider_visible: bool,
    pub drag_mode: String,
    pub margin: Margin,
}

/// # Summary
/// 交给渲染端的完整图表载荷。
///
/// # Invariants
/// - `primary` 与页切片一一对应且顺序一致。
/// - `markers` 仅包含已标注行，页内无标注时为 `None`。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub primary: OhlcSeries,
    pub markers: Option<MarkerSeries>,
    pub layout: ChartLayout,
}

/// # Summary
/// 由当前页切片派生图表载荷。
///
/// # Logic
/// 1. 页内每一行生成一个 OHLC 点。
/// 2. 已标注行额外生成一个位于最高价的标记点。
/// 3. 附加 `page-{n}` 视图标识与 "Page x of y" 标题。
///
/// # Arguments
/// * `page`: 当前页切片。
/// * `current_page`: 0 起始的当前页码。
/// * `page_count`: 总页数。
pub fn project(page: &[Candle], current_page: usize, page_count: usize) -> ChartPayload {
    let points = page
        .iter()
        .map(|c| CandlePoint {
            time: c.time,
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
        })
        .collect();

    let labeled: Vec<MarkerPoint> = page
        .iter()
        .filter(|c| c.label_breakout)
        .map(|c| MarkerPoint {
            time: c.time,
            y: c.high,
        })
        .collect();

    let markers = (!labeled.is_empty()).then(|| MarkerSeries {
        name: MARKER_SERIES_NAME.to_string(),
        style: MarkerStyle::default(),
        points: labeled,
    });

    ChartPayload {
        primary: OhlcSeries {
            name: PRIMARY_SERIES_NAME.to_string(),
            points,
        },
        markers,
        layout: ChartLayout {
            view_revision: format!("page-{}", current_page),
            title: format!("Page {} of {}", current_page + 1, page_count),
            range_slider_visible: false,
            drag_mode: "pan".to_string(),
            margin: Margin {
                left: 40,
                right: 40,
                top: 40,
                bottom: 40,
            },
        },
    }
}

/// 次级页码指示文案，形如 `Page 2 / 3`
pub fn page_indicator(current_page: usize, page_count: usize) -> String {
    format!("Page {} / {}", current_page + 1, page_count)
}
