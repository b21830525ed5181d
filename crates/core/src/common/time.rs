use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// MT5 导出文件中 `DATE` 与 `TIME` 两列拼接后的格式，例如 `2023.09.01 00:00:00`。
pub const MT5_TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// 进度文件写出时使用的时间格式，`%.f` 在整秒时不输出任何小数。
pub const SAVED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

// 通用 ISO-8601 风格解析依次尝试的格式，`%.f` 允许省略小数部分
const ISO_LIKE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// # Summary
/// 将 MT5 导出中的日期列与时间列合并解析为时间戳。
///
/// # Logic
/// 1. 去除两列两端空白后以单个空格拼接。
/// 2. 按固定格式 `YYYY.MM.DD HH:MM:SS` 严格解析。
///
/// # Arguments
/// * `date`: 日期列原文，例如 `2023.09.01`。
/// * `time`: 时间列原文，例如 `00:15:00`。
///
/// # Returns
/// 成功返回无时区时间戳，格式不符返回 chrono 的解析错误。
pub fn parse_mt5_timestamp(date: &str, time: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let combined = format!("{} {}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&combined, MT5_TIMESTAMP_FORMAT)
}

/// # Summary
/// 宽松地解析 ISO-8601 风格的时间文本。
///
/// # Logic
/// 1. 优先按 RFC 3339 (带时区偏移) 解析，换算到 UTC 后丢弃时区。
/// 2. 依次尝试带空格或 `T` 分隔、可省略秒与小数秒的格式。
/// 3. 最后退化为纯日期，补零点。
///
/// # Arguments
/// * `text`: 进度文件中的时间列，或图表点击上报的坐标文本。
///
/// # Returns
/// 可识别则返回 `Some`，否则返回 `None`。
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    for format in ISO_LIKE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// 将时间戳格式化为进度文件与前端坐标共用的文本形式。
///
/// 整秒时间输出 `YYYY-MM-DD HH:MM:SS`，含小数秒时追加 3/6/9 位小数，保证读回后完全相等。
pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(SAVED_TIMESTAMP_FORMAT).to_string()
}
