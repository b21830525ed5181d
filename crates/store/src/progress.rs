use csv::{ReaderBuilder, WriterBuilder};
use labeler_core::common::{format_timestamp, parse_timestamp};
use labeler_core::dataset::entity::{Candle, Dataset};
use labeler_core::dataset::error::LabelError;

use crate::record::{field, price};

/// 进度文件表头，列顺序即写出顺序
pub const PROGRESS_HEADER: [&str; 6] = ["time", "open", "high", "low", "close", "label_breakout"];

/// # Summary
/// 解析标注进度文件。
///
/// # Logic
/// 1. 按列名定位六个规范列，列顺序无关，多余列忽略。
/// 2. `time` 按通用 ISO-8601 风格解析。
/// 3. `label_breakout` 接受 `True/False/true/false/1/0`。
///
/// # Arguments
/// * `bytes`: 文件完整内容。
///
/// # Returns
/// 成功返回文件顺序的 K 线，任何格式问题返回 `LabelError::DataFormat`。
pub fn parse_progress(bytes: &[u8]) -> Result<Vec<Candle>, LabelError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| LabelError::DataFormat(format!("unreadable header: {}", e)))?
        .clone();
    let mut columns = [0usize; 6];
    for (slot, name) in columns.iter_mut().zip(PROGRESS_HEADER) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| LabelError::DataFormat(format!("missing column {}", name)))?;
    }
    let [time_col, open_col, high_col, low_col, close_col, label_col] = columns;

    let mut candles = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| LabelError::DataFormat(e.to_string()))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let raw_time = field(&record, time_col, "time", line)?;
        let time = parse_timestamp(raw_time).ok_or_else(|| {
            LabelError::DataFormat(format!("line {}: invalid time {:?}", line, raw_time))
        })?;
        let raw_label = field(&record, label_col, "label_breakout", line)?;
        let label_breakout = parse_bool(raw_label).ok_or_else(|| {
            LabelError::DataFormat(format!(
                "line {}: invalid label_breakout {:?}",
                line, raw_label
            ))
        })?;

        candles.push(Candle {
            time,
            open: price(&record, open_col, "open", line)?,
            high: price(&record, high_col, "high", line)?,
            low: price(&record, low_col, "low", line)?,
            close: price(&record, close_col, "close", line)?,
            label_breakout,
        });
    }

    Ok(candles)
}

/// # Summary
/// 将完整数据集编码为进度文件内容。
///
/// # Logic
/// 1. 写出固定表头。
/// 2. 时间写为 `YYYY-MM-DD HH:MM:SS`，价格使用可无损读回的最短十进制表示，
///    标注写为 `True`/`False`。
///
/// # Returns
/// 编码后的字节，编码失败返回 `LabelError::Persistence`。
pub fn encode_progress(dataset: &Dataset) -> Result<Vec<u8>, LabelError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(PROGRESS_HEADER)
        .map_err(|e| LabelError::Persistence(e.to_string()))?;

    for candle in dataset.candles() {
        writer
            .write_record([
                format_timestamp(&candle.time),
                candle.open.to_string(),
                candle.high.to_string(),
                candle.low.to_string(),
                candle.close.to_string(),
                format_bool(candle.label_breakout).to_string(),
            ])
            .map_err(|e| LabelError::Persistence(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| LabelError::Persistence(e.to_string()))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
