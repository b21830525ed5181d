use csv::ReaderBuilder;
use labeler_core::common::parse_mt5_timestamp;
use labeler_core::dataset::entity::Candle;
use labeler_core::dataset::error::LabelError;

use crate::record::{field, price};

/// MT5 历史数据导出的分隔符
pub const MT5_DELIMITER: u8 = b'\t';

/// # Summary
/// 清洗 MT5 表头，`<DATE>` -> `DATE`。
///
/// # Logic
/// 1. 去除 UTF-8 BOM。
/// 2. 删除所有尖括号并去除两端空白。
pub fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .replace(['<', '>'], "")
        .trim()
        .to_string()
}

/// # Summary
/// 解析 MT5 导出的原始行情文件。
///
/// # Logic
/// 1. 以制表符读取，清洗表头并定位 DATE/TIME/OPEN/HIGH/LOW/CLOSE 列，其余列忽略。
/// 2. 每行拼接 `DATE TIME` 并按 `YYYY.MM.DD HH:MM:SS` 解析时间。
/// 3. 价格列解析为浮点数，标注全部初始化为 false。
///
/// # Arguments
/// * `bytes`: 文件完整内容。
///
/// # Returns
/// 成功返回按文件顺序排列的 K 线；任意行解析失败返回 `LabelError::DataFormat`，
/// 错误信息包含行号与列名。
pub fn parse_mt5_export(bytes: &[u8]) -> Result<Vec<Candle>, LabelError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(MT5_DELIMITER)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LabelError::DataFormat(format!("unreadable header: {}", e)))?
        .iter()
        .map(clean_header)
        .collect();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LabelError::DataFormat(format!("missing column {}", name)))
    };
    let date_col = column("DATE")?;
    let time_col = column("TIME")?;
    let open_col = column("OPEN")?;
    let high_col = column("HIGH")?;
    let low_col = column("LOW")?;
    let close_col = column("CLOSE")?;

    let mut candles = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| LabelError::DataFormat(e.to_string()))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let date = field(&record, date_col, "DATE", line)?;
        let time = field(&record, time_col, "TIME", line)?;
        let timestamp = parse_mt5_timestamp(date, time).map_err(|e| {
            LabelError::DataFormat(format!(
                "line {}: invalid timestamp \"{} {}\": {}",
                line, date, time, e
            ))
        })?;

        candles.push(Candle::unlabeled(
            timestamp,
            price(&record, open_col, "OPEN", line)?,
            price(&record, high_col, "HIGH", line)?,
            price(&record, low_col, "LOW", line)?,
            price(&record, close_col, "CLOSE", line)?,
        ));
    }

    Ok(candles)
}
