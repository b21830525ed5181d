//! 两种文件格式共用的单元格读取辅助函数。

use csv::StringRecord;
use labeler_core::dataset::error::LabelError;

pub(crate) fn field<'r>(
    record: &'r StringRecord,
    index: usize,
    name: &str,
    line: u64,
) -> Result<&'r str, LabelError> {
    record
        .get(index)
        .ok_or_else(|| LabelError::DataFormat(format!("line {}: missing {} value", line, name)))
}

pub(crate) fn price(record: &StringRecord, index: usize, name: &str, line: u64) -> Result<f64, LabelError> {
    let raw = field(record, index, name, line)?;
    raw.trim().parse::<f64>().map_err(|e| {
        LabelError::DataFormat(format!(
            "line {}: invalid {} value {:?}: {}",
            line, name, raw, e
        ))
    })
}
