use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// # Summary
/// 单根 K 线及其人工标注结果。
///
/// # Invariants
/// - `time` 为无时区时间戳，MT5 导出不携带时区信息。
/// - 除 `label_breakout` 外，加载后的字段在会话内保持不变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    // K 线开始时间
    pub time: NaiveDateTime,
    // 开盘价
    pub open: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 收盘价
    pub close: f64,
    // 是否被标注为突破
    pub label_breakout: bool,
}

impl Candle {
    /// 构造一根尚未标注的 K 线
    pub fn unlabeled(time: NaiveDateTime, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            label_breakout: false,
        }
    }
}

/// # Summary
/// 按时间升序排列的 K 线表，会话内唯一的可变数据。
///
/// # Invariants
/// - 始终按 `time` 升序排列，时间相同的行保持原始先后顺序。
/// - 行位置即索引，从 0 开始连续。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    candles: Vec<Candle>,
}

impl Dataset {
    /// # Summary
    /// 从任意顺序的 K 线列表构建数据集。
    ///
    /// # Logic
    /// 1. 使用稳定排序按时间升序排列，重复时间保持原始顺序。
    ///
    /// # Arguments
    /// * `candles`: 读取到的原始行。
    ///
    /// # Returns
    /// 排序后的数据集。
    pub fn from_unsorted(mut candles: Vec<Candle>) -> Self {
        candles.sort_by(|a, b| a.time.cmp(&b.time));
        Self { candles }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    pub(crate) fn candles_mut(&mut self) -> &mut [Candle] {
        &mut self.candles
    }

    /// 已标注为突破的行数
    pub fn labeled_count(&self) -> usize {
        self.candles.iter().filter(|c| c.label_breakout).count()
    }

    /// # Summary
    /// 统计与前一行时间完全相同的行数。
    ///
    /// # Logic
    /// 1. 数据集已排序，只需比较相邻行。
    ///
    /// # Returns
    /// 重复时间戳的行数 (每组重复中除第一行外的行)。
    pub fn duplicate_time_count(&self) -> usize {
        self.candles
            .windows(2)
            .filter(|pair| pair[0].time == pair[1].time)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 9, 1)
            .and_then(|d| d.and_hms_opt(0, minute, 0))
            .unwrap()
    }

    #[test]
    fn test_from_unsorted_sorts_stably() {
        let mut tagged = Candle::unlabeled(at(5), 1.0, 2.0, 0.5, 1.5);
        tagged.label_breakout = true;
        let dataset = Dataset::from_unsorted(vec![
            Candle::unlabeled(at(10), 1.0, 1.0, 1.0, 1.0),
            Candle::unlabeled(at(5), 9.0, 9.0, 9.0, 9.0),
            tagged,
            Candle::unlabeled(at(0), 3.0, 3.0, 3.0, 3.0),
        ]);

        let times: Vec<_> = dataset.candles().iter().map(|c| c.time).collect();
        assert_eq!(times, vec![at(0), at(5), at(5), at(10)]);
        // 重复时间保持读入顺序
        assert_eq!(dataset.candles()[1].open, 9.0);
        assert!(dataset.candles()[2].label_breakout);
        assert_eq!(dataset.duplicate_time_count(), 1);
        assert_eq!(dataset.labeled_count(), 1);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
        assert_eq!(dataset.duplicate_time_count(), 0);
        assert!(dataset.get(0).is_none());
    }
}
