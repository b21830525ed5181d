//! # 标注翻转引擎
//!
//! 将图表点击上报的时间坐标映射到数据集中的行，并翻转其 `label_breakout`。

use chrono::NaiveDateTime;
use tracing::debug;

use crate::dataset::entity::Dataset;

/// # Summary
/// 翻转与点击时间完全相等的第一行的突破标注。
///
/// # Logic
/// 1. 按顺序查找 `time == clicked` 的第一行。
/// 2. 未命中 (点在标记点上或数据已过期) 时静默忽略。
/// 3. 命中时翻转布尔值，其余字段与行顺序保持不变。
/// 4. 时间重复时只翻转第一条命中行。
///
/// # Arguments
/// * `dataset`: 会话持有的完整数据集。
/// * `clicked`: 点击坐标对应的时间戳。
///
/// # Returns
/// 被翻转行的索引，未命中返回 `None`。
pub fn toggle(dataset: &mut Dataset, clicked: NaiveDateTime) -> Option<usize> {
    let candles = dataset.candles_mut();
    let Some(index) = candles.iter().position(|c| c.time == clicked) else {
        debug!("Click at {} matched no candle, ignored", clicked);
        return None;
    };

    let candle = &mut candles[index];
    candle.label_breakout = !candle.label_breakout;
    debug!(
        "Toggled candle #{} at {} -> label_breakout={}",
        index, clicked, candle.label_breakout
    );
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::entity::Candle;
    use chrono::NaiveDate;

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 9, 1)
            .and_then(|d| d.and_hms_opt(0, minute, 0))
            .unwrap()
    }

    fn sample() -> Dataset {
        Dataset::from_unsorted(
            (0..5)
                .map(|m| Candle::unlabeled(at(m), 1.0, 2.0, 0.5, 1.5))
                .collect(),
        )
    }

    #[test]
    fn test_toggle_flips_only_clicked_row() {
        let mut dataset = sample();
        let before = dataset.clone();

        assert_eq!(toggle(&mut dataset, at(2)), Some(2));
        for (i, (now, was)) in dataset.candles().iter().zip(before.candles()).enumerate() {
            if i == 2 {
                assert!(now.label_breakout);
                assert_eq!(now.time, was.time);
                assert_eq!(now.high, was.high);
            } else {
                assert_eq!(now, was);
            }
        }
    }

    #[test]
    fn test_toggle_twice_restores_original() {
        let mut dataset = sample();
        let before = dataset.clone();
        toggle(&mut dataset, at(3));
        toggle(&mut dataset, at(3));
        assert_eq!(dataset, before);
    }

    #[test]
    fn test_toggle_unmatched_is_noop() {
        let mut dataset = sample();
        let before = dataset.clone();
        assert_eq!(toggle(&mut dataset, at(42)), None);
        assert_eq!(dataset, before);
    }

    #[test]
    fn test_toggle_duplicate_time_flips_first_only() {
        let mut dataset = Dataset::from_unsorted(vec![
            Candle::unlabeled(at(1), 1.0, 1.0, 1.0, 1.0),
            Candle::unlabeled(at(1), 2.0, 2.0, 2.0, 2.0),
        ]);
        assert_eq!(toggle(&mut dataset, at(1)), Some(0));
        assert!(dataset.candles()[0].label_breakout);
        assert!(!dataset.candles()[1].label_breakout);
    }

    #[test]
    fn test_toggle_on_empty_dataset() {
        let mut dataset = Dataset::default();
        assert_eq!(toggle(&mut dataset, at(0)), None);
        assert!(dataset.is_empty());
    }
}
