//! 月份键模块
//!
//! 仪表盘与排行榜都以 `YYYY-MM` 字符串作为分组键在网络上传输。
//! [`MonthKey`] 把它解析为可排序、可展示的强类型。

use chrono::NaiveDate;
use std::fmt::Display;

/// 校验过的 `YYYY-MM` 月份标识。
///
/// 排序即时间顺序，可直接对键排序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// 解析 `YYYY-MM`。任何格式错误或越界月份都返回 `None`。
    pub fn parse(raw: &str) -> Option<Self> {
        let (year, month) = raw.split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// 面向用户的标签，如 `December 2025`。
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(date) => date.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }

    /// 图表轴用的紧凑标签，如 `Dec 2025`。
    pub fn short_label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(date) => date.format("%b %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// 1 起始月份序号对应的英文月份名（排行榜过滤选项用）。
pub fn month_name(month: u32) -> Option<String> {
    let date = NaiveDate::from_ymd_opt(2000, month, 1)?;
    Some(date.format("%B").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_keys() {
        let key = MonthKey::parse("2025-12").unwrap();
        assert_eq!(key.year(), 2025);
        assert_eq!(key.month(), 12);
        assert_eq!(key.to_string(), "2025-12");
    }

    #[test]
    fn rejects_malformed_keys() {
        for raw in ["", "2025", "2025-13", "2025-00", "25-12", "2025-1", "x-y"] {
            assert!(MonthKey::parse(raw).is_none(), "accepted {raw:?}");
        }
    }

    #[test]
    fn orders_chronologically() {
        let mut keys = vec![
            MonthKey::parse("2026-01").unwrap(),
            MonthKey::parse("2025-02").unwrap(),
            MonthKey::parse("2025-12").unwrap(),
        ];
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(MonthKey::to_string).collect();
        assert_eq!(rendered, ["2025-02", "2025-12", "2026-01"]);
    }

    #[test]
    fn labels_use_month_names() {
        let key = MonthKey::parse("2025-12").unwrap();
        assert_eq!(key.label(), "December 2025");
        assert_eq!(key.short_label(), "Dec 2025");
        assert_eq!(month_name(1).as_deref(), Some("January"));
        assert_eq!(month_name(13), None);
    }
}
