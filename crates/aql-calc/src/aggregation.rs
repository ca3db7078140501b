//! 不良數彙總

use aql_core::TestOutcome;

/// 不良數彙總器
pub struct DefectAggregator;

impl DefectAggregator {
    /// 彙總不良數
    ///
    /// 只計入不合格（approved == false）的特性；合格特性即使記錄了不良數也不計入。
    pub fn aggregate_defects(outcomes: &[TestOutcome]) -> u64 {
        outcomes
            .iter()
            .map(|o| u64::from(o.counted_defects()))
            .sum()
    }

    /// 不合格特性數
    pub fn failed_characteristics(outcomes: &[TestOutcome]) -> usize {
        outcomes.iter().filter(|o| !o.approved).count()
    }

    /// 是否有任一特性不合格
    pub fn any_failed(outcomes: &[TestOutcome]) -> bool {
        outcomes.iter().any(|o| !o.approved)
    }

    /// 合格但帶有不良數的特性
    pub fn inconsistent_outcomes(outcomes: &[TestOutcome]) -> Vec<&TestOutcome> {
        outcomes.iter().filter(|o| !o.is_consistent()).collect()
    }
}
