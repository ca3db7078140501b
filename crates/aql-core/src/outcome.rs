//! 檢驗結果模型

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 單一檢驗特性的結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// 檢驗項目ID
    pub test_id: Uuid,

    /// 是否合格
    pub approved: bool,

    /// 不良品數量（合格時應為 0）
    #[serde(default)]
    pub defective_unit_count: u32,
}

impl TestOutcome {
    /// 創建新的檢驗結果
    pub fn new(test_id: Uuid, approved: bool, defective_unit_count: u32) -> Self {
        Self {
            test_id,
            approved,
            defective_unit_count,
        }
    }

    /// 合格結果
    pub fn passed(test_id: Uuid) -> Self {
        Self::new(test_id, true, 0)
    }

    /// 不合格結果
    pub fn failed(test_id: Uuid, defective_unit_count: u32) -> Self {
        Self::new(test_id, false, defective_unit_count)
    }

    /// 合格但仍記錄了不良數，視為不一致
    pub fn is_consistent(&self) -> bool {
        !(self.approved && self.defective_unit_count > 0)
    }

    /// 計入總不良數的數量
    pub fn counted_defects(&self) -> u32 {
        if self.approved {
            0
        } else {
            self.defective_unit_count
        }
    }
}
