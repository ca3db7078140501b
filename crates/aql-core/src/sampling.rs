//! 抽樣計劃模型

use serde::{Deserialize, Serialize};

use crate::AqlValue;

/// 抽樣計劃分組（批量區間 → 樣本代字）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingPlanGroup {
    /// 批量下限（含）
    pub lot_size_from: u64,

    /// 批量上限（含），None 表示無上限
    pub lot_size_to: Option<u64>,

    /// 檢驗水準（S1、S2、II ...）
    pub inspection_level: String,

    /// 檢驗類型（Normal、Tightened、Reduced）
    pub inspection_type: String,

    /// 抽樣計劃代字
    pub sampling_plan_code: String,
}

impl SamplingPlanGroup {
    /// 創建新的分組
    pub fn new(
        lot_size_from: u64,
        lot_size_to: Option<u64>,
        inspection_level: impl Into<String>,
        sampling_plan_code: impl Into<String>,
    ) -> Self {
        Self {
            lot_size_from,
            lot_size_to,
            inspection_level: inspection_level.into(),
            inspection_type: "Normal".to_string(),
            sampling_plan_code: sampling_plan_code.into(),
        }
    }

    /// 建構器模式：設置檢驗類型
    pub fn with_inspection_type(mut self, inspection_type: impl Into<String>) -> Self {
        self.inspection_type = inspection_type.into();
        self
    }

    /// 批量是否落在區間內（上下限皆含）
    pub fn contains(&self, lot_size: u64) -> bool {
        lot_size >= self.lot_size_from && self.lot_size_to.map_or(true, |to| lot_size <= to)
    }

    /// 是否與另一區間重疊（不比較檢驗水準）
    pub fn overlaps(&self, other: &SamplingPlanGroup) -> bool {
        let self_to = self.lot_size_to.unwrap_or(u64::MAX);
        let other_to = other.lot_size_to.unwrap_or(u64::MAX);
        self.lot_size_from <= other_to && other.lot_size_from <= self_to
    }

    /// 是否為無上限區間
    pub fn is_unbounded(&self) -> bool {
        self.lot_size_to.is_none()
    }
}

/// 抽樣計劃（樣本代字 + AQL → 樣本數、允收數）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingPlan {
    /// 樣本代字
    pub code: String,

    /// 允收品質水準
    pub aql: AqlValue,

    /// 樣本數
    pub sample_size: u32,

    /// 允收數（最大允許不良數）
    pub max_allowed_defects: u32,
}

impl SamplingPlan {
    /// 創建新的抽樣計劃
    pub fn new(code: impl Into<String>, aql: AqlValue, sample_size: u32, max_allowed_defects: u32) -> Self {
        Self {
            code: code.into(),
            aql,
            sample_size,
            max_allowed_defects,
        }
    }

    /// 拒收數（允收數 + 1）
    pub fn rejection_number(&self) -> u64 {
        u64::from(self.max_allowed_defects) + 1
    }

    /// 不良數是否在允收範圍內（等於允收數仍允收）
    pub fn accepts(&self, total_defects: u64) -> bool {
        total_defects <= u64::from(self.max_allowed_defects)
    }
}
