//! 訂單提交與允收判定結果

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{AqlError, SamplingPlan, TestOutcome};

/// 訂單提交（來自訂單建立流程）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmission {
    /// 每包裝單位數
    pub units_per_package: u32,

    /// 包裝數
    pub package_count: u32,

    /// 檢驗水準，未指定時使用配置預設值
    #[serde(default)]
    pub inspection_level: Option<String>,

    /// 期望 AQL，未指定時使用配置預設值
    #[serde(default)]
    pub desired_aql: Option<String>,

    /// 各檢驗特性結果
    #[serde(default)]
    pub outcomes: Vec<TestOutcome>,
}

impl OrderSubmission {
    /// 創建新的訂單提交
    pub fn new(units_per_package: u32, package_count: u32) -> Self {
        Self {
            units_per_package,
            package_count,
            inspection_level: None,
            desired_aql: None,
            outcomes: Vec::new(),
        }
    }

    /// 建構器模式：設置檢驗水準
    pub fn with_inspection_level(mut self, level: impl Into<String>) -> Self {
        self.inspection_level = Some(level.into());
        self
    }

    /// 建構器模式：設置期望 AQL
    pub fn with_desired_aql(mut self, aql: impl Into<String>) -> Self {
        self.desired_aql = Some(aql.into());
        self
    }

    /// 建構器模式：設置檢驗結果
    pub fn with_outcomes(mut self, outcomes: Vec<TestOutcome>) -> Self {
        self.outcomes = outcomes;
        self
    }

    /// 添加檢驗結果
    pub fn add_outcome(&mut self, outcome: TestOutcome) {
        self.outcomes.push(outcome);
    }

    /// 計算批量 = 每包裝單位數 × 包裝數
    ///
    /// 兩個 u32 相乘不會超出 u64，因此只需檢查零值。
    pub fn lot_size(&self) -> crate::Result<u64> {
        if self.units_per_package == 0 || self.package_count == 0 {
            return Err(AqlError::InvalidArgument(format!(
                "批量必須為正數: 每包裝 {} × 包裝數 {}",
                self.units_per_package, self.package_count
            )));
        }
        Ok(u64::from(self.units_per_package) * u64::from(self.package_count))
    }
}

/// 最終允收狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcceptanceStatus {
    /// 允收
    Approved,
    /// 拒收
    Rejected,
}

impl AcceptanceStatus {
    /// 是否允收
    pub fn is_approved(&self) -> bool {
        *self == AcceptanceStatus::Approved
    }

    /// 訂單記錄中使用的狀態文字
    pub fn order_status_label(&self) -> &'static str {
        match self {
            AcceptanceStatus::Approved => "Aprobado",
            AcceptanceStatus::Rejected => "Rechazado",
        }
    }

    /// 由訂單記錄狀態文字還原
    pub fn from_order_status_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Aprobado" => Some(AcceptanceStatus::Approved),
            "Rechazado" => Some(AcceptanceStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for AcceptanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcceptanceStatus::Approved => f.write_str("Approved"),
            AcceptanceStatus::Rejected => f.write_str("Rejected"),
        }
    }
}

/// 判定依據
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionBasis {
    /// 依抽樣計劃允收數判定
    SamplingPlan,
    /// 找不到抽樣計劃，任一特性不合格即拒收
    AnyFailureFallback,
}

/// 訂單允收判定結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAcceptanceResult {
    /// 總批量
    pub total_lot_size: u64,

    /// 總不良數（僅計不合格特性）
    pub total_defective_units: u64,

    /// 採用的抽樣計劃
    pub resolved_plan: Option<SamplingPlan>,

    /// 最終狀態
    pub final_status: AcceptanceStatus,

    /// 判定依據
    pub basis: DecisionBasis,
}

impl OrderAcceptanceResult {
    /// 是否允收
    pub fn is_approved(&self) -> bool {
        self.final_status.is_approved()
    }

    /// 是否走了無抽樣計劃的備援判定
    pub fn is_fallback(&self) -> bool {
        self.basis == DecisionBasis::AnyFailureFallback
    }

    /// 抽樣計劃的樣本數
    pub fn sample_size(&self) -> Option<u32> {
        self.resolved_plan.as_ref().map(|p| p.sample_size)
    }
}
