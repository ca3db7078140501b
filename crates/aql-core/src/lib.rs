//! # AQL Core
//!
//! 抽樣檢驗核心資料模型與類型定義

pub mod aql;
pub mod config;
pub mod order;
pub mod outcome;
pub mod repository;
pub mod sampling;

// Re-export 主要類型
pub use aql::AqlValue;
pub use config::AcceptanceConfig;
pub use order::{AcceptanceStatus, DecisionBasis, OrderAcceptanceResult, OrderSubmission};
pub use outcome::TestOutcome;
pub use repository::SamplingPlanRepository;
pub use sampling::{SamplingPlan, SamplingPlanGroup};

/// 預設檢驗水準
pub const DEFAULT_INSPECTION_LEVEL: &str = "S1";

/// 預設 AQL（逗號為小數點）
pub const DEFAULT_AQL: &str = "1,5";

/// AQL 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum AqlError {
    #[error("無效的參數: {0}")]
    InvalidArgument(String),

    #[error("抽樣計劃資料來源無法使用: {0}")]
    RepositoryUnavailable(String),

    #[error("抽樣表資料完整性錯誤: {0}")]
    DataIntegrity(String),

    #[error("抽樣表載入失敗: {0}")]
    TableLoad(String),

    #[error("配置錯誤: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AqlError>;
