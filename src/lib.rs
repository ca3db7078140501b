//! # AQL
//!
//! 抽樣檢驗允收判定：批量分類、不良數彙總、允收判定

pub use aql_calc::{AcceptanceEngine, DefectAggregator, LotClassifier};
pub use aql_core::*;
pub use aql_tables::{iso2859_normal, InMemoryPlanRepository, PlanTable};

pub mod tables {
    //! 抽樣表載入與內建表
    pub use aql_tables::*;
}

use tracing_subscriber::EnvFilter;

/// 初始化日誌（RUST_LOG 控制等級，預設 info）
///
/// 可重複呼叫，之後的呼叫不做任何事。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
