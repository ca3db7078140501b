//! # AQL Calculation Engine
//!
//! 批量分類、不良數彙總與允收判定

pub mod aggregation;
pub mod classifier;
pub mod decision;

#[cfg(test)]
mod test_support;

// Re-export 主要類型
pub use aggregation::DefectAggregator;
pub use classifier::LotClassifier;
pub use decision::AcceptanceEngine;
