//! # AQL Tables
//!
//! 抽樣表資料來源：記憶體抽樣表、JSON/CSV 載入、ISO 2859-1 內建表

pub mod loader;
pub mod memory;
pub mod standard;

// Re-export 主要類型
pub use loader::{load_csv_paths, read_groups_csv, read_plans_csv, PlanTable};
pub use memory::InMemoryPlanRepository;
pub use standard::iso2859_normal;
