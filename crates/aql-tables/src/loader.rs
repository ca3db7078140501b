//! 抽樣表載入（JSON / CSV）

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use aql_core::{AqlError, SamplingPlan, SamplingPlanGroup};

use crate::InMemoryPlanRepository;

/// 抽樣表（分組 + 抽樣計劃）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTable {
    /// 批量分組
    #[serde(default)]
    pub groups: Vec<SamplingPlanGroup>,

    /// 抽樣計劃
    #[serde(default)]
    pub plans: Vec<SamplingPlan>,
}

impl PlanTable {
    /// 從 JSON 字串載入
    pub fn from_json_str(json: &str) -> aql_core::Result<Self> {
        serde_json::from_str(json).map_err(|e| AqlError::TableLoad(e.to_string()))
    }

    /// 從 JSON 檔案載入
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> aql_core::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        Self::from_json_str(&content)
    }

    /// 輸出為 JSON
    pub fn to_json_string(&self) -> aql_core::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| AqlError::TableLoad(e.to_string()))
    }

    /// 建立記憶體抽樣表（會檢查資料完整性）
    pub fn into_repository(self) -> aql_core::Result<InMemoryPlanRepository> {
        InMemoryPlanRepository::new(self.groups, self.plans)
    }
}

/// CSV 分組資料列
///
/// 欄位：lot_size_from,lot_size_to,inspection_level,inspection_type,sampling_plan_code
/// lot_size_to 空白表示無上限；inspection_type 可省略，預設 Normal。
#[derive(Debug, Deserialize)]
struct GroupRow {
    lot_size_from: u64,
    lot_size_to: Option<u64>,
    inspection_level: String,
    #[serde(default)]
    inspection_type: Option<String>,
    sampling_plan_code: String,
}

impl From<GroupRow> for SamplingPlanGroup {
    fn from(row: GroupRow) -> Self {
        let group = SamplingPlanGroup::new(
            row.lot_size_from,
            row.lot_size_to,
            row.inspection_level,
            row.sampling_plan_code,
        );
        match row.inspection_type {
            Some(inspection_type) => group.with_inspection_type(inspection_type),
            None => group,
        }
    }
}

/// 讀取 CSV 分組
pub fn read_groups_csv<R: Read>(reader: R) -> aql_core::Result<Vec<SamplingPlanGroup>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut groups = Vec::new();
    for record in csv_reader.deserialize::<GroupRow>() {
        let row = record.map_err(csv_error)?;
        groups.push(row.into());
    }
    Ok(groups)
}

/// 讀取 CSV 抽樣計劃
///
/// 欄位：code,aql,sample_size,max_allowed_defects；逗號小數的 AQL 需加引號（`"1,5"`）。
pub fn read_plans_csv<R: Read>(reader: R) -> aql_core::Result<Vec<SamplingPlan>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<SamplingPlan>()
        .map(|record| record.map_err(csv_error))
        .collect()
}

/// 從兩個 CSV 檔案建立記憶體抽樣表
pub fn load_csv_paths<P: AsRef<Path>, Q: AsRef<Path>>(
    groups_path: P,
    plans_path: Q,
) -> aql_core::Result<InMemoryPlanRepository> {
    let groups_path = groups_path.as_ref();
    let plans_path = plans_path.as_ref();

    let groups = read_groups_csv(File::open(groups_path).map_err(|e| io_error(groups_path, e))?)?;
    let plans = read_plans_csv(File::open(plans_path).map_err(|e| io_error(plans_path, e))?)?;

    tracing::info!(
        "從 CSV 載入抽樣表：{} ({} 筆)，{} ({} 筆)",
        groups_path.display(),
        groups.len(),
        plans_path.display(),
        plans.len()
    );

    InMemoryPlanRepository::new(groups, plans)
}

fn csv_error(err: csv::Error) -> AqlError {
    AqlError::TableLoad(format!("無效的 CSV 資料: {}", err))
}

fn io_error(path: &Path, err: std::io::Error) -> AqlError {
    AqlError::TableLoad(format!("無法讀取 {}: {}", path.display(), err))
}
