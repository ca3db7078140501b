//! 測試用抽樣表

use std::sync::atomic::{AtomicUsize, Ordering};

use aql_core::{AqlError, AqlValue, SamplingPlan, SamplingPlanGroup, SamplingPlanRepository};

/// 記憶體假資料表，可模擬資料庫故障並記錄查詢次數
#[derive(Default)]
pub struct FakeRepository {
    pub groups: Vec<SamplingPlanGroup>,
    pub plans: Vec<SamplingPlan>,
    pub unavailable: bool,
    pub group_queries: AtomicUsize,
    pub plan_queries: AtomicUsize,
}

impl FakeRepository {
    /// 單一分組 281–500 → G，G / 1,5 → 32 / 2
    pub fn single_plan() -> Self {
        Self {
            groups: vec![
                SamplingPlanGroup::new(2, Some(280), "S1", "F"),
                SamplingPlanGroup::new(281, Some(500), "S1", "G"),
            ],
            plans: vec![SamplingPlan::new("G", aql("1,5"), 32, 2)],
            ..Default::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub fn group_queries(&self) -> usize {
        self.group_queries.load(Ordering::SeqCst)
    }

    pub fn plan_queries(&self) -> usize {
        self.plan_queries.load(Ordering::SeqCst)
    }
}

impl SamplingPlanRepository for FakeRepository {
    fn find_group_by_lot_size_and_level(
        &self,
        lot_size: u64,
        inspection_level: &str,
    ) -> aql_core::Result<Option<SamplingPlanGroup>> {
        self.group_queries.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(AqlError::RepositoryUnavailable("connection refused".to_string()));
        }

        let matches: Vec<_> = self
            .groups
            .iter()
            .filter(|g| g.inspection_level == inspection_level && g.contains(lot_size))
            .collect();

        match matches.as_slice() {
            [] => Ok(None),
            [group] => Ok(Some((*group).clone())),
            _ => Err(AqlError::DataIntegrity(format!(
                "批量 {} 符合 {} 個分組",
                lot_size,
                matches.len()
            ))),
        }
    }

    fn find_plan_by_code_and_aql(
        &self,
        code: &str,
        aql: &AqlValue,
    ) -> aql_core::Result<Option<SamplingPlan>> {
        self.plan_queries.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(AqlError::RepositoryUnavailable("connection refused".to_string()));
        }

        Ok(self
            .plans
            .iter()
            .find(|p| p.code == code && p.aql == *aql)
            .cloned())
    }
}

pub fn aql(raw: &str) -> AqlValue {
    raw.parse().unwrap()
}
