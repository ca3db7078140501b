//! 批量分類：批量 + 檢驗水準 → 抽樣計劃

use aql_core::{AqlError, AqlValue, SamplingPlan, SamplingPlanGroup, SamplingPlanRepository};

/// 批量分類器
pub struct LotClassifier<R> {
    /// 抽樣計劃資料來源
    repository: R,
}

impl<R: SamplingPlanRepository> LotClassifier<R> {
    /// 創建新的分類器
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// 查詢批量所屬分組
    ///
    /// 查無分組回傳 `Ok(None)`，資料來源錯誤原樣回傳。
    pub fn resolve_group(
        &self,
        lot_size: u64,
        inspection_level: &str,
    ) -> aql_core::Result<Option<SamplingPlanGroup>> {
        let inspection_level = Self::validate_request(lot_size, inspection_level)?;

        let group = self
            .repository
            .find_group_by_lot_size_and_level(lot_size, inspection_level)?;

        match group {
            Some(group) if !group.contains(lot_size) => Err(AqlError::DataIntegrity(format!(
                "分組 [{}, {:?}] 不包含批量 {}",
                group.lot_size_from, group.lot_size_to, lot_size
            ))),
            Some(group) => {
                tracing::debug!(
                    "批量 {} 檢驗水準 {} → 樣本代字 {}",
                    lot_size,
                    inspection_level,
                    group.sampling_plan_code
                );
                Ok(Some(group))
            }
            None => {
                tracing::debug!("批量 {} 檢驗水準 {} 無對應分組", lot_size, inspection_level);
                Ok(None)
            }
        }
    }

    /// 解析抽樣計劃
    ///
    /// 找不到分組或找不到 (代字, AQL) 對應的計劃時回傳 `Ok(None)`，
    /// 由判定引擎改走備援規則。
    pub fn resolve_plan(
        &self,
        lot_size: u64,
        inspection_level: &str,
        desired_aql: &AqlValue,
    ) -> aql_core::Result<Option<SamplingPlan>> {
        let Some(group) = self.resolve_group(lot_size, inspection_level)? else {
            return Ok(None);
        };

        let plan = self
            .repository
            .find_plan_by_code_and_aql(&group.sampling_plan_code, desired_aql)?;

        match &plan {
            Some(plan) => tracing::debug!(
                "代字 {} AQL {} → 樣本數 {}，允收數 {}",
                plan.code,
                desired_aql,
                plan.sample_size,
                plan.max_allowed_defects
            ),
            None => tracing::debug!(
                "代字 {} AQL {} 無對應抽樣計劃",
                group.sampling_plan_code,
                desired_aql
            ),
        }

        Ok(plan)
    }

    /// 獲取資料來源引用
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// 檢查查詢參數，回傳去除前後空白的檢驗水準
    fn validate_request(lot_size: u64, inspection_level: &str) -> aql_core::Result<&str> {
        if lot_size == 0 {
            return Err(AqlError::InvalidArgument("批量必須至少為 1".to_string()));
        }
        let inspection_level = inspection_level.trim();
        if inspection_level.is_empty() {
            return Err(AqlError::InvalidArgument("檢驗水準不可為空".to_string()));
        }
        Ok(inspection_level)
    }
}
