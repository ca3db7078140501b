//! 抽樣計劃資料來源介面
//!
//! 抽樣表由外部資料庫維護，核心只透過兩個唯讀查詢存取。
//! 查無資料回傳 `Ok(None)`；連線、查詢失敗或逾時必須回傳 `AqlError::RepositoryUnavailable`，
//! 不可回傳 `Ok(None)`。

use std::sync::Arc;

use crate::{AqlValue, SamplingPlan, SamplingPlanGroup};

/// 抽樣計劃資料來源
pub trait SamplingPlanRepository {
    /// 依批量與檢驗水準查詢分組（批量上下限皆含）
    ///
    /// 多筆符合時應回傳 `AqlError::DataIntegrity`，不可任選一筆。
    fn find_group_by_lot_size_and_level(
        &self,
        lot_size: u64,
        inspection_level: &str,
    ) -> crate::Result<Option<SamplingPlanGroup>>;

    /// 依樣本代字與 AQL 查詢抽樣計劃
    fn find_plan_by_code_and_aql(
        &self,
        code: &str,
        aql: &AqlValue,
    ) -> crate::Result<Option<SamplingPlan>>;
}

impl<R: SamplingPlanRepository + ?Sized> SamplingPlanRepository for &R {
    fn find_group_by_lot_size_and_level(
        &self,
        lot_size: u64,
        inspection_level: &str,
    ) -> crate::Result<Option<SamplingPlanGroup>> {
        (**self).find_group_by_lot_size_and_level(lot_size, inspection_level)
    }

    fn find_plan_by_code_and_aql(
        &self,
        code: &str,
        aql: &AqlValue,
    ) -> crate::Result<Option<SamplingPlan>> {
        (**self).find_plan_by_code_and_aql(code, aql)
    }
}

impl<R: SamplingPlanRepository + ?Sized> SamplingPlanRepository for Box<R> {
    fn find_group_by_lot_size_and_level(
        &self,
        lot_size: u64,
        inspection_level: &str,
    ) -> crate::Result<Option<SamplingPlanGroup>> {
        (**self).find_group_by_lot_size_and_level(lot_size, inspection_level)
    }

    fn find_plan_by_code_and_aql(
        &self,
        code: &str,
        aql: &AqlValue,
    ) -> crate::Result<Option<SamplingPlan>> {
        (**self).find_plan_by_code_and_aql(code, aql)
    }
}

impl<R: SamplingPlanRepository + ?Sized> SamplingPlanRepository for Arc<R> {
    fn find_group_by_lot_size_and_level(
        &self,
        lot_size: u64,
        inspection_level: &str,
    ) -> crate::Result<Option<SamplingPlanGroup>> {
        (**self).find_group_by_lot_size_and_level(lot_size, inspection_level)
    }

    fn find_plan_by_code_and_aql(
        &self,
        code: &str,
        aql: &AqlValue,
    ) -> crate::Result<Option<SamplingPlan>> {
        (**self).find_plan_by_code_and_aql(code, aql)
    }
}
