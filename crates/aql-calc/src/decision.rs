//! 允收判定引擎

use aql_core::{
    AcceptanceConfig, AcceptanceStatus, AqlError, AqlValue, DecisionBasis, OrderAcceptanceResult,
    OrderSubmission, SamplingPlanRepository, TestOutcome,
};
use rayon::prelude::*;

use crate::aggregation::DefectAggregator;
use crate::classifier::LotClassifier;

/// 允收判定引擎
///
/// 無狀態：每次判定只讀取資料來源，不修改任何資料，
/// 因此同一個引擎可同時判定多張訂單。
pub struct AcceptanceEngine<R> {
    /// 批量分類器
    classifier: LotClassifier<R>,

    /// 判定配置
    config: AcceptanceConfig,
}

impl<R: SamplingPlanRepository> AcceptanceEngine<R> {
    /// 創建新的判定引擎
    pub fn new(repository: R, config: AcceptanceConfig) -> Self {
        Self {
            classifier: LotClassifier::new(repository),
            config,
        }
    }

    /// 使用預設配置（S1、AQL 1,5）
    pub fn with_default_config(repository: R) -> Self {
        Self::new(repository, AcceptanceConfig::default())
    }

    /// 判定訂單允收狀態
    ///
    /// 1. 解析抽樣計劃
    /// 2. 彙總不合格特性的不良數
    /// 3. 有計劃：不良數 <= 允收數即允收（等於允收數仍允收）
    /// 4. 無計劃：任一特性不合格即拒收
    pub fn decide(
        &self,
        lot_size: u64,
        inspection_level: &str,
        desired_aql: &AqlValue,
        outcomes: &[TestOutcome],
    ) -> aql_core::Result<OrderAcceptanceResult> {
        tracing::info!(
            "開始允收判定：批量 {}，檢驗水準 {}，AQL {}，檢驗項目 {} 筆",
            lot_size,
            inspection_level,
            desired_aql,
            outcomes.len()
        );

        self.check_outcomes(outcomes)?;

        // Step 1: 解析抽樣計劃
        let plan = self
            .classifier
            .resolve_plan(lot_size, inspection_level, desired_aql)?;

        // Step 2: 彙總不良數
        let total_defects = DefectAggregator::aggregate_defects(outcomes);
        tracing::debug!("總不良數: {}", total_defects);

        // Step 3/4: 判定
        let (final_status, basis) = match &plan {
            Some(plan) => {
                let status = if plan.accepts(total_defects) {
                    AcceptanceStatus::Approved
                } else {
                    AcceptanceStatus::Rejected
                };
                (status, DecisionBasis::SamplingPlan)
            }
            None => {
                tracing::debug!("無抽樣計劃，改用任一不合格即拒收規則");
                let status = if DefectAggregator::any_failed(outcomes) {
                    AcceptanceStatus::Rejected
                } else {
                    AcceptanceStatus::Approved
                };
                (status, DecisionBasis::AnyFailureFallback)
            }
        };

        tracing::info!("允收判定完成：{} ({:?})", final_status, basis);

        Ok(OrderAcceptanceResult {
            total_lot_size: lot_size,
            total_defective_units: total_defects,
            resolved_plan: plan,
            final_status,
            basis,
        })
    }

    /// 判定訂單提交，未指定的檢驗水準與 AQL 使用配置預設值
    pub fn evaluate(&self, submission: &OrderSubmission) -> aql_core::Result<OrderAcceptanceResult> {
        let lot_size = submission.lot_size()?;
        let inspection_level = self
            .config
            .inspection_level_or_default(submission.inspection_level.as_deref());
        let desired_aql = self
            .config
            .aql_or_default(submission.desired_aql.as_deref())?;

        self.decide(lot_size, inspection_level, &desired_aql, &submission.outcomes)
    }

    /// 並行判定多張訂單，結果順序與輸入一致
    ///
    /// 各訂單互相獨立，單張失敗不影響其他訂單。
    pub fn evaluate_batch(
        &self,
        submissions: &[OrderSubmission],
    ) -> Vec<aql_core::Result<OrderAcceptanceResult>>
    where
        R: Sync,
    {
        tracing::info!("批次允收判定：{} 張訂單", submissions.len());

        submissions
            .par_iter()
            .map(|submission| self.evaluate(submission))
            .collect()
    }

    /// 獲取判定配置
    pub fn config(&self) -> &AcceptanceConfig {
        &self.config
    }

    /// 獲取批量分類器
    pub fn classifier(&self) -> &LotClassifier<R> {
        &self.classifier
    }

    /// 檢查合格特性是否帶有不良數
    fn check_outcomes(&self, outcomes: &[TestOutcome]) -> aql_core::Result<()> {
        let inconsistent = DefectAggregator::inconsistent_outcomes(outcomes);
        if inconsistent.is_empty() {
            return Ok(());
        }

        if self.config.reject_inconsistent_outcomes {
            return Err(AqlError::InvalidArgument(format!(
                "合格檢驗項目不可帶有不良數: {}",
                inconsistent
                    .iter()
                    .map(|o| o.test_id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        for outcome in inconsistent {
            tracing::warn!(
                "檢驗項目 {} 已合格但記錄了 {} 個不良，不計入總數",
                outcome.test_id,
                outcome.defective_unit_count
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{aql, FakeRepository};
    use proptest::prelude::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn failed(count: u32) -> TestOutcome {
        TestOutcome::failed(Uuid::new_v4(), count)
    }

    fn passed() -> TestOutcome {
        TestOutcome::passed(Uuid::new_v4())
    }

    fn engine() -> AcceptanceEngine<FakeRepository> {
        AcceptanceEngine::with_default_config(FakeRepository::single_plan())
    }

    #[test]
    fn test_defects_at_limit_approved() {
        let outcomes = vec![failed(1), passed(), failed(1)];
        let result = engine().decide(500, "S1", &aql("1,5"), &outcomes).unwrap();

        assert_eq!(result.total_lot_size, 500);
        assert_eq!(result.total_defective_units, 2);
        assert_eq!(result.sample_size(), Some(32));
        assert_eq!(result.final_status, AcceptanceStatus::Approved);
        assert_eq!(result.basis, DecisionBasis::SamplingPlan);
    }

    #[test]
    fn test_defects_over_limit_rejected() {
        let outcomes = vec![failed(2), passed(), failed(1)];
        let result = engine().decide(500, "S1", &aql("1,5"), &outcomes).unwrap();

        assert_eq!(result.total_defective_units, 3);
        assert_eq!(result.final_status, AcceptanceStatus::Rejected);
        assert!(!result.is_fallback());
    }

    #[test]
    fn test_failures_within_plan_still_approved() {
        // 有計劃時不適用「任一不合格即拒收」
        let outcomes = vec![failed(1)];
        let result = engine().decide(500, "S1", &aql("1,5"), &outcomes).unwrap();
        assert!(result.is_approved());
    }

    #[test]
    fn test_fallback_rejects_any_failure() {
        let outcomes = vec![passed(), failed(1), passed()];
        let result = engine().decide(10_000, "S1", &aql("1,5"), &outcomes).unwrap();

        assert!(result.resolved_plan.is_none());
        assert!(result.is_fallback());
        assert_eq!(result.final_status, AcceptanceStatus::Rejected);
    }

    #[test]
    fn test_fallback_approves_all_passed() {
        let outcomes = vec![passed(), passed()];
        let result = engine().decide(10_000, "S1", &aql("1,5"), &outcomes).unwrap();

        assert_eq!(result.final_status, AcceptanceStatus::Approved);
        assert_eq!(result.basis, DecisionBasis::AnyFailureFallback);
    }

    #[test]
    fn test_fallback_rejects_failure_with_zero_count() {
        let result = engine()
            .decide(10_000, "S1", &aql("1,5"), &[failed(0)])
            .unwrap();
        assert_eq!(result.final_status, AcceptanceStatus::Rejected);
    }

    #[test]
    fn test_empty_outcomes_approved() {
        let result = engine().decide(500, "S1", &aql("1,5"), &[]).unwrap();
        assert!(result.is_approved());
        assert_eq!(result.total_defective_units, 0);
    }

    #[test]
    fn test_repository_failure_not_treated_as_fallback() {
        let engine = AcceptanceEngine::with_default_config(FakeRepository::unavailable());
        let result = engine.decide(500, "S1", &aql("1,5"), &[passed()]);
        assert!(matches!(result, Err(AqlError::RepositoryUnavailable(_))));
    }

    #[test]
    fn test_inconsistent_outcome_ignored_by_default() {
        let outcomes = vec![
            TestOutcome::new(Uuid::new_v4(), true, 10),
            failed(2),
            TestOutcome::new(Uuid::new_v4(), true, 5),
            failed(1),
        ];
        let result = engine().decide(500, "S1", &aql("1,5"), &outcomes).unwrap();

        assert_eq!(result.total_defective_units, 3);
        assert_eq!(result.final_status, AcceptanceStatus::Rejected);
    }

    #[test]
    fn test_inconsistent_outcome_rejected_in_strict_mode() {
        let repo = FakeRepository::single_plan();
        let config = AcceptanceConfig::new().with_reject_inconsistent_outcomes(true);
        let engine = AcceptanceEngine::new(&repo, config);

        let outcomes = vec![TestOutcome::new(Uuid::new_v4(), true, 1)];
        assert!(matches!(
            engine.decide(500, "S1", &aql("1,5"), &outcomes),
            Err(AqlError::InvalidArgument(_))
        ));
        // 輸入錯誤時不查詢資料來源
        assert_eq!(repo.group_queries(), 0);
    }

    #[test]
    fn test_evaluate_uses_defaults() {
        let repo = FakeRepository::single_plan();
        let engine = AcceptanceEngine::with_default_config(&repo);
        let submission = OrderSubmission::new(100, 5).with_outcomes(vec![failed(2)]);

        let result = engine.evaluate(&submission).unwrap();
        assert_eq!(result.total_lot_size, 500);
        assert_eq!(result.resolved_plan.as_ref().map(|p| p.code.as_str()), Some("G"));
        assert!(result.is_approved());
    }

    #[test]
    fn test_evaluate_with_explicit_level_and_aql() {
        let submission = OrderSubmission::new(100, 5)
            .with_inspection_level("S1")
            .with_desired_aql("0,65")
            .with_outcomes(vec![failed(1)]);

        // G / 0,65 不存在，走備援
        let result = engine().evaluate(&submission).unwrap();
        assert!(result.is_fallback());
        assert_eq!(result.final_status, AcceptanceStatus::Rejected);
    }

    #[rstest]
    #[case(OrderSubmission::new(0, 5))]
    #[case(OrderSubmission::new(100, 5).with_desired_aql("abc"))]
    #[case(OrderSubmission::new(100, 5).with_inspection_level(""))]
    fn test_evaluate_invalid_submission(#[case] submission: OrderSubmission) {
        assert!(matches!(
            engine().evaluate(&submission),
            Err(AqlError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_evaluate_batch_preserves_order() {
        let engine = engine();
        let submissions = vec![
            OrderSubmission::new(100, 5).with_outcomes(vec![failed(3)]),
            OrderSubmission::new(0, 5),
            OrderSubmission::new(100, 5).with_outcomes(vec![failed(2)]),
            OrderSubmission::new(1_000, 100).with_outcomes(vec![passed()]),
        ];

        let results = engine.evaluate_batch(&submissions);
        assert_eq!(results.len(), 4);
        assert_eq!(
            results[0].as_ref().unwrap().final_status,
            AcceptanceStatus::Rejected
        );
        assert!(results[1].is_err());
        assert_eq!(
            results[2].as_ref().unwrap().final_status,
            AcceptanceStatus::Approved
        );
        assert!(results[3].as_ref().unwrap().is_fallback());
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(5)]
    #[case(40)]
    fn test_boundary_inclusive(#[case] limit: u32) {
        let mut repo = FakeRepository::single_plan();
        repo.plans = vec![aql_core::SamplingPlan::new("G", aql("1,5"), 32, limit)];
        let engine = AcceptanceEngine::with_default_config(repo);

        let at_limit = engine.decide(500, "S1", &aql("1,5"), &[failed(limit)]).unwrap();
        let over_limit = engine
            .decide(500, "S1", &aql("1,5"), &[failed(limit), failed(1)])
            .unwrap();

        assert_eq!(at_limit.final_status, AcceptanceStatus::Approved);
        assert_eq!(over_limit.final_status, AcceptanceStatus::Rejected);
    }

    proptest! {
        #[test]
        fn prop_fallback_is_any_failure(approvals in prop::collection::vec(any::<bool>(), 0..20)) {
            let outcomes: Vec<TestOutcome> = approvals
                .iter()
                .map(|&approved| if approved { passed() } else { failed(1) })
                .collect();

            let result = engine().decide(10_000, "S1", &aql("1,5"), &outcomes).unwrap();
            let expected = if approvals.iter().any(|a| !a) {
                AcceptanceStatus::Rejected
            } else {
                AcceptanceStatus::Approved
            };
            prop_assert_eq!(result.final_status, expected);
        }

        #[test]
        fn prop_decide_is_idempotent(
            lot_size in 1u64..1_000,
            raw in prop::collection::vec((any::<bool>(), 0u32..5), 0..10)
        ) {
            let outcomes: Vec<TestOutcome> = raw
                .iter()
                .map(|&(approved, count)| TestOutcome::new(Uuid::new_v4(), approved, count))
                .collect();

            let engine = engine();
            let first = engine.decide(lot_size, "S1", &aql("1,5"), &outcomes).unwrap();
            let second = engine.decide(lot_size, "S1", &aql("1,5"), &outcomes).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_plan_threshold(total in 0u32..10) {
            let result = engine().decide(500, "S1", &aql("1,5"), &[failed(total)]).unwrap();
            prop_assert_eq!(result.is_approved(), total <= 2);
        }
    }
}
