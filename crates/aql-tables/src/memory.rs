//! 記憶體抽樣表

use std::collections::HashMap;

use aql_core::{AqlError, AqlValue, SamplingPlan, SamplingPlanGroup, SamplingPlanRepository};

/// 記憶體抽樣表
///
/// 建立時檢查資料完整性：同一檢驗水準的批量區間不可重疊，
/// 同一 (代字, AQL) 不可重複。
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlanRepository {
    /// 依 (檢驗水準, 批量下限) 排序
    groups: Vec<SamplingPlanGroup>,

    /// (代字, AQL) → 抽樣計劃
    plans: HashMap<(String, AqlValue), SamplingPlan>,
}

impl InMemoryPlanRepository {
    /// 建立並檢查抽樣表
    pub fn new(
        mut groups: Vec<SamplingPlanGroup>,
        plans: Vec<SamplingPlan>,
    ) -> aql_core::Result<Self> {
        for group in &groups {
            Self::validate_group(group)?;
        }

        groups.sort_by(|a, b| {
            a.inspection_level
                .cmp(&b.inspection_level)
                .then(a.lot_size_from.cmp(&b.lot_size_from))
        });

        // 依下限排序後，若有重疊必定出現在相鄰兩筆
        for pair in groups.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.inspection_level == next.inspection_level && prev.overlaps(next) {
                return Err(AqlError::DataIntegrity(format!(
                    "檢驗水準 {} 批量區間重疊: [{}, {}] 與 [{}, {}]",
                    prev.inspection_level,
                    prev.lot_size_from,
                    format_upper(prev.lot_size_to),
                    next.lot_size_from,
                    format_upper(next.lot_size_to)
                )));
            }
        }

        let mut plan_map = HashMap::with_capacity(plans.len());
        for plan in plans {
            if plan.code.trim().is_empty() {
                return Err(AqlError::DataIntegrity("抽樣計劃代字不可為空".to_string()));
            }
            if plan.sample_size == 0 {
                return Err(AqlError::DataIntegrity(format!(
                    "代字 {} AQL {} 樣本數為 0",
                    plan.code, plan.aql
                )));
            }

            let key = (plan.code.clone(), plan.aql);
            if plan_map.contains_key(&key) {
                return Err(AqlError::DataIntegrity(format!(
                    "抽樣計劃重複: 代字 {} AQL {}",
                    plan.code, plan.aql
                )));
            }
            plan_map.insert(key, plan);
        }

        tracing::debug!(
            "抽樣表載入完成：分組 {} 筆，抽樣計劃 {} 筆",
            groups.len(),
            plan_map.len()
        );

        Ok(Self {
            groups,
            plans: plan_map,
        })
    }

    /// 所有分組
    pub fn groups(&self) -> &[SamplingPlanGroup] {
        &self.groups
    }

    /// 所有抽樣計劃（無固定順序）
    pub fn plans(&self) -> impl Iterator<Item = &SamplingPlan> {
        self.plans.values()
    }

    /// 抽樣計劃筆數
    pub fn plan_count(&self) -> usize {
        self.plans.len()
    }

    /// 表中出現的檢驗水準
    pub fn inspection_levels(&self) -> Vec<&str> {
        let mut levels: Vec<&str> = self
            .groups
            .iter()
            .map(|g| g.inspection_level.as_str())
            .collect();
        levels.dedup();
        levels
    }

    /// 找出檢驗水準未涵蓋的批量區間（從 1 開始）
    ///
    /// 回傳 (下限, 上限)，上限為 None 表示之後全部未涵蓋。
    pub fn coverage_gaps(&self, inspection_level: &str) -> Vec<(u64, Option<u64>)> {
        let mut gaps = Vec::new();
        let mut cursor = 1u64;

        for group in self
            .groups
            .iter()
            .filter(|g| g.inspection_level == inspection_level)
        {
            if group.lot_size_from > cursor {
                gaps.push((cursor, Some(group.lot_size_from - 1)));
            }
            match group.lot_size_to {
                Some(to) if to < u64::MAX => cursor = to + 1,
                _ => return gaps,
            }
        }

        gaps.push((cursor, None));
        gaps
    }

    fn validate_group(group: &SamplingPlanGroup) -> aql_core::Result<()> {
        if group.inspection_level.trim().is_empty() {
            return Err(AqlError::DataIntegrity("分組檢驗水準不可為空".to_string()));
        }
        if group.sampling_plan_code.trim().is_empty() {
            return Err(AqlError::DataIntegrity(format!(
                "檢驗水準 {} 批量 {} 起的分組缺少代字",
                group.inspection_level, group.lot_size_from
            )));
        }
        if group.lot_size_from == 0 {
            return Err(AqlError::DataIntegrity(format!(
                "檢驗水準 {} 分組批量下限必須至少為 1",
                group.inspection_level
            )));
        }
        if let Some(to) = group.lot_size_to {
            if to < group.lot_size_from {
                return Err(AqlError::DataIntegrity(format!(
                    "檢驗水準 {} 分組上限 {} 小於下限 {}",
                    group.inspection_level, to, group.lot_size_from
                )));
            }
        }
        Ok(())
    }
}

impl SamplingPlanRepository for InMemoryPlanRepository {
    fn find_group_by_lot_size_and_level(
        &self,
        lot_size: u64,
        inspection_level: &str,
    ) -> aql_core::Result<Option<SamplingPlanGroup>> {
        let mut matches = self
            .groups
            .iter()
            .filter(|g| g.inspection_level == inspection_level && g.contains(lot_size));

        let first = matches.next();
        if matches.next().is_some() {
            return Err(AqlError::DataIntegrity(format!(
                "檢驗水準 {} 批量 {} 符合多個分組",
                inspection_level, lot_size
            )));
        }

        Ok(first.cloned())
    }

    fn find_plan_by_code_and_aql(
        &self,
        code: &str,
        aql: &AqlValue,
    ) -> aql_core::Result<Option<SamplingPlan>> {
        Ok(self.plans.get(&(code.to_string(), *aql)).cloned())
    }
}

fn format_upper(upper: Option<u64>) -> String {
    upper.map_or_else(|| "∞".to_string(), |to| to.to_string())
}
