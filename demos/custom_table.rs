//! 自訂抽樣表示例：從 JSON 載入抽樣表與訂單並批次判定

use aql::{AcceptanceEngine, OrderSubmission, PlanTable};

const TABLE_JSON: &str = r#"{
    "groups": [
        {"lot_size_from": 2, "lot_size_to": 280, "inspection_level": "S1",
         "inspection_type": "Normal", "sampling_plan_code": "F"},
        {"lot_size_from": 281, "lot_size_to": 500, "inspection_level": "S1",
         "inspection_type": "Normal", "sampling_plan_code": "G"}
    ],
    "plans": [
        {"code": "F", "aql": "1,5", "sample_size": 20, "max_allowed_defects": 1},
        {"code": "G", "aql": "1,5", "sample_size": 32, "max_allowed_defects": 2}
    ]
}"#;

const ORDERS_JSON: &str = r#"[
    {"units_per_package": 100, "package_count": 5, "outcomes": [
        {"test_id": "a1b2c3d4-0000-4000-8000-000000000001", "approved": false, "defective_unit_count": 2}
    ]},
    {"units_per_package": 100, "package_count": 5, "outcomes": [
        {"test_id": "a1b2c3d4-0000-4000-8000-000000000002", "approved": false, "defective_unit_count": 3}
    ]},
    {"units_per_package": 1000, "package_count": 50, "outcomes": [
        {"test_id": "a1b2c3d4-0000-4000-8000-000000000003", "approved": true}
    ]}
]"#;

fn main() -> anyhow::Result<()> {
    aql::init_tracing();

    let repository = PlanTable::from_json_str(TABLE_JSON)?.into_repository()?;
    for level in repository.inspection_levels() {
        println!("檢驗水準 {} 未涵蓋區間: {:?}", level, repository.coverage_gaps(level));
    }

    let submissions: Vec<OrderSubmission> = serde_json::from_str(ORDERS_JSON)?;
    let engine = AcceptanceEngine::with_default_config(&repository);

    for (index, result) in engine.evaluate_batch(&submissions).into_iter().enumerate() {
        let result = result?;
        println!(
            "訂單 {}: 批量 {}，不良 {}，{:?} → {}",
            index + 1,
            result.total_lot_size,
            result.total_defective_units,
            result.basis,
            result.final_status.order_status_label()
        );
    }

    Ok(())
}
