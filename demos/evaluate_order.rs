//! 訂單允收判定示例（ISO 2859-1 內建表）

use aql::{AcceptanceConfig, AcceptanceEngine, OrderSubmission, TestOutcome};
use uuid::Uuid;

fn main() -> anyhow::Result<()> {
    aql::init_tracing();

    println!("=== 訂單允收判定示例 ===\n");

    let repository = aql::iso2859_normal()?;
    let config = AcceptanceConfig::new().with_default_inspection_level("II");
    let engine = AcceptanceEngine::new(&repository, config);

    // 100 單位 × 5 包裝 = 批量 500
    let submission = OrderSubmission::new(100, 5).with_outcomes(vec![
        TestOutcome::passed(Uuid::new_v4()),
        TestOutcome::failed(Uuid::new_v4(), 1),
        TestOutcome::failed(Uuid::new_v4(), 1),
    ]);

    let result = engine.evaluate(&submission)?;

    println!("批量: {}", result.total_lot_size);
    println!("不良數: {}", result.total_defective_units);
    match &result.resolved_plan {
        Some(plan) => println!(
            "抽樣計劃: 代字 {}，AQL {}，樣本數 {}，允收數 {}",
            plan.code, plan.aql, plan.sample_size, plan.max_allowed_defects
        ),
        None => println!("抽樣計劃: 無（任一不合格即拒收）"),
    }
    println!(
        "結果: {} ({})",
        result.final_status,
        result.final_status.order_status_label()
    );

    tracing::info!("示例完成");
    Ok(())
}
