//! ISO 2859-1 正常檢驗單次抽樣表
//!
//! - 表 1：批量區間 × 檢驗水準 → 樣本代字
//! - 表 2-A：樣本代字 × AQL → 樣本數、允收數
//!
//! 表 2-A 中的箭頭格依箭頭方向改用第一個有允收數的計劃，
//! 因此查到的樣本數可能與代字本身的樣本數不同。箭頭超出表格的格不建立計劃。

use aql_core::{AqlValue, SamplingPlan, SamplingPlanGroup};

use crate::InMemoryPlanRepository;

/// 檢驗類型
pub const NORMAL_INSPECTION: &str = "Normal";

/// 檢驗水準（特殊 S1–S4、一般 I–III）
pub const INSPECTION_LEVELS: [&str; 7] = ["S1", "S2", "S3", "S4", "I", "II", "III"];

/// 樣本代字與樣本數
const CODE_LETTERS: [(&str, u32); 16] = [
    ("A", 2),
    ("B", 3),
    ("C", 5),
    ("D", 8),
    ("E", 13),
    ("F", 20),
    ("G", 32),
    ("H", 50),
    ("J", 80),
    ("K", 125),
    ("L", 200),
    ("M", 315),
    ("N", 500),
    ("P", 800),
    ("Q", 1250),
    ("R", 2000),
];

/// 表 1：每列依 INSPECTION_LEVELS 順序列出代字
const LOT_SIZE_TABLE: [(u64, Option<u64>, [&str; 7]); 15] = [
    (2, Some(8), ["A", "A", "A", "A", "A", "A", "B"]),
    (9, Some(15), ["A", "A", "A", "A", "A", "B", "C"]),
    (16, Some(25), ["A", "A", "B", "B", "B", "C", "D"]),
    (26, Some(50), ["A", "B", "B", "C", "C", "D", "E"]),
    (51, Some(90), ["B", "B", "C", "C", "C", "E", "F"]),
    (91, Some(150), ["B", "B", "C", "D", "D", "F", "G"]),
    (151, Some(280), ["B", "C", "D", "E", "E", "G", "H"]),
    (281, Some(500), ["B", "C", "D", "E", "F", "H", "J"]),
    (501, Some(1200), ["C", "C", "E", "F", "G", "J", "K"]),
    (1201, Some(3200), ["C", "D", "E", "G", "H", "K", "L"]),
    (3201, Some(10000), ["C", "D", "F", "G", "J", "L", "M"]),
    (10001, Some(35000), ["C", "D", "F", "H", "K", "M", "N"]),
    (35001, Some(150000), ["D", "E", "G", "J", "L", "N", "P"]),
    (150001, Some(500000), ["D", "E", "G", "J", "M", "P", "Q"]),
    (500001, None, ["D", "E", "H", "K", "N", "Q", "R"]),
];

/// 表 2-A 的 AQL 欄
pub const AQL_COLUMNS: [&str; 16] = [
    "0,010", "0,015", "0,025", "0,040", "0,065", "0,10", "0,15", "0,25", "0,40", "0,65", "1,0",
    "1,5", "2,5", "4,0", "6,5", "10",
];

/// 允收數序列（1/2 之後）
const ACCEPTANCE_NUMBERS: [u32; 8] = [1, 2, 3, 5, 7, 10, 14, 21];

/// 代字列 + AQL 欄 = 此值 時為 0/1 計劃
const ZERO_ONE_DIAGONAL: usize = 14;

/// 表 2-A 的一格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    /// 允收數
    Plan(u32),
    /// 改用下方第一個計劃
    Down,
    /// 改用上方第一個計劃
    Up,
}

/// 表 2-A 的格內容
///
/// 每列沿 AQL 方向的排列固定為：↓ … 0/1 ↑ ↓ 1/2 2/3 3/4 5/6 7/8 10/11 14/15 21/22 ↑ …
fn cell(row: usize, column: usize) -> Cell {
    let offset = (row + column) as i64 - ZERO_ONE_DIAGONAL as i64;
    match offset {
        o if o < 0 => Cell::Down,
        0 => Cell::Plan(0),
        1 => Cell::Up,
        2 => Cell::Down,
        3..=10 => Cell::Plan(ACCEPTANCE_NUMBERS[(offset - 3) as usize]),
        _ => Cell::Up,
    }
}

/// 依箭頭找到實際使用的 (代字列, 允收數)
fn resolve_cell(mut row: usize, column: usize) -> Option<(usize, u32)> {
    loop {
        match cell(row, column) {
            Cell::Plan(ac) => return Some((row, ac)),
            Cell::Down if row + 1 < CODE_LETTERS.len() => row += 1,
            Cell::Up if row > 0 => row -= 1,
            _ => return None,
        }
    }
}

/// 表 1 分組
pub fn iso2859_groups() -> Vec<SamplingPlanGroup> {
    let mut groups = Vec::with_capacity(LOT_SIZE_TABLE.len() * INSPECTION_LEVELS.len());
    for (from, to, letters) in LOT_SIZE_TABLE {
        for (level, letter) in INSPECTION_LEVELS.iter().zip(letters) {
            groups.push(
                SamplingPlanGroup::new(from, to, *level, letter)
                    .with_inspection_type(NORMAL_INSPECTION),
            );
        }
    }
    groups
}

/// 表 2-A 抽樣計劃
pub fn iso2859_normal_plans() -> aql_core::Result<Vec<SamplingPlan>> {
    let mut plans = Vec::new();
    for (column, raw_aql) in AQL_COLUMNS.iter().enumerate() {
        let aql: AqlValue = raw_aql.parse()?;
        for (row, (letter, _)) in CODE_LETTERS.iter().enumerate() {
            if let Some((target, ac)) = resolve_cell(row, column) {
                plans.push(SamplingPlan::new(*letter, aql, CODE_LETTERS[target].1, ac));
            }
        }
    }
    Ok(plans)
}

/// ISO 2859-1 正常檢驗抽樣表
pub fn iso2859_normal() -> aql_core::Result<InMemoryPlanRepository> {
    InMemoryPlanRepository::new(iso2859_groups(), iso2859_normal_plans()?)
}
