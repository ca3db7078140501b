//! AQL 數值

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::AqlError;

/// 允收品質水準（百分比）
///
/// 資料表中以字串保存，小數點可能是逗號（`"1,5"`）或句點（`"1.5"`）。
/// 比較時以數值為準，因此 `"1,5"`、`"1.5"`、`"1.50"` 視為相同。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AqlValue(Decimal);

impl AqlValue {
    /// 從 Decimal 建立，必須大於零
    pub fn new(value: Decimal) -> crate::Result<Self> {
        if value <= Decimal::ZERO {
            return Err(AqlError::InvalidArgument(format!(
                "AQL 必須大於零: {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// 取得數值
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for AqlValue {
    /// 與 `DEFAULT_AQL` 相同：1,5
    fn default() -> Self {
        Self(Decimal::new(15, 1))
    }
}

impl FromStr for AqlValue {
    type Err = AqlError;

    fn from_str(s: &str) -> crate::Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AqlError::InvalidArgument("AQL 不可為空".to_string()));
        }

        if !is_well_formed(trimmed) {
            return Err(AqlError::InvalidArgument(format!("無法解析 AQL: {}", s)));
        }

        let normalized = trimmed.replace(',', ".");
        let value = Decimal::from_str(&normalized)
            .map_err(|_| AqlError::InvalidArgument(format!("無法解析 AQL: {}", s)))?;

        Self::new(value)
    }
}

/// 只允許可選正負號、數字與至多一個 `,` 或 `.`
///
/// `Decimal::from_str` 會略過 `_`，必須先擋下。
fn is_well_formed(raw: &str) -> bool {
    let digits = raw.strip_prefix(&['+', '-'][..]).unwrap_or(raw);
    let separators = digits.chars().filter(|c| matches!(c, ',' | '.')).count();

    separators <= 1
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ',' | '.'))
}

impl TryFrom<&str> for AqlValue {
    type Error = AqlError;

    fn try_from(s: &str) -> crate::Result<Self> {
        s.parse()
    }
}

impl fmt::Display for AqlValue {
    // 輸出與資料表一致的逗號格式
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.normalize().to_string();
        f.write_str(&text.replace('.', ","))
    }
}

impl Serialize for AqlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AqlValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
