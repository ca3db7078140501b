//! 允收判定配置

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{AqlError, AqlValue, DEFAULT_INSPECTION_LEVEL};

/// 允收判定配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptanceConfig {
    /// 未指定時使用的檢驗水準
    pub default_inspection_level: String,

    /// 未指定時使用的 AQL
    pub default_aql: AqlValue,

    /// 合格特性帶有不良數時是否直接拒絕輸入
    /// - false: 忽略該數量並記錄警告（預設）
    /// - true: 回傳 InvalidArgument
    pub reject_inconsistent_outcomes: bool,
}

impl AcceptanceConfig {
    /// 創建預設配置（S1、AQL 1,5）
    pub fn new() -> Self {
        Self {
            default_inspection_level: DEFAULT_INSPECTION_LEVEL.to_string(),
            default_aql: AqlValue::default(),
            reject_inconsistent_outcomes: false,
        }
    }

    /// 建構器模式：設置預設檢驗水準
    pub fn with_default_inspection_level(mut self, level: impl Into<String>) -> Self {
        self.default_inspection_level = level.into();
        self
    }

    /// 建構器模式：設置預設 AQL
    pub fn with_default_aql(mut self, aql: AqlValue) -> Self {
        self.default_aql = aql;
        self
    }

    /// 建構器模式：設置嚴格模式
    pub fn with_reject_inconsistent_outcomes(mut self, reject: bool) -> Self {
        self.reject_inconsistent_outcomes = reject;
        self
    }

    /// 從 JSON 字串載入，缺少的欄位使用預設值
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AqlError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 從 JSON 檔案載入
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AqlError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    /// 檢查配置
    pub fn validate(&self) -> crate::Result<()> {
        if self.default_inspection_level.trim().is_empty() {
            return Err(AqlError::Config("預設檢驗水準不可為空".to_string()));
        }
        Ok(())
    }

    /// 決定使用的檢驗水準
    pub fn inspection_level_or_default<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.default_inspection_level)
    }

    /// 決定使用的 AQL，指定值無法解析時回傳錯誤
    pub fn aql_or_default(&self, requested: Option<&str>) -> crate::Result<AqlValue> {
        match requested {
            Some(raw) => raw.parse(),
            None => Ok(self.default_aql),
        }
    }
}

impl Default for AcceptanceConfig {
    fn default() -> Self {
        Self::new()
    }
}
