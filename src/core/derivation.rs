use crate::domain::model::ReconRecord;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLATFORM_KEYWORD: &str = "miravia";
pub const DEFAULT_RETENTION_RATE: f64 = 0.01;

/// 哪些平台要扣留款項，以及扣留比例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    pub platform_keyword: String,
    pub rate: f64,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            platform_keyword: DEFAULT_PLATFORM_KEYWORD.to_string(),
            rate: DEFAULT_RETENTION_RATE,
        }
    }
}

impl RetentionPolicy {
    /// 平台名稱（小寫、去空白）包含關鍵字即適用
    pub fn applies_to(&self, selling_platform: &str) -> bool {
        selling_platform
            .trim()
            .to_lowercase()
            .contains(&self.platform_keyword.trim().to_lowercase())
    }
}

/// 計算 total / retention / net，不做任何四捨五入
pub fn derive(record: &mut ReconRecord, policy: &RetentionPolicy) {
    record.total = record.invoice_total + record.commission + record.shipping_fee;

    if policy.applies_to(&record.selling_platform) {
        record.retention_flag = 1;
        record.retained_amount = record.total * policy.rate;
    } else {
        record.retention_flag = 0;
        record.retained_amount = 0.0;
    }

    record.net_total = record.total - record.retained_amount;
}

pub fn derive_all(records: &mut [ReconRecord], policy: &RetentionPolicy) {
    for record in records.iter_mut() {
        derive(record, policy);
    }
}
