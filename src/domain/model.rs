use serde::{Deserialize, Serialize};

/// 總計列的訂單欄位標籤
pub const TOTALS_LABEL: &str = "TOTAL BANCO";

/// 解析後的表格：表頭與資料列
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// 空表頭即代表無效檔案
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// 依 (Order Item ID, Transaction Type) 彙總後的一筆對帳記錄。
///
/// 總計列使用同樣的結構，`order_id` 固定為 [`TOTALS_LABEL`]。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconRecord {
    pub order_item_id: String,
    pub transaction_type: String,
    pub order_id: String,
    pub payout_date: String,
    pub selling_platform: String,
    pub invoice_total: f64,
    pub commission: f64,
    pub shipping_fee: f64,
    /// 目前沒有任何費用名稱會累加到這欄，但輸出格式需要保留
    pub return_shipping_fee: f64,
    pub total: f64,
    pub retention_flag: u8,
    pub retained_amount: f64,
    pub net_total: f64,
}

/// 非致命問題：仍會產出報表，但需要提醒使用者
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReconWarning {
    MissingColumns { columns: Vec<String> },
    SkippedRows { count: usize },
}

impl std::fmt::Display for ReconWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconWarning::MissingColumns { columns } => {
                write!(f, "Missing required columns: {}", columns.join(", "))
            }
            ReconWarning::SkippedRows { count } => {
                write!(f, "Skipped {} rows with fewer cells than the header", count)
            }
        }
    }
}

/// 讀入的原始檔案
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

/// 一次對帳流程的完整結果
#[derive(Debug, Clone)]
pub struct ReconReport {
    pub source_name: String,
    pub preview: Dataset,
    pub records: Vec<ReconRecord>,
    pub totals: ReconRecord,
    pub warnings: Vec<ReconWarning>,
    pub csv_output: String,
}

/// 壓縮包內的 summary.json
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary<'a> {
    pub source_name: &'a str,
    pub generated_at: String,
    pub record_count: usize,
    pub totals: &'a ReconRecord,
    pub warnings: &'a [ReconWarning],
}
