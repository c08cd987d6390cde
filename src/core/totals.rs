use crate::domain::model::{ReconRecord, TOTALS_LABEL};

/// 將所有記錄逐欄加總成一筆總計列。
///
/// 空序列回傳全為零的總計列；`retention_flag` 固定為 0。
pub fn reduce(records: &[ReconRecord]) -> ReconRecord {
    let mut totals = ReconRecord {
        order_id: TOTALS_LABEL.to_string(),
        ..ReconRecord::default()
    };

    for record in records {
        totals.invoice_total += record.invoice_total;
        totals.commission += record.commission;
        totals.shipping_fee += record.shipping_fee;
        totals.return_shipping_fee += record.return_shipping_fee;
        totals.total += record.total;
        totals.retained_amount += record.retained_amount;
        totals.net_total += record.net_total;
    }

    totals
}
