//! Group payout transaction lines by order item and sum fee categories.
//!
//! ```text
//! Order Item ID  Transaction Type  Fee Name           Amount      A1|Sale
//! A1             Sale              Item Price Credit  100     →   invoice_total  100
//! A1             Sale              Commission         -10         commission     -10
//! ```

use crate::domain::model::{Dataset, ReconRecord, ReconWarning};
use std::collections::HashMap;

pub const COL_ORDER_ITEM_ID: &str = "Order Item ID";
pub const COL_TRANSACTION_TYPE: &str = "Transaction Type";
pub const COL_ORDER_ID: &str = "Order ID";
pub const COL_PAYOUT_DATE: &str = "Payout / Refund Date";
pub const COL_SELLING_PLATFORM: &str = "Selling platform";
pub const COL_AMOUNT: &str = "Amount";
pub const COL_FEE_NAME: &str = "Fee Name";

const KEY_SEPARATOR: &str = "|";

/// Which running sum a fee line feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeCategory {
    InvoiceTotal,
    Commission,
    ShippingFee,
}

impl FeeCategory {
    /// Exact match on the trimmed fee name. Unknown names feed nothing.
    pub fn from_fee_name(fee_name: &str) -> Option<Self> {
        match fee_name.trim() {
            "Item Price Credit" | "Reversal Item Price" | "Reversal Item Price Subsidy" => {
                Some(FeeCategory::InvoiceTotal)
            }
            "Commission" | "Reversal Commission" => Some(FeeCategory::Commission),
            "Shipping Fee Paid by Seller" => Some(FeeCategory::ShippingFee),
            _ => None,
        }
    }
}

/// Resolved header positions.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    order_item_id: usize,
    transaction_type: usize,
    amount: usize,
    fee_name: usize,
    order_id: Option<usize>,
    payout_date: Option<usize>,
    selling_platform: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &[String]) -> Result<Self, Vec<String>> {
        let order_item_id = find_column(headers, COL_ORDER_ITEM_ID);
        let transaction_type = find_column(headers, COL_TRANSACTION_TYPE);
        let amount = find_column(headers, COL_AMOUNT);
        let fee_name = find_column(headers, COL_FEE_NAME);

        match (order_item_id, transaction_type, amount, fee_name) {
            (Some(order_item_id), Some(transaction_type), Some(amount), Some(fee_name)) => {
                Ok(Self {
                    order_item_id,
                    transaction_type,
                    amount,
                    fee_name,
                    order_id: find_column(headers, COL_ORDER_ID),
                    payout_date: find_column(headers, COL_PAYOUT_DATE),
                    selling_platform: find_column(headers, COL_SELLING_PLATFORM),
                })
            }
            _ => {
                let missing = [
                    (COL_ORDER_ITEM_ID, order_item_id),
                    (COL_TRANSACTION_TYPE, transaction_type),
                    (COL_AMOUNT, amount),
                    (COL_FEE_NAME, fee_name),
                ]
                .into_iter()
                .filter(|(_, position)| position.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
                Err(missing)
            }
        }
    }
}

/// Case-insensitive, trimmed header lookup. First match wins.
pub fn find_column(headers: &[String], name: &str) -> Option<usize> {
    let wanted = name.trim().to_lowercase();
    headers
        .iter()
        .position(|header| header.trim().to_lowercase() == wanted)
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Records in first-seen key order, sums filled, derived fields zeroed.
    pub records: Vec<ReconRecord>,
    pub warnings: Vec<ReconWarning>,
}

/// Group every data row of `dataset` by `(order item id, transaction type)`.
///
/// Missing required columns produce an empty aggregation with a
/// [`ReconWarning::MissingColumns`]; rows shorter than the header are skipped.
pub fn aggregate(dataset: &Dataset) -> Aggregation {
    let columns = match ColumnMap::resolve(&dataset.headers) {
        Ok(columns) => columns,
        Err(missing) => {
            tracing::warn!("⚠️ Missing required columns: {}", missing.join(", "));
            return Aggregation {
                records: Vec::new(),
                warnings: vec![ReconWarning::MissingColumns { columns: missing }],
            };
        }
    };
    tracing::debug!("Resolved columns: {:?}", columns);

    let header_len = dataset.headers.len();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut records: Vec<ReconRecord> = Vec::new();
    let mut skipped = 0usize;

    for row in &dataset.rows {
        if row.len() < header_len {
            skipped += 1;
            continue;
        }

        let order_item_id = row[columns.order_item_id].as_str();
        let transaction_type = row[columns.transaction_type].as_str();
        let key = format!("{}{}{}", order_item_id, KEY_SEPARATOR, transaction_type);

        let position = *index.entry(key).or_insert_with(|| {
            records.push(seed_record(row, &columns));
            records.len() - 1
        });
        let record = &mut records[position];

        let amount = parse_amount(&row[columns.amount]);
        match FeeCategory::from_fee_name(&row[columns.fee_name]) {
            Some(FeeCategory::InvoiceTotal) => record.invoice_total += amount,
            Some(FeeCategory::Commission) => record.commission += amount,
            Some(FeeCategory::ShippingFee) => record.shipping_fee += amount,
            None => {}
        }
    }

    let mut warnings = Vec::new();
    if skipped > 0 {
        tracing::warn!("⚠️ Skipped {} malformed rows", skipped);
        warnings.push(ReconWarning::SkippedRows { count: skipped });
    }

    tracing::debug!(
        "Aggregated {} rows into {} records",
        dataset.rows.len() - skipped,
        records.len()
    );
    Aggregation { records, warnings }
}

fn seed_record(row: &[String], columns: &ColumnMap) -> ReconRecord {
    let optional = |position: Option<usize>| {
        position
            .and_then(|p| row.get(p))
            .cloned()
            .unwrap_or_default()
    };

    ReconRecord {
        order_item_id: row[columns.order_item_id].clone(),
        transaction_type: row[columns.transaction_type].clone(),
        order_id: optional(columns.order_id),
        payout_date: optional(columns.payout_date),
        selling_platform: optional(columns.selling_platform),
        ..ReconRecord::default()
    }
}

/// Reads the longest leading number of the trimmed cell, so `12.50 EUR`
/// is 12.5. No leading number, or a non-finite one, counts as zero.
pub fn parse_amount(cell: &str) -> f64 {
    numeric_prefix(cell.trim())
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// `[+-]? digits? (. digits?)? ([eE] [+-]? digits)?` with at least one mantissa digit.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let integer_digits = digits_from(end);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = digits_from(end + 1);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }

    if integer_digits == 0 && fraction_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+') | Some(b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = digits_from(exponent_end);
        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }

    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_all;

    const HEADER: &str =
        "Order Item ID,Transaction Type,Order ID,Payout / Refund Date,Selling platform,Amount,Fee Name";

    fn dataset(rows: &[&str]) -> Dataset {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        parse_all(&text, ',')
    }

    #[test]
    fn test_groups_lines_of_same_order_item() {
        let aggregation = aggregate(&dataset(&[
            "A1,Sale,O-1,2024-03-01,Miravia ES,100,Item Price Credit",
            "A1,Sale,O-1,2024-03-01,Miravia ES,-10,Commission",
        ]));

        assert_eq!(aggregation.records.len(), 1);
        let record = &aggregation.records[0];
        assert_eq!(record.order_item_id, "A1");
        assert_eq!(record.transaction_type, "Sale");
        assert_eq!(record.order_id, "O-1");
        assert_eq!(record.invoice_total, 100.0);
        assert_eq!(record.commission, -10.0);
        assert!(aggregation.warnings.is_empty());
    }

    #[test]
    fn test_fee_routing() {
        let aggregation = aggregate(&dataset(&[
            "A1,Sale,O-1,d,p,50,Item Price Credit",
            "A1,Sale,O-1,d,p,-5,Reversal Item Price",
            "A1,Sale,O-1,d,p,2,Reversal Item Price Subsidy",
            "A1,Sale,O-1,d,p,-7,Commission",
            "A1,Sale,O-1,d,p,1,Reversal Commission",
            "A1,Sale,O-1,d,p,-3.5,Shipping Fee Paid by Seller",
            "A1,Sale,O-1,d,p,50,Unknown Fee",
        ]));

        let record = &aggregation.records[0];
        assert_eq!(record.invoice_total, 47.0);
        assert_eq!(record.commission, -6.0);
        assert_eq!(record.shipping_fee, -3.5);
        assert_eq!(record.return_shipping_fee, 0.0);
    }

    #[test]
    fn test_same_item_different_type_is_separate_group() {
        let aggregation = aggregate(&dataset(&[
            "A1,Sale,O-1,d,p,100,Item Price Credit",
            "A1,Refund,O-1,d,p,-100,Reversal Item Price",
        ]));
        assert_eq!(aggregation.records.len(), 2);
        assert_eq!(aggregation.records[1].transaction_type, "Refund");
    }

    #[test]
    fn test_first_seen_order_and_identity() {
        let aggregation = aggregate(&dataset(&[
            "B2,Sale,O-2,2024-03-02,Amazon,1,Commission",
            "A1,Sale,O-1,2024-03-01,Miravia ES,1,Commission",
            "B2,Sale,O-99,2024-04-01,Other,1,Commission",
        ]));

        let ids: Vec<&str> = aggregation
            .records
            .iter()
            .map(|r| r.order_item_id.as_str())
            .collect();
        assert_eq!(ids, vec!["B2", "A1"]);
        assert_eq!(aggregation.records[0].order_id, "O-2");
        assert_eq!(aggregation.records[0].selling_platform, "Amazon");
        assert_eq!(aggregation.records[0].commission, 2.0);
    }

    #[test]
    fn test_missing_fee_name_column_yields_empty() {
        let data = parse_all(
            "Order Item ID,Transaction Type,Amount\nA1,Sale,100",
            ',',
        );
        let aggregation = aggregate(&data);
        assert!(aggregation.records.is_empty());
        assert_eq!(
            aggregation.warnings,
            vec![ReconWarning::MissingColumns {
                columns: vec![COL_FEE_NAME.to_string()]
            }]
        );
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let data = parse_all(
            "order item id,TRANSACTION TYPE, amount ,Fee Name\nA1,Sale,100,Item Price Credit",
            ',',
        );
        let aggregation = aggregate(&data);
        assert_eq!(aggregation.records.len(), 1);
        assert_eq!(aggregation.records[0].order_id, "");
        assert_eq!(aggregation.records[0].selling_platform, "");
        assert_eq!(aggregation.records[0].invoice_total, 100.0);
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let aggregation = aggregate(&dataset(&[
            "A1,Sale,O-1,d,p,100",
            "A1,Sale,O-1,d,p,10,Item Price Credit",
        ]));
        assert_eq!(aggregation.records.len(), 1);
        assert_eq!(aggregation.records[0].invoice_total, 10.0);
        assert_eq!(
            aggregation.warnings,
            vec![ReconWarning::SkippedRows { count: 1 }]
        );
    }

    #[test]
    fn test_unparsable_amount_is_zero() {
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
        assert_eq!(parse_amount(" -12.5 "), -12.5);
        assert_eq!(parse_amount("€5"), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
    }

    #[test]
    fn test_amount_reads_leading_number() {
        assert_eq!(parse_amount("12.50 EUR"), 12.5);
        assert_eq!(parse_amount("100abc"), 100.0);
        assert_eq!(parse_amount("-3.1x"), -3.1);
        assert_eq!(parse_amount("+7"), 7.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("5."), 5.0);
        assert_eq!(parse_amount("1e3 units"), 1000.0);
        assert_eq!(parse_amount("2e"), 2.0);
        assert_eq!(parse_amount("1,5"), 1.0);
    }

    #[test]
    fn test_suffixed_amounts_are_summed() {
        let aggregation = aggregate(&dataset(&[
            "A1,Sale,O,d,Amazon,12.50 EUR,Item Price Credit",
            "A1,Sale,O,d,Amazon,-1.25EUR,Commission",
        ]));
        assert_eq!(aggregation.records[0].invoice_total, 12.5);
        assert_eq!(aggregation.records[0].commission, -1.25);
    }

    #[test]
    fn test_find_column_first_match_wins() {
        let headers = vec!["Amount".to_string(), " amount ".to_string()];
        assert_eq!(find_column(&headers, "AMOUNT"), Some(0));
        assert_eq!(find_column(&headers, "Fee Name"), None);
    }
}
