//! Render reconciled records plus the totals row as comma-delimited text.

use crate::core::format::format_amount;
use crate::domain::model::ReconRecord;

pub const REPORT_DELIMITER: char = ',';

/// Output schema, in column order.
pub const REPORT_HEADERS: [&str; 12] = [
    "Tipo de Transacción",
    "ID de Pedido",
    "Fecha de pago/reembolso",
    "Total",
    "Total Factura",
    "Comisión Marketplace",
    "Gastos de envio",
    "Paquete de devolución - Gastos de envío",
    "1% Retencion",
    "Importe Retenido",
    "Total Neto",
    "Plataforma de Venta",
];

/// Header line, one line per record, then the totals line, joined with `\n`.
/// There is no trailing newline.
pub fn serialize(records: &[ReconRecord], totals: &ReconRecord) -> String {
    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(
        REPORT_HEADERS
            .iter()
            .map(|h| escape_cell(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    lines.extend(records.iter().map(render_row));
    lines.push(render_row(totals));
    lines.join("\n")
}

fn render_row(record: &ReconRecord) -> String {
    let cells = [
        escape_cell(&record.transaction_type),
        escape_cell(&record.order_id),
        escape_cell(&record.payout_date),
        format_amount(record.total),
        format_amount(record.invoice_total),
        format_amount(record.commission),
        format_amount(record.shipping_fee),
        format_amount(record.return_shipping_fee),
        record.retention_flag.to_string(),
        format_amount(record.retained_amount),
        format_amount(record.net_total),
        escape_cell(&record.selling_platform),
    ];
    cells.join(",")
}

/// Quote a cell containing the delimiter, a quote or a line break.
pub fn escape_cell(value: &str) -> String {
    if value.contains(|c: char| matches!(c, REPORT_DELIMITER | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
