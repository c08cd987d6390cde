use crate::domain::model::ReconReport;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "€";

/// 固定兩位小數，剛好落在中間的值遠離零進位（`0.125` → `0.13`）；
/// `-0.00` 一律輸出為 `0.00`
pub fn format_amount(value: f64) -> String {
    let magnitude = value.abs();
    // 只有小數部分為奇數個 1/8 時，兩位小數才會剛好是 .xx5
    let eighths = magnitude * 8.0;
    let magnitude = if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        (magnitude * 100.0).ceil() / 100.0
    } else {
        magnitude
    };
    let formatted = format!("{:.2}", magnitude.copysign(value));
    match formatted.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => formatted,
    }
}

/// 顯示用的 es-ES 金額格式：`12.345,60 €`。
///
/// 與 es-ES 相同，四位數整數不加千分位（`1234,50 €`）；符號前使用一般空白。
pub fn format_currency(value: f64, symbol: &str) -> String {
    let plain = format_amount(value);
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (integer, decimals) = digits.split_once('.').unwrap_or((digits, "00"));

    let group = integer.len() > 4;
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if group && i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}{},{} {}", sign, grouped, decimals, symbol)
}

/// 終端機顯示用的對帳摘要
pub fn render_summary(report: &ReconReport, symbol: &str) -> String {
    let totals = &report.totals;
    let retained_items = report
        .records
        .iter()
        .filter(|r| r.retention_flag == 1)
        .count();

    let mut lines = vec![
        format!("Source:          {}", report.source_name),
        format!("Order items:     {}", report.records.len()),
        format!("Retained items:  {}", retained_items),
        format!("Invoice total:   {}", format_currency(totals.invoice_total, symbol)),
        format!("Commission:      {}", format_currency(totals.commission, symbol)),
        format!("Shipping fee:    {}", format_currency(totals.shipping_fee, symbol)),
        format!("Total:           {}", format_currency(totals.total, symbol)),
        format!("Retained:        {}", format_currency(totals.retained_amount, symbol)),
        format!("Net total:       {}", format_currency(totals.net_total, symbol)),
    ];
    lines.extend(report.warnings.iter().map(|w| format!("Warning:         {}", w)));
    lines.join("\n")
}
