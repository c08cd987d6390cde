//! 簡易分隔文字解析：以單一字元切割，不處理引號與跳脫。
//!
//! 欄位內若含有分隔符號（例如 `"1,5"`）會被切成兩格，這是已知限制。

use crate::domain::model::Dataset;

/// 預覽時保留的資料列數
pub const PREVIEW_ROWS: usize = 5;

pub const DEFAULT_DELIMITER: char = ',';

/// 解析表頭與前 [`PREVIEW_ROWS`] 筆資料列，供畫面預覽。
///
/// 沒有任何非空白行時回傳空的 [`Dataset`]，呼叫端應視為無效檔案。
pub fn parse(text: &str, delimiter: char) -> Dataset {
    parse_with_limit(text, delimiter, Some(PREVIEW_ROWS))
}

/// 解析全部資料列，彙總時使用
pub fn parse_all(text: &str, delimiter: char) -> Dataset {
    parse_with_limit(text, delimiter, None)
}

fn parse_with_limit(text: &str, delimiter: char, limit: Option<usize>) -> Dataset {
    // str::lines 同時處理 LF 與 CRLF
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Dataset::default();
    };

    let headers = split_line(header_line, delimiter);
    let rows = match limit {
        Some(limit) => lines.take(limit).map(|l| split_line(l, delimiter)).collect(),
        None => lines.map(|l| split_line(l, delimiter)).collect(),
    };

    Dataset { headers, rows }
}

fn split_line(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter).map(|cell| cell.trim().to_string()).collect()
}
