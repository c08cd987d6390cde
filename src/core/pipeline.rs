use crate::core::aggregator::aggregate;
use crate::core::derivation::{derive_all, RetentionPolicy};
use crate::core::parser::{parse, parse_all};
use crate::core::report::serialize;
use crate::core::totals::reduce;
use crate::core::{ConfigProvider, Pipeline, ReconReport, SourceFile, Storage};
use crate::domain::model::ReportSummary;
use crate::utils::error::{ReconError, Result};
use std::io::Write;
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};

/// 純函式的對帳流程：解析 → 彙總 → 衍生欄位 → 總計 → CSV。
///
/// 同樣的輸入永遠產生同樣的輸出；空白檔案回傳 [`ReconError::InvalidFile`]。
pub fn reconcile(
    source_name: &str,
    text: &str,
    delimiter: char,
    policy: &RetentionPolicy,
) -> Result<ReconReport> {
    let preview = parse(text, delimiter);
    if preview.is_empty() {
        return Err(ReconError::InvalidFile {
            file_name: source_name.to_string(),
        });
    }

    // 預覽只有前幾筆，彙總需要重新掃描全部資料列
    let dataset = parse_all(text, delimiter);
    let mut aggregation = aggregate(&dataset);
    derive_all(&mut aggregation.records, policy);

    let totals = reduce(&aggregation.records);
    let csv_output = serialize(&aggregation.records, &totals);

    Ok(ReconReport {
        source_name: source_name.to_string(),
        preview,
        records: aggregation.records,
        totals,
        warnings: aggregation.warnings,
        csv_output,
    })
}

/// 展開檔名樣板中的 `{timestamp}`
pub fn expand_filename(pattern: &str) -> String {
    pattern.replace(
        "{timestamp}",
        &chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string(),
    )
}

pub struct ReconPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> ReconPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReconPipeline<S, C> {
    async fn extract(&self) -> Result<SourceFile> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading payout export: {}", input_path);

        let bytes = self.storage.read_file(input_path).await?;
        // 非 UTF-8 位元組以替代字元處理，不中斷流程
        let content = String::from_utf8_lossy(&bytes).into_owned();

        let name = Path::new(input_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(input_path)
            .to_string();

        tracing::info!("📥 Read {} bytes from {}", bytes.len(), name);
        Ok(SourceFile { name, content })
    }

    async fn transform(&self, source: SourceFile) -> Result<ReconReport> {
        let policy = self.config.retention_policy();
        tracing::debug!(
            "Delimiter: {:?}, retention: {} @ {}",
            self.config.delimiter(),
            policy.platform_keyword,
            policy.rate
        );

        let report = reconcile(&source.name, &source.content, self.config.delimiter(), &policy)?;

        for warning in &report.warnings {
            tracing::warn!("⚠️ {}", warning);
        }
        tracing::info!(
            "🔧 Reconciled {} order items from {}",
            report.records.len(),
            report.source_name
        );
        Ok(report)
    }

    async fn load(&self, report: ReconReport) -> Result<String> {
        let filename = expand_filename(self.config.report_filename());

        let (file_name, data) = if self.config.compression_enabled() {
            let zip_name = format!("{}.zip", filename);
            tracing::debug!("Bundling report into {}", zip_name);

            let summary = ReportSummary {
                source_name: &report.source_name,
                generated_at: chrono::Utc::now().to_rfc3339(),
                record_count: report.records.len(),
                totals: &report.totals,
                warnings: &report.warnings,
            };

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

                zip.start_file::<_, ()>(format!("{}.csv", filename), FileOptions::default())?;
                zip.write_all(report.csv_output.as_bytes())?;

                zip.start_file::<_, ()>("summary.json", FileOptions::default())?;
                let json_data = serde_json::to_string_pretty(&summary)?;
                zip.write_all(json_data.as_bytes())?;

                let cursor = zip.finish()?;
                cursor.into_inner()
            };
            (zip_name, zip_data)
        } else {
            (format!("{}.csv", filename), report.csv_output.into_bytes())
        };

        let output_path = Path::new(self.config.output_path())
            .join(&file_name)
            .display()
            .to_string();

        tracing::debug!("Writing {} ({} bytes) to storage", output_path, data.len());
        self.storage.write_file(&output_path, &data).await?;

        tracing::info!("💾 Report saved: {}", output_path);
        Ok(output_path)
    }
}
