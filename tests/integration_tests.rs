use anyhow::Result;
use payout_recon::{
    CliConfig, EtlEngine, LocalStorage, ReconError, ReconPipeline, ReconWarning, TOTALS_LABEL,
};
use std::io::Read;
use tempfile::TempDir;

const EXPORT: &str = "Order Item ID,Transaction Type,Order ID,Payout / Refund Date,Selling platform,Amount,Fee Name\r
A1,Sale,O-1,2024-03-01,Miravia ES,100,Item Price Credit\r
A1,Sale,O-1,2024-03-01,Miravia ES,-10,Commission\r
\r
B2,Sale,O-2,2024-03-02,Amazon,40,Item Price Credit\r
B2,Sale,O-2,2024-03-02,Amazon,-4,Shipping Fee Paid by Seller\r
B2,Sale,O-2,2024-03-02,Amazon,50,Unknown Fee\r
A1,Refund,O-1,2024-03-05,Miravia ES,-100,Reversal Item Price\r
A1,Refund,O-1,2024-03-05,Miravia ES,10,Reversal Commission\r
";

fn config_for(temp_dir: &TempDir, input: &str, compress: bool) -> CliConfig {
    CliConfig {
        input: temp_dir.path().join(input).display().to_string(),
        output_path: temp_dir.path().join("reports").display().to_string(),
        delimiter: ',',
        filename: "conciliacion_test".to_string(),
        retention_platform: "miravia".to_string(),
        retention_rate: 0.01,
        compress,
        verbose: false,
        monitor: false,
    }
}

#[tokio::test]
async fn test_end_to_end_reconciliation() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("payouts.csv"), EXPORT).await?;

    let config = config_for(&temp_dir, "payouts.csv", false);
    let pipeline = ReconPipeline::new(LocalStorage::new("."), config);
    let engine = EtlEngine::new(pipeline);

    let outcome = engine.run().await?;
    assert!(outcome.output_path.ends_with("conciliacion_test.csv"));

    let written = tokio::fs::read_to_string(&outcome.output_path).await?;
    assert_eq!(written, outcome.report.csv_output);

    let lines: Vec<&str> = written.split('\n').collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[1],
        "Sale,O-1,2024-03-01,90.00,100.00,-10.00,0.00,0.00,1,0.90,89.10,Miravia ES"
    );
    assert_eq!(
        lines[2],
        "Sale,O-2,2024-03-02,36.00,40.00,0.00,-4.00,0.00,0,0.00,36.00,Amazon"
    );
    assert_eq!(
        lines[3],
        "Refund,O-1,2024-03-05,-90.00,-100.00,10.00,0.00,0.00,1,-0.90,-89.10,Miravia ES"
    );
    assert!(lines[4].starts_with(&format!(",{},,36.00,", TOTALS_LABEL)));
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_compression() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("payouts.csv"), EXPORT).await?;

    let config = config_for(&temp_dir, "payouts.csv", true);
    let engine = EtlEngine::new_with_monitoring(
        ReconPipeline::new(LocalStorage::new("."), config),
        true,
    );

    let outcome = engine.run().await?;
    assert!(outcome.output_path.ends_with("conciliacion_test.zip"));

    let zip_data = std::fs::read(&outcome.output_path)?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;

    let file_names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).map(|f| f.name().to_string()))
        .collect::<std::result::Result<_, _>>()?;
    assert!(file_names.contains(&"conciliacion_test.csv".to_string()));
    assert!(file_names.contains(&"summary.json".to_string()));

    let mut csv_content = String::new();
    archive
        .by_name("conciliacion_test.csv")?
        .read_to_string(&mut csv_content)?;
    assert_eq!(csv_content, outcome.report.csv_output);

    let mut summary = String::new();
    archive.by_name("summary.json")?.read_to_string(&mut summary)?;
    let summary: serde_json::Value = serde_json::from_str(&summary)?;
    assert_eq!(summary["source_name"], "payouts.csv");
    assert_eq!(summary["record_count"], 3);
    assert_eq!(summary["totals"]["order_id"], TOTALS_LABEL);
    Ok(())
}

#[tokio::test]
async fn test_blank_file_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("blank.csv"), "\n  \r\n\n").await?;

    let config = config_for(&temp_dir, "blank.csv", false);
    let engine = EtlEngine::new(ReconPipeline::new(LocalStorage::new("."), config));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, ReconError::InvalidFile { ref file_name } if file_name == "blank.csv"));
    assert!(!temp_dir.path().join("reports").exists());
    Ok(())
}

#[tokio::test]
async fn test_missing_columns_still_writes_totals_only_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(
        temp_dir.path().join("partial.csv"),
        "Order Item ID,Transaction Type,Amount\nA1,Sale,100\n",
    )
    .await?;

    let config = config_for(&temp_dir, "partial.csv", false);
    let engine = EtlEngine::new(ReconPipeline::new(LocalStorage::new("."), config));

    let outcome = engine.run().await?;
    assert!(outcome.report.records.is_empty());
    assert_eq!(
        outcome.report.warnings,
        vec![ReconWarning::MissingColumns {
            columns: vec!["Fee Name".to_string()]
        }]
    );

    let written = tokio::fs::read_to_string(&outcome.output_path).await?;
    assert_eq!(written.lines().count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_missing_input_file_is_io_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_for(&temp_dir, "does-not-exist.csv", false);
    let engine = EtlEngine::new(ReconPipeline::new(LocalStorage::new("."), config));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, ReconError::IoError(_)));
    Ok(())
}
