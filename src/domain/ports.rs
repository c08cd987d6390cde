use crate::core::derivation::RetentionPolicy;
use crate::domain::model::{ReconReport, SourceFile};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn delimiter(&self) -> char;
    /// 報表檔名（不含副檔名），可包含 `{timestamp}`
    fn report_filename(&self) -> &str;
    fn retention_policy(&self) -> RetentionPolicy;
    fn compression_enabled(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SourceFile>;
    async fn transform(&self, source: SourceFile) -> Result<ReconReport>;
    async fn load(&self, report: ReconReport) -> Result<String>;
}
