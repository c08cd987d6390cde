use crate::core::{Pipeline, ReconReport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// 一次執行的結果：輸出路徑與報表內容
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output_path: String,
    pub report: ReconReport,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("🚀 Starting reconciliation");
        self.monitor.log_stats("Start");

        // Extract
        let source = self.pipeline.extract().await?;
        self.monitor.log_stats("Extract");

        // Transform
        let report = self.pipeline.transform(source).await?;
        self.monitor.log_stats("Transform");

        // Load：報表本身會被 load 消耗，先留一份給呼叫端顯示
        let output_path = self.pipeline.load(report.clone()).await?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(RunOutcome {
            output_path,
            report,
        })
    }
}
