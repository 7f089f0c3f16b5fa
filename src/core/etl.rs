use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: RunMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    /// Runs extract → transform → load and returns the written file paths.
    pub async fn run(&self) -> Result<Vec<String>> {
        tracing::info!("🚀 Starting ETL process");

        tracing::info!("📥 Extracting...");
        let extracted = self.pipeline.extract().await?;
        self.monitor.log_phase("Extract");

        tracing::info!("🔄 Transforming...");
        let transformed = self.pipeline.transform(extracted).await?;
        self.monitor.log_phase("Transform");

        tracing::info!("💾 Loading...");
        let written = self.pipeline.load(transformed).await?;
        self.monitor.log_phase("Load");

        tracing::info!("✅ ETL process finished, {} file(s) written", written.len());
        self.monitor.log_final();
        Ok(written)
    }
}
