use clap::Args;

use crate::cli::op::OpContext;

#[derive(Args, Debug, Clone)]
pub struct Health;

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    /// Carries the full report so the caller still sees what passed
    #[error("Health check failed:\n{0}")]
    Unhealthy(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Health {
    type Error = HealthError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let mut lines = Vec::new();
        let mut healthy = true;

        lines.push("Key:".to_string());
        if ctx.key_path.is_file() {
            lines.push(format!("  {}: OK", ctx.key_path.display()));
        } else {
            lines.push(format!("  {}: MISSING", ctx.key_path.display()));
        }

        lines.push(String::new());
        lines.push(format!("Service ({}):", ctx.remote));
        for (label, path) in [("livez: ", "/_status/livez"), ("readyz:", "/_status/readyz")] {
            let (ok, status) = check_endpoint(ctx, path).await;
            healthy &= ok;
            lines.push(format!("  {} {}", label, status));
        }

        let report = lines.join("\n");
        if healthy {
            Ok(report)
        } else {
            Err(HealthError::Unhealthy(report))
        }
    }
}

async fn check_endpoint(ctx: &OpContext, path: &str) -> (bool, String) {
    match ctx.client.get(ctx.endpoint(path)).send().await {
        Ok(resp) if resp.status().is_success() => (true, "OK".to_string()),
        Ok(resp) => (false, format!("UNHEALTHY ({})", resp.status())),
        Err(_) => (false, "NOT REACHABLE".to_string()),
    }
}
