use anyhow::Result;

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    coach_potato::cli::run().await
}
