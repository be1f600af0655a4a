//! Live Safe Browsing lookup.
//!
//! Requires `SAFE_BROWSING_API_KEY` in the environment.
//!
//! Run with: cargo run --example safe_browsing -- https://example.com

use tracing_subscriber::EnvFilter;
use urlscan::backends::{SafeBrowsingClient, SafeBrowsingConfig};
use urlscan::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com".to_string());

    let client = SafeBrowsingClient::new(SafeBrowsingConfig::from_env()?)?;
    let manager = ScanManager::builder().with_reputation(client).build()?;

    let report = manager.scan_report(ScanRequest::new(&url)).await;
    let verdict = Verdict::from_response(&ScanResponse::from(&report.outcome));

    println!("{} -> {} ({} ms)", url, report.outcome.label(), report.duration.as_millis());
    println!("{}", verdict);
    Ok(())
}
