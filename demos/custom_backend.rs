//! Custom backend example demonstrating how to implement a reputation checker.
//!
//! This example shows how to:
//! - Implement the ReputationChecker trait for a host blocklist
//! - Plug it into a ScanManager
//! - Map outcomes to display verdicts
//!
//! Run with: cargo run --example custom_backend

use async_trait::async_trait;
use std::collections::HashSet;
use urlscan::probe::MockProber;
use urlscan::prelude::*;

/// Flags any URL whose host is on a local blocklist.
#[derive(Debug)]
struct HostBlocklist {
    blocked: HashSet<String>,
}

impl HostBlocklist {
    fn new(hosts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            blocked: hosts.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ReputationChecker for HostBlocklist {
    fn name(&self) -> &str {
        "host-blocklist"
    }

    async fn check(&self, url: &str) -> Result<ReputationVerdict, ScanError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| ScanError::internal(format!("unparseable URL: {}", e)))?;
        let host = parsed.host_str().unwrap_or_default();

        if self.blocked.contains(host) {
            tracing::warn!(host = %host, "Host is blocklisted");
            Ok(ReputationVerdict::from_matches(vec![ThreatMatch::new(
                ThreatType::SocialEngineering,
                url,
                self.name(),
            )]))
        } else {
            Ok(ReputationVerdict::safe())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== urlscan Custom Backend Example ===\n");

    let manager = ScanManager::builder()
        .with_reputation(HostBlocklist::new(["login-paypa1.test", "free-prizes.test"]))
        .with_prober(MockProber::reachable().with_response("https://free-prizes.test/", false))
        .build()?;

    for url in [
        "https://example.com/",
        "https://login-paypa1.test/signin",
        "https://free-prizes.test/",
        "file:///home/user/notes.txt",
    ] {
        let outcome = manager.scan(url).await;
        let verdict = Verdict::from_response(&ScanResponse::from(&outcome));
        println!("{:<36} {:<12} {}", url, verdict.kind.css_class(), verdict.message);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
