//! Basic scan example.
//!
//! This example shows how to:
//! - Build a ScanManager around a reputation checker
//! - Serve it through a ScanRelay, the way a popup talks to its background task
//! - Turn the single response into a display verdict
//!
//! It uses the mock reputation checker, so no API key is needed. The
//! reachability probe is real.
//!
//! Run with: cargo run --example basic_scan -- https://example.com

use std::sync::Arc;
use urlscan::backends::{MockAnswer, MockReputation};
use urlscan::prelude::*;
use urlscan::relay::DEFAULT_RELAY_CAPACITY;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== urlscan Basic Scan Example ===\n");

    let reputation = MockReputation::new_safe().with_answer(
        "http://malware.testing.google.test/testing/malware/",
        MockAnswer::Flagged(vec![ThreatType::Malware]),
    );

    let manager = ScanManager::builder()
        .with_reputation(reputation)
        .build()?;

    let (relay, _task) = ScanRelay::spawn(Arc::new(manager), DEFAULT_RELAY_CAPACITY);

    let mut urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        urls = vec![
            "https://example.com".to_string(),
            "http://malware.testing.google.test/testing/malware/".to_string(),
            "chrome://settings".to_string(),
        ];
    }

    for url in urls {
        println!("Scanning: {}", url);

        let result = relay.send(ScanMessage::scan_url(&url)).await;
        if let Ok(response) = &result {
            println!("Response: {}", serde_json::to_string(response)?);
        }

        let verdict = Verdict::from_result(&result);
        println!("[{:?}] {}\n", verdict.kind, verdict);
    }

    println!("=== Example Complete ===");
    Ok(())
}
