//! Prescription scan scenario.

use std::sync::Arc;

use medicall_contracts::{error::MedicallResult, scan::ScanInput, service::Service};
use medicall_core::{cancel::CancelToken, traits::PrescriptionAnalyzer};
use medicall_services::SimulatedPrescriptionAnalyzer;

use super::DemoEnv;

/// Stand-in bytes for an uploaded prescription photo.
const SAMPLE_IMAGE: &[u8] = b"\x89PNG\r\n\x1a\nsimulated prescription";

/// Analyze with no image (refused), then with an uploaded one.
pub fn run_scan(env: &DemoEnv) -> MedicallResult<()> {
    println!("=== Scenario: Prescription Scan ===");
    println!();

    let analyzer = SimulatedPrescriptionAnalyzer::new(Arc::clone(&env.faults))
        .with_latency(env.latency(Service::PrescriptionAnalysis));
    let cancel = CancelToken::new();

    match analyzer.analyze(&ScanInput::default(), &cancel) {
        Ok(_) => println!("  No image:    analyzed (unexpected)"),
        Err(e) => println!("  No image:    {}", e),
    }

    let input = ScanInput {
        captured: None,
        uploaded: Some(SAMPLE_IMAGE.to_vec()),
    };
    match analyzer.analyze(&input, &cancel) {
        Ok(analysis) => {
            println!("  Source:                {:?}", analysis.source);
            println!("  Matched products:      {}", analysis.matched_products.join(", "));
            println!("  Needs verification:    {}", analysis.requires_verification.join(", "));
            println!("  Advice:                {}", analysis.advice);
        }
        Err(e) => println!("  Scan failed: {}", e),
    }

    println!();
    Ok(())
}
