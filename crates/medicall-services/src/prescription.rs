//! Simulated prescription image analysis.

use std::{sync::Arc, time::Duration};

use tracing::info;

use medicall_contracts::{
    error::{MedicallError, MedicallResult},
    scan::{PrescriptionAnalysis, ScanInput},
    service::Service,
};
use medicall_core::{
    cancel::CancelToken,
    traits::{FaultInjector, PrescriptionAnalyzer},
};

use crate::mock_data::{ANALYSIS_ADVICE, MATCHED_PRODUCTS, NO_PRESCRIPTION_IMAGE, REQUIRES_VERIFICATION, SCAN_TIPS};

/// Default time the simulated analysis takes.
pub const ANALYSIS_LATENCY: Duration = Duration::from_millis(2500);

/// Pretends to read a prescription image.
///
/// The image content is never inspected: an unreadable scan is decided by
/// the injector's `PrescriptionAnalysis` rate, and every readable one yields
/// the same fixture result.
pub struct SimulatedPrescriptionAnalyzer {
    faults: Arc<dyn FaultInjector>,
    latency: Duration,
}

impl SimulatedPrescriptionAnalyzer {
    pub fn new(faults: Arc<dyn FaultInjector>) -> Self {
        Self {
            faults,
            latency: ANALYSIS_LATENCY,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl PrescriptionAnalyzer for SimulatedPrescriptionAnalyzer {
    fn analyze(&self, input: &ScanInput, cancel: &CancelToken) -> MedicallResult<PrescriptionAnalysis> {
        let (source, image) = input
            .image()
            .ok_or_else(|| MedicallError::validation("prescription_image", NO_PRESCRIPTION_IMAGE))?;

        info!(source = ?source, bytes = image.len(), "analyzing prescription");
        cancel.sleep(self.latency, "prescription analysis")?;
        self.faults.inject(Service::PrescriptionAnalysis, SCAN_TIPS)?;

        Ok(PrescriptionAnalysis {
            source,
            matched_products: MATCHED_PRODUCTS.iter().map(|s| s.to_string()).collect(),
            requires_verification: REQUIRES_VERIFICATION.iter().map(|s| s.to_string()).collect(),
            advice: ANALYSIS_ADVICE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use medicall_contracts::{
        error::MedicallError,
        scan::{ImageSource, ScanInput},
        service::Service,
    };
    use medicall_core::{
        cancel::CancelToken,
        fault::{AlwaysFail, NoFaults},
        traits::PrescriptionAnalyzer,
    };

    use super::SimulatedPrescriptionAnalyzer;

    fn analyzer(fail: bool) -> SimulatedPrescriptionAnalyzer {
        let analyzer = if fail {
            SimulatedPrescriptionAnalyzer::new(Arc::new(AlwaysFail))
        } else {
            SimulatedPrescriptionAnalyzer::new(Arc::new(NoFaults))
        };
        analyzer.with_latency(Duration::ZERO)
    }

    #[test]
    fn missing_image_is_a_validation_error() {
        match analyzer(false).analyze(&ScanInput::default(), &CancelToken::new()) {
            Err(MedicallError::Validation { field, reason }) => {
                assert_eq!(field, "prescription_image");
                assert_eq!(reason, "Please upload or capture a prescription image first.");
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn captured_image_takes_priority() {
        let input = ScanInput {
            captured: Some(vec![1, 2, 3]),
            uploaded: Some(vec![9]),
        };
        let analysis = analyzer(false).analyze(&input, &CancelToken::new()).unwrap();

        assert_eq!(analysis.source, ImageSource::Camera);
        assert_eq!(analysis.matched_products, vec!["Paracetamol 500mg", "Vitamin C Tablets"]);
        assert_eq!(analysis.requires_verification, vec!["Amoxicillin 250mg"]);
    }

    #[test]
    fn upload_is_used_without_capture() {
        let input = ScanInput {
            captured: None,
            uploaded: Some(vec![9]),
        };
        let analysis = analyzer(false).analyze(&input, &CancelToken::new()).unwrap();
        assert_eq!(analysis.source, ImageSource::Upload);
    }

    #[test]
    fn unreadable_scan_carries_tips() {
        let input = ScanInput {
            captured: None,
            uploaded: Some(vec![9]),
        };
        match analyzer(true).analyze(&input, &CancelToken::new()) {
            Err(MedicallError::SimulatedServiceFailure { service, reason }) => {
                assert_eq!(service, Service::PrescriptionAnalysis);
                assert!(reason.contains("good lighting"));
            }
            other => panic!("expected SimulatedServiceFailure, got {:?}", other),
        }
    }
}
