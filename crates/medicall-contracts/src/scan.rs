//! Prescription scan inputs and analysis results.

use serde::{Deserialize, Serialize};

/// Where the image submitted for analysis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Camera,
    Upload,
}

/// The images the scanner currently holds.
///
/// A frame captured from the camera takes priority over an uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanInput {
    pub captured: Option<Vec<u8>>,
    pub uploaded: Option<Vec<u8>>,
}

impl ScanInput {
    /// The image that would be submitted, if any.
    pub fn image(&self) -> Option<(ImageSource, &[u8])> {
        match (&self.captured, &self.uploaded) {
            (Some(bytes), _) => Some((ImageSource::Camera, bytes.as_slice())),
            (None, Some(bytes)) => Some((ImageSource::Upload, bytes.as_slice())),
            (None, None) => None,
        }
    }
}

/// A successful (simulated) prescription analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionAnalysis {
    pub source: ImageSource,
    /// Store items that matched prescription lines.
    pub matched_products: Vec<String>,
    /// Items that need a doctor's verification before purchase.
    pub requires_verification: Vec<String>,
    pub advice: String,
}
