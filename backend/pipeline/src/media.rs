//! Upload validation for the narration pipeline.
//!
//! The front-end only offers jpg/png uploads; anything else is rejected
//! here before an inference process is ever spawned.

use std::path::Path;

use sightspeak_core::SightSpeakError;

/// Detect an image MIME type by file extension.
pub fn detect_image_mime(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

/// Reject empty buffers and unsupported image types.
pub fn validate_image(image_bytes: &[u8], image_name: &str) -> Result<(), SightSpeakError> {
    if image_bytes.is_empty() {
        return Err(SightSpeakError::InvalidImage("empty upload".to_string()));
    }
    if detect_image_mime(Path::new(image_name)).is_none() {
        return Err(SightSpeakError::InvalidImage(format!(
            "unsupported image type: {image_name}"
        )));
    }
    Ok(())
}
