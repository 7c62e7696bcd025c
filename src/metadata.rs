//! Embedded metadata extraction.
//!
//! For recognized photographic/audio files, pulls descriptive tags straight
//! from the file (the tag reader manages its own I/O, so the bounded buffer
//! is not used here). Descriptive text fields are a classic side channel
//! for hidden data; GPS tags are reported as intel.

use std::fs::File;
use std::io::BufReader;

use exif::{In, Reader, Tag};

use crate::heuristics::HeuristicOutcome;
use crate::report::Finding;
use crate::scanner::AnalysisTarget;

const METADATA_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "tif", "tiff", "png", "heic", "webp", "avif", "wav"];

/// Descriptive tags that can carry operator-supplied text.
const DESCRIPTIVE_TAGS: &[Tag] =
    &[Tag::ImageDescription, Tag::Software, Tag::Artist, Tag::Copyright];

/// Extract embedded tags for recognized media files. All failures are
/// swallowed: a file without readable metadata simply contributes nothing.
pub(crate) fn extract(target: &AnalysisTarget) -> HeuristicOutcome {
    let ext = target
        .current_path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !METADATA_EXTENSIONS.contains(&ext.as_str()) {
        return HeuristicOutcome::Ran(Vec::new());
    }

    let file = match File::open(&target.current_path) {
        Ok(f) => f,
        Err(_) => return HeuristicOutcome::Failed("metadata"),
    };
    let mut reader = BufReader::new(file);
    let exif = match Reader::new().read_from_container(&mut reader) {
        Ok(e) => e,
        // No EXIF container at all is the common case, not a failure.
        Err(_) => return HeuristicOutcome::Ran(Vec::new()),
    };

    let mut findings = Vec::new();
    for field in exif.fields() {
        if field.ifd_num != In::PRIMARY {
            continue;
        }
        let tag_name = field.tag.to_string();
        let value = field.display_value().to_string();
        if tag_name.contains("GPS") {
            findings.push(Finding::intel(format!("GPS metadata present: {tag_name}")));
        } else if DESCRIPTIVE_TAGS.contains(&field.tag) {
            findings.push(Finding::hidden_data(format!(
                "Embedded tag {tag_name}: {value}"
            )));
        }
    }

    HeuristicOutcome::Ran(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FindingCategory;
    use std::io::Write;

    fn target_for(tmp: &tempfile::NamedTempFile) -> AnalysisTarget {
        AnalysisTarget::new(tmp.path()).unwrap()
    }

    /// Minimal little-endian TIFF: IFD0 holds an ImageDescription string
    /// and a GPS IFD pointer whose single entry is GPSLatitudeRef.
    fn crafted_tiff() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"II");
        data.extend_from_slice(&42u16.to_le_bytes());
        data.extend_from_slice(&8u32.to_le_bytes()); // IFD0 offset

        // IFD0: two entries
        data.extend_from_slice(&2u16.to_le_bytes());
        // ImageDescription (0x010E), ASCII, 12 bytes at offset 38
        data.extend_from_slice(&0x010Eu16.to_le_bytes());
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&12u32.to_le_bytes());
        data.extend_from_slice(&38u32.to_le_bytes());
        // GPS IFD pointer (0x8825), LONG, GPS IFD at offset 50
        data.extend_from_slice(&0x8825u16.to_le_bytes());
        data.extend_from_slice(&4u16.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&50u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes()); // no next IFD

        data.extend_from_slice(b"hidden note\0"); // offset 38

        // GPS IFD: GPSLatitudeRef (0x0001), ASCII "N", inline value
        data.extend_from_slice(&1u16.to_le_bytes()); // offset 50
        data.extend_from_slice(&0x0001u16.to_le_bytes());
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&2u32.to_le_bytes());
        data.extend_from_slice(b"N\0\0\0");
        data.extend_from_slice(&0u32.to_le_bytes());
        data
    }

    #[test]
    fn test_descriptive_and_gps_tags_reported() {
        let mut tmp = tempfile::Builder::new().suffix(".tif").tempfile().unwrap();
        tmp.write_all(&crafted_tiff()).unwrap();

        let findings = match extract(&target_for(&tmp)) {
            HeuristicOutcome::Ran(f) => f,
            HeuristicOutcome::Failed(stage) => panic!("extraction failed: {stage}"),
        };

        let hidden: Vec<_> = findings
            .iter()
            .filter(|f| f.category == FindingCategory::HiddenData)
            .collect();
        assert_eq!(hidden.len(), 1);
        assert!(hidden[0].message.contains("ImageDescription"));
        assert!(hidden[0].message.contains("hidden note"));

        let gps: Vec<_> = findings
            .iter()
            .filter(|f| f.category == FindingCategory::Intel)
            .collect();
        assert_eq!(gps.len(), 1);
        assert!(gps[0].message.contains("GPS"));

        // Metadata never scores.
        assert!(findings.iter().all(|f| f.delta == 0));
    }

    #[test]
    fn test_non_media_extension_skipped() {
        let mut tmp = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        tmp.write_all(b"plain text").unwrap();
        match extract(&target_for(&tmp)) {
            HeuristicOutcome::Ran(findings) => assert!(findings.is_empty()),
            HeuristicOutcome::Failed(_) => panic!("txt should be skipped, not failed"),
        }
    }

    #[test]
    fn test_jpeg_without_exif_yields_nothing() {
        let mut tmp = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        tmp.write_all(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).unwrap();
        tmp.write_all(&[0u8; 64]).unwrap();
        tmp.write_all(&[0xFF, 0xD9]).unwrap();
        match extract(&target_for(&tmp)) {
            HeuristicOutcome::Ran(findings) => assert!(findings.is_empty()),
            HeuristicOutcome::Failed(_) => panic!("unreadable EXIF should be swallowed"),
        }
    }
}
