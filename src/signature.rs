//! Magic-byte signature classification.
//!
//! Maps the first bytes of the analysis buffer to a declared container or
//! media type. The table is ordered: the first matching prefix wins, so
//! order encodes priority for overlapping prefixes. Unmatched buffers fall
//! back to content sniffing via `infer`, then to a generic classification.

struct FileSignature {
    prefix: &'static [u8],
    file_type: &'static str,
    description: &'static str,
}

const SIGNATURES: &[FileSignature] = &[
    FileSignature { prefix: &[0xFF, 0xD8, 0xFF], file_type: "jpeg", description: "JPEG image" },
    FileSignature {
        prefix: &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
        file_type: "png",
        description: "PNG image",
    },
    FileSignature { prefix: b"GIF8", file_type: "gif", description: "GIF image" },
    FileSignature { prefix: b"%PDF", file_type: "pdf", description: "PDF document" },
    FileSignature {
        prefix: &[0x50, 0x4B, 0x03, 0x04],
        file_type: "zip",
        description: "ZIP archive (or Office/JAR/APK container)",
    },
    FileSignature { prefix: b"MZ", file_type: "pe", description: "Windows executable (PE)" },
    FileSignature { prefix: b"\x7fELF", file_type: "elf", description: "ELF executable" },
    FileSignature {
        prefix: &[0x52, 0x61, 0x72, 0x21, 0x1A, 0x07],
        file_type: "rar",
        description: "RAR archive",
    },
    FileSignature {
        prefix: &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1],
        file_type: "ole",
        description: "Legacy Office document (OLE compound file)",
    },
    FileSignature {
        prefix: &[0xCA, 0xFE, 0xBA, 0xBE],
        file_type: "class",
        description: "Java class file or Mach-O fat binary",
    },
];

/// Classify the buffer prefix into a `(type, description)` pair.
///
/// Pure function of the first 16 bytes: no state, no side effects.
pub fn classify(buffer: &[u8]) -> (String, String) {
    let head = &buffer[..buffer.len().min(16)];

    for sig in SIGNATURES {
        if head.starts_with(sig.prefix) {
            return (sig.file_type.to_string(), sig.description.to_string());
        }
    }

    // Fallback: content sniff over a larger window.
    if let Some(kind) = infer::get(buffer) {
        return (
            kind.extension().to_string(),
            format!("Detected by content sniff ({})", kind.mime_type()),
        );
    }

    ("data".to_string(), "Unknown binary data".to_string())
}
