/// Shannon entropy of a byte slice, in bits per byte.
///
/// Returns a value between 0.0 (constant data) and 8.0 (uniform random).
/// Typical ranges:
/// - < 4.0: sparse data, plain text
/// - 4.0-6.0: typical code/data
/// - 6.0-7.2: compressed or obfuscated
/// - > 7.2: encrypted or packed
pub fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut freq = [0usize; 256];
    for &byte in data {
        freq[byte as usize] += 1;
    }

    let len = data.len() as f64;
    let mut entropy = 0.0;
    for &count in freq.iter().filter(|&&c| c > 0) {
        let p = count as f64 / len;
        entropy -= p * p.log2();
    }

    entropy
}

/// Entropy above this reads as encrypted or packed content.
pub const HIGH_ENTROPY_THRESHOLD: f64 = 7.2;
