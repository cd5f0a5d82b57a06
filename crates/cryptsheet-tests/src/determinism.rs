//! Determinism helpers for cryptsheet output.
//!
//! Slicing the same sheet twice must give the same variant names in the same
//! order with byte-identical payloads. These helpers reduce a frame set to
//! BLAKE3 digests so runs can be compared cheaply and reported readably.

use std::fmt;

use cryptsheet_frames::ImageVariant;

/// Name and payload digest of one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDigest {
    pub name: String,
    pub hash: String,
    pub size: usize,
}

impl fmt::Display for VariantDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({} bytes)", self.name, self.hash, self.size)
    }
}

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical digests.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Digests of the first run.
    pub reference: Vec<VariantDigest>,
    /// First mismatching run (0-indexed) and the digest pair that differed.
    pub mismatch: Option<(usize, Option<VariantDigest>, Option<VariantDigest>)>,
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some((run_index, expected, actual)) = &self.mismatch {
            panic!(
                "Non-deterministic output detected!\n\
                 Runs: {}\n\
                 Run {} differs\n\
                 Expected: {}\n\
                 Actual:   {}",
                self.runs,
                run_index,
                describe(expected.as_ref()),
                describe(actual.as_ref()),
            );
        }
    }
}

fn describe(digest: Option<&VariantDigest>) -> String {
    digest.map_or_else(|| "<missing>".to_string(), ToString::to_string)
}

/// BLAKE3 hex digest of a byte slice.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Reduce a frame set to ordered name/digest pairs.
pub fn digest_variants(variants: &[ImageVariant]) -> Vec<VariantDigest> {
    variants
        .iter()
        .map(|variant| VariantDigest {
            name: variant.name(),
            hash: compute_hash(variant.data()),
            size: variant.data().len(),
        })
        .collect()
}

/// Run a frame-set producer `runs` times and compare the digests.
pub fn verify_determinism<F>(produce: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> Vec<ImageVariant>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = digest_variants(&produce());
    for run_index in 1..runs {
        let digests = digest_variants(&produce());
        let longest = reference.len().max(digests.len());
        let mismatch = (0..longest).find(|&i| reference.get(i) != digests.get(i));
        if let Some(i) = mismatch {
            return DeterminismResult {
                is_deterministic: false,
                runs,
                mismatch: Some((run_index, reference.get(i).cloned(), digests.get(i).cloned())),
                reference,
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        reference,
        mismatch: None,
    }
}
