//! Semantic 64-bit verification.
//!
//! Compares expected and actual post-state results as 64-bit values over the
//! result region, reconstructs the operands of each wrong result from the
//! pre-state, and separately checks that operand memory was left untouched.

use std::fmt;

use quadcheck_layout::AddressMap;
use quadcheck_mem::{BankedImage, UnknownPolicy, WordState};
use tracing::{debug, info, warn};

use crate::{Diagnosis, Result, StateFiles};

/// Verifier settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Accept unknown-marker words when reading images.
    ///
    /// An unknown expected result is a don't-care. An unknown actual result
    /// against a known expectation is a mismatch.
    pub tolerate_unknown: bool,
    /// Number of corrupted operand addresses kept as examples.
    pub corruption_sample: usize,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            tolerate_unknown: false,
            corruption_sample: 5,
        }
    }
}

impl VerifyConfig {
    /// Image read policy implied by `tolerate_unknown`.
    #[must_use]
    pub const fn unknown_policy(&self) -> UnknownPolicy {
        UnknownPolicy::from_tolerate(self.tolerate_unknown)
    }
}

/// A result address whose actual value differs from the expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub address: usize,
    pub slot: usize,
    /// Operand A from the pre-state, if the pre-state reaches it.
    pub operand_a: Option<u64>,
    /// Operand B from the pre-state, if the pre-state reaches it.
    pub operand_b: Option<u64>,
    pub expected: u64,
    /// `None` when the simulator reported the word as unknown.
    pub actual: Option<u64>,
    pub diagnosis: Diagnosis,
}

impl Mismatch {
    /// Wrapping sum of the reconstructed operands.
    #[must_use]
    pub fn operand_sum(&self) -> Option<u64> {
        Some(self.operand_a?.wrapping_add(self.operand_b?))
    }
}

/// Memory bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bank {
    Upper,
    Lower,
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upper => f.write_str("upper"),
            Self::Lower => f.write_str("lower"),
        }
    }
}

/// Expected and actual images of one bank differ in length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    pub bank: Bank,
    pub expected: usize,
    pub actual: usize,
}

/// An operand address changed between pre-state and actual post-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corruption {
    pub address: usize,
    pub pre_state: (WordState, WordState),
    pub actual: (WordState, WordState),
}

/// Result of the operand integrity check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Operand addresses compared.
    pub checked: usize,
    /// Total corrupted addresses.
    pub corrupted: usize,
    /// The first few corrupted addresses.
    pub sample: Vec<Corruption>,
}

impl IntegrityReport {
    /// Check that no operand address changed.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.corrupted == 0
    }
}

/// Word counts of every image involved, as (upper, lower).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageSizes {
    pub pre_state: (usize, usize),
    pub expected: (usize, usize),
    pub actual: (usize, usize),
}

impl ImageSizes {
    fn of(pre: &BankedImage, expected: &BankedImage, actual: &BankedImage) -> Self {
        let sizes = |image: &BankedImage| (image.upper().len(), image.lower().len());
        Self {
            pre_state: sizes(pre),
            expected: sizes(expected),
            actual: sizes(actual),
        }
    }
}

/// Outcome of a semantic verification run.
///
/// The result check and the integrity check are independent: corrupted
/// operands do not fail the result check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    /// Result addresses actually compared.
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Every mismatch, in address order.
    pub mismatches: Vec<Mismatch>,
    /// At most one entry per bank.
    pub length_warnings: Vec<LengthMismatch>,
    /// First result address some image did not reach, if comparison stopped early.
    pub out_of_range: Option<usize>,
    pub integrity: IntegrityReport,
    pub sizes: ImageSizes,
}

impl VerifyOutcome {
    /// Check that results were compared, every one matched, and the comparison
    /// covered the whole result region.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.total > 0 && self.failed == 0 && self.out_of_range.is_none()
    }
}

/// Length warnings between expected and actual images, one per bank.
#[must_use]
pub fn check_lengths(expected: &BankedImage, actual: &BankedImage) -> Vec<LengthMismatch> {
    [
        (Bank::Lower, expected.lower().len(), actual.lower().len()),
        (Bank::Upper, expected.upper().len(), actual.upper().len()),
    ]
    .into_iter()
    .filter(|&(_, expected, actual)| expected != actual)
    .map(|(bank, expected, actual)| LengthMismatch {
        bank,
        expected,
        actual,
    })
    .collect()
}

/// Operands of result slot `slot`, read from the pre-state.
#[must_use]
pub fn reconstruct_operands(
    map: &AddressMap,
    pre_state: &BankedImage,
    slot: usize,
) -> (Option<u64>, Option<u64>) {
    map.result_slot_to_operand_addresses(slot)
        .map_or((None, None), |(a, b)| (pre_state.quad(a), pre_state.quad(b)))
}

/// Compare operand regions of the pre-state and the actual post-state.
#[must_use]
pub fn check_integrity(
    map: &AddressMap,
    pre_state: &BankedImage,
    actual: &BankedImage,
    sample_limit: usize,
) -> IntegrityReport {
    let mut report = IntegrityReport::default();
    let reach = pre_state.len().min(actual.len());

    for region in map.operand_regions() {
        for address in region.start..region.end.min(reach) {
            let (Some(before), Some(after)) = (pre_state.word_pair(address), actual.word_pair(address))
            else {
                continue;
            };
            report.checked += 1;
            if before != after {
                report.corrupted += 1;
                if report.sample.len() < sample_limit {
                    report.sample.push(Corruption {
                        address,
                        pre_state: before,
                        actual: after,
                    });
                }
            }
        }
    }

    if !report.is_clean() {
        warn!(
            corrupted = report.corrupted,
            checked = report.checked,
            "input memory was modified"
        );
    }
    report
}

/// Verify an actual post-state against the expected one.
#[must_use]
pub fn verify(
    pre_state: &BankedImage,
    expected: &BankedImage,
    actual: &BankedImage,
    map: &AddressMap,
    config: &VerifyConfig,
) -> VerifyOutcome {
    let length_warnings = check_lengths(expected, actual);
    for warning in &length_warnings {
        warn!(
            bank = %warning.bank,
            expected = warning.expected,
            actual = warning.actual,
            "length mismatch"
        );
    }

    let results = map.results();
    debug!(start = results.start, end = results.end, "comparing result region");

    let mut total = 0;
    let mut passed = 0;
    let mut mismatches = Vec::new();
    let mut out_of_range = None;

    for (slot, address) in results.range().enumerate() {
        // every image must reach the address; stop at the first one that does not
        let words = pre_state
            .word_pair(address)
            .and(expected.word_pair(address).zip(actual.word_pair(address)));
        let Some((expected_words, actual_words)) = words else {
            warn!(address, compared = total, "address out of range, stopping comparison");
            out_of_range = Some(address);
            break;
        };
        total += 1;

        let Some(expected_value) = WordState::join(expected_words.0, expected_words.1) else {
            // unknown expectation: don't care
            passed += 1;
            continue;
        };
        let actual_value = WordState::join(actual_words.0, actual_words.1);
        if actual_value == Some(expected_value) {
            passed += 1;
            continue;
        }

        let (operand_a, operand_b) = reconstruct_operands(map, pre_state, slot);
        let diagnosis = Diagnosis::classify(actual_value, operand_a, operand_b);
        debug!(address, %diagnosis, "result mismatch");
        mismatches.push(Mismatch {
            address,
            slot,
            operand_a,
            operand_b,
            expected: expected_value,
            actual: actual_value,
            diagnosis,
        });
    }

    let integrity = check_integrity(map, pre_state, actual, config.corruption_sample);
    let failed = mismatches.len();
    info!(total, passed, failed, "verified results");

    VerifyOutcome {
        total,
        passed,
        failed,
        mismatches,
        length_warnings,
        out_of_range,
        integrity,
        sizes: ImageSizes::of(pre_state, expected, actual),
    }
}

/// Read the conventional image files and verify them.
///
/// # Errors
///
/// Returns an error if any image is missing or malformed; verification did
/// not run in that case.
pub fn verify_files(
    files: &StateFiles,
    map: &AddressMap,
    config: &VerifyConfig,
) -> Result<VerifyOutcome> {
    let policy = config.unknown_policy();
    let pre_state = files.pre_state().read(policy)?;
    let expected = files.expected_post_state().read(policy)?;
    let actual = files.actual_post_state().read(policy)?;
    Ok(verify(&pre_state, &expected, &actual, map, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_images;
    use quadcheck_layout::Scenario;
    use quadcheck_mem::MemoryImage;

    fn split_case() -> (AddressMap, BankedImage, BankedImage) {
        let map = Scenario::Split.address_map();
        let images = build_images(&map, |addr| match addr {
            5 => 1,
            261 => 2,
            _ => addr as u64 * 3,
        });
        (map, images.pre_state, images.post_state)
    }

    fn with_value(image: &BankedImage, address: usize, value: u64) -> BankedImage {
        let mut quads: Vec<u64> = image.quads().into_iter().map(Option::unwrap).collect();
        quads[address] = value;
        BankedImage::from_quads(quads)
    }

    fn truncated(image: &BankedImage, len: usize) -> BankedImage {
        BankedImage::new(
            image.upper().words()[..len].iter().copied().collect(),
            image.lower().words()[..len].iter().copied().collect(),
        )
    }

    #[test]
    fn test_matching_images_pass() {
        let (map, pre, post) = split_case();
        let outcome = verify(&pre, &post, &post, &map, &VerifyConfig::default());
        assert!(outcome.passed());
        assert_eq!(outcome.total, 256);
        assert_eq!(outcome.passed, 256);
        assert_eq!(outcome.failed, 0);
        assert!(outcome.length_warnings.is_empty());
        assert!(outcome.integrity.is_clean());
        assert_eq!(outcome.integrity.checked, 512);
        assert_eq!(outcome.sizes.actual, (1024, 1024));
    }

    #[test]
    fn test_copied_operand_a() {
        let (map, pre, post) = split_case();
        assert_eq!(post.quad(773), Some(3));
        let actual = with_value(&post, 773, 1);

        let outcome = verify(&pre, &post, &actual, &map, &VerifyConfig::default());
        assert!(!outcome.passed());
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.passed, 255);
        let mismatch = &outcome.mismatches[0];
        assert_eq!(mismatch.address, 773);
        assert_eq!(mismatch.slot, 5);
        assert_eq!(mismatch.operand_a, Some(1));
        assert_eq!(mismatch.operand_b, Some(2));
        assert_eq!(mismatch.operand_sum(), Some(3));
        assert_eq!(mismatch.expected, 3);
        assert_eq!(mismatch.actual, Some(1));
        assert_eq!(mismatch.diagnosis, Diagnosis::CopiedAOnly);
    }

    #[test]
    fn test_every_mismatch_is_returned() {
        let (map, pre, post) = split_case();
        let zeros: Vec<u64> = (0..1024)
            .map(|addr| if addr >= 768 { 0 } else { post.quad(addr).unwrap() })
            .collect();
        let actual = BankedImage::from_quads(zeros);

        let outcome = verify(&pre, &post, &actual, &map, &VerifyConfig::default());
        // slot 0 adds 0 + 768 = 768, so every slot is non-zero
        assert_eq!(outcome.failed, 256);
        assert_eq!(outcome.mismatches.len(), 256);
        assert!(outcome.mismatches.iter().all(|m| m.diagnosis == Diagnosis::Unwritten));
    }

    #[test]
    fn test_wrapping_addition() {
        let map = Scenario::Split.address_map();
        let images = build_images(&map, |addr| match addr {
            10 => u64::MAX,
            266 => 1,
            _ => 0,
        });
        assert_eq!(images.post_state.quad(778), Some(0));

        // A device that carries into a wider result writes something else.
        let actual = with_value(&images.post_state, 778, 1 << 32);
        let outcome = verify(
            &images.pre_state,
            &images.post_state,
            &actual,
            &map,
            &VerifyConfig::default(),
        );
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.mismatches[0].diagnosis, Diagnosis::ValueMismatch);
    }

    #[test]
    fn test_length_mismatch_clips_and_warns_once_per_bank() {
        let (map, pre, post) = split_case();
        let actual = truncated(&post, 900);

        let outcome = verify(&pre, &post, &actual, &map, &VerifyConfig::default());
        assert_eq!(
            outcome.length_warnings,
            vec![
                LengthMismatch {
                    bank: Bank::Lower,
                    expected: 1024,
                    actual: 900,
                },
                LengthMismatch {
                    bank: Bank::Upper,
                    expected: 1024,
                    actual: 900,
                },
            ]
        );
        // the overlap is still compared, but a partial dump is not a pass
        assert_eq!(outcome.total, 900 - 768);
        assert_eq!(outcome.passed, 900 - 768);
        assert_eq!(outcome.failed, 0);
        assert_eq!(outcome.out_of_range, Some(900));
        assert!(!outcome.passed());
    }

    #[test]
    fn test_actual_shorter_than_result_region() {
        let (map, pre, post) = split_case();
        for len in [0, 700, 768] {
            let actual = truncated(&post, len);
            let outcome = verify(&pre, &post, &actual, &map, &VerifyConfig::default());
            assert_eq!(outcome.total, 0, "len {len}");
            assert_eq!(outcome.out_of_range, Some(768), "len {len}");
            assert_eq!(outcome.length_warnings.len(), 2, "len {len}");
            assert!(!outcome.passed(), "len {len}");
            // operands are still checked where the actual image reaches
            assert_eq!(outcome.integrity.checked, len.min(512), "len {len}");
        }
    }

    #[test]
    fn test_short_pre_state_stops_comparison() {
        let (map, pre, post) = split_case();
        let outcome = verify(&truncated(&pre, 800), &post, &post, &map, &VerifyConfig::default());
        assert_eq!(outcome.total, 800 - 768);
        assert_eq!(outcome.out_of_range, Some(800));
        assert!(outcome.length_warnings.is_empty());
        assert!(!outcome.passed());
    }

    #[test]
    fn test_corruption_detected_even_when_results_match() {
        let (map, pre, post) = split_case();
        let mut actual = post.clone();
        for address in [0, 3, 300, 301, 302, 400, 511] {
            actual = with_value(&actual, address, 0xDEAD);
        }
        // padding changes are not operand corruption
        actual = with_value(&actual, 600, 0xBEEF);

        let config = VerifyConfig::default();
        let outcome = verify(&pre, &post, &actual, &map, &config);
        assert!(outcome.passed());
        assert!(!outcome.integrity.is_clean());
        assert_eq!(outcome.integrity.corrupted, 7);
        assert_eq!(outcome.integrity.sample.len(), config.corruption_sample);
        assert_eq!(outcome.integrity.sample[0].address, 0);
        assert_eq!(outcome.integrity.sample[4].address, 302);
    }

    #[test]
    fn test_unknown_words() {
        let (map, pre, post) = split_case();
        let unknown_at = |image: &BankedImage, address: usize| {
            let mut upper = image.upper().words().to_vec();
            let mut lower = image.lower().words().to_vec();
            upper[address] = WordState::Unknown;
            lower[address] = WordState::Unknown;
            BankedImage::new(MemoryImage::new(upper), MemoryImage::new(lower))
        };

        // unknown expectation is a don't-care
        let expected = unknown_at(&post, 800);
        let actual = with_value(&post, 800, 12345);
        let outcome = verify(&pre, &expected, &actual, &map, &VerifyConfig::default());
        assert!(outcome.passed());

        // unknown actual result is unwritten
        let actual = unknown_at(&post, 800);
        let outcome = verify(&pre, &post, &actual, &map, &VerifyConfig::default());
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.mismatches[0].actual, None);
        assert_eq!(outcome.mismatches[0].diagnosis, Diagnosis::Unwritten);
    }

    #[test]
    fn test_interleaved_reconstruction() {
        let map = Scenario::Interleaved.address_map();
        let images = build_images(&map, |addr| addr as u64 + 100);
        // slot 3 adds addresses 6 and 7
        let actual = with_value(&images.post_state, 387, 107);
        let outcome = verify(
            &images.pre_state,
            &images.post_state,
            &actual,
            &map,
            &VerifyConfig::default(),
        );
        assert_eq!(outcome.total, 128);
        let mismatch = &outcome.mismatches[0];
        assert_eq!((mismatch.operand_a, mismatch.operand_b), (Some(106), Some(107)));
        assert_eq!(mismatch.diagnosis, Diagnosis::CopiedBOnly);
    }
}
