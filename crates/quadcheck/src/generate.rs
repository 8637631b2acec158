//! Test image generation.
//!
//! Fills the operand regions of a scenario's address map, leaves padding and
//! results zeroed in the pre-state, and computes the expected post-state with
//! wrapping 64-bit addition over the map's pairing.

use std::fs;

use quadcheck_layout::{AddressMap, Scenario};
use quadcheck_mem::BankedImage;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

use crate::{Error, Result, StateFiles};

/// Generator settings.
#[derive(Debug, Clone, Default)]
pub struct GenerateConfig {
    /// Memory layout to generate for.
    pub scenario: Scenario,
    /// Fixed RNG seed; a random one is drawn when unset.
    pub seed: Option<u64>,
    /// Also write combined binary+decimal trace files.
    pub debug: bool,
}

impl GenerateConfig {
    /// Configured seed, or a fresh random one.
    #[must_use]
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// One addition the device should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCase {
    pub slot: usize,
    pub address: usize,
    pub operand_a: u64,
    pub operand_b: u64,
    pub result: u64,
}

/// Pre-state, expected post-state, and the additions linking them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImages {
    pub pre_state: BankedImage,
    pub post_state: BankedImage,
    pub cases: Vec<TestCase>,
}

/// Build images with operand values chosen by `operand(addr)`.
pub fn build_images(map: &AddressMap, mut operand: impl FnMut(usize) -> u64) -> GeneratedImages {
    let mut memory = vec![0u64; map.size()];
    for region in map.operand_regions() {
        for addr in region.range() {
            memory[addr] = operand(addr);
        }
    }
    let pre_state = BankedImage::from_quads(memory.iter().copied());

    let mut cases = Vec::with_capacity(map.result_slots());
    for slot in 0..map.result_slots() {
        let (Some((a, b)), Some(address)) = (
            map.result_slot_to_operand_addresses(slot),
            map.result_address(slot),
        ) else {
            continue;
        };
        let case = TestCase {
            slot,
            address,
            operand_a: memory[a],
            operand_b: memory[b],
            result: memory[a].wrapping_add(memory[b]),
        };
        memory[address] = case.result;
        cases.push(case);
    }
    let post_state = BankedImage::from_quads(memory);

    GeneratedImages {
        pre_state,
        post_state,
        cases,
    }
}

/// Build images with operands drawn from a seeded RNG.
#[must_use]
pub fn generate(map: &AddressMap, seed: u64) -> GeneratedImages {
    let mut rng = StdRng::seed_from_u64(seed);
    build_images(map, |_| rng.next_u64())
}

/// Images written by one generator run.
#[derive(Debug, Clone)]
pub struct GenerationRun {
    /// Seed the operands were drawn from.
    pub seed: u64,
    pub images: GeneratedImages,
}

/// Generate images and write them under `files`, creating the directory.
///
/// # Errors
///
/// Returns an error if the directory or any file cannot be written.
pub fn generate_to_dir(config: &GenerateConfig, files: &StateFiles) -> Result<GenerationRun> {
    let seed = config.seed_or_random();
    let map = config.scenario.address_map();
    let images = generate(&map, seed);

    fs::create_dir_all(files.dir()).map_err(|source| Error::Io {
        path: files.dir().to_path_buf(),
        source,
    })?;
    files.pre_state().write(&images.pre_state)?;
    files.expected_post_state().write(&images.post_state)?;

    if config.debug {
        for (path, image) in [
            (files.pre_state_trace(), &images.pre_state),
            (files.post_state_trace(), &images.post_state),
        ] {
            fs::write(&path, image.trace_text()).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "wrote trace file");
        }
    }

    info!(
        scenario = %config.scenario,
        seed,
        cases = images.cases.len(),
        dir = %files.dir().display(),
        "generated test images"
    );

    Ok(GenerationRun { seed, images })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadcheck_layout::RegionKind;
    use quadcheck_mem::UnknownPolicy;

    #[test]
    fn test_split_layout_contents() {
        let map = Scenario::Split.address_map();
        let images = build_images(&map, |addr| addr as u64 + 1);

        assert_eq!(images.pre_state.len(), 1024);
        assert_eq!(images.pre_state.quad(5), Some(6));
        assert_eq!(images.pre_state.quad(600), Some(0));
        assert_eq!(images.pre_state.quad(773), Some(0));

        // slot 5 adds addresses 5 and 261
        assert_eq!(images.post_state.quad(773), Some(6 + 262));
        assert_eq!(images.cases.len(), 256);
        assert_eq!(
            images.cases[5],
            TestCase {
                slot: 5,
                address: 773,
                operand_a: 6,
                operand_b: 262,
                result: 268,
            }
        );
    }

    #[test]
    fn test_post_state_keeps_inputs() {
        for scenario in Scenario::ALL {
            let map = scenario.address_map();
            let images = generate(&map, 7);
            let results = map.results();
            for addr in 0..map.size() {
                if !results.contains(addr) {
                    assert_eq!(images.pre_state.quad(addr), images.post_state.quad(addr));
                }
            }
            let padding = map.region(RegionKind::Padding).unwrap();
            assert!(padding.range().all(|addr| images.pre_state.quad(addr) == Some(0)));
        }
    }

    #[test]
    fn test_interleaved_pairs_neighbours() {
        let map = Scenario::Interleaved.address_map();
        let images = build_images(&map, |addr| if addr == 10 { u64::MAX } else { 1 });
        assert_eq!(images.pre_state.len(), 512);
        // slot 5 adds addresses 10 and 11 and wraps
        assert_eq!(images.post_state.quad(389), Some(0));
        assert_eq!(images.post_state.quad(384), Some(2));
    }

    #[test]
    fn test_seed_is_deterministic() {
        let map = Scenario::Split.address_map();
        assert_eq!(generate(&map, 42), generate(&map, 42));
        assert_ne!(generate(&map, 42), generate(&map, 43));
    }

    #[test]
    fn test_generate_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let files = StateFiles::new(dir.path().join("nested"));
        let config = GenerateConfig {
            scenario: Scenario::Interleaved,
            seed: Some(1),
            debug: true,
        };
        let run = generate_to_dir(&config, &files).unwrap();
        assert_eq!(run.seed, 1);

        let pre = files.pre_state().read(UnknownPolicy::Reject).unwrap();
        assert_eq!(pre, run.images.pre_state);
        let post = files.expected_post_state().read(UnknownPolicy::Reject).unwrap();
        assert_eq!(post, run.images.post_state);

        let trace = fs::read_to_string(files.post_state_trace()).unwrap();
        assert_eq!(trace.lines().count(), 512);
        let first = run.images.post_state.quad(0).unwrap();
        assert!(trace.lines().next().unwrap().ends_with(&format!("({first})")));
    }

    #[test]
    fn test_no_trace_without_debug() {
        let dir = tempfile::tempdir().unwrap();
        let files = StateFiles::new(dir.path());
        let config = GenerateConfig {
            seed: Some(3),
            ..Default::default()
        };
        generate_to_dir(&config, &files).unwrap();
        assert!(files.pre_state().upper.exists());
        assert!(!files.pre_state_trace().exists());
    }
}
