//! Launch configuration for the dot-product reduction.

use crate::error::{Error, Result};

/// Default threads per block for the CUDA kernel.
pub const DEFAULT_THREADS_PER_BLOCK: u32 = 256;

/// Default cap on the number of blocks in the launch grid.
pub const DEFAULT_MAX_GRID_BLOCKS: u32 = 2048;

/// Hardware ceiling on threads per block.
const MAX_THREADS_PER_BLOCK: u32 = 1024;

/// Block sizes must be a multiple of this so every warp in a block is full.
const WARP_ALIGN: u32 = 32;

/// Controls how the CUDA dot kernel is laid out on the device.
///
/// The kernel uses a grid-strided loop, so any positive block count produces
/// the correct sum. `max_grid_blocks` caps the grid when the input is large:
/// past that point extra blocks only add atomic traffic without improving
/// occupancy. The CPU backend ignores the configuration entirely.
///
/// # Examples
///
/// ```
/// use dotr::ops::DotConfig;
///
/// let config = DotConfig::default();
/// assert_eq!(config.threads_per_block, 256);
/// assert_eq!(config.max_grid_blocks, 2048);
///
/// let wide = DotConfig::new(512, 4096)?;
/// assert_eq!(wide.grid_blocks(1024), 2);
/// # Ok::<(), dotr::error::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotConfig {
    /// Threads per block. Must be in `1..=1024` and a multiple of 32.
    pub threads_per_block: u32,
    /// Upper bound on grid blocks. Must be at least 1.
    pub max_grid_blocks: u32,
}

impl DotConfig {
    /// Creates a configuration, rejecting values the kernel cannot launch with.
    pub fn new(threads_per_block: u32, max_grid_blocks: u32) -> Result<Self> {
        let config = Self {
            threads_per_block,
            max_grid_blocks,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the launch constraints.
    ///
    /// Called again at dispatch time because the fields are public and a
    /// configuration can be built without going through [`DotConfig::new`].
    pub fn validate(&self) -> Result<()> {
        if self.threads_per_block == 0 || self.threads_per_block > MAX_THREADS_PER_BLOCK {
            return Err(Error::invalid_argument(
                "threads_per_block",
                format!(
                    "{} is outside 1..={}",
                    self.threads_per_block, MAX_THREADS_PER_BLOCK
                ),
            ));
        }
        if self.threads_per_block % WARP_ALIGN != 0 {
            return Err(Error::invalid_argument(
                "threads_per_block",
                format!(
                    "{} is not a multiple of {}",
                    self.threads_per_block, WARP_ALIGN
                ),
            ));
        }
        if self.max_grid_blocks == 0 {
            return Err(Error::invalid_argument(
                "max_grid_blocks",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Number of blocks to launch for `numel` elements.
    ///
    /// One thread per element rounded up, clamped to `max_grid_blocks`. The
    /// grid-strided loop in the kernel covers the remainder when clamped.
    pub fn grid_blocks(&self, numel: usize) -> u32 {
        let per_block = self.threads_per_block as usize;
        let blocks = (numel + per_block - 1) / per_block;
        blocks.max(1).min(self.max_grid_blocks as usize) as u32
    }
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            threads_per_block: DEFAULT_THREADS_PER_BLOCK,
            max_grid_blocks: DEFAULT_MAX_GRID_BLOCKS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DotConfig::default();
        assert_eq!(config.threads_per_block, DEFAULT_THREADS_PER_BLOCK);
        assert_eq!(config.max_grid_blocks, DEFAULT_MAX_GRID_BLOCKS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_accepts_warp_multiples() {
        for tpb in [32, 64, 128, 256, 512, 1024] {
            let config = DotConfig::new(tpb, 16).unwrap();
            assert_eq!(config.threads_per_block, tpb);
        }
    }

    #[test]
    fn test_new_rejects_zero_threads() {
        let err = DotConfig::new(0, 2048).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument {
                arg: "threads_per_block",
                ..
            }
        ));
    }

    #[test]
    fn test_new_rejects_non_warp_multiple() {
        assert!(DotConfig::new(100, 2048).is_err());
        assert!(DotConfig::new(33, 2048).is_err());
    }

    #[test]
    fn test_new_rejects_oversized_block() {
        assert!(DotConfig::new(1056, 2048).is_err());
        assert!(DotConfig::new(2048, 2048).is_err());
    }

    #[test]
    fn test_new_rejects_zero_blocks() {
        let err = DotConfig::new(256, 0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument {
                arg: "max_grid_blocks",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_catches_direct_construction() {
        let config = DotConfig {
            threads_per_block: 7,
            max_grid_blocks: 2048,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_grid_blocks_rounds_up() {
        let config = DotConfig::default();
        assert_eq!(config.grid_blocks(1), 1);
        assert_eq!(config.grid_blocks(256), 1);
        assert_eq!(config.grid_blocks(257), 2);
        assert_eq!(config.grid_blocks(512), 2);
    }

    #[test]
    fn test_grid_blocks_caps_at_max() {
        let config = DotConfig::default();
        // 2048 blocks of 256 threads cover exactly 524288 elements.
        assert_eq!(config.grid_blocks(524_288), 2048);
        assert_eq!(config.grid_blocks(524_289), 2048);
        assert_eq!(config.grid_blocks(100_000_000), 2048);
    }

    #[test]
    fn test_grid_blocks_small_cap() {
        let config = DotConfig::new(32, 4).unwrap();
        assert_eq!(config.grid_blocks(32), 1);
        assert_eq!(config.grid_blocks(128), 4);
        // 129 elements need 5 blocks of 32 but the cap wins.
        assert_eq!(config.grid_blocks(129), 4);
        assert_eq!(config.grid_blocks(1_000_000), 4);
    }

    #[test]
    fn test_grid_blocks_empty_input() {
        let config = DotConfig::default();
        assert_eq!(config.grid_blocks(0), 1);
    }
}
