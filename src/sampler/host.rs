//! Host samplers
//!
//! CPU usage is averaged over a blocking observation window. Memory usage is
//! an instantaneous sysinfo read; disk usage comes from statvfs on the
//! watched path itself.

use super::traits::Sampler;
use crate::domain::{Metric, Usage};
use crate::error::SampleError;

use std::path::{Path, PathBuf};
use std::time::Duration;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

/// Global CPU utilization averaged over a fixed window
pub struct CpuSampler {
    system: System,
    window: Duration,
}

impl CpuSampler {
    /// Default observation window
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    /// Create a sampler with a custom window
    ///
    /// The window never drops below the OS minimum refresh interval, since
    /// shorter windows yield meaningless deltas.
    pub fn with_window(window: Duration) -> Self {
        let refresh = RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage());
        Self {
            system: System::new_with_specifics(refresh),
            window: window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for CpuSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for CpuSampler {
    fn metric(&self) -> Metric {
        Metric::Cpu
    }

    fn sample(&mut self) -> Result<Usage, SampleError> {
        // Two refreshes bracket the window; usage is the delta between them
        self.system.refresh_cpu_usage();
        std::thread::sleep(self.window);
        self.system.refresh_cpu_usage();

        if self.system.cpus().is_empty() {
            return Err(SampleError::Unavailable(
                "no CPUs reported by the OS".to_string(),
            ));
        }

        Ok(Usage::new(self.system.global_cpu_usage() as f64))
    }
}

/// Share of physical memory not available to new allocations
pub struct MemorySampler {
    system: System,
}

impl MemorySampler {
    pub fn new() -> Self {
        let refresh = RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram());
        Self {
            system: System::new_with_specifics(refresh),
        }
    }
}

impl Default for MemorySampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for MemorySampler {
    fn metric(&self) -> Metric {
        Metric::Memory
    }

    fn sample(&mut self) -> Result<Usage, SampleError> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        let available = self.system.available_memory();

        Usage::from_ratio(total.saturating_sub(available), total).ok_or_else(|| {
            SampleError::Unavailable("total memory reported as zero".to_string())
        })
    }
}

/// Block counts of one filesystem, as reported by statvfs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCounts {
    /// Total data blocks
    pub blocks: u64,
    /// Free blocks, including those reserved for root
    pub blocks_free: u64,
    /// Free blocks available to unprivileged users
    pub blocks_available: u64,
    /// Size of one block in bytes
    pub fragment_size: u64,
}

impl BlockCounts {
    /// Usage the way `df` reports it: `used / (used + available)`
    ///
    /// Blocks reserved for root count as neither used nor available.
    /// Returns `None` for a filesystem with no usable capacity.
    pub fn usage(&self) -> Option<Usage> {
        let used = self.blocks.saturating_sub(self.blocks_free) as u128 * self.fragment_size as u128;
        let available = self.blocks_available as u128 * self.fragment_size as u128;
        let capacity = used + available;
        if capacity == 0 {
            return None;
        }
        Some(Usage::new(used as f64 / capacity as f64 * 100.0))
    }
}

/// Usage of the filesystem that holds a given path
pub struct DiskSampler {
    path: PathBuf,
}

impl DiskSampler {
    /// Root filesystem
    pub const DEFAULT_PATH: &'static str = "/";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for DiskSampler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl Sampler for DiskSampler {
    fn metric(&self) -> Metric {
        Metric::Disk
    }

    fn sample(&mut self) -> Result<Usage, SampleError> {
        let counts = block_counts(&self.path)?;
        log::debug!("{}: {:?}", self.path.display(), counts);

        counts.usage().ok_or_else(|| {
            SampleError::Unavailable(format!(
                "{} reports zero capacity",
                self.path.display()
            ))
        })
    }
}

#[cfg(unix)]
#[allow(clippy::unnecessary_cast)]
fn block_counts(path: &Path) -> Result<BlockCounts, SampleError> {
    let stats = nix::sys::statvfs::statvfs(path).map_err(|errno| SampleError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::from(errno),
    })?;

    // Field widths differ between platforms
    Ok(BlockCounts {
        blocks: stats.blocks() as u64,
        blocks_free: stats.blocks_free() as u64,
        blocks_available: stats.blocks_available() as u64,
        fragment_size: stats.fragment_size() as u64,
    })
}

#[cfg(not(unix))]
fn block_counts(path: &Path) -> Result<BlockCounts, SampleError> {
    Err(SampleError::Unavailable(format!(
        "disk usage for {} needs statvfs",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(blocks: u64, blocks_free: u64, blocks_available: u64) -> BlockCounts {
        BlockCounts {
            blocks,
            blocks_free,
            blocks_available,
            fragment_size: 4096,
        }
    }

    #[test]
    fn test_block_usage_excludes_reserved_blocks() {
        // 1000 blocks, 600 free, 550 of them available: 50 reserved for root.
        // used = 400, so 400 / (400 + 550), not 450 / 1000
        let usage = counts(1000, 600, 550).usage().unwrap();
        assert!((usage.as_percent() - 400.0 / 950.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_block_usage_matches_df() {
        // df -P reports Used 16954332 and Available 83847944 (1K blocks) as 17%
        let counts = BlockCounts {
            blocks: 105_000_000,
            blocks_free: 105_000_000 - 16_954_332,
            blocks_available: 83_847_944,
            fragment_size: 1024,
        };
        let usage = counts.usage().unwrap();
        assert_eq!(usage.as_percent().ceil(), 17.0);
    }

    #[test]
    fn test_block_usage_empty_and_full() {
        assert_eq!(counts(1000, 1000, 1000).usage().unwrap().as_percent(), 0.0);
        assert_eq!(counts(1000, 50, 0).usage().unwrap().as_percent(), 100.0);
        assert!(counts(0, 0, 0).usage().is_none());
    }

    #[test]
    fn test_cpu_window_has_floor() {
        let sampler = CpuSampler::with_window(Duration::ZERO);
        assert!(sampler.window() >= sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        assert_eq!(CpuSampler::new().window(), Duration::from_secs(1));
    }

    #[test]
    fn test_metric_kinds() {
        assert_eq!(CpuSampler::default().metric(), Metric::Cpu);
        assert_eq!(MemorySampler::default().metric(), Metric::Memory);
        assert_eq!(DiskSampler::default().metric(), Metric::Disk);
        assert_eq!(DiskSampler::default().path(), Path::new("/"));
    }

    #[test]
    fn test_memory_sample_in_range() {
        let usage = MemorySampler::new().sample().unwrap();
        assert!((0.0..=100.0).contains(&usage.as_percent()));
    }

    #[test]
    fn test_disk_invalid_path_is_io_error() {
        let mut sampler = DiskSampler::new("/definitely/not/a/real/mount/path");
        let err = sampler.sample().unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_disk_reads_filesystem_of_path() {
        use std::os::unix::fs::MetadataExt;

        // /dev/shm is normally tmpfs; skip hosts where it is not its own mount
        let shm = Path::new("/dev/shm");
        let (Ok(shm_meta), Ok(root_meta)) = (std::fs::metadata(shm), std::fs::metadata("/")) else {
            return;
        };
        if shm_meta.dev() == root_meta.dev() {
            return;
        }

        let root = block_counts(Path::new("/")).unwrap();
        let tmpfs = block_counts(shm).unwrap();
        assert_ne!(root, tmpfs);

        let usage = DiskSampler::new(shm).sample().unwrap();
        let expected = tmpfs.usage().unwrap();
        assert!((usage.as_percent() - expected.as_percent()).abs() < 1.0);
    }

    #[test]
    fn test_disk_root_sample_in_range() {
        let usage = DiskSampler::default().sample().unwrap();
        assert!((0.0..=100.0).contains(&usage.as_percent()));
    }
}
