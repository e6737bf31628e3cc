use crate::foundation::error::LottieResult;
use crate::memory::region::{Region, RegionBlock, RegionPool, RegionStats};

/// Kind of resource an asset needs while live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceClass {
    /// Frame pixels the engine renders into.
    PixelBuffer,
    /// Stack of the asset's worker.
    WorkerStack,
    /// Worker control block.
    ControlBlock,
}

impl ResourceClass {
    /// Region a class is always placed in. There is no fallback to the other region.
    pub fn region(self) -> Region {
        match self {
            ResourceClass::PixelBuffer | ResourceClass::WorkerStack => Region::A,
            ResourceClass::ControlBlock => Region::B,
        }
    }
}

/// Snapshot of both regions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PoolUsage {
    /// Region A counters.
    pub a: RegionStats,
    /// Region B counters.
    pub b: RegionStats,
}

impl PoolUsage {
    /// Bytes in use across both regions.
    pub fn total_in_use(&self) -> usize {
        self.a.in_use_bytes + self.b.in_use_bytes
    }
}

/// Policy layer choosing a region per [`ResourceClass`].
#[derive(Clone, Debug)]
pub struct DualPool {
    a: RegionPool,
    b: RegionPool,
}

impl DualPool {
    /// Create both regions with the given capacities in bytes.
    pub fn new(region_a_bytes: usize, region_b_bytes: usize) -> Self {
        Self {
            a: RegionPool::new(Region::A, region_a_bytes),
            b: RegionPool::new(Region::B, region_b_bytes),
        }
    }

    /// Borrow the pool backing `region`.
    pub fn region(&self, region: Region) -> &RegionPool {
        match region {
            Region::A => &self.a,
            Region::B => &self.b,
        }
    }

    /// Lease `size` bytes for `class`.
    ///
    /// Pixel buffers come back zero-filled. Stacks and control blocks are budget reservations;
    /// the platform provides their memory when the worker is created.
    pub fn allocate(&self, class: ResourceClass, size: usize) -> LottieResult<RegionBlock> {
        let pool = self.region(class.region());
        let block = match class {
            ResourceClass::PixelBuffer => pool.allocate_zeroed(size),
            ResourceClass::WorkerStack | ResourceClass::ControlBlock => pool.reserve(size),
        };
        if let Err(e) = &block {
            tracing::error!(?class, size, error = %e, "region allocation failed");
        }
        block
    }

    /// Counters for both regions.
    pub fn usage(&self) -> PoolUsage {
        PoolUsage {
            a: self.a.stats(),
            b: self.b.stats(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/memory/dual_pool.rs"]
mod tests;
