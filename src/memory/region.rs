use crate::foundation::error::{LottieError, LottieResult};
use crate::foundation::sync::lock;
use std::sync::{Arc, Mutex};

/// One of the two memory pools available to the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Region {
    /// Large capacity, higher latency (external RAM).
    A,
    /// Small capacity, low latency (internal RAM).
    B,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::A => f.write_str("A"),
            Region::B => f.write_str("B"),
        }
    }
}

/// Counters for one region.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegionStats {
    /// Bytes currently leased out.
    pub in_use_bytes: usize,
    /// High-water mark of `in_use_bytes`.
    pub peak_bytes: usize,
    /// Blocks currently alive.
    pub live_blocks: usize,
    /// Successful allocations since creation.
    pub allocations: u64,
    /// Rejected allocations since creation.
    pub failed_allocations: u64,
}

struct RegionInner {
    region: Region,
    capacity: usize,
    stats: Mutex<RegionStats>,
}

impl RegionInner {
    fn release(&self, len: usize) {
        let mut st = lock(&self.stats);
        st.in_use_bytes = st.in_use_bytes.saturating_sub(len);
        st.live_blocks = st.live_blocks.saturating_sub(1);
    }
}

/// Bounded byte budget standing in for one physical memory region.
///
/// Cloning is cheap and yields a handle to the same budget.
#[derive(Clone)]
pub struct RegionPool {
    inner: Arc<RegionInner>,
}

impl std::fmt::Debug for RegionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionPool")
            .field("region", &self.inner.region)
            .field("capacity", &self.inner.capacity)
            .field("stats", &self.stats())
            .finish()
    }
}

impl RegionPool {
    /// Create a region with a fixed byte capacity.
    pub fn new(region: Region, capacity: usize) -> Self {
        Self {
            inner: Arc::new(RegionInner {
                region,
                capacity,
                stats: Mutex::new(RegionStats::default()),
            }),
        }
    }

    /// Which region this pool models.
    pub fn region(&self) -> Region {
        self.inner.region
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> RegionStats {
        lock(&self.inner.stats).clone()
    }

    /// Bytes still available.
    pub fn available(&self) -> usize {
        self.inner
            .capacity
            .saturating_sub(lock(&self.inner.stats).in_use_bytes)
    }

    /// Lease `size` bytes of zero-filled, backed memory.
    pub fn allocate_zeroed(&self, size: usize) -> LottieResult<RegionBlock> {
        self.claim(size)?;
        let mut bytes = Vec::new();
        if bytes.try_reserve_exact(size).is_err() {
            // The host itself is out of memory; treat it like an exhausted region.
            self.inner.release(size);
            self.record_failure();
            return Err(LottieError::allocation(self.inner.region, size, 0));
        }
        bytes.resize(size, 0);
        Ok(RegionBlock {
            pool: Arc::clone(&self.inner),
            len: size,
            bytes,
        })
    }

    /// Lease `size` bytes of budget without backing memory.
    ///
    /// Used for memory the platform allocates on our behalf (thread stacks, control blocks).
    pub fn reserve(&self, size: usize) -> LottieResult<RegionBlock> {
        self.claim(size)?;
        Ok(RegionBlock {
            pool: Arc::clone(&self.inner),
            len: size,
            bytes: Vec::new(),
        })
    }

    fn claim(&self, size: usize) -> LottieResult<()> {
        if size == 0 {
            return Err(LottieError::validation("region allocation size must be > 0"));
        }
        let mut st = lock(&self.inner.stats);
        let available = self.inner.capacity.saturating_sub(st.in_use_bytes);
        if size > available {
            st.failed_allocations = st.failed_allocations.saturating_add(1);
            return Err(LottieError::allocation(self.inner.region, size, available));
        }
        st.in_use_bytes += size;
        st.peak_bytes = st.peak_bytes.max(st.in_use_bytes);
        st.live_blocks += 1;
        st.allocations = st.allocations.saturating_add(1);
        Ok(())
    }

    fn record_failure(&self) {
        let mut st = lock(&self.inner.stats);
        st.allocations = st.allocations.saturating_sub(1);
        st.failed_allocations = st.failed_allocations.saturating_add(1);
    }
}

/// A lease on region memory. Dropping it returns the bytes to the region.
pub struct RegionBlock {
    pool: Arc<RegionInner>,
    len: usize,
    // Empty for reservations.
    bytes: Vec<u8>,
}

impl std::fmt::Debug for RegionBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionBlock")
            .field("region", &self.pool.region)
            .field("len", &self.len)
            .field("backed", &self.is_backed())
            .finish()
    }
}

impl RegionBlock {
    /// Region the block was leased from.
    pub fn region(&self) -> Region {
        self.pool.region
    }

    /// Leased size in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: blocks are never empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `true` when the block owns addressable memory.
    pub fn is_backed(&self) -> bool {
        !self.bytes.is_empty()
    }

    /// Borrow the backing bytes (empty for reservations).
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutably borrow the backing bytes (empty for reservations).
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Zero the backing bytes.
    pub fn zero(&mut self) {
        self.bytes.fill(0);
    }
}

impl Drop for RegionBlock {
    fn drop(&mut self) {
        self.pool.release(self.len);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/memory/region.rs"]
mod tests;
