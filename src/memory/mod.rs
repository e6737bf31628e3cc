pub(crate) mod dual_pool;
pub(crate) mod region;
