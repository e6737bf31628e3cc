use super::*;

#[test]
fn drop_returns_bytes_to_region() {
    let pool = RegionPool::new(Region::A, 1024);
    let block = pool.allocate_zeroed(600).unwrap();
    assert_eq!(pool.available(), 424);
    assert_eq!(pool.stats().live_blocks, 1);

    drop(block);
    let st = pool.stats();
    assert_eq!(st.in_use_bytes, 0);
    assert_eq!(st.live_blocks, 0);
    assert_eq!(st.peak_bytes, 600);
}

#[test]
fn over_capacity_request_is_rejected_and_counted() {
    let pool = RegionPool::new(Region::B, 100);
    let _held = pool.reserve(80).unwrap();

    let err = pool.reserve(40).unwrap_err();
    match err {
        LottieError::Allocation {
            region,
            requested,
            available,
        } => {
            assert_eq!(region, Region::B);
            assert_eq!(requested, 40);
            assert_eq!(available, 20);
        }
        other => panic!("expected allocation error, got {other}"),
    }
    assert_eq!(pool.stats().failed_allocations, 1);
    assert_eq!(pool.stats().in_use_bytes, 80);
}

#[test]
fn zeroed_blocks_are_backed_and_reservations_are_not() {
    let pool = RegionPool::new(Region::A, 64);
    let mut px = pool.allocate_zeroed(16).unwrap();
    assert!(px.is_backed());
    assert!(px.as_slice().iter().all(|&b| b == 0));

    px.as_mut_slice()[3] = 9;
    px.zero();
    assert_eq!(px.as_slice()[3], 0);

    let stack = pool.reserve(32).unwrap();
    assert!(!stack.is_backed());
    assert!(stack.as_slice().is_empty());
    assert_eq!(stack.len(), 32);
    assert_eq!(pool.available(), 16);
}

#[test]
fn zero_sized_requests_are_invalid() {
    let pool = RegionPool::new(Region::A, 64);
    assert!(matches!(
        pool.reserve(0),
        Err(LottieError::Validation(_))
    ));
    assert_eq!(pool.stats().allocations, 0);
}

#[test]
fn clones_share_one_budget() {
    let pool = RegionPool::new(Region::A, 10);
    let other = pool.clone();
    let _a = pool.reserve(6).unwrap();
    assert!(other.reserve(6).is_err());
    assert_eq!(other.available(), 4);
}
