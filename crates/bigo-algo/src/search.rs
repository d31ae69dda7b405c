//! Linear and binary search over synthetic inputs.

use std::hint::black_box;

use rand::Rng;

/// Walks `0..n` until it reaches the last index.
///
/// Returns `None` when `n == 0`.
pub fn linear_search(n: usize) -> Option<usize> {
    let target = n.checked_sub(1)?;
    (0..n).find(|&i| black_box(i) == target)
}

/// Sorts `n` random integers in `[0, 100)` and binary-searches for the
/// last element.
///
/// With duplicates the returned index is any position holding the target.
/// Returns `None` when `n == 0`.
pub fn binary_search(n: usize) -> Option<usize> {
    let mut rng = rand::thread_rng();
    let mut arr: Vec<u32> = (0..n).map(|_| rng.gen_range(0..100)).collect();
    arr.sort_unstable();

    let target = *arr.last()?;
    let (mut left, mut right) = (0usize, arr.len());

    while left < right {
        let mid = left + (right - left) / 2;
        match arr[mid].cmp(&target) {
            std::cmp::Ordering::Equal   => return Some(mid),
            std::cmp::Ordering::Less    => left = mid + 1,
            std::cmp::Ordering::Greater => right = mid,
        }
    }
    None
}
