//! Bubble sort over random integers.

use rand::Rng;

/// Fills a vector with `n` random integers in `[0, 100)` and bubble-sorts it.
///
/// Quadratic on purpose: no early exit when a pass makes no swaps.
pub fn bubble_sort(n: usize) -> Vec<u32> {
    let mut rng = rand::thread_rng();
    let mut arr: Vec<u32> = (0..n).map(|_| rng.gen_range(0..100)).collect();

    for i in 0..n {
        for j in 0..n - i - 1 {
            if arr[j] > arr[j + 1] {
                arr.swap(j, j + 1);
            }
        }
    }
    arr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_sorted() {
        let arr = bubble_sort(300);
        assert_eq!(arr.len(), 300);
        assert!(arr.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn values_stay_in_range() {
        assert!(bubble_sort(100).iter().all(|&v| v < 100));
    }

    #[test]
    fn tiny_inputs() {
        assert!(bubble_sort(0).is_empty());
        assert_eq!(bubble_sort(1).len(), 1);
    }
}
