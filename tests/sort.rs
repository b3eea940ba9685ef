//! Parallel mergesort equivalence against the standard library's own
//! unstable sort (spec.md §8 testable property 11), using `rand` for
//! broader input coverage than the in-crate `SplitMix64`-based unit tests.

use kernelkit::mergesort_parallel;
use rand::Rng;

#[test]
fn matches_sort_unstable_across_many_random_sizes() {
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let len = rng.gen_range(0..20_000);
        let mut v: Vec<i64> = (0..len).map(|_| rng.gen_range(-1_000_000..1_000_000)).collect();
        let mut expected = v.clone();
        expected.sort_unstable();
        mergesort_parallel(&mut v);
        assert_eq!(v, expected, "mismatch at length {len}");
    }
}

#[test]
fn matches_sort_unstable_with_many_duplicate_keys() {
    let mut rng = rand::thread_rng();
    let mut v: Vec<u8> = (0..30_000).map(|_| rng.gen_range(0..5)).collect();
    let mut expected = v.clone();
    expected.sort_unstable();
    mergesort_parallel(&mut v);
    assert_eq!(v, expected);
}
