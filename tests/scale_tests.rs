//! Scale tests: large arrays that exercise the recursive driver well past
//! the network-sort threshold and the depth bound, following the teacher
//! crate's own `scale_tests.rs` in spirit (large-N timing-adjacent checks)
//! though without the teacher's string/byte-key domain.

use std::time::Instant;
use vsort::prelude::*;

fn is_sorted<T: SimdElement>(v: &[T]) -> bool {
    v.windows(2).all(|w| !w[1].lt(w[0]))
}

#[test]
fn sorts_one_million_i32() {
    let count = 1_000_000;
    let mut v: Vec<i32> = (0..count as i64).map(|x| ((x * 2654435761) % 1_000_003) as i32).collect();

    let start = Instant::now();
    sort(&mut v);
    let elapsed = start.elapsed();
    println!("sorted {count} i32s in {elapsed:?}");

    assert!(is_sorted(&v));
    assert_eq!(v.len(), count);
}

#[test]
fn sorts_half_million_f64_with_scattered_nans() {
    let count = 500_000;
    let mut v: Vec<f64> = (0..count as i64).map(|x| ((x * 48271) % 1_000_003) as f64).collect();
    for i in (0..count).step_by(997) {
        v[i] = f64::NAN;
    }
    let nan_count = v.iter().filter(|x| x.is_nan()).count();

    sort(&mut v);

    let sorted_nan_count = v.iter().filter(|x| x.is_nan()).count();
    assert_eq!(sorted_nan_count, nan_count);
    let first_nan = v.iter().position(|x| x.is_nan()).unwrap_or(v.len());
    assert!(is_sorted(&v[..first_nan]));
    assert!(v[first_nan..].iter().all(|x| x.is_nan()));
}

#[test]
fn selects_median_of_large_array() {
    let count = 300_000;
    let mut v: Vec<i64> = (0..count as i64).rev().collect();
    let k = count / 2;
    select(&mut v, k, false);
    assert_eq!(v[k], k as i64);
}

#[test]
fn partial_sorts_small_k_of_large_array() {
    let count = 400_000;
    let v: Vec<u32> = (0..count as u32).rev().collect();
    let mut a = v.clone();
    partial_sort(&mut a, 50, false);
    assert_eq!(&a[..50], &(0u32..50).collect::<Vec<_>>()[..]);
}

/// Adversarial pattern (many repeats of a pivot-heavy pattern) that would
/// degrade a naive median-of-three quicksort toward O(n^2); the depth
/// bound must still cap recursion and fall back to heapsort.
#[test]
fn adversarial_organ_pipe_pattern_still_sorts_correctly() {
    let count = 200_000;
    let half = count / 2;
    let mut v: Vec<i32> = (0..half as i32)
        .chain((0..(count - half) as i32).rev())
        .collect();
    let mut reference = v.clone();
    reference.sort();
    sort(&mut v);
    assert_eq!(v, reference);
}
