//! L2: the partitioning kernel (§4.1).
//!
//! Rearranges `arr[left..=right]` around `pivot` using mask-compress-store,
//! streaming from both ends at once so that every slot is read before it can
//! be overwritten (Invariant 5). Two entry points share one implementation
//! parameterized by how many lane-vectors are read per side-selection
//! decision: [`partition`] uses `T::UNROLL` (§4.1.3, the unrolled variant
//! the driver calls on its main path) and [`partition_unbatched`] uses `1`
//! (§4.1.2, the plain streaming form) — they are the same algorithm at
//! different granularity, not two separate code paths to keep in sync.
//!
//! The "pick the load side with fewer unwritten reserved slots" rule from
//! §4.1.2 is realized here as comparing `l - l_store` (the left side's
//! unwritten backlog) against `r_store - r` (the right side's): whichever
//! backlog is smaller gets refilled next, which is what keeps a write
//! cursor from ever catching up to a read cursor on the same side. That
//! comparison is re-made before every single lane-vector read — a
//! classified vector's "≥ pivot" lanes always land on the *other* side's
//! store cursor, so fixing the load side across more than one vector can
//! drain the other side's backlog past zero. `batch`/`T::UNROLL` only
//! bounds how many vectors are read before the outer loop re-checks
//! `l < r`, not how many get read under one side decision.

use crate::element::SimdElement;
use crate::vector::Lanes;

/// Outcome of one partition call: the split index plus the range's
/// extrema, both required by the driver's `pivot == smallest`/`biggest`
/// prune (§4.3).
pub struct PartitionResult<T: SimdElement> {
    pub split: usize,
    pub smallest: T,
    pub biggest: T,
}

/// Partitions `arr[left..=right]` around `pivot` using the unrolled
/// streaming kernel (§4.1.3). This is what the driver's main sort/select
/// path calls.
#[inline]
pub fn partition<T: SimdElement>(arr: &mut [T], left: usize, right: usize, pivot: T) -> PartitionResult<T> {
    partition_with_batch(arr, left, right, pivot, T::UNROLL)
}

/// Partitions `arr[left..=right]` around `pivot` one lane-vector at a time
/// per side-selection decision (§4.1.2, the non-unrolled form). Kept as a
/// separate public entry point because the spec describes it as the base
/// algorithm the unrolled variant batches.
#[inline]
pub fn partition_unbatched<T: SimdElement>(arr: &mut [T], left: usize, right: usize, pivot: T) -> PartitionResult<T> {
    partition_with_batch(arr, left, right, pivot, 1)
}

fn partition_with_batch<T: SimdElement>(
    arr: &mut [T],
    left: usize,
    right: usize,
    pivot: T,
    batch: usize,
) -> PartitionResult<T> {
    let lanes = T::LANES;
    let right_excl = right + 1;
    debug_assert!(left <= right_excl);
    debug_assert!(right_excl <= arr.len());

    let mut smallest_acc = Lanes::<T>::set1(T::TYPE_MAX);
    let mut biggest_acc = Lanes::<T>::set1(T::TYPE_MIN);

    let total = right_excl - left;
    if total == 0 {
        return finish(left, smallest_acc, biggest_acc);
    }

    if total < lanes {
        let (p, r) = scalar_classify(arr, left, right_excl, total, pivot, &mut smallest_acc, &mut biggest_acc);
        debug_assert_eq!(p, r);
        return finish(p, smallest_acc, biggest_acc);
    }

    let residue = total % lanes;
    let (p, r) = if residue != 0 {
        scalar_classify(arr, left, right_excl, residue, pivot, &mut smallest_acc, &mut biggest_acc)
    } else {
        (left, right_excl)
    };

    if r == p {
        return finish(p, smallest_acc, biggest_acc);
    }

    if r - p == lanes {
        let split = vector_single(arr, p, pivot, lanes, &mut smallest_acc, &mut biggest_acc);
        return finish(split, smallest_acc, biggest_acc);
    }

    let split = streaming_core(arr, p, r, pivot, lanes, batch.max(1), &mut smallest_acc, &mut biggest_acc);
    finish(split, smallest_acc, biggest_acc)
}

#[inline(always)]
fn finish<T: SimdElement>(split: usize, smallest_acc: Lanes<T>, biggest_acc: Lanes<T>) -> PartitionResult<T> {
    PartitionResult {
        split,
        smallest: smallest_acc.reducemin(),
        biggest: biggest_acc.reducemax(),
    }
}

#[inline(always)]
fn fold_scalar_extrema<T: SimdElement>(v: T, smallest_acc: &mut Lanes<T>, biggest_acc: &mut Lanes<T>) {
    let single = Lanes::<T>::set1(v);
    *smallest_acc = smallest_acc.min(&single);
    *biggest_acc = biggest_acc.max(&single);
}

/// Scalar prologue (§4.1.1) and small-range fallback, unified: classifies
/// exactly `steps` elements starting from the front of `[lo, hi)`,
/// appending "< pivot" results forward from `lo` and "≥ pivot" results
/// backward from `hi`. Returns the resulting `(p, r)` boundary: `[lo, p)`
/// is finalized "< pivot", `[r, hi)` is finalized "≥ pivot", and `r - p`
/// has shrunk by exactly `steps` from `hi - lo`.
fn scalar_classify<T: SimdElement>(
    arr: &mut [T],
    lo: usize,
    hi: usize,
    steps: usize,
    pivot: T,
    smallest_acc: &mut Lanes<T>,
    biggest_acc: &mut Lanes<T>,
) -> (usize, usize) {
    let mut p = lo;
    let mut r = hi;
    for _ in 0..steps {
        let v = arr[p];
        fold_scalar_extrema(v, smallest_acc, biggest_acc);
        if v.lt(pivot) {
            p += 1;
        } else {
            r -= 1;
            arr.swap(p, r);
        }
    }
    (p, r)
}

/// Classifies one lane-vector already loaded into `curr` and writes its
/// "< pivot" lanes forward from `l_store`, its "≥ pivot" lanes backward
/// from `r_store` (exclusive). Returns the updated `(l_store, r_store)`.
#[inline(always)]
fn classify_and_store<T: SimdElement>(
    arr: &mut [T],
    curr: &Lanes<T>,
    lanes: usize,
    l_store: usize,
    r_store: usize,
    pivot: T,
    smallest_acc: &mut Lanes<T>,
    biggest_acc: &mut Lanes<T>,
) -> (usize, usize) {
    *smallest_acc = smallest_acc.min(curr);
    *biggest_acc = biggest_acc.max(curr);
    let ge_mask = curr.ge(pivot);
    let lt_mask = Lanes::<T>::knot_opmask(ge_mask);
    let k = ge_mask.count_ones() as usize;
    curr.mask_compressstoreu(&mut arr[l_store..], lt_mask);
    let new_r_store = r_store - k;
    curr.mask_compressstoreu(&mut arr[new_r_store..], ge_mask);
    (l_store + (lanes - k), new_r_store)
}

/// Edge case (§4.1.3 Edge rule): the range is exactly one lane-vector
/// wide, so a single classify-and-store determines the split outright.
fn vector_single<T: SimdElement>(
    arr: &mut [T],
    p: usize,
    pivot: T,
    lanes: usize,
    smallest_acc: &mut Lanes<T>,
    biggest_acc: &mut Lanes<T>,
) -> usize {
    let curr = Lanes::<T>::loadu(&arr[p..]);
    let (l_store, r_store) = classify_and_store(arr, &curr, lanes, p, p + lanes, pivot, smallest_acc, biggest_acc);
    debug_assert_eq!(l_store, r_store);
    l_store
}

/// The streaming two-holdout core (§4.1.2 / §4.1.3). `[p0, r0)` must have
/// length a multiple of `lanes` and at least `2 * lanes`. `batch` is how
/// many lane-vectors are read from one side before the side-selection
/// rule is re-evaluated (1 = non-unrolled, `T::UNROLL` = unrolled).
fn streaming_core<T: SimdElement>(
    arr: &mut [T],
    p0: usize,
    r0: usize,
    pivot: T,
    lanes: usize,
    batch: usize,
    smallest_acc: &mut Lanes<T>,
    biggest_acc: &mut Lanes<T>,
) -> usize {
    debug_assert_eq!((r0 - p0) % lanes, 0);
    debug_assert!(r0 - p0 >= 2 * lanes);

    let vec_left = Lanes::<T>::loadu(&arr[p0..]);
    let vec_right = Lanes::<T>::loadu(&arr[r0 - lanes..]);

    let mut l = p0 + lanes;
    let mut r = r0 - lanes;
    let mut l_store = p0;
    let mut r_store = r0;

    while l < r {
        let steps = batch.min(((r - l) / lanes).max(1));

        for _ in 0..steps {
            if l >= r {
                break;
            }
            // Re-evaluated every vector, not once per batch: storing a
            // vector's "≥ pivot" lanes always lands on the *opposite*
            // side's store cursor, so a run of same-side reads can drain
            // that opposite backlog to zero partway through the batch.
            // `batch` only bounds how many vectors are read before the
            // outer loop re-checks `l < r`; it must never fix which side
            // gets read for more than one vector at a time.
            let left_gap = l - l_store;
            let right_gap = r_store - r;
            let take_left = left_gap <= right_gap;
            let curr = if take_left {
                let v = Lanes::<T>::loadu(&arr[l..]);
                l += lanes;
                v
            } else {
                r -= lanes;
                Lanes::<T>::loadu(&arr[r..])
            };
            let (new_l_store, new_r_store) =
                classify_and_store(arr, &curr, lanes, l_store, r_store, pivot, smallest_acc, biggest_acc);
            l_store = new_l_store;
            r_store = new_r_store;
        }
    }

    for curr in [vec_left, vec_right] {
        let (new_l_store, new_r_store) =
            classify_and_store(arr, &curr, lanes, l_store, r_store, pivot, smallest_acc, biggest_acc);
        l_store = new_l_store;
        r_store = new_r_store;
    }

    debug_assert_eq!(l_store, r_store);
    l_store
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_partition<T: SimdElement + core::fmt::Debug>(mut v: Vec<T>, pivot: T) {
        let original_len = v.len();
        let mut sorted_input = v.clone();
        sorted_input.sort_by(|a, b| if a.lt(*b) { core::cmp::Ordering::Less } else if b.lt(*a) { core::cmp::Ordering::Greater } else { core::cmp::Ordering::Equal });

        let right = original_len - 1;
        let result = partition(&mut v, 0, right, pivot);

        assert_eq!(v.len(), original_len);
        assert!(v[..result.split].iter().all(|&x| x.lt(pivot)));
        assert!(v[result.split..].iter().all(|&x| x.ge(pivot)));

        let mut after = v.clone();
        after.sort_by(|a, b| if a.lt(*b) { core::cmp::Ordering::Less } else if b.lt(*a) { core::cmp::Ordering::Greater } else { core::cmp::Ordering::Equal });
        assert_eq!(after, sorted_input, "multiset not preserved");
    }

    #[test]
    fn partitions_i32_large_range() {
        let v: Vec<i32> = (0..2000).map(|x| (x * 2654435761u32 as i64 % 10007) as i32).collect();
        check_partition(v, 5000);
    }

    #[test]
    fn partitions_exact_single_vector() {
        let v: Vec<i64> = vec![5, 1, 9, 2, 8, 3, 7, 4];
        check_partition(v, 5);
    }

    #[test]
    fn partitions_small_residue_only() {
        let v: Vec<u16> = vec![9, 1, 5];
        check_partition(v, 5);
    }

    #[test]
    fn partitions_all_equal() {
        let v = vec![7i32; 130];
        check_partition(v, 7);
    }

    #[test]
    fn partitions_all_less_and_all_greater() {
        let v: Vec<i32> = (0..130).collect();
        check_partition(v.clone(), -1);
        check_partition(v, 9999);
    }

    /// Regression for a kernel bug where the load-side decision was made
    /// once per `batch` (`T::UNROLL` = 8) vectors instead of once per
    /// vector: a pivot chosen so a long run of same-side reads classifies
    /// mostly to the *opposite* side drains that side's store backlog
    /// past zero and silently drops/duplicates elements.
    #[test]
    fn partitions_with_skewed_pivot_under_full_unroll() {
        let v: Vec<i32> = (0..400).map(|x| (x * 7919) % 1000).collect();
        check_partition(v.clone(), 50);
        check_partition(v, 950);
    }

    #[test]
    fn unbatched_matches_invariants() {
        let v: Vec<i32> = (0..500).rev().collect();
        let original_len = v.len();
        let mut arr = v.clone();
        let result = partition_unbatched(&mut arr, 0, original_len - 1, 250);
        assert!(arr[..result.split].iter().all(|&x| x < 250));
        assert!(arr[result.split..].iter().all(|&x| x >= 250));
    }
}
