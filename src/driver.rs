//! The quicksort/quickselect driver (§4.3): introspective depth-bounded
//! recursion over the L0-L2 building blocks, with the public `sort`,
//! `select`, and `partial_sort` entry points.
//!
//! Both recursive forms share the same shape: dispatch to the network
//! sorter below threshold, fall back to heapsort once the recursion depth
//! budget (`⌊2·log2(N)⌋`) is exhausted, otherwise pick a pivot, partition,
//! and recurse only into the side that still needs work — the larger side
//! of a sort is iterated rather than recursed into, bounding the call
//! stack to O(log N) the way a pattern-defeating quicksort driver does.
//!
//! The `pivot == smallest` / `pivot == biggest` checks are the duplicate
//! run optimization: when the sampled pivot turns out to equal the whole
//! range's minimum or maximum, one side of the partition is known to be a
//! solid run of values equal to the pivot, and recursing into it would
//! just reselect the same pivot. `sort` skips that run outright via
//! [`partition_equal`]; `select` short-circuits immediately if the sought
//! index falls inside it.

use crate::element::SimdElement;
use crate::nan;
use crate::network;
use crate::partition;
use crate::pivot;

/// Sorts `arr` in place in ascending order. NaN-class elements (float
/// types only) sort to the end.
pub fn sort<T: SimdElement>(arr: &mut [T]) {
    if arr.len() < 2 {
        return;
    }
    if T::IS_FLOAT {
        nan::replace_nan_with_inf(arr);
    }
    let depth_limit = depth_limit_for(arr.len());
    recursive_sort(arr, 0, arr.len() - 1, depth_limit);
    if T::IS_FLOAT {
        nan::replace_inf_with_nan(arr);
    }
}

/// Rearranges `arr` in place such that `arr[k]` holds the value it would
/// hold were `arr` fully sorted, with every element before it `<= arr[k]`
/// and every element after it `>= arr[k]`. NaN-class elements are treated
/// as greater than every other value and never compared against `k` by
/// value — if `k` falls within the NaN suffix, `arr` is left with that
/// suffix undisturbed (any position there is equally valid as "the
/// k-th").
///
/// `has_nan` (§6, `has_nan = false` default in the source interface) tells
/// the driver whether it's worth paying the O(N) two-finger scan that
/// moves NaN-class elements to the tail before selecting. Pass `false`
/// (float types) or when `T` is an integer type (where it has no effect
/// either way) when the caller already knows `arr` is NaN-free.
///
/// # Panics
///
/// Panics if `k >= arr.len()`.
pub fn select<T: SimdElement>(arr: &mut [T], k: usize, has_nan: bool) {
    assert!(k < arr.len(), "select index out of bounds");
    if arr.len() < 2 {
        return;
    }
    let boundary = if T::IS_FLOAT && has_nan {
        nan::move_nans_to_end_of_array(arr)
    } else {
        arr.len()
    };
    if k >= boundary {
        return;
    }
    let depth_limit = depth_limit_for(boundary);
    recursive_select(arr, 0, boundary - 1, k, depth_limit);
}

/// Rearranges `arr` in place such that `arr[..k]` holds the `k` smallest
/// elements in ascending sorted order; `arr[k..]` holds the remainder in
/// unspecified order, all `>=` `arr[k - 1]`. `k` is clamped to `arr.len()`.
/// NaN-class elements are excluded from the ordered prefix and left in the
/// unordered tail.
///
/// `has_nan` has the same meaning as in [`select`], which this function
/// delegates to (§4.3: `partial_sort` is `select(arr, K-1, N, has_nan)`
/// followed by `sort(arr, K-1)`).
pub fn partial_sort<T: SimdElement>(arr: &mut [T], k: usize, has_nan: bool) {
    if arr.is_empty() {
        return;
    }
    let k = k.min(arr.len());
    if k == 0 {
        return;
    }
    let boundary = if T::IS_FLOAT && has_nan {
        nan::move_nans_to_end_of_array(arr)
    } else {
        arr.len()
    };
    let k_eff = k.min(boundary);
    if k_eff == 0 {
        return;
    }
    if k_eff < boundary {
        let depth_limit = depth_limit_for(boundary);
        recursive_select(arr, 0, boundary - 1, k_eff - 1, depth_limit);
    }
    sort(&mut arr[..k_eff]);
}

/// `⌊2·log2(n)⌋`, the introspective recursion budget before falling back
/// to the guaranteed-O(n log n) heapsort.
#[inline]
fn depth_limit_for(n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    2 * (usize::BITS - 1 - (n as u32).leading_zeros()) as usize
}

fn recursive_sort<T: SimdElement>(arr: &mut [T], mut left: usize, mut right: usize, mut depth_limit: usize) {
    loop {
        if left >= right {
            return;
        }
        let len = right - left + 1;
        if len <= T::NETWORK_SORT_THRESHOLD {
            network::sort_n(&mut arr[left..=right], len);
            return;
        }
        if depth_limit == 0 {
            heapsort(&mut arr[left..=right]);
            return;
        }
        depth_limit -= 1;

        let pivot = pivot::select_blocked(arr, left, right);
        let result = partition::partition(arr, left, right, pivot);

        if result.smallest.eq_order(pivot) {
            left = partition_equal(arr, left, right, pivot);
            continue;
        }
        if result.biggest.eq_order(pivot) {
            right = result.split - 1;
            continue;
        }

        debug_assert!(result.split > left && result.split <= right);
        let lo_len = result.split - left;
        let hi_len = right + 1 - result.split;
        if lo_len < hi_len {
            recursive_sort(arr, left, result.split - 1, depth_limit);
            left = result.split;
        } else {
            recursive_sort(arr, result.split, right, depth_limit);
            right = result.split - 1;
        }
    }
}

fn recursive_select<T: SimdElement>(arr: &mut [T], mut left: usize, mut right: usize, k: usize, mut depth_limit: usize) {
    loop {
        if left >= right {
            return;
        }
        let len = right - left + 1;
        if len <= T::NETWORK_SORT_THRESHOLD {
            network::sort_n(&mut arr[left..=right], len);
            return;
        }
        if depth_limit == 0 {
            heapsort(&mut arr[left..=right]);
            return;
        }
        depth_limit -= 1;

        let pivot = pivot::select(arr, left, right);
        let result = partition::partition(arr, left, right, pivot);

        if result.smallest.eq_order(pivot) {
            let eq_end = partition_equal(arr, left, right, pivot);
            if k < eq_end {
                return;
            }
            left = eq_end;
            continue;
        }
        if result.biggest.eq_order(pivot) && k >= result.split {
            return;
        }

        if k < result.split {
            right = result.split - 1;
        } else {
            left = result.split;
        }
    }
}

/// Moves every element equal to `pivot` in `arr[left..=right]` (all
/// already known `>= pivot`) to the front of the range. Returns the
/// index just past that run.
fn partition_equal<T: SimdElement>(arr: &mut [T], left: usize, right: usize, pivot: T) -> usize {
    let mut boundary = left;
    for i in left..=right {
        if arr[i].eq_order(pivot) {
            arr.swap(i, boundary);
            boundary += 1;
        }
    }
    boundary
}

/// Guaranteed O(n log n) fallback for the introspective depth bound.
fn heapsort<T: SimdElement>(v: &mut [T]) {
    let n = v.len();
    if n < 2 {
        return;
    }
    for start in (0..n / 2).rev() {
        sift_down(v, start, n);
    }
    for end in (1..n).rev() {
        v.swap(0, end);
        sift_down(v, 0, end);
    }
}

fn sift_down<T: SimdElement>(v: &mut [T], mut root: usize, len: usize) {
    loop {
        let mut child = 2 * root + 1;
        if child >= len {
            break;
        }
        if child + 1 < len && v[child].lt(v[child + 1]) {
            child += 1;
        }
        if v[root].lt(v[child]) {
            v.swap(root, child);
            root = child;
        } else {
            break;
        }
    }
}
