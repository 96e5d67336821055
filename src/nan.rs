//! NaN handling (§4.4).
//!
//! Float element types don't have a total order until NaNs are dealt
//! with, and the sort and selection drivers deal with them differently:
//!
//! - `sort`/`partial_sort` replace every NaN with a sentinel large enough
//!   to always lose the partition comparison, sort under the resulting
//!   total order, then restore the sentinel's original positions (always
//!   a suffix, since the sentinel compares greatest) back to quiet NaN.
//! - `select` instead physically pushes NaNs to the tail of the working
//!   range up front with a two-finger swap, and only ever operates on the
//!   NaN-free prefix.
//!
//! Integer element types never carry NaNs; [`has_nan`] and the two
//! replacement passes are no-ops for them since `T::IS_FLOAT` is `false`.

use crate::element::SimdElement;

/// Short-circuiting scan: `true` as soon as any NaN-class element is
/// found. Integer types always return `false`.
pub fn has_nan<T: SimdElement>(arr: &[T]) -> bool {
    if !T::IS_FLOAT {
        return false;
    }
    arr.iter().any(|v| v.is_nan_class())
}

/// Sort-path prologue: replaces every NaN-class element with
/// `T::nan_replacement()` in place. No-op for integer types.
pub fn replace_nan_with_inf<T: SimdElement>(arr: &mut [T]) {
    if !T::IS_FLOAT {
        return;
    }
    let sentinel = T::nan_replacement();
    for v in arr.iter_mut() {
        if v.is_nan_class() {
            *v = sentinel;
        }
    }
}

/// Sort-path epilogue: once the array carrying `T::nan_replacement()`
/// sentinels has been sorted under the total order, the sentinels occupy
/// a contiguous suffix (they compare as the maximum element). Walks back
/// from the end restoring that suffix to `T::quiet_nan()`. No-op for
/// integer types.
pub fn replace_inf_with_nan<T: SimdElement>(arr: &mut [T]) {
    if !T::IS_FLOAT {
        return;
    }
    let sentinel = T::nan_replacement();
    let quiet = T::quiet_nan();
    for v in arr.iter_mut().rev() {
        // `PartialEq` would always report a NaN-class sentinel (e.g.
        // `f16`'s `0xFFFF`) as unequal to itself under IEEE `==`; the
        // order-based `eq_order` compares where the sentinel actually
        // sits in the total order `sort` ran under, which is what
        // determines whether this slot is part of the sentinel suffix.
        if v.eq_order(sentinel) {
            *v = quiet;
        } else {
            break;
        }
    }
}

/// Select-path prologue: partitions `arr` in place so every NaN-class
/// element ends up in a suffix, via a two-finger swap from both ends.
/// Returns the length of the NaN-free prefix; `select`/`partial_sort`
/// restrict themselves to `arr[..boundary]`. No-op (returns `arr.len()`)
/// for integer types.
pub fn move_nans_to_end_of_array<T: SimdElement>(arr: &mut [T]) -> usize {
    if !T::IS_FLOAT {
        return arr.len();
    }
    if arr.is_empty() {
        return 0;
    }
    let mut lo = 0usize;
    let mut hi = arr.len();
    while lo < hi {
        if arr[lo].is_nan_class() {
            hi -= 1;
            arr.swap(lo, hi);
        } else {
            lo += 1;
        }
    }
    lo
}
