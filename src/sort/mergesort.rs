//! Parallel mergesort. Component M.
//!
//! Ported from spec.md §5's parallel-mergesort design: recursive
//! `rayon::join` fan-out over both the split and the merge step, capped by
//! [`crate::config::MAX_ONTHREAD_REC`] so the thread pool isn't flooded
//! with work near the leaves, and falling back to serial code below
//! [`crate::config::MERGESORT_SERIAL_BASE`] (split) and
//! [`crate::config::MERGESORT_MERGE_BASE`] (merge). Uses the teacher
//! crate's dependency on `rayon` for the same fork-join shape its own
//! block-level compression parallelism relies on.
//!
//! This is explicitly *not* a stable sort — ties are broken by whichever
//! half's merge pointer happens to advance first, the same way
//! `[T]::sort_unstable` makes no stability guarantee. Callers who need
//! stability should reach for `sort` / `sort_by_key` instead.

use crate::config::{MAX_ONTHREAD_REC, MERGESORT_MERGE_BASE, MERGESORT_SERIAL_BASE};

/// Sorts `data` in place using a depth-capped, fork-join parallel
/// mergesort. Not stable.
pub fn mergesort_parallel<T>(data: &mut [T])
where
    T: Ord + Copy + Send,
{
    let mut buf = data.to_vec();
    sort_rec(data, &mut buf, 0);
}

fn sort_rec<T>(data: &mut [T], buf: &mut [T], depth: u32)
where
    T: Ord + Copy + Send,
{
    let n = data.len();
    if n <= MERGESORT_SERIAL_BASE {
        data.sort_unstable();
        return;
    }
    let mid = n / 2;
    let (left, right) = data.split_at_mut(mid);
    let (buf_left, buf_right) = buf.split_at_mut(mid);

    if depth < MAX_ONTHREAD_REC {
        rayon::join(
            || sort_rec(left, buf_left, depth + 1),
            || sort_rec(right, buf_right, depth + 1),
        );
    } else {
        sort_rec(left, buf_left, depth + 1);
        sort_rec(right, buf_right, depth + 1);
    }

    merge(left, right, buf, depth);
    data.copy_from_slice(buf);
}

/// Merges two already-sorted slices into `out` (`out.len() ==
/// left.len() + right.len()`), splitting recursively in parallel above
/// [`MERGESORT_MERGE_BASE`] via a rank computed with `partition_point`
/// (the standard parallel-merge construction: find where the longer
/// half's midpoint value would land in the shorter half, then merge each
/// side independently).
fn merge<T>(left: &[T], right: &[T], out: &mut [T], depth: u32)
where
    T: Ord + Copy + Send,
{
    if left.len() + right.len() <= MERGESORT_MERGE_BASE || depth >= MAX_ONTHREAD_REC {
        serial_merge(left, right, out);
        return;
    }
    if left.len() < right.len() {
        merge(right, left, out, depth);
        return;
    }
    // `left` is now the longer (or equal) half.
    let mid = left.len() / 2;
    let (left_lo, left_hi_with_pivot) = left.split_at(mid);
    let pivot = left_hi_with_pivot[0];
    let split_in_right = right.partition_point(|x| *x < pivot);
    let (right_lo, right_hi) = right.split_at(split_in_right);
    let out_mid = left_lo.len() + right_lo.len();
    let (out_lo, out_hi) = out.split_at_mut(out_mid);

    rayon::join(
        || merge(left_lo, right_lo, out_lo, depth + 1),
        || merge(left_hi_with_pivot, right_hi, out_hi, depth + 1),
    );
}

fn serial_merge<T: Ord + Copy>(left: &[T], right: &[T], out: &mut [T]) {
    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            out[k] = left[i];
            i += 1;
        } else {
            out[k] = right[j];
            j += 1;
        }
        k += 1;
    }
    if i < left.len() {
        out[k..].copy_from_slice(&left[i..]);
    }
    if j < right.len() {
        out[k..].copy_from_slice(&right[j..]);
    }
}
