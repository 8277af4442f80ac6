//! Indexed quicksort.
//!
//! Sorts an *index* array so that `values[indices[k]]` is non-decreasing,
//! leaving `values` untouched. Several index arrays can therefore share one
//! value array (e.g. one id table sorted for several lookups).
//!
//! The algorithm is Sedgewick's hybrid: median-of-three quicksort down to
//! runs of [`QSORT_CUTOFF`] entries, then a single insertion sort over the
//! whole, nearly sorted, array. It is not stable.

use std::cmp::Ordering;

/// Runs this short or shorter are left to the final insertion sort.
pub const QSORT_CUTOFF: usize = 12;

/// Reorder `indices` so that `values[indices[k]] <= values[indices[k + 1]]`.
///
/// Every entry of `indices` must be a valid index into `values`. Never fails;
/// empty and single-element inputs are left unchanged.
pub fn sort_indices<T: Ord>(values: &[T], indices: &mut [usize]) {
    if indices.len() < 2 {
        return;
    }
    quicksort(values, indices, 0, indices.len() - 1);
    insertion_sort(values, indices);
    debug_assert!(
        is_sorted_by_index(values, indices),
        "indexed sort left {} values out of order",
        indices.len()
    );
}

/// Identity permutation of `values`, sorted with [`sort_indices`].
pub fn sorted_permutation<T: Ord>(values: &[T]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    sort_indices(values, &mut indices);
    indices
}

/// Binary search through a permutation produced by [`sort_indices`].
///
/// Returns the position in `values` of an entry equal to `target`.
pub fn search_sorted<T: Ord>(values: &[T], indices: &[usize], target: &T) -> Option<usize> {
    indices
        .binary_search_by(|&k| values[k].cmp(target))
        .ok()
        .map(|pos| indices[pos])
}

/// `true` if `values` read through `indices` is non-decreasing.
pub fn is_sorted_by_index<T: Ord>(values: &[T], indices: &[usize]) -> bool {
    indices
        .windows(2)
        .all(|w| values[w[0]].cmp(&values[w[1]]) != Ordering::Greater)
}

/// Order left/center/right, park the median at `right - 1` and return the
/// value index it refers to.
fn median3<T: Ord>(v: &[T], iv: &mut [usize], left: usize, right: usize) -> usize {
    let center = left + (right - left) / 2;

    if v[iv[left]] > v[iv[center]] {
        iv.swap(left, center);
    }
    if v[iv[left]] > v[iv[right]] {
        iv.swap(left, right);
    }
    if v[iv[center]] > v[iv[right]] {
        iv.swap(center, right);
    }

    iv.swap(center, right - 1);
    iv[right - 1]
}

fn quicksort<T: Ord>(v: &[T], iv: &mut [usize], left: usize, right: usize) {
    if left + QSORT_CUTOFF > right {
        return;
    }
    let pivot = median3(v, iv, left, right);
    let pivot = &v[pivot];

    // iv[left] <= pivot and iv[right - 1] == pivot bound both scans.
    let mut i = left;
    let mut j = right - 1;
    loop {
        i += 1;
        while v[iv[i]] < *pivot {
            i += 1;
        }
        j -= 1;
        while v[iv[j]] > *pivot {
            j -= 1;
        }
        if i < j {
            iv.swap(i, j);
        } else {
            break;
        }
    }

    iv.swap(i, right - 1);
    quicksort(v, iv, left, i - 1);
    quicksort(v, iv, i + 1, right);
}

fn insertion_sort<T: Ord>(v: &[T], iv: &mut [usize]) {
    let n = iv.len();

    // Smallest value goes to slot 0 and stops every inner scan.
    let mut smallest = 0;
    for i in 1..n {
        if v[iv[i]] < v[iv[smallest]] {
            smallest = i;
        }
    }
    iv.swap(0, smallest);

    for i in 1..n {
        let tmp = iv[i];
        let mut j = i;
        while v[tmp] < v[iv[j - 1]] {
            iv[j] = iv[j - 1];
            j -= 1;
        }
        iv[j] = tmp;
    }
}
