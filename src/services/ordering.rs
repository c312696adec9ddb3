//! Comparator-driven stable sorting.
//!
//! Some rankings compare floor-truncated rating differences, which is not a
//! total order: `a` may tie with `b` while `b` sorts before `a`. The standard
//! library sorts are allowed to panic on such comparators, so rankings go
//! through this sort instead. It detects a leading ascending (or strictly
//! descending, then reversed) run and binary-inserts the remaining elements,
//! which keeps equal elements in their original order and always terminates.

use std::cmp::Ordering;

/// Stable in-place sort that tolerates inconsistent comparators
pub fn sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    let sorted_prefix = leading_run(items, &mut compare);
    for start in sorted_prefix..len {
        // Upper bound: insert after every element that does not compare greater
        let mut left = 0;
        let mut right = start;
        while left < right {
            let mid = left + (right - left) / 2;
            if compare(&items[start], &items[mid]) == Ordering::Less {
                right = mid;
            } else {
                left = mid + 1;
            }
        }
        items[left..=start].rotate_right(1);
    }
}

/// Length of the run at the front, made ascending
fn leading_run<T, F>(items: &mut [T], compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    let mut end = 2;
    if compare(&items[1], &items[0]) == Ordering::Less {
        while end < len && compare(&items[end], &items[end - 1]) == Ordering::Less {
            end += 1;
        }
        items[..end].reverse();
    } else {
        while end < len && compare(&items[end], &items[end - 1]) != Ordering::Less {
            end += 1;
        }
    }
    end
}

/// Compares the floor of `a - b` against zero.
///
/// Differences in `[0, 1)` count as equal, so `a` ties with any `b` up to one
/// point below it.
pub fn truncated_cmp(a: f64, b: f64) -> Ordering {
    let diff = (a - b).floor();
    if diff < 0.0 {
        Ordering::Less
    } else if diff > 0.0 {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_integers() {
        let mut values = vec![5, 3, 9, 1, 1, 7, 2];
        sort_by(&mut values, |a, b| a.cmp(b));
        assert_eq!(values, vec![1, 1, 2, 3, 5, 7, 9]);
    }

    #[test]
    fn test_descending_run_is_reversed() {
        let mut values = vec![9, 7, 5, 3, 4];
        sort_by(&mut values, |a, b| a.cmp(b));
        assert_eq!(values, vec![3, 4, 5, 7, 9]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let mut values = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e')];
        sort_by(&mut values, |a, b| a.0.cmp(&b.0));
        assert_eq!(values, vec![(0, 'e'), (1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn test_empty_and_single() {
        let mut empty: Vec<i32> = vec![];
        sort_by(&mut empty, |a, b| a.cmp(b));
        assert!(empty.is_empty());

        let mut single = vec![1];
        sort_by(&mut single, |a, b| a.cmp(b));
        assert_eq!(single, vec![1]);
    }

    #[test]
    fn test_truncated_cmp() {
        assert_eq!(truncated_cmp(4.5, 4.0), Ordering::Equal);
        assert_eq!(truncated_cmp(4.0, 4.5), Ordering::Less);
        assert_eq!(truncated_cmp(5.0, 3.9), Ordering::Greater);
        assert_eq!(truncated_cmp(3.0, 3.0), Ordering::Equal);
    }

    #[test]
    fn test_truncated_comparator_does_not_panic() {
        let mut ratings = vec![4.5, 4.0, 3.2, 4.9, 1.0, 3.9, 4.1, 2.5];
        sort_by(&mut ratings, |a, b| truncated_cmp(*a, *b));
        assert_eq!(ratings.len(), 8);
        assert_eq!(ratings[0], 1.0);
    }

    #[test]
    fn test_truncated_descending_keeps_maximum_first() {
        let mut ratings = vec![4.0, 3.5, 4.5, 4.2, 4.9, 4.6];
        sort_by(&mut ratings, |a, b| truncated_cmp(*b, *a));
        assert_eq!(ratings, vec![4.9, 4.6, 4.5, 4.2, 4.0, 3.5]);
    }
}
