//! Page-share apportionment across federated catalogs
//!
//! When assembling one page out of N catalogs, each catalog gets a share of
//! the page proportional to how many items it holds. Ceiling rounding keeps
//! every non-empty catalog represented whenever the page has room for all
//! of them; the first largest share then absorbs the rounding overshoot so
//! the smallest catalogs keep their slots.

/// Split `per_page` into per-catalog shares proportional to `weights`
///
/// Returns one share per weight, in order, summing to `per_page`. All-zero
/// weights yield all-zero shares. When `per_page` is smaller than the
/// number of catalogs the correction saturates at zero, and the shares may
/// sum to slightly more than `per_page`.
pub fn apportion(weights: &[usize], per_page: usize) -> Vec<usize> {
    let mut shares = vec![0usize; weights.len()];
    let total: usize = weights.iter().sum();
    if total == 0 {
        return shares;
    }

    let mut sum = 0;
    for (i, weight) in weights.iter().enumerate() {
        shares[i] = (weight * per_page).div_ceil(total);
        sum += shares[i];
    }
    if sum == per_page {
        return shares;
    }

    // shrink the first largest share to round the sum down to per_page
    let mut maxi = 0;
    for (i, &share) in shares.iter().enumerate() {
        if share > shares[maxi] {
            maxi = i;
        }
    }
    shares[maxi] = shares[maxi].saturating_sub(sum - per_page);

    shares
}

/// Split `per_page` evenly across `n` catalogs, remainder on the last one
///
/// Used when no per-catalog weights are known, e.g. for filtered queries
/// whose counts are never pre-sampled.
pub fn even_split(n: usize, per_page: usize) -> Vec<usize> {
    let quotient = per_page / n;
    let remainder = per_page - n * quotient;
    let mut shares = vec![quotient; n];
    if let Some(last) = shares.last_mut() {
        *last += remainder;
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_with_largest_share_correction() {
        // ceiling shares [4, 2] overshoot by 1; the first largest absorbs it
        assert_eq!(apportion(&[7, 3], 5), vec![3, 2]);
    }

    #[test]
    fn test_zero_total_short_circuits() {
        assert_eq!(apportion(&[0, 0, 0], 10), vec![0, 0, 0]);
        assert_eq!(apportion(&[], 10), Vec::<usize>::new());
    }

    #[test]
    fn test_exact_split_needs_no_correction() {
        assert_eq!(apportion(&[5, 5], 10), vec![5, 5]);
    }

    #[test]
    fn test_first_largest_wins_ties() {
        // both ceiling shares are 3 (sum 6); the overshoot comes off index 0
        assert_eq!(apportion(&[5, 5], 5), vec![2, 3]);
    }

    #[test]
    fn test_zero_weight_catalog_gets_nothing() {
        assert_eq!(apportion(&[10, 0], 4), vec![4, 0]);
    }

    #[test]
    fn test_nonzero_weights_keep_a_slot_when_page_has_room() {
        let shares = apportion(&[1000, 1], 10);
        assert_eq!(shares.iter().sum::<usize>(), 10);
        assert!(shares[1] >= 1);
    }

    #[test]
    fn test_shares_sum_to_per_page() {
        let cases: &[(&[usize], usize)] = &[
            (&[7, 3], 5),
            (&[1, 1, 1], 10),
            (&[9, 1], 10),
            (&[3, 14, 6], 7),
            (&[100], 25),
            (&[2, 2, 2, 2], 8),
        ];
        for (weights, per_page) in cases {
            let shares = apportion(weights, *per_page);
            assert_eq!(
                shares.iter().sum::<usize>(),
                *per_page,
                "weights {weights:?} per_page {per_page}"
            );
        }
    }

    #[test]
    fn test_deterministic() {
        let first = apportion(&[3, 14, 6], 7);
        for _ in 0..10 {
            assert_eq!(apportion(&[3, 14, 6], 7), first);
        }
    }

    #[test]
    fn test_degenerate_page_smaller_than_catalogs_saturates() {
        // every ceiling share is 1, the correction would go negative
        let shares = apportion(&[1, 1, 1, 1, 1], 2);
        assert!(shares.iter().all(|&s| s <= 1));
        assert!(shares.iter().sum::<usize>() >= 2);
    }

    #[test]
    fn test_even_split_remainder_on_last() {
        assert_eq!(even_split(2, 5), vec![2, 3]);
        assert_eq!(even_split(3, 9), vec![3, 3, 3]);
        assert_eq!(even_split(4, 2), vec![0, 0, 0, 2]);
        assert_eq!(even_split(1, 7), vec![7]);
    }
}
