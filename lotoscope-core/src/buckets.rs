use anyhow::{Result, bail};

#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub mid: f64,
    pub freq: u32,
}

/// Regroupe les sommes des tirages en classes contiguës de largeur `bin_size`.
/// Historique vide → aucune classe (pas une erreur).
pub fn build_sum_buckets(draws: &[Vec<u8>], bin_size: u32) -> Result<Vec<Bucket>> {
    let sums: Vec<i64> = draws
        .iter()
        .map(|d| d.iter().map(|&n| n as i64).sum())
        .collect();
    sum_buckets(&sums, bin_size)
}

pub fn sum_buckets(sums: &[i64], bin_size: u32) -> Result<Vec<Bucket>> {
    if bin_size == 0 {
        bail!("Largeur de classe invalide : doit être strictement positive");
    }
    if sums.is_empty() {
        return Ok(Vec::new());
    }

    let bin = bin_size as i64;
    let (min, max) = sums
        .iter()
        .fold((i64::MAX, i64::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));

    // Alignement euclidien : reste correct pour des sommes négatives
    let first_start = min.div_euclid(bin) * bin;
    let last_start = (max + bin - 1).div_euclid(bin) * bin;

    let n_buckets = ((last_start - first_start) / bin + 1) as usize;
    let mut freqs = vec![0u32; n_buckets];
    for &sum in sums {
        let idx = (sum - first_start).div_euclid(bin) as usize;
        freqs[idx] += 1;
    }

    let buckets = freqs
        .into_iter()
        .enumerate()
        .map(|(i, freq)| {
            let start = first_start + i as i64 * bin;
            Bucket {
                label: format!("{}-{}", start, start + bin - 1),
                mid: start as f64 + bin as f64 / 2.0,
                freq,
            }
        })
        .collect();

    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_no_buckets() {
        let draws: Vec<Vec<u8>> = vec![];
        let buckets = build_sum_buckets(&draws, 5).unwrap();
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_bin_size_zero_rejected() {
        assert!(build_sum_buckets(&[vec![1, 2, 3]], 0).is_err());
    }

    #[test]
    fn test_single_aligned_draw_single_bucket() {
        let buckets = build_sum_buckets(&[vec![2, 3, 5]], 5).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "10-14");
        assert_eq!(buckets[0].freq, 1);
        assert!((buckets[0].mid - 12.5).abs() < 1e-10);
    }

    #[test]
    fn test_sums_28_and_210_span_endpoints() {
        let draws = vec![vec![10, 18], vec![100, 110]];
        let buckets = build_sum_buckets(&draws, 10).unwrap();
        assert_eq!(buckets.len(), 20);
        assert_eq!(buckets[0].label, "20-29");
        assert_eq!(buckets[19].label, "210-219");
        assert_eq!(buckets[0].freq, 1);
        assert_eq!(buckets[19].freq, 1);
        for b in &buckets[1..19] {
            assert_eq!(b.freq, 0, "classe intermédiaire non vide : {}", b.label);
        }
    }

    #[test]
    fn test_total_freq_equals_draw_count() {
        let draws = vec![
            vec![1, 2, 3, 4, 5, 6, 7],
            vec![35, 34, 33, 32, 31, 30, 29],
            vec![10, 20, 30],
            vec![7, 7, 7],
        ];
        let buckets = build_sum_buckets(&draws, 10).unwrap();
        let total: u32 = buckets.iter().map(|b| b.freq).sum();
        assert_eq!(total as usize, draws.len());
    }

    #[test]
    fn test_contiguity_of_mids() {
        let draws = vec![vec![3], vec![47], vec![92]];
        let buckets = build_sum_buckets(&draws, 7).unwrap();
        for pair in buckets.windows(2) {
            assert!((pair[1].mid - pair[0].mid - 7.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_deterministic() {
        let draws = vec![vec![5, 9, 14], vec![40, 2], vec![33]];
        let a = build_sum_buckets(&draws, 5).unwrap();
        let b = build_sum_buckets(&draws, 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_negative_sums_align_correctly() {
        let buckets = sum_buckets(&[-7, 3], 5).unwrap();
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[0].label, "-10--6");
        assert_eq!(buckets[0].freq, 1);
        assert_eq!(buckets[2].label, "0-4");
        assert_eq!(buckets[2].freq, 1);
        assert!((buckets[0].mid - (-7.5)).abs() < 1e-10);
    }
}
