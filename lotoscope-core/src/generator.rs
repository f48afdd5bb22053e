use anyhow::{Result, bail};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub max_number: u8,
    pub pick_count: usize,
    /// Fraction de la plage couverte par la fenêtre de tirage, dans (0, 1].
    pub window_pct: f64,
}

impl GenerationConfig {
    pub fn full_range(max_number: u8, pick_count: usize) -> Self {
        Self {
            max_number,
            pick_count,
            window_pct: 1.0,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_number == 0 {
            bail!("max_number doit être au moins 1");
        }
        if self.pick_count > self.max_number as usize {
            bail!(
                "pick_count ({}) ne peut pas dépasser max_number ({})",
                self.pick_count,
                self.max_number
            );
        }
        if !(self.window_pct > 0.0 && self.window_pct <= 1.0) {
            bail!(
                "window_pct doit être dans l'intervalle (0, 1], reçu {}",
                self.window_pct
            );
        }
        Ok(())
    }
}

/// Tire `pick_count` numéros distincts, triés en ordre croissant, dans une
/// fenêtre contiguë de [1, max_number] dont la position est ancrée par la
/// source aléatoire. `rand01` doit renvoyer des valeurs dans [0, 1) ;
/// une source qui renvoie toujours 0 produit les plus petits numéros de la
/// fenêtre, en ordre croissant.
pub fn generate_set(
    config: &GenerationConfig,
    rand01: &mut dyn FnMut() -> f64,
) -> Result<Vec<u8>> {
    // Validation avant toute consommation de la source aléatoire
    config.validate()?;

    if config.pick_count == 0 {
        return Ok(Vec::new());
    }

    let max = config.max_number as usize;
    let width = ((config.window_pct * max as f64).round() as usize)
        .clamp(config.pick_count, max);

    // Ancrage de la fenêtre : start ∈ [1, max - width + 1]
    let start = 1 + index_below(rand01(), max - width + 1);

    // Tirage sans remise : on retire l'indice choisi du pool de candidats
    let mut available: Vec<u8> = (start..start + width).map(|n| n as u8).collect();
    let mut selected = Vec::with_capacity(config.pick_count);
    for _ in 0..config.pick_count {
        let idx = index_below(rand01(), available.len());
        selected.push(available.remove(idx));
    }

    selected.sort();
    Ok(selected)
}

/// Variante branchée sur StdRng, reproductible via `seed`.
pub fn generate_set_seeded(config: &GenerationConfig, seed: Option<u64>) -> Result<Vec<u8>> {
    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    generate_set(config, &mut || rng.random::<f64>())
}

/// Projette u ∈ [0, 1) sur un indice de [0, len). Une source mal élevée qui
/// renverrait exactement 1.0 est rabattue sur le dernier indice.
fn index_below(u: f64, len: usize) -> usize {
    ((u * len as f64) as usize).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_count_exceeds_max_number() {
        let config = GenerationConfig::full_range(2, 3);
        let err = generate_set(&config, &mut || 0.0).unwrap_err();
        assert!(err.to_string().contains("pick_count"));
    }

    #[test]
    fn test_validation_before_any_random_draw() {
        let config = GenerationConfig::full_range(2, 3);
        let mut calls = 0u32;
        let result = generate_set(&config, &mut || {
            calls += 1;
            0.5
        });
        assert!(result.is_err());
        assert_eq!(calls, 0, "la source aléatoire ne doit pas être consommée");
    }

    #[test]
    fn test_all_zero_source_yields_lowest_values() {
        let config = GenerationConfig {
            max_number: 5,
            pick_count: 3,
            window_pct: 1.0,
        };
        let result = generate_set(&config, &mut || 0.0).unwrap();
        assert_eq!(result, vec![1, 2, 3]);
    }

    #[test]
    fn test_near_one_source_stays_in_range() {
        let config = GenerationConfig::full_range(50, 5);
        let result = generate_set(&config, &mut || 0.999_999).unwrap();
        assert_eq!(result, vec![46, 47, 48, 49, 50]);
    }

    #[test]
    fn test_unique_sorted_across_seeds() {
        let config = GenerationConfig::full_range(50, 5);
        for seed in 0..20 {
            let result = generate_set_seeded(&config, Some(seed)).unwrap();
            assert_eq!(result.len(), 5);
            for pair in result.windows(2) {
                assert!(pair[0] < pair[1], "non strictement croissant : {:?}", result);
            }
            assert!(result.iter().all(|&n| (1..=50).contains(&n)));
        }
    }

    #[test]
    fn test_window_bounds_spread() {
        let config = GenerationConfig {
            max_number: 50,
            pick_count: 5,
            window_pct: 0.2,
        };
        for seed in 0..20 {
            let result = generate_set_seeded(&config, Some(seed)).unwrap();
            let spread = result[result.len() - 1] - result[0];
            assert!(spread < 10, "fenêtre dépassée : {:?}", result);
        }
    }

    #[test]
    fn test_zero_source_with_narrow_window() {
        let config = GenerationConfig {
            max_number: 50,
            pick_count: 5,
            window_pct: 0.2,
        };
        let result = generate_set(&config, &mut || 0.0).unwrap();
        assert_eq!(result, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_full_pick_returns_whole_range() {
        let config = GenerationConfig::full_range(5, 5);
        let result = generate_set_seeded(&config, Some(42)).unwrap();
        assert_eq!(result, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_pick_count_zero() {
        let config = GenerationConfig::full_range(10, 0);
        assert!(generate_set(&config, &mut || 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_window_pct() {
        let mut config = GenerationConfig::full_range(10, 3);
        config.window_pct = 0.0;
        assert!(generate_set(&config, &mut || 0.0).is_err());
        config.window_pct = 1.5;
        assert!(generate_set(&config, &mut || 0.0).is_err());
    }
}
