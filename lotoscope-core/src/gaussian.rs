use crate::buckets::Bucket;

pub const CURVE_POINTS: usize = 100;

#[derive(Debug, Clone)]
pub struct GaussianFit {
    pub mean: f64,
    pub sigma: f64,
    pub curve: Vec<(f64, f64)>,
}

/// Ajuste une gaussienne sur les milieux de classes, pondérée par les
/// fréquences, puis échantillonne la densité en 100 points entre le premier
/// et le dernier milieu. Renvoie None quand l'ajustement n'est pas défini :
/// aucune classe, fréquences toutes nulles, ou variance nulle (toutes les
/// sommes identiques).
pub fn fit_gaussian(buckets: &[Bucket]) -> Option<GaussianFit> {
    let total: u32 = buckets.iter().map(|b| b.freq).sum();
    if buckets.is_empty() || total == 0 {
        return None;
    }

    let total = total as f64;
    let mean = buckets.iter().map(|b| b.mid * b.freq as f64).sum::<f64>() / total;
    let variance = buckets
        .iter()
        .map(|b| (b.mid - mean).powi(2) * b.freq as f64)
        .sum::<f64>()
        / total;
    let sigma = variance.sqrt();
    if sigma == 0.0 {
        return None;
    }

    let x_min = buckets[0].mid;
    let x_max = buckets[buckets.len() - 1].mid;
    let step = (x_max - x_min) / (CURVE_POINTS - 1) as f64;
    let curve = (0..CURVE_POINTS)
        .map(|i| {
            let x = x_min + i as f64 * step;
            (x, normal_density(x, mean, sigma))
        })
        .collect();

    Some(GaussianFit { mean, sigma, curve })
}

pub fn normal_density(x: f64, mean: f64, sigma: f64) -> f64 {
    let z = (x - mean) / sigma;
    (-0.5 * z * z).exp() / (sigma * (2.0 * std::f64::consts::PI).sqrt())
}
