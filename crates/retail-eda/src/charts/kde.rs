//! Gaussian kernel density estimation for the histogram overlay.

use crate::profiler::quantile_sorted;

/// A sampled density curve.
#[derive(Debug, Clone)]
pub struct KdeCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Estimate a Gaussian KDE over `values`, sampled on a uniform grid.
///
/// Bandwidth follows Silverman's rule of thumb,
/// `0.9 * min(std, iqr / 1.34) * n^(-1/5)`. Returns `None` when fewer
/// than two values are given or the data has no spread.
pub fn gaussian_kde(values: &[f64], grid_size: usize) -> Option<KdeCurve> {
    let n = values.len();
    if n < 2 || grid_size < 2 {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    let std_dev = variance.sqrt();

    let iqr = quantile_sorted(&sorted, 0.75) - quantile_sorted(&sorted, 0.25);
    let spread = if iqr > 0.0 {
        std_dev.min(iqr / 1.34)
    } else {
        std_dev
    };
    if spread <= 0.0 {
        return None;
    }

    let bandwidth = 0.9 * spread * (n as f64).powf(-0.2);

    let lo = sorted[0] - 3.0 * bandwidth;
    let hi = sorted[n - 1] + 3.0 * bandwidth;
    let step = (hi - lo) / (grid_size as f64 - 1.0);

    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let mut x = Vec::with_capacity(grid_size);
    let mut y = Vec::with_capacity(grid_size);

    for i in 0..grid_size {
        let gx = lo + step * i as f64;
        let density: f64 = values
            .iter()
            .map(|v| {
                let z = (gx - v) / bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
            * norm;
        x.push(gx);
        y.push(density);
    }

    Some(KdeCurve { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trapezoid_integral(curve: &KdeCurve) -> f64 {
        curve
            .x
            .windows(2)
            .zip(curve.y.windows(2))
            .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
            .sum()
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let values: Vec<f64> = (0..200).map(|i| 20.0 + (i as f64 * 2.4) % 480.0).collect();
        let curve = gaussian_kde(&values, 256).unwrap();
        let integral = trapezoid_integral(&curve);
        assert!(
            (integral - 1.0).abs() < 0.02,
            "KDE integral was {}",
            integral
        );
    }

    #[test]
    fn test_kde_peak_near_data_center() {
        let values = vec![9.0, 9.5, 10.0, 10.0, 10.5, 11.0];
        let curve = gaussian_kde(&values, 128).unwrap();
        let (peak_idx, _) = curve
            .y
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap();
        assert!((curve.x[peak_idx] - 10.0).abs() < 1.0);
    }

    #[test]
    fn test_kde_rejects_degenerate_input() {
        assert!(gaussian_kde(&[1.0], 64).is_none());
        assert!(gaussian_kde(&[2.0, 2.0, 2.0], 64).is_none());
        assert!(gaussian_kde(&[], 64).is_none());
    }
}
