use dx_template::GaussianParams;
use rand::Rng;
use std::f64::consts::PI;

/// Density of `x` under Normal(mean, std).
///
/// Far-tail values underflow to exactly 0.0, which callers treat as
/// ordinary (multiplicative) evidence.
pub fn normal_pdf(x: f64, params: GaussianParams) -> f64 {
    let var = params.std * params.std;
    (-(x - params.mean).powi(2) / (2.0 * var)).exp() / (2.0 * PI * var).sqrt()
}

/// Standard normal draw via the Box-Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // u1 in (0, 1] so ln(u1) is finite
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    let r = (-2.0 * u1.ln()).sqrt();
    r * (2.0 * PI * u2).cos()
}

pub fn sample_normal<R: Rng + ?Sized>(rng: &mut R, params: GaussianParams) -> f64 {
    params.mean + params.std * standard_normal(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pdf_at_mean() {
        let p = normal_pdf(0.0, GaussianParams::new(0.0, 1.0));
        assert_abs_diff_eq!(p, 0.398_942_280_4, epsilon = 1e-9);
    }

    #[test]
    fn test_pdf_scales_with_std() {
        let p = normal_pdf(10.0, GaussianParams::new(10.0, 2.0));
        assert_abs_diff_eq!(p, 0.398_942_280_4 / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pdf_underflows_to_zero() {
        assert_eq!(normal_pdf(1e6, GaussianParams::new(0.0, 1.0)), 0.0);
    }

    #[test]
    fn test_sample_moments() {
        let mut rng = StdRng::seed_from_u64(7);
        let params = GaussianParams::new(120.0, 15.0);
        let n = 20_000;
        let draws: Vec<f64> = (0..n).map(|_| sample_normal(&mut rng, params)).collect();

        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

        assert_abs_diff_eq!(mean, 120.0, epsilon = 0.5);
        assert_abs_diff_eq!(var.sqrt(), 15.0, epsilon = 0.5);
        assert!(draws.iter().all(|x| x.is_finite()));
    }
}
