//! Ordinary least squares fit with a mean-response confidence band
//!
//! Backs the regression overlay of the country scatter figure. The band is
//! the standard confidence interval for the mean response at x, using the
//! large-sample critical value 1.96 for the 95% level.

/// Two-sided 95% critical value (large-sample normal approximation)
const T_95: f64 = 1.96;

/// A fitted least-squares line with the sufficient statistics needed to
/// evaluate confidence intervals
#[derive(Debug, Clone, Copy)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    n: usize,
    x_mean: f64,
    sxx: f64,
    residual_std: f64,
}

impl LinearFit {
    /// Fit y = intercept + slope * x over paired observations
    ///
    /// Returns None with fewer than three points or when x has no spread,
    /// since neither the slope nor the residual variance is identified.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
        let n = xs.len().min(ys.len());
        if n < 3 {
            return None;
        }

        let nf = n as f64;
        let x_mean = xs[..n].iter().sum::<f64>() / nf;
        let y_mean = ys[..n].iter().sum::<f64>() / nf;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for i in 0..n {
            let dx = xs[i] - x_mean;
            sxx += dx * dx;
            sxy += dx * (ys[i] - y_mean);
        }
        if sxx <= f64::EPSILON {
            return None;
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let sse: f64 = (0..n)
            .map(|i| {
                let resid = ys[i] - (intercept + slope * xs[i]);
                resid * resid
            })
            .sum();
        let residual_std = (sse / (nf - 2.0)).sqrt();

        Some(LinearFit {
            slope,
            intercept,
            n,
            x_mean,
            sxx,
            residual_std,
        })
    }

    /// Predicted mean response at x
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// 95% confidence interval for the mean response at x
    pub fn confidence_interval(&self, x: f64) -> (f64, f64) {
        let dx = x - self.x_mean;
        let se = self.residual_std * (1.0 / self.n as f64 + dx * dx / self.sxx).sqrt();
        let y = self.predict(x);
        (y - T_95 * se, y + T_95 * se)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line_recovered() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        let fit = LinearFit::fit(&xs, &ys).unwrap();

        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-12);

        // No residual scatter, so the band collapses onto the line
        let (lo, hi) = fit.confidence_interval(2.0);
        assert!((hi - lo).abs() < 1e-9);
    }

    #[test]
    fn test_noisy_fit_band_widens_away_from_mean() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [0.1, 0.9, 2.2, 2.8, 4.1, 4.9];
        let fit = LinearFit::fit(&xs, &ys).unwrap();

        assert!((fit.slope - 1.0).abs() < 0.1);

        let center = fit.confidence_interval(2.5);
        let edge = fit.confidence_interval(5.0);
        assert!(edge.1 - edge.0 > center.1 - center.0);

        // Band straddles the prediction
        assert!(center.0 < fit.predict(2.5) && fit.predict(2.5) < center.1);
    }

    #[test]
    fn test_degenerate_inputs_rejected() {
        assert!(LinearFit::fit(&[1.0, 2.0], &[1.0, 2.0]).is_none());
        assert!(LinearFit::fit(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]).is_none());
    }
}
