//! Real root extraction for quartic polynomials.
//!
//! Roots are taken as the eigenvalues of the companion matrix, then polished
//! with Newton's method so simple roots come back to full precision.

use nalgebra::Matrix4;
use num::complex::Complex;

/// Largest imaginary part, relative to the root magnitude, still treated as real.
const IMAGINARY_TOLERANCE: f64 = 1.0e-6;

/// Relative separation below which two real roots are treated as one double root.
const CLUSTER_TOLERANCE: f64 = 1.0e-6;

/// Upper bound on Newton refinement steps per root.
const MAX_POLISH_STEPS: usize = 16;

/// Polynomial `c4*x^4 + c3*x^3 + c2*x^2 + c1*x + c0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quartic {
    /// Coefficients ordered from the quartic term down to the constant.
    pub coefficients: [f64; 5],
}

impl Quartic {
    /// Create a quartic from coefficients ordered `[c4, c3, c2, c1, c0]`.
    #[must_use]
    pub const fn new(coefficients: [f64; 5]) -> Self {
        Self { coefficients }
    }

    /// Evaluate the polynomial with Horner's scheme.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .fold(0.0, |acc, &coefficient| acc * x + coefficient)
    }

    /// Evaluate the first derivative.
    #[must_use]
    pub fn derivative(&self, x: f64) -> f64 {
        let [c4, c3, c2, c1, _] = self.coefficients;
        ((4.0 * c4 * x + 3.0 * c3) * x + 2.0 * c2) * x + c1
    }

    /// Evaluate the second derivative.
    #[must_use]
    pub fn second_derivative(&self, x: f64) -> f64 {
        let [c4, c3, c2, _, _] = self.coefficients;
        (12.0 * c4 * x + 6.0 * c3) * x + 2.0 * c2
    }

    /// Substitute `x = scale * t`, returning the quartic in `t`.
    #[must_use]
    pub fn rescaled(&self, scale: f64) -> Self {
        let mut coefficients = self.coefficients;
        let mut factor = 1.0;
        for coefficient in coefficients.iter_mut().rev() {
            *coefficient *= factor;
            factor *= scale;
        }
        Self::new(coefficients)
    }

    /// Complex roots from the eigenvalues of the companion matrix.
    ///
    /// Returns an empty vector when the leading coefficient vanishes.
    #[must_use]
    pub fn complex_roots(&self) -> Vec<Complex<f64>> {
        let [c4, c3, c2, c1, c0] = self.coefficients;
        if c4 == 0.0 || !c4.is_finite() {
            return Vec::new();
        }
        #[rustfmt::skip]
        let companion = Matrix4::new(
            -c3 / c4, -c2 / c4, -c1 / c4, -c0 / c4,
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
        );
        companion.complex_eigenvalues().iter().copied().collect()
    }

    /// Real roots, sorted ascending.
    ///
    /// A complex root counts as real when its imaginary part is negligible
    /// relative to its magnitude. Each real root is refined with Newton's
    /// method. Where two real roots nearly coincide, the stationary point
    /// between them is appended as well, since a double root is located far
    /// more precisely as a root of the derivative.
    #[must_use]
    pub fn real_roots(&self) -> Vec<f64> {
        let mut roots: Vec<f64> = self
            .complex_roots()
            .into_iter()
            .filter(|root| root.im.abs() <= IMAGINARY_TOLERANCE * root.norm().max(1.0))
            .map(|root| {
                polish(
                    |x| self.evaluate(x),
                    |x| self.derivative(x),
                    root.re,
                )
            })
            .collect();
        roots.sort_by(f64::total_cmp);

        let mut stationary = Vec::new();
        for pair in roots.windows(2) {
            let (low, high) = (pair[0], pair[1]);
            if high - low <= CLUSTER_TOLERANCE * low.abs().max(high.abs()).max(1.0) {
                stationary.push(polish(
                    |x| self.derivative(x),
                    |x| self.second_derivative(x),
                    0.5 * (low + high),
                ));
            }
        }
        roots.extend(stationary);
        roots.sort_by(f64::total_cmp);
        roots
    }
}

/// Refine a root of `f` with Newton steps, stopping as soon as a step fails to
/// reduce `|f|`.
fn polish(f: impl Fn(f64) -> f64, df: impl Fn(f64) -> f64, start: f64) -> f64 {
    let mut x = start;
    let mut value = f(x);
    for _ in 0..MAX_POLISH_STEPS {
        let slope = df(x);
        if value == 0.0 || slope == 0.0 || !slope.is_finite() {
            break;
        }
        let next = x - value / slope;
        let next_value = f(next);
        if next_value.is_nan() || next_value.abs() >= value.abs() {
            break;
        }
        x = next;
        value = next_value;
    }
    x
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    /// Expand `k * (x - a)(x - b)(x - c)(x - d)`.
    fn from_roots(k: f64, roots: [f64; 4]) -> Quartic {
        let mut coefficients = vec![k];
        for root in roots {
            let mut next = vec![0.0; coefficients.len() + 1];
            for (idx, coefficient) in coefficients.iter().enumerate() {
                next[idx] += coefficient;
                next[idx + 1] -= coefficient * root;
            }
            coefficients = next;
        }
        Quartic::new([
            coefficients[0],
            coefficients[1],
            coefficients[2],
            coefficients[3],
            coefficients[4],
        ])
    }

    #[test]
    fn evaluates_with_horner() {
        let quartic = Quartic::new([1.0, -2.0, 0.0, 3.0, -4.0]);
        assert_relative_eq!(quartic.evaluate(2.0), 16.0 - 16.0 + 6.0 - 4.0);
        assert_relative_eq!(quartic.derivative(2.0), 32.0 - 24.0 + 3.0);
        assert_relative_eq!(quartic.second_derivative(2.0), 48.0 - 24.0);
    }

    #[test]
    fn rescaling_substitutes_variable() {
        let quartic = Quartic::new([1.0, 2.0, 3.0, 4.0, 5.0]);
        let scaled = quartic.rescaled(10.0);
        assert_relative_eq!(scaled.evaluate(0.3), quartic.evaluate(3.0), epsilon = 1.0e-9);
    }

    #[test]
    fn finds_four_distinct_real_roots() {
        let quartic = from_roots(-3.0, [-1.5, 0.25, 2.0, 7.0]);
        let roots = quartic.real_roots();
        assert_eq!(roots.len(), 4);
        for (found, expected) in roots.iter().zip([-1.5, 0.25, 2.0, 7.0]) {
            assert_relative_eq!(*found, expected, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn discards_complex_pairs() {
        // (x^2 + 1)(x - 1)(x - 3)
        let quartic = Quartic::new([1.0, -4.0, 4.0, -4.0, 3.0]);
        let roots = quartic.real_roots();
        assert_eq!(roots.len(), 2);
        assert_relative_eq!(roots[0], 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(roots[1], 3.0, epsilon = 1.0e-12);
    }

    #[test]
    fn no_real_roots_yields_empty_set() {
        // (x^2 + 1)(x^2 + 4)
        let quartic = Quartic::new([1.0, 0.0, 5.0, 0.0, 4.0]);
        assert!(quartic.real_roots().is_empty());
    }

    #[test]
    fn double_root_is_recovered_precisely() {
        let quartic = from_roots(-8.0, [0.5, 0.5, 2.0, -1.0]);
        let roots = quartic.real_roots();
        let closest = roots
            .iter()
            .copied()
            .min_by(|a, b| (a - 0.5).abs().total_cmp(&(b - 0.5).abs()))
            .expect("root near the double root");
        assert_relative_eq!(closest, 0.5, epsilon = 1.0e-12);
    }

    #[test]
    fn vanishing_leading_coefficient_has_no_roots() {
        let quartic = Quartic::new([0.0, 1.0, 0.0, 0.0, -1.0]);
        assert!(quartic.complex_roots().is_empty());
    }
}
