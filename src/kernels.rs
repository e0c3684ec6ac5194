//! A module for covariance kernels modeling the correlation between function
//! values at two inputs.
//!
//! The following kernels are implemented:
//! * squared exponential (RBF),
//! * matern 1/2 (absolute exponential),
//! * matern 3/2,
//! * matern 5/2.

use std::fmt;

/// The closed set of covariance kernels.
///
/// Each variant is a symmetric function `k(x1, x2)` parameterized by a length
/// scale and a signal variance, evaluated through [Kernel::value]. With
/// `r = |x1 - x2| / length_scale` the variants differ in how fast correlation
/// decays with `r` and in the smoothness of the functions they model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Kernel {
    /// `s2 * exp(-(x1 - x2)^2 / (2 l^2))`, infinitely differentiable
    #[default]
    Rbf,
    /// `s2 * exp(-r)`, continuous but not differentiable
    Matern12,
    /// `s2 * (1 + sqrt(3) r) * exp(-sqrt(3) r)`, once differentiable
    Matern32,
    /// `s2 * (1 + sqrt(5) r + 5 r^2 / 3) * exp(-sqrt(5) r)`, twice differentiable
    Matern52,
}

impl Kernel {
    /// All registered kernels.
    pub const ALL: [Kernel; 4] = [
        Kernel::Rbf,
        Kernel::Matern12,
        Kernel::Matern32,
        Kernel::Matern52,
    ];

    /// Look up a kernel by name.
    ///
    /// Unknown names fall back to [Kernel::Rbf]; this is the documented
    /// default, not an error, and this is the single lookup site so the
    /// fallback applies uniformly.
    pub fn from_name(name: &str) -> Kernel {
        match name {
            "rbf" => Kernel::Rbf,
            "matern12" => Kernel::Matern12,
            "matern32" => Kernel::Matern32,
            "matern52" => Kernel::Matern52,
            _ => Kernel::default(),
        }
    }

    /// Display name, the inverse of [Kernel::from_name]
    pub fn name(&self) -> &'static str {
        match self {
            Kernel::Rbf => "rbf",
            Kernel::Matern12 => "matern12",
            Kernel::Matern32 => "matern32",
            Kernel::Matern52 => "matern52",
        }
    }

    /// One-line description of the smoothness of functions modeled by this kernel
    pub fn smoothness(&self) -> &'static str {
        match self {
            Kernel::Rbf => "infinitely differentiable",
            Kernel::Matern12 => "continuous, not differentiable",
            Kernel::Matern32 => "once differentiable",
            Kernel::Matern52 => "twice differentiable",
        }
    }

    /// Compute the covariance `k(x1, x2)` given the length scale and signal variance.
    ///
    /// Symmetric in `(x1, x2)`, O(1), and non-negative whenever
    /// `signal_variance >= 0`. `length_scale` must be nonzero; this is
    /// enforced by [GpParams::validate](crate::GpParams::validate) before any
    /// evaluation.
    pub fn value(&self, x1: f64, x2: f64, length_scale: f64, signal_variance: f64) -> f64 {
        match self {
            Kernel::Rbf => {
                let d = x1 - x2;
                signal_variance * (-d * d / (2. * length_scale * length_scale)).exp()
            }
            Kernel::Matern12 => {
                let r = (x1 - x2).abs() / length_scale;
                signal_variance * (-r).exp()
            }
            Kernel::Matern32 => {
                let v = f64::sqrt(3.) * (x1 - x2).abs() / length_scale;
                signal_variance * (1. + v) * (-v).exp()
            }
            Kernel::Matern52 => {
                let r = (x1 - x2).abs() / length_scale;
                let v = f64::sqrt(5.) * r;
                signal_variance * (1. + v + 5. * r * r / 3.) * (-v).exp()
            }
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_kernel_values() {
        let (l, s2) = (0.8, 2.0);
        assert_abs_diff_eq!(
            Kernel::Rbf.value(0.3, 1.7, l, s2),
            0.4325303336597748,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Kernel::Matern12.value(0.3, 1.7, l, s2),
            0.34754788690089033,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Kernel::Matern32.value(0.3, 1.7, l, s2),
            0.3891053336499412,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Kernel::Matern52.value(0.3, 1.7, l, s2),
            0.40025252579304976,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_self_covariance_is_signal_variance() {
        for kernel in Kernel::ALL {
            for x in [-3.2, 0., 0.5, 11.7] {
                assert_abs_diff_eq!(kernel.value(x, x, 1.3, 2.5), 2.5, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_symmetry() {
        for kernel in Kernel::ALL {
            assert_abs_diff_eq!(
                kernel.value(-1.2, 3.4, 0.7, 1.5),
                kernel.value(3.4, -1.2, 0.7, 1.5),
                epsilon = 1e-15
            );
        }
    }

    #[test]
    fn test_decay_and_positivity() {
        for kernel in Kernel::ALL {
            let near = kernel.value(0., 0.5, 1., 1.);
            let far = kernel.value(0., 5., 1., 1.);
            assert!(far < near);
            assert!(far >= 0.);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Kernel::from_name("matern32"), Kernel::Matern32);
        assert_eq!(Kernel::from_name("no-such-kernel"), Kernel::Rbf);
        for kernel in Kernel::ALL {
            assert_eq!(Kernel::from_name(kernel.name()), kernel);
            assert!(!kernel.smoothness().is_empty());
        }
    }
}
