use crate::errors::{GpError, Result};
use crate::kernels::Kernel;

/// A set of hyperparameters defining the gaussian process prior and the
/// observation noise model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GpParams {
    /// Covariance kernel k(x, x')
    kernel: Kernel,
    /// Correlation length of the kernel, > 0
    length_scale: f64,
    /// Prior variance of function values, >= 0
    signal_variance: f64,
    /// Observation noise standard deviation, >= 0
    noise_level: f64,
}

impl Default for GpParams {
    fn default() -> GpParams {
        GpParams::new()
    }
}

impl GpParams {
    /// Default parameters: RBF kernel, unit length scale and signal variance,
    /// noiseless observations.
    pub fn new() -> GpParams {
        GpParams {
            kernel: Kernel::default(),
            length_scale: 1.,
            signal_variance: 1.,
            noise_level: 0.,
        }
    }

    /// Get covariance kernel
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    /// Get length scale
    pub fn length_scale(&self) -> f64 {
        self.length_scale
    }

    /// Get signal variance
    pub fn signal_variance(&self) -> f64 {
        self.signal_variance
    }

    /// Get observation noise standard deviation
    pub fn noise_level(&self) -> f64 {
        self.noise_level
    }

    /// Set covariance kernel.
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Set covariance kernel by name, falling back to the default kernel for
    /// unknown names (see [Kernel::from_name]).
    pub fn with_kernel_name(mut self, name: &str) -> Self {
        self.kernel = Kernel::from_name(name);
        self
    }

    /// Set length scale.
    pub fn with_length_scale(mut self, length_scale: f64) -> Self {
        self.length_scale = length_scale;
        self
    }

    /// Set signal variance.
    pub fn with_signal_variance(mut self, signal_variance: f64) -> Self {
        self.signal_variance = signal_variance;
        self
    }

    /// Set observation noise standard deviation.
    pub fn with_noise_level(mut self, noise_level: f64) -> Self {
        self.noise_level = noise_level;
        self
    }

    /// Check parameters consistency.
    ///
    /// The length scale must be finite and strictly positive as kernels divide
    /// by it; signal variance and noise level must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.length_scale.is_finite() || self.length_scale <= 0. {
            return Err(GpError::InvalidValue(format!(
                "length scale should be finite and strictly positive, got {}",
                self.length_scale
            )));
        }
        if !self.signal_variance.is_finite() || self.signal_variance < 0. {
            return Err(GpError::InvalidValue(format!(
                "signal variance should be finite and non-negative, got {}",
                self.signal_variance
            )));
        }
        if !self.noise_level.is_finite() || self.noise_level < 0. {
            return Err(GpError::InvalidValue(format!(
                "noise level should be finite and non-negative, got {}",
                self.noise_level
            )));
        }
        Ok(())
    }
}
