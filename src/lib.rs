//! This library implements exact [Gaussian Process](https://en.wikipedia.org/wiki/Gaussian_process)
//! regression, also known as [Kriging](https://en.wikipedia.org/wiki/Kriging), over scalar inputs.
//!
//! Given noisy observations of an unknown function, it computes the closed-form
//! posterior mean and variance at arbitrary query points and can draw random
//! function values from the prior or posterior. The algorithm is the exact one:
//! the regularized training covariance is factorized once per call with a
//! Cholesky decomposition, in O(N^3) processing time and O(N^2) memory where N
//! is the number of observations, and the factorization is reused for the mean,
//! variance and sampling computations. This targets small-to-moderate N; no
//! sparse approximation is provided.
//!
//! Posterior statistics are computed by [posterior] from a set of
//! [Observation]s and a [GpParams] bundle; random draws by [sample_path].
//! Covariance kernels are the closed [kernels::Kernel] set.
//!
//! ```
//! use gp_regression::{linspace, posterior, GpParams, Kernel, Observation};
//!
//! let observations = vec![Observation::new(0.0, 0.5), Observation::new(2.0, -0.3)];
//! let params = GpParams::new().with_kernel(Kernel::Matern52);
//! let query = linspace(0., 2., 5);
//! let post = posterior(&observations, &query, &params).expect("valid parameters");
//! assert_eq!(post.mean.len(), query.len());
//! ```
mod algorithm;
mod errors;
pub mod kernels;
pub mod linalg;
mod parameters;

pub use algorithm::*;
pub use errors::*;
pub use kernels::Kernel;
pub use linalg::linspace;
pub use parameters::*;
