use crate::errors::Result;
use crate::linalg::{
    add_diag, cholesky, cholesky_solve, mat_vec, randn_vector, solve_lower, transpose,
};
use crate::parameters::GpParams;
use ndarray::{Array1, Array2, ArrayBase, Data, Ix1};
use ndarray_rand::rand::{thread_rng, Rng};

/// Additive diagonal regularization applied to the training and prior
/// covariance before factorization. Guarantees strict positive-definiteness
/// even at zero noise level.
pub const COV_JITTER: f64 = 1e-8;

/// Additive diagonal regularization for the posterior sample covariance.
/// Larger than [COV_JITTER] because that matrix is a difference of two
/// positive-semidefinite terms and more prone to small negative eigenvalues.
pub const SAMPLE_COV_JITTER: f64 = 1e-6;

/// Lower bound on reported posterior variances. The analytic value is never
/// negative, so this only absorbs floating-point error.
pub const VARIANCE_FLOOR: f64 = 1e-10;

/// One noisy observation (x, y) of the unknown function
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    /// Input location
    pub x: f64,
    /// Observed output
    pub y: f64,
}

impl Observation {
    /// Constructor
    pub fn new(x: f64, y: f64) -> Observation {
        Observation { x, y }
    }
}

/// Posterior statistics at a set of query inputs, index-aligned with them
#[derive(Clone, Debug)]
pub struct Posterior {
    /// Posterior mean per query input
    pub mean: Array1<f64>,
    /// Posterior variance per query input, >= [VARIANCE_FLOOR]
    pub variance: Array1<f64>,
}

/// Dense matrix of pairwise kernel evaluations between two input sequences.
fn kernel_matrix(
    xa: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    xb: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    params: &GpParams,
) -> Array2<f64> {
    let mut k = Array2::zeros((xa.len(), xb.len()));
    for (i, &x1) in xa.iter().enumerate() {
        for (j, &x2) in xb.iter().enumerate() {
            k[[i, j]] = params
                .kernel()
                .value(x1, x2, params.length_scale(), params.signal_variance());
        }
    }
    k
}

fn split_observations(observations: &[Observation]) -> (Array1<f64>, Array1<f64>) {
    let xt = observations.iter().map(|o| o.x).collect();
    let yt = observations.iter().map(|o| o.y).collect();
    (xt, yt)
}

/// Compute the posterior mean and variance at `query_inputs` given
/// `observations` under the prior defined by `params`.
///
/// With zero observations this returns the prior itself: zero mean and
/// `signal_variance` at every query point, with no factorization. Otherwise
/// the training covariance `K(X, X) + (noise^2 + jitter) I` is factorized once
/// with a Cholesky decomposition and the factor is reused for every query
/// point: with `v_i = L^-1 k*_i` and `alpha = L^-1 y`,
///
/// * `mean_i = v_i . alpha` (equal to `k*_i^T K^-1 y` since
///   `K^-1 = L^-T L^-1`),
/// * `variance_i = max(signal_variance - |v_i|^2, VARIANCE_FLOOR)`.
///
/// O(N^3) for the factorization plus O(N^2 M) for M query points.
///
/// Errors when `params` violates its contract (see [GpParams::validate]).
pub fn posterior(
    observations: &[Observation],
    query_inputs: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    params: &GpParams,
) -> Result<Posterior> {
    params.validate()?;
    let m = query_inputs.len();
    if observations.is_empty() {
        return Ok(Posterior {
            mean: Array1::zeros(m),
            variance: Array1::from_elem(m, params.signal_variance()),
        });
    }

    let (xt, yt) = split_observations(observations);
    let noise_var = params.noise_level() * params.noise_level();
    let k_xx = add_diag(&kernel_matrix(&xt, &xt, params), noise_var + COV_JITTER);
    let l = cholesky(&k_xx);
    let k_sx = kernel_matrix(query_inputs, &xt, params);

    // Whitened target: v_i . alpha == k*_i^T K^-1 y, no backward solve needed
    let alpha = solve_lower(&l, &yt);

    let mut mean = Array1::zeros(m);
    let mut variance = Array1::zeros(m);
    for i in 0..m {
        let v = solve_lower(&l, &k_sx.row(i));
        mean[i] = v.dot(&alpha);
        variance[i] = (params.signal_variance() - v.dot(&v)).max(VARIANCE_FLOOR);
    }
    Ok(Posterior { mean, variance })
}

/// Draw one random function evaluated at `sample_inputs`, from the prior when
/// `observations` is empty and from the posterior otherwise, using `rng` as
/// the source of randomness.
///
/// The prior branch factorizes `K(Xs, Xs) + jitter I` and returns `L . z` with
/// `z ~ N(0, I)`. The posterior branch computes the posterior mean and the
/// conditioned covariance `K(Xs, Xs) - V^T V`, regularizes its diagonal with
/// [SAMPLE_COV_JITTER], factorizes it and returns `mean + L . z`.
///
/// Errors when `params` violates its contract (see [GpParams::validate]).
pub fn sample_path_with<R: Rng + ?Sized>(
    observations: &[Observation],
    sample_inputs: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    params: &GpParams,
    rng: &mut R,
) -> Result<Array1<f64>> {
    params.validate()?;
    let m = sample_inputs.len();
    if observations.is_empty() {
        let k_ss = add_diag(&kernel_matrix(sample_inputs, sample_inputs, params), COV_JITTER);
        let l = cholesky(&k_ss);
        let z = randn_vector(m, rng);
        return Ok(mat_vec(&l, &z));
    }

    let (xt, yt) = split_observations(observations);
    let n = xt.len();
    let noise_var = params.noise_level() * params.noise_level();
    let k_xx = add_diag(&kernel_matrix(&xt, &xt, params), noise_var + COV_JITTER);
    let l_xx = cholesky(&k_xx);
    let k_sx = kernel_matrix(sample_inputs, &xt, params);

    let alpha = cholesky_solve(&l_xx, &yt);
    let mean = mat_vec(&k_sx, &alpha);

    // Conditioned covariance K(Xs, Xs) - V^T V, column i of V = L^-1 k*_i
    let mut v = Array2::zeros((n, m));
    for i in 0..m {
        v.column_mut(i).assign(&solve_lower(&l_xx, &k_sx.row(i)));
    }
    let k_ss = kernel_matrix(sample_inputs, sample_inputs, params);
    let cov = add_diag(&(k_ss - transpose(&v).dot(&v)), SAMPLE_COV_JITTER);
    let l_cov = cholesky(&cov);

    let z = randn_vector(m, rng);
    Ok(mean + mat_vec(&l_cov, &z))
}

/// [sample_path_with] using the thread-local random source
pub fn sample_path(
    observations: &[Observation],
    sample_inputs: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    params: &GpParams,
) -> Result<Array1<f64>> {
    sample_path_with(observations, sample_inputs, params, &mut thread_rng())
}
