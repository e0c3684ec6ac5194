//! Dense linear algebra primitives backing the inference engine.
//!
//! Construction helpers delegate to `ndarray`; the Cholesky factorization and
//! the triangular solves are implemented here so that all numerics the
//! posterior depends on stay in-crate and behave consistently. Dimension
//! mismatches are programmer errors and fail fast through assertions rather
//! than producing silently truncated results.

use log::warn;
use ndarray::{Array, Array1, Array2, ArrayBase, Data, Ix1, Ix2};
use ndarray_rand::rand::Rng;

/// Floor applied to Cholesky diagonal entries before the square root.
///
/// A numerical floor, not a regularization: it prevents a negative sqrt
/// argument arising from rounding error or near-singular input, at the price
/// of silently clamping mild non-positive-definiteness.
pub const CHOL_DIAG_FLOOR: f64 = 1e-10;

/// `n x m` matrix filled with `value`
pub fn full(n: usize, m: usize, value: f64) -> Array2<f64> {
    assert!(n >= 1 && m >= 1, "full: dimensions must be positive");
    Array2::from_elem((n, m), value)
}

/// `n x n` identity matrix
pub fn eye(n: usize) -> Array2<f64> {
    assert!(n >= 1, "eye: dimension must be positive");
    Array2::eye(n)
}

/// `n` evenly spaced values from `start` to `end` inclusive, dividing the
/// range into `n - 1` equal steps. Requires `n >= 2`.
pub fn linspace(start: f64, end: f64, n: usize) -> Array1<f64> {
    assert!(n >= 2, "linspace: at least two points required");
    Array::linspace(start, end, n)
}

/// Transpose of `a`
pub fn transpose(a: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Array2<f64> {
    a.t().to_owned()
}

/// Matrix-vector product `a . x`
pub fn mat_vec(
    a: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    x: &ArrayBase<impl Data<Elem = f64>, Ix1>,
) -> Array1<f64> {
    assert_eq!(a.ncols(), x.len(), "mat_vec: dimension mismatch");
    a.dot(x)
}

/// `a` with `c` added to every diagonal entry; `a` must be square
pub fn add_diag(a: &ArrayBase<impl Data<Elem = f64>, Ix2>, c: f64) -> Array2<f64> {
    assert_eq!(a.nrows(), a.ncols(), "add_diag: matrix must be square");
    let mut out = a.to_owned();
    out.diag_mut().mapv_inplace(|v| v + c);
    out
}

/// Cholesky factorization of a symmetric positive-(semi)definite matrix.
///
/// Returns the lower-triangular `L` with `L . L^T = a`. Diagonal arguments of
/// the square root are floored at [CHOL_DIAG_FLOOR]; when the floor engages
/// the input was not positive-definite at working precision and a warning is
/// logged, but the factorization still succeeds.
pub fn cholesky(a: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Array2<f64> {
    assert_eq!(a.nrows(), a.ncols(), "cholesky: matrix must be square");
    let n = a.nrows();
    let mut l: Array2<f64> = Array2::zeros((n, n));
    let mut clamped = 0;
    for i in 0..n {
        for j in 0..=i {
            let mut s = a[[i, j]];
            for k in 0..j {
                s -= l[[i, k]] * l[[j, k]];
            }
            if i == j {
                if s < CHOL_DIAG_FLOOR {
                    clamped += 1;
                }
                l[[i, i]] = s.max(CHOL_DIAG_FLOOR).sqrt();
            } else {
                l[[i, j]] = s / l[[j, j]];
            }
        }
    }
    if clamped > 0 {
        warn!(
            "cholesky: {clamped}/{n} diagonal entries clamped to {CHOL_DIAG_FLOOR:e}, \
             input matrix is not positive-definite at working precision"
        );
    }
    l
}

/// Forward substitution solving `l . x = b` for lower-triangular `l`, O(n^2)
pub fn solve_lower(
    l: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    b: &ArrayBase<impl Data<Elem = f64>, Ix1>,
) -> Array1<f64> {
    let n = l.nrows();
    assert_eq!(n, b.len(), "solve_lower: dimension mismatch");
    let mut x = Array1::zeros(n);
    for i in 0..n {
        let mut s = b[i];
        for k in 0..i {
            s -= l[[i, k]] * x[k];
        }
        x[i] = s / l[[i, i]];
    }
    x
}

/// Backward substitution solving `l^T . x = b` for lower-triangular `l`, O(n^2)
pub fn solve_lower_t(
    l: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    b: &ArrayBase<impl Data<Elem = f64>, Ix1>,
) -> Array1<f64> {
    let n = l.nrows();
    assert_eq!(n, b.len(), "solve_lower_t: dimension mismatch");
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut s = b[i];
        for k in (i + 1)..n {
            s -= l[[k, i]] * x[k];
        }
        x[i] = s / l[[i, i]];
    }
    x
}

/// Solve `(l . l^T) . x = b` given the Cholesky factor `l`, O(n^2)
pub fn cholesky_solve(
    l: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    b: &ArrayBase<impl Data<Elem = f64>, Ix1>,
) -> Array1<f64> {
    solve_lower_t(l, &solve_lower(l, b))
}

/// One standard-normal variate via the Box-Muller transform.
///
/// Uses two independent uniform(0,1) draws from `rng`, resampling either draw
/// if it is exactly 0 so the logarithm stays finite.
pub fn randn<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let mut u1: f64 = rng.gen();
    while u1 == 0. {
        u1 = rng.gen();
    }
    let mut u2: f64 = rng.gen();
    while u2 == 0. {
        u2 = rng.gen();
    }
    (-2. * u1.ln()).sqrt() * (2. * std::f64::consts::PI * u2).cos()
}

/// Vector of `n` independent standard-normal variates
pub fn randn_vector<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Array1<f64> {
    (0..n).map(|_| randn(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use ndarray_rand::rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn test_constructors() {
        assert_eq!(full(2, 3, 1.5), array![[1.5, 1.5, 1.5], [1.5, 1.5, 1.5]]);
        assert_eq!(eye(2), array![[1., 0.], [0., 1.]]);
        assert_eq!(linspace(0., 10., 5), array![0., 2.5, 5., 7.5, 10.]);
    }

    #[test]
    #[should_panic]
    fn test_linspace_needs_two_points() {
        linspace(0., 1., 1);
    }

    #[test]
    fn test_transpose_mat_vec_add_diag() {
        let a = array![[1., 2., 3.], [4., 5., 6.]];
        assert_eq!(transpose(&a), array![[1., 4.], [2., 5.], [3., 6.]]);
        assert_eq!(mat_vec(&a, &array![1., 0., -1.]), array![-2., -2.]);
        assert_eq!(
            add_diag(&array![[1., 2.], [3., 4.]], 0.5),
            array![[1.5, 2.], [3., 4.5]]
        );
    }

    #[test]
    fn test_cholesky_known_factor() {
        let a = array![[4., 2.], [2., 3.]];
        let l = cholesky(&a);
        assert_abs_diff_eq!(l, array![[2., 0.], [1., f64::sqrt(2.)]], epsilon = 1e-12);
        assert_abs_diff_eq!(l.dot(&l.t()), a, epsilon = 1e-12);
    }

    #[test]
    fn test_cholesky_reconstructs_regularized_kernel_matrix() {
        // RBF gram matrix plus a positive diagonal shift, the shape of input
        // the posterior feeds to the factorization
        let x = [0.5, 1.2, 2.0, 3.0, 4.0];
        let mut k = Array2::zeros((5, 5));
        for i in 0..5 {
            for j in 0..5 {
                k[[i, j]] = crate::Kernel::Rbf.value(x[i], x[j], 1., 1.);
            }
        }
        let a = add_diag(&k, 1e-2);
        let l = cholesky(&a);
        assert_abs_diff_eq!(l.dot(&l.t()), a, epsilon = 1e-6);
    }

    #[test]
    fn test_triangular_solves() {
        let l = array![[2., 0.], [1., 1.]];
        assert_abs_diff_eq!(
            solve_lower(&l, &array![2., 3.]),
            array![1., 2.],
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            solve_lower_t(&l, &array![2., 3.]),
            array![-0.5, 3.],
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_cholesky_solve_round_trip() {
        let a = array![[4., 2., 0.6], [2., 3., 0.2], [0.6, 0.2, 2.]];
        let l = cholesky(&a);
        let b = array![1., -2., 0.3];
        let x = cholesky_solve(&l, &b);
        // (L . L^T) . x should give b back
        let back = mat_vec(&l, &mat_vec(&transpose(&l), &x));
        assert_abs_diff_eq!(back, b, epsilon = 1e-9);
    }

    #[test]
    fn test_randn_is_seed_deterministic() {
        let mut rng1 = Xoshiro256Plus::seed_from_u64(42);
        let mut rng2 = Xoshiro256Plus::seed_from_u64(42);
        let draws1 = randn_vector(10, &mut rng1);
        let draws2 = randn_vector(10, &mut rng2);
        assert_eq!(draws1, draws2);
        assert!(draws1.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_randn_moments() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        let n = 20000;
        let draws = randn_vector(n, &mut rng);
        let mean = draws.sum() / n as f64;
        let var = draws.mapv(|v| (v - mean) * (v - mean)).sum() / (n - 1) as f64;
        assert_abs_diff_eq!(mean, 0., epsilon = 0.05);
        assert_abs_diff_eq!(var, 1., epsilon = 0.05);
    }
}
