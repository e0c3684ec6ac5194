use gp_regression::{linspace, posterior, sample_path, GpParams, Kernel, Observation};

fn xsinx(x: f64) -> f64 {
    (x - 3.5) * ((x - 3.5) / std::f64::consts::PI).sin()
}

fn main() {
    env_logger::init();

    let observations: Vec<Observation> = [0.0, 5.0, 10.0, 15.0, 18.0, 20.0, 25.0]
        .iter()
        .map(|&x| Observation::new(x, xsinx(x)))
        .collect();

    let params = GpParams::new()
        .with_kernel(Kernel::Matern52)
        .with_length_scale(3.)
        .with_signal_variance(25.)
        .with_noise_level(0.1);

    println!(
        "Posterior of 'xsinx' with {} kernel ({})",
        params.kernel(),
        params.kernel().smoothness()
    );
    let query = linspace(0., 25., 26);
    let post = posterior(&observations, &query, &params).expect("valid parameters");

    println!("x, mean(x), err(x), sigma(x)");
    for (i, &x) in query.iter().enumerate() {
        println!(
            "{:5.1}, {:8.4}, {:8.4}, {:7.4}",
            x,
            post.mean[i],
            post.mean[i] - xsinx(x),
            post.variance[i].sqrt()
        );
    }

    let path = sample_path(&observations, &query, &params).expect("valid parameters");
    println!("One posterior draw: {path:.3}");
}
