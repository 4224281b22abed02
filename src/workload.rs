//! CPU-bound workload generator

/// Largest argument for which [`fibonacci()`] fits in a `u64`
pub const MAX_DEPTH: u64 = 92;

/// Naive recursive computation of the N-th term of the Fibonacci sequence
///
/// The sequence is indexed such that `fibonacci(0) == fibonacci(1) == 1`. This
/// is obviously not how you would efficiently compute this (see
/// [`fibonacci_ref()`] for that), but its exponential call tree makes for a
/// deterministic CPU-bound workload whose duration is easily tuned.
///
/// Touches no shared state, so its result cannot be affected by concurrent
/// interference. Overflows for `n > MAX_DEPTH`.
#[inline]
pub fn fibonacci(n: u64) -> u64 {
    if n < 2 {
        1
    } else {
        fibonacci(n - 1) + fibonacci(n - 2)
    }
}

/// Closed-form computation of the same sequence as [`fibonacci()`]
///
/// Accurate as long as the result fits in the mantissa of an `f64`, which is
/// far beyond any depth at which the recursive version completes.
pub fn fibonacci_ref(n: u64) -> u64 {
    // fibonacci(n) is the (n+1)-th term of the textbook sequence
    let sqrt_5 = 5.0f64.sqrt();
    let phi = (1.0 + sqrt_5) / 2.0;
    let exponent = i32::try_from(n + 1).unwrap_or(i32::MAX);
    let f_n = phi.powi(exponent) / sqrt_5;
    f_n.round() as u64
}
