use crate::functions::NativeFunction;
use calcix_macros::calcix_fn;

#[calcix_fn]
pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

/// Logarithm of `x` to `base`.
#[calcix_fn]
pub fn log(base: f64, x: f64) -> f64 {
    x.log(base)
}
