//! Functions that can be handed to the integrator.

/// Points closer than this to zero contribute nothing to the sum.
pub const SINGULARITY_EPSILON: f64 = 1e-10;

/// A real function of one variable, shareable between worker threads.
pub trait Integrand: Sync {
    fn eval(&self, x: f64) -> f64;
}

impl<F: Fn(f64) -> f64 + Sync> Integrand for F {
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}

/// `(cos(x) - 1) / x`, taken as 0 within [`SINGULARITY_EPSILON`] of the origin.
///
/// The limit at 0 is 0, so skipping the division there removes the
/// singularity instead of approximating it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosMinusOneOverX;

impl Integrand for CosMinusOneOverX {
    #[inline]
    fn eval(&self, x: f64) -> f64 {
        if x.abs() > SINGULARITY_EPSILON {
            (x.cos() - 1.0) / x
        } else {
            0.0
        }
    }
}

/// Same formula with the guard removed: `0/0 = NaN` at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unguarded;

impl Integrand for Unguarded {
    #[inline]
    fn eval(&self, x: f64) -> f64 {
        (x.cos() - 1.0) / x
    }
}
