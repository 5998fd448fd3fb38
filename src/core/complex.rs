// src/core/complex.rs

//! Complex arithmetic primitives shared by every kernel.
//!
//! Amplitudes are plain `Complex<f64>` values. The checked `add` and `multiply`
//! refuse non-finite operands instead of silently producing garbage, so a NaN
//! that sneaks into a state vector or a rotation angle stops the run at the
//! first arithmetic step that touches it.

use super::error::{Result, SimError};
use num_complex::Complex;

/// A single probability amplitude.
pub type Amplitude = Complex<f64>;

fn ensure_finite(value: &Amplitude, op: &str) -> Result<()> {
    if value.re.is_finite() && value.im.is_finite() {
        Ok(())
    } else {
        Err(SimError::ArithmeticInput {
            message: format!("{} received non-finite operand {}", op, value),
        })
    }
}

/// Component-wise sum `(a.re + b.re, a.im + b.im)`.
pub fn add(a: Amplitude, b: Amplitude) -> Result<Amplitude> {
    ensure_finite(&a, "add")?;
    ensure_finite(&b, "add")?;
    Ok(Complex::new(a.re + b.re, a.im + b.im))
}

/// Complex product `(a.re*b.re - a.im*b.im, a.re*b.im + a.im*b.re)`.
pub fn multiply(a: Amplitude, b: Amplitude) -> Result<Amplitude> {
    ensure_finite(&a, "multiply")?;
    ensure_finite(&b, "multiply")?;
    Ok(Complex::new(
        a.re * b.re - a.im * b.im,
        a.re * b.im + a.im * b.re,
    ))
}

/// Builds an amplitude from a wire `[re, im]` pair.
pub fn from_pair(pair: &[f64]) -> Result<Amplitude> {
    match pair {
        [re, im] => {
            let value = Complex::new(*re, *im);
            ensure_finite(&value, "from_pair")?;
            Ok(value)
        }
        _ => Err(SimError::ArithmeticInput {
            message: format!("expected a [real, imaginary] pair, got {} components", pair.len()),
        }),
    }
}

/// Inverse of [`from_pair`].
pub fn to_pair(value: Amplitude) -> [f64; 2] {
    [value.re, value.im]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_multiply() -> Result<()> {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);
        assert_eq!(add(a, b)?, Complex::new(4.0, 1.0));
        // (1 + 2i)(3 - i) = 3 - i + 6i - 2i^2 = 5 + 5i
        assert_eq!(multiply(a, b)?, Complex::new(5.0, 5.0));
        Ok(())
    }

    #[test]
    fn test_i_squared_is_minus_one() -> Result<()> {
        let i = Complex::new(0.0, 1.0);
        assert_eq!(multiply(i, i)?, Complex::new(-1.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_non_finite_operands_fail() {
        let bad = Complex::new(f64::NAN, 0.0);
        assert!(matches!(add(bad, Complex::new(1.0, 0.0)), Err(SimError::ArithmeticInput { .. })));
        let inf = Complex::new(0.0, f64::INFINITY);
        assert!(matches!(multiply(Complex::new(1.0, 0.0), inf), Err(SimError::ArithmeticInput { .. })));
    }

    #[test]
    fn test_pairs() -> Result<()> {
        let value = from_pair(&[0.5, -0.25])?;
        assert_eq!(to_pair(value), [0.5, -0.25]);
        assert!(from_pair(&[1.0]).is_err());
        assert!(from_pair(&[1.0, 2.0, 3.0]).is_err());
        assert!(from_pair(&[f64::NAN, 0.0]).is_err());
        Ok(())
    }
}
