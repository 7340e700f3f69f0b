//! Math natives
//!
//! Every function takes numbers and returns a number. Domain errors follow
//! IEEE 754 (`Koren(0 - 1)` is NaN) rather than raising.

use super::number_arg;
use crate::span::Span;
use crate::value::{RuntimeError, Value};
use rand::RngExt;

/// π
pub const PI: f64 = std::f64::consts::PI;

/// Largest n whose factorial is finite in f64
const MAX_FINITE_FACTORIAL: f64 = 170.0;

fn unary(name: &str, args: &[Value], span: Span, f: fn(f64) -> f64) -> Result<Value, RuntimeError> {
    Ok(Value::Number(f(number_arg(name, args, 0, span)?)))
}

pub fn kvadrat(args: &[Value], span: Span) -> Result<Value, RuntimeError> {
    unary("Kvadrat", args, span, |x| x * x)
}

pub fn kub(args: &[Value], span: Span) -> Result<Value, RuntimeError> {
    unary("Kub", args, span, |x| x * x * x)
}

pub fn koren(args: &[Value], span: Span) -> Result<Value, RuntimeError> {
    unary("Koren", args, span, f64::sqrt)
}

/// Rounds half away from zero
pub fn zaokrozi(args: &[Value], span: Span) -> Result<Value, RuntimeError> {
    unary("Zaokrozi", args, span, f64::round)
}

pub fn sin(args: &[Value], span: Span) -> Result<Value, RuntimeError> {
    unary("Sin", args, span, f64::sin)
}

pub fn cos(args: &[Value], span: Span) -> Result<Value, RuntimeError> {
    unary("Cos", args, span, f64::cos)
}

pub fn tan(args: &[Value], span: Span) -> Result<Value, RuntimeError> {
    unary("Tan", args, span, f64::tan)
}

/// Faktorial(n) -> number
///
/// Product of `1..=trunc(n)`; 1 when n < 1, NaN for NaN, infinity past 170.
pub fn faktorial(args: &[Value], span: Span) -> Result<Value, RuntimeError> {
    let n = number_arg("Faktorial", args, 0, span)?.trunc();
    if n.is_nan() {
        return Ok(Value::Number(f64::NAN));
    }
    if n > MAX_FINITE_FACTORIAL {
        return Ok(Value::Number(f64::INFINITY));
    }

    let mut product = 1.0;
    let mut i = 2.0;
    while i <= n {
        product *= i;
        i += 1.0;
    }
    Ok(Value::Number(product))
}

/// NakljucnoStevilo(min, max) -> number
///
/// Uniform integer in `[trunc(min), trunc(max)]`, both ends inclusive.
pub fn nakljucno_stevilo(args: &[Value], span: Span) -> Result<Value, RuntimeError> {
    let min = number_arg("NakljucnoStevilo", args, 0, span)?.trunc();
    let max = number_arg("NakljucnoStevilo", args, 1, span)?.trunc();

    if !min.is_finite() || !max.is_finite() {
        return Err(RuntimeError::NativeArgument {
            name: "NakljucnoStevilo".to_string(),
            msg: "bounds must be finite".to_string(),
            span,
        });
    }
    if min > max {
        return Err(RuntimeError::NativeArgument {
            name: "NakljucnoStevilo".to_string(),
            msg: format!("min ({}) is greater than max ({})", min, max),
            span,
        });
    }

    let mut rng = rand::rng();
    let value = rng.random_range(min as i64..=max as i64);
    Ok(Value::Number(value as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn num(result: Result<Value, RuntimeError>) -> f64 {
        match result.unwrap() {
            Value::Number(n) => n,
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[rstest]
    #[case(kvadrat, 3.0, 9.0)]
    #[case(kvadrat, -4.0, 16.0)]
    #[case(kub, 2.0, 8.0)]
    #[case(kub, -3.0, -27.0)]
    #[case(koren, 16.0, 4.0)]
    #[case(zaokrozi, 2.5, 3.0)]
    #[case(zaokrozi, -2.5, -3.0)]
    #[case(zaokrozi, 2.4, 2.0)]
    #[case(sin, 0.0, 0.0)]
    #[case(cos, 0.0, 1.0)]
    #[case(tan, 0.0, 0.0)]
    fn test_unary(
        #[case] f: fn(&[Value], Span) -> Result<Value, RuntimeError>,
        #[case] input: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(num(f(&[Value::Number(input)], Span::dummy())), expected);
    }

    #[test]
    fn test_koren_negative_is_nan() {
        assert!(num(koren(&[Value::Number(-1.0)], Span::dummy())).is_nan());
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(-3.0, 1.0)]
    #[case(1.0, 1.0)]
    #[case(5.0, 120.0)]
    #[case(5.9, 120.0)]
    #[case(10.0, 3628800.0)]
    fn test_faktorial(#[case] n: f64, #[case] expected: f64) {
        assert_eq!(num(faktorial(&[Value::Number(n)], Span::dummy())), expected);
    }

    #[test]
    fn test_faktorial_overflow() {
        assert!(num(faktorial(&[Value::Number(170.0)], Span::dummy())).is_finite());
        assert_eq!(
            num(faktorial(&[Value::Number(171.0)], Span::dummy())),
            f64::INFINITY
        );
    }

    #[test]
    fn test_type_error() {
        let err = kvadrat(&[Value::string("dva")], Span::dummy()).unwrap_err();
        assert!(matches!(err, RuntimeError::NativeArgument { ref name, .. } if name == "Kvadrat"));
    }

    #[test]
    fn test_nakljucno_stevilo_in_range() {
        for _ in 0..200 {
            let n = num(nakljucno_stevilo(
                &[Value::Number(1.0), Value::Number(6.0)],
                Span::dummy(),
            ));
            assert!((1.0..=6.0).contains(&n));
            assert_eq!(n.fract(), 0.0);
        }
    }

    #[test]
    fn test_nakljucno_stevilo_single_value() {
        let n = num(nakljucno_stevilo(
            &[Value::Number(4.7), Value::Number(4.2)],
            Span::dummy(),
        ));
        assert_eq!(n, 4.0);
    }

    #[test]
    fn test_nakljucno_stevilo_inverted_bounds() {
        let err =
            nakljucno_stevilo(&[Value::Number(5.0), Value::Number(1.0)], Span::dummy()).unwrap_err();
        assert!(err.to_string().contains("greater than max"));
    }
}
