// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Errors raised by the rate calculations.

There are only two ways for a computation to go wrong: the caller handed us
numbers that make no physical sense, or the integrator could not reach the
requested tolerance. The second case carries the partial result so that the
caller can decide whether it is good enough.

*/

use thiserror::Error;

use crate::quadrature::QuadratureError;


/// Convenience alias for results of this crate.
pub type SchechterResult<T> = Result<T, SchechterError>;


/// An error from one of the calculations in this crate.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchechterError {
    /// An input was outside the domain of the calculation: a non-positive
    /// mass, a non-positive characteristic mass, a zero reference density,
    /// and so on.
    #[error("invalid argument: {what} (got {value:e})")]
    InvalidArgument {
        /// What was wrong with the input.
        what: &'static str,

        /// The offending value.
        value: f64,
    },

    /// The numerical integration did not converge. The partial result and
    /// its error estimate are carried along.
    #[error("numerical instability: {reason}; partial result {value:e} +/- {abserr:e}")]
    NumericalInstability {
        /// The best estimate of the integral when the integrator gave up.
        value: f64,

        /// The estimated absolute error of `value`.
        abserr: f64,

        /// Why the integrator gave up.
        reason: &'static str,
    },
}


impl SchechterError {
    /// Construct an `InvalidArgument` error.
    pub fn invalid(what: &'static str, value: f64) -> Self {
        SchechterError::InvalidArgument { what, value }
    }

    /// If this error carries a partial integration result, return it as
    /// `(value, abserr)`.
    pub fn partial_result(&self) -> Option<(f64, f64)> {
        match *self {
            SchechterError::NumericalInstability { value, abserr, .. } => Some((value, abserr)),
            SchechterError::InvalidArgument { .. } => None,
        }
    }
}


impl From<QuadratureError> for SchechterError {
    fn from(e: QuadratureError) -> Self {
        match e {
            QuadratureError::BadTolerance { what, value } => SchechterError::InvalidArgument { what, value },
            QuadratureError::DidNotConverge { value, abserr, reason } => {
                SchechterError::NumericalInstability { value, abserr, reason }
            },
        }
    }
}


/// Require that `x` is finite and strictly positive.
pub(crate) fn require_positive(what: &'static str, x: f64) -> SchechterResult<f64> {
    if x.is_finite() && x > 0. {
        Ok(x)
    } else {
        Err(SchechterError::invalid(what, x))
    }
}


/// Require that `x` is finite and not negative.
pub(crate) fn require_non_negative(what: &'static str, x: f64) -> SchechterResult<f64> {
    if x.is_finite() && x >= 0. {
        Ok(x)
    } else {
        Err(SchechterError::invalid(what, x))
    }
}


/// Require that `x` is finite.
pub(crate) fn require_finite(what: &'static str, x: f64) -> SchechterResult<f64> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(SchechterError::invalid(what, x))
    }
}


#[cfg(test)]
mod tests {
    use crate::quadrature::QuadratureError;
    use super::*;

    #[test]
    fn partial_result_survives_conversion() {
        let e: SchechterError = QuadratureError::DidNotConverge {
            value: 1.5,
            abserr: 0.25,
            reason: "panel limit reached",
        }.into();

        assert_eq!(e.partial_result(), Some((1.5, 0.25)));
        assert!(e.to_string().contains("panel limit reached"));
    }

    #[test]
    fn validators() {
        assert!(require_positive("m", 0.).is_err());
        assert!(require_positive("m", f64::NAN).is_err());
        assert!(require_positive("m", f64::INFINITY).is_err());
        assert_eq!(require_positive("m", 2.), Ok(2.));
        assert_eq!(require_non_negative("r", 0.), Ok(0.));
        assert!(require_non_negative("r", -1e-30).is_err());
        assert!(require_finite("a", -1.47).is_ok());
    }
}
