// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Adaptive numerical integration.

The quadrature rules themselves come from the `quadrature` crate: the
tanh-sinh (double exponential) rule, which copes well with endpoint
behavior and large dynamic range, and Clenshaw-Curtis. On top of a rule we
run a globally adaptive bisection in the manner of QUADPACK's `QAG`: if the
summed error estimate is above the requested tolerance, the panel with the
largest error is split in two and each half integrated again, until the
tolerance is met or the panel budget runs out.

Integrals are set up with a small builder:

```
use magnetar_rates::quadrature::IntegrationWorkspace;

let mut ws = IntegrationWorkspace::new(100);
let r = ws.qag(|x: f64| x.cos().powi(2), 0., 0.5 * std::f64::consts::PI)
    .tolerance(0., 1e-10)
    .compute()
    .unwrap();
assert!((r.value - 0.25 * std::f64::consts::PI).abs() < 1e-12);
```

*/

use std::cell::Cell;
use thiserror::Error;


/// No error estimate is allowed to drop below this fraction of the panel's
/// value. A relative tolerance below it can never be met.
const ROUNDOFF_FLOOR: f64 = 50. * f64::EPSILON;

/// Give up after this many consecutive bisections that fail to shrink the
/// error estimate.
const MAX_STALLED_BISECTIONS: usize = 6;


/// Convenience alias for integration results.
pub type QuadratureResult<T> = Result<T, QuadratureError>;


/// Ways in which an integration can fail.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum QuadratureError {
    /// The requested tolerances are unusable.
    #[error("bad integration tolerance: {what} (got {value:e})")]
    BadTolerance {
        /// Which tolerance, and what is wrong with it.
        what: &'static str,

        /// Its value.
        value: f64,
    },

    /// The integrator stopped before meeting the tolerance. `value` and
    /// `abserr` are the best estimates at that point.
    #[error("integration did not converge: {reason}; partial result {value:e} +/- {abserr:e}")]
    DidNotConverge {
        /// The partial integral.
        value: f64,

        /// Its estimated absolute error.
        abserr: f64,

        /// Why the integrator stopped.
        reason: &'static str,
    },
}


/// The result of an integration: the value, an estimate of its absolute
/// error, and how much work it took.
#[derive(Clone,Copy,Debug,PartialEq)]
pub struct IntegrationResult {
    /// The integral.
    pub value: f64,

    /// The estimated absolute error of `value`.
    pub abserr: f64,

    /// How many panels the final estimate is summed over.
    pub n_intervals: usize,

    /// How many times the integrand was evaluated.
    pub n_evaluations: usize,
}

impl IntegrationResult {
    /// A result that is exactly zero, for empty intervals.
    pub fn zero() -> Self {
        IntegrationResult { value: 0., abserr: 0., n_intervals: 0, n_evaluations: 0 }
    }
}


/// Which quadrature rule to apply on each panel.
#[derive(Clone,Copy,Debug,Eq,Hash,PartialEq)]
pub enum IntegrationRule {
    /// The tanh-sinh rule of `quadrature::double_exponential`.
    DoubleExponential,

    /// The rule of `quadrature::clenshaw_curtis`.
    ClenshawCurtis,
}

impl Default for IntegrationRule {
    fn default() -> Self {
        IntegrationRule::DoubleExponential
    }
}


#[derive(Clone,Copy,Debug,PartialEq)]
struct Panel {
    a: f64,
    b: f64,
    value: f64,
    abserr: f64,
}

impl Panel {
    /// Integrate `f` over `[a, b]`, asking the rule for an absolute error
    /// of `target`. Returns the panel and the number of evaluations used.
    fn integrate<G>(rule: IntegrationRule, f: &G, a: f64, b: f64, target: f64) -> (Self, usize)
        where G: Fn(f64) -> f64
    {
        let target = target.max(f64::MIN_POSITIVE);

        let out = match rule {
            IntegrationRule::DoubleExponential => ::quadrature::double_exponential::integrate(f, a, b, target),
            IntegrationRule::ClenshawCurtis => ::quadrature::clenshaw_curtis::integrate(f, a, b, target),
        };

        let panel = Panel {
            a,
            b,
            value: out.integral,
            abserr: out.error_estimate.abs().max(ROUNDOFF_FLOOR * out.integral.abs()),
        };

        (panel, out.num_function_evaluations as usize)
    }
}


/// Scratch space for adaptive integration. The capacity is the maximum
/// number of panels an integration may bisect its domain into.
#[derive(Clone,Debug)]
pub struct IntegrationWorkspace {
    limit: usize,
    panels: Vec<Panel>,
}

impl IntegrationWorkspace {
    /// Create a workspace that allows up to `limit` panels. A limit of zero
    /// is treated as one, which means "no bisection at all".
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);

        IntegrationWorkspace {
            limit,
            panels: Vec::with_capacity(limit),
        }
    }

    /// The maximum number of panels.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Start setting up an integral of `f` from `lower_bound` to
    /// `upper_bound`.
    pub fn qag<F>(&mut self, f: F, lower_bound: f64, upper_bound: f64) -> IntegrationBuilder<'_, F>
        where F: Fn(f64) -> f64
    {
        IntegrationBuilder::new(self, f, lower_bound, upper_bound)
    }
}


/// Configures and runs one integration.
pub struct IntegrationBuilder<'a, F> where F: Fn(f64) -> f64 {
    workspace: &'a mut IntegrationWorkspace,
    function: F,
    rule: IntegrationRule,
    lower_bound: f64,
    upper_bound: f64,
    epsabs: f64,
    epsrel: f64,
}


impl<'a, F> IntegrationBuilder<'a, F> where F: Fn(f64) -> f64 {
    fn new(ws: &'a mut IntegrationWorkspace, f: F, lower: f64, upper: f64) -> Self {
        IntegrationBuilder {
            workspace: ws,
            function: f,
            rule: IntegrationRule::default(),
            lower_bound: lower,
            upper_bound: upper,
            epsabs: 0.,
            epsrel: 1.49e-8,
        }
    }

    /// Set the absolute and relative tolerances. The integration stops once
    /// the estimated error is below `max(epsabs, epsrel * |result|)`.
    pub fn tolerance(mut self, epsabs: f64, epsrel: f64) -> Self {
        self.epsabs = epsabs;
        self.epsrel = epsrel;
        self
    }

    /// Set the quadrature rule.
    pub fn rule(mut self, rule: IntegrationRule) -> Self {
        self.rule = rule;
        self
    }

    /// Run the integration.
    pub fn compute(self) -> QuadratureResult<IntegrationResult> {
        let (epsabs, epsrel) = (self.epsabs, self.epsrel);

        if !(epsabs >= 0. && epsabs.is_finite()) {
            return Err(QuadratureError::BadTolerance { what: "absolute tolerance must be finite and nonnegative", value: epsabs });
        }

        if !(epsrel >= 0. && epsrel.is_finite()) {
            return Err(QuadratureError::BadTolerance { what: "relative tolerance must be finite and nonnegative", value: epsrel });
        }

        if epsabs == 0. && epsrel < ROUNDOFF_FLOOR {
            return Err(QuadratureError::BadTolerance { what: "relative tolerance is below the round-off limit", value: epsrel });
        }

        if self.lower_bound == self.upper_bound {
            return Ok(IntegrationResult::zero());
        }

        // Integrate over the properly ordered interval and flip the sign at
        // the end if needed.

        let (a, b, sign) = if self.lower_bound < self.upper_bound {
            (self.lower_bound, self.upper_bound, 1.)
        } else {
            (self.upper_bound, self.lower_bound, -1.)
        };

        // The rules silently replace non-finite samples with zero. That is
        // what we want for singularities at the ends of the domain, but
        // anything else means the integrand is broken.

        let broken = Cell::new(false);
        let f = &self.function;
        let g = |x: f64| {
            let y = f(x);

            if !y.is_finite() && x > a && x < b {
                broken.set(true);
            }

            y
        };

        let rule = self.rule;
        let limit = self.workspace.limit;
        let panels = &mut self.workspace.panels;
        panels.clear();

        let (first, mut n_evaluations) = Panel::integrate(rule, &g, a, b, epsabs);
        panels.push(first);
        let mut stalled = 0;

        loop {
            let total: f64 = panels.iter().map(|p| p.value).sum();
            let total_err: f64 = panels.iter().map(|p| p.abserr).sum();

            let fail = |reason: &'static str| -> QuadratureResult<IntegrationResult> {
                Err(QuadratureError::DidNotConverge {
                    value: sign * total,
                    abserr: total_err,
                    reason,
                })
            };

            if broken.get() || !total.is_finite() || !total_err.is_finite() {
                return fail("integrand is not finite");
            }

            let tol = epsabs.max(epsrel * total.abs());

            if total_err <= tol {
                return Ok(IntegrationResult {
                    value: sign * total,
                    abserr: total_err,
                    n_intervals: panels.len(),
                    n_evaluations,
                });
            }

            if panels.len() >= limit {
                return fail("panel limit reached");
            }

            if stalled >= MAX_STALLED_BISECTIONS {
                return fail("round-off error prevents reaching the tolerance");
            }

            // Bisect the worst panel, giving each half its share of the
            // tolerance.

            let mut worst = 0;

            for (i, p) in panels.iter().enumerate() {
                if p.abserr > panels[worst].abserr {
                    worst = i;
                }
            }

            let p = panels.swap_remove(worst);
            let mid = 0.5 * (p.a + p.b);

            if !(mid > p.a && mid < p.b) {
                panels.push(p);
                return fail("panel too small to bisect");
            }

            let share = 0.5 * tol * (p.b - p.a) / (b - a);
            let (left, n1) = Panel::integrate(rule, &g, p.a, mid, share);
            let (right, n2) = Panel::integrate(rule, &g, mid, p.b, share);
            n_evaluations += n1 + n2;

            if left.abserr + right.abserr >= 0.99 * p.abserr {
                stalled += 1;
            } else {
                stalled = 0;
            }

            panels.push(left);
            panels.push(right);
        }
    }
}
