// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! Exercise the adaptive integrator on a few integrals with known values,
//! including one that it cannot finish within its panel budget.

use magnetar_rates::quadrature::{IntegrationRule, IntegrationWorkspace, QuadratureError};
use std::f64::consts::PI;

fn report(label: &str, exact: f64, limit: usize, rule: IntegrationRule, f: impl Fn(f64) -> f64, a: f64, b: f64) {
    let mut ws = IntegrationWorkspace::new(limit);

    match ws.qag(f, a, b).tolerance(0., 1e-10).rule(rule).compute() {
        Ok(r) => println!("{:<28} {:?}  value {:.15e}  abserr {:.2e}  true err {:.2e}  panels {}  evaluations {}",
                          label, rule, r.value, r.abserr, (r.value - exact).abs(), r.n_intervals, r.n_evaluations),
        Err(QuadratureError::DidNotConverge { value, abserr, reason }) =>
            println!("{:<28} {:?}  gave up ({}): value {:.6e}  abserr {:.2e}", label, rule, reason, value, abserr),
        Err(e) => println!("{:<28} {:?}  failed: {:?}", label, rule, e),
    }
}

fn main() {
    for &rule in &[IntegrationRule::DoubleExponential, IntegrationRule::ClenshawCurtis] {
        report("cos^2 on [0, pi/2]", 0.25 * PI, 1024, rule, |x: f64| x.cos().powi(2), 0., 0.5 * PI);
        report("gaussian on [-8, 8]", PI.sqrt(), 1024, rule, |x: f64| (-x * x).exp(), -8., 8.);
        report("x^-1/2 on [0, 1]", 2., 1024, rule, |x: f64| x.powf(-0.5), 0., 1.);
        report("|x - 0.3| on [0, 1]", 0.29, 1024, rule, |x: f64| (x - 0.3).abs(), 0., 1.);
        report("step on [0, 1], limit 3", 2. / 3., 3, rule, |x: f64| if x < 1. / 3. { 0. } else { 1. }, 0., 1.);
    }
}
