// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Estimate volumetric rates of magnetar-forming events.

Magnetars may be born in several ways: binary white dwarf mergers, neutron
star + white dwarf mergers, binary neutron star mergers, or the collapse of
massive stars. Population studies usually quote the rate of each channel
*per galaxy*, for a galaxy of some reference stellar mass. To compare those
channels with transient surveys we need rates *per unit volume*, which means
folding the per-galaxy rate through the galaxy stellar mass function.

The core of this crate is `SchechterRateEngine`, which evaluates a double
Schechter stellar mass function, integrates it over a window of stellar mass
with an adaptive tanh-sinh integrator, and turns a per-galaxy rate into
a volumetric one. Around it are tables of published mass function fits and
channel rates (`catalog`), a redshift sweep over those tables (`sweep`),
simpler scalings by cosmic star formation and stellar mass density
(`star_formation`), and closed-form magnetar spin-down estimates
(`magnetar`).

```
use magnetar_rates::{MassWindow, RateQuery, SchechterParameters, SchechterRateEngine};

let params = SchechterParameters::from_log_m_star(3.96e-3, 0.79e-3, -0.35, -1.47, 10.66)
    .unwrap()
    .per_gpc3();
let window = MassWindow::new(1e8, 1e12).unwrap();
let query = RateQuery::new(1e-6, 1e11).unwrap();

let engine = SchechterRateEngine::new();
let n = engine.integrate_density(&window, &params).unwrap();
let rate = engine.volumetric_rate(&query, &window, &params).unwrap();
assert!(n.value > 0. && rate > 0.);
```

*/

#![deny(missing_docs)]

#[cfg(test)] #[macro_use] extern crate assert_approx_eq;
#[macro_use] extern crate slog;

pub mod catalog;
pub mod errors;
pub mod magnetar;
pub mod quadrature;
pub mod schechter;
pub mod star_formation;
pub mod sweep;

pub use errors::{SchechterError, SchechterResult};
pub use crate::quadrature::{IntegrationResult, IntegrationRule};
pub use schechter::{log_mass_grid, DensityConvention, MassWindow, RateBreakdown, RateQuery};
pub use schechter::{SchechterParameters, SchechterRateEngine, LN_10, MPC3_PER_GPC3};
