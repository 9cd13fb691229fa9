// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! Print how the volumetric rate of each magnetar formation channel evolves
//! with redshift when only the galaxy population changes. Densities are
//! per unit mass and rates come out in Gpc^-3 yr^-1.

use magnetar_rates::catalog::{default_window, DEFAULT_REFERENCE_MASS};
use magnetar_rates::sweep::sweep_all;
use magnetar_rates::{DensityConvention, SchechterRateEngine};

fn main() {
    let log = magnetar_rates_test_support::default_log();
    let engine = SchechterRateEngine::new()
        .convention(DensityConvention::PerUnitMass)
        .logger(log);

    let sweeps = match sweep_all(&engine, &default_window(), DEFAULT_REFERENCE_MASS) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        },
    };

    for sweep in &sweeps {
        println!("{} ({:e} / yr / galaxy)", sweep.channel.label, sweep.channel.rate_per_year);

        for p in &sweep.points {
            println!("    z = {:<5} {:<11} R = {:.4e} Gpc^-3 yr^-1", p.z, p.reference, p.breakdown.volumetric_rate);
        }

        println!();
    }
}
