// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! Compare the two simple ways of scaling a Milky Way event rate out to
//! cosmological volumes: by star formation rate density and by stellar mass
//! density. Prints a tab-separated table suitable for plotting.

use magnetar_rates::star_formation::StarFormationScaling;

const MILKY_WAY_RATES: &[(&str, f64)] = &[
    ("bwd", 1e-6),
    ("massive", 1e-3),
];

fn main() {
    let scaling = StarFormationScaling::default();

    println!("channel\tz\tsfr\tsfr_lo\tsfr_hi\tsmd\tsmd_lo\tsmd_hi");

    for &(name, r_mw) in MILKY_WAY_RATES {
        for i in 0..=40 {
            let z = 0.1 * i as f64;

            let row = scaling.sfr_scaled_rate(r_mw, z)
                .and_then(|sfr| scaling.smd_scaled_rate(r_mw, z).map(|smd| (sfr, smd)));

            match row {
                Ok((sfr, smd)) => println!("{}\t{:.1}\t{:e}\t{:e}\t{:e}\t{:e}\t{:e}\t{:e}", name, z,
                                           sfr.nominal, sfr.lower, sfr.upper,
                                           smd.nominal, smd.lower, smd.upper),
                Err(e) => eprintln!("skipping {} at z = {:.1}: {}", name, z, e),
            }
        }
    }
}
