// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! End-to-end checks of the rate estimates built on top of the engine: the
//! published fit sweeps, the star formation scalings, and the magnetar
//! formulas.

#[macro_use] extern crate assert_approx_eq;

use magnetar_rates::catalog::{bin_for_redshift, default_window, find_fit, DEFAULT_REFERENCE_MASS,
                              FORMATION_CHANNELS, PUBLISHED_FITS};
use magnetar_rates::magnetar::{flux_conserved_field, MagnetarModel};
use magnetar_rates::star_formation::{madau_dickinson_sfrd, StarFormationScaling};
use magnetar_rates::sweep::sweep_all;
use magnetar_rates::{DensityConvention, RateQuery, SchechterRateEngine};
use magnetar_rates_test_support::Sampler;


#[test]
fn bwd_merger_rate_in_baldry_universe() {
    let engine = SchechterRateEngine::new().convention(DensityConvention::PerUnitMass);
    let all = sweep_all(&engine, &default_window(), DEFAULT_REFERENCE_MASS).unwrap();

    let bwd = &all[0];
    assert_eq!(bwd.channel.rate_per_year, 1e-6);

    let local = bwd.points.iter().find(|p| p.reference == "2012baldry").unwrap();
    assert_approx_eq!(local.breakdown.volumetric_rate / 1321.4010620732338, 1., 1e-8);
}


#[test]
fn sweeps_are_finite_in_every_convention() {
    for &c in &[DensityConvention::PerDex, DensityConvention::PerUnitMass,
                DensityConvention::LogScaledPerUnitMass] {
        let engine = SchechterRateEngine::new().convention(c);

        for sweep in sweep_all(&engine, &default_window(), DEFAULT_REFERENCE_MASS).unwrap() {
            assert_eq!(sweep.points.len(), PUBLISHED_FITS.len());

            for p in &sweep.points {
                let r = p.breakdown.volumetric_rate;
                assert!(r.is_finite() && r > 0., "bad rate {} for {} at z = {}", r, p.reference, p.z);
            }
        }
    }
}


#[test]
fn per_dex_and_per_unit_mass_sweeps_agree() {
    // The two conventions differ by a factor of ln(10) M in the density,
    // which cancels in the integral but not in phi(M_ref).
    let dex = sweep_all(&SchechterRateEngine::new(), &default_window(), DEFAULT_REFERENCE_MASS).unwrap();
    let lin = sweep_all(&SchechterRateEngine::new().convention(DensityConvention::PerUnitMass),
                        &default_window(), DEFAULT_REFERENCE_MASS).unwrap();

    for (d, l) in dex.iter().zip(lin.iter()) {
        for (pd, pl) in d.points.iter().zip(l.points.iter()) {
            let nd = pd.breakdown.integrated_density;
            let nl = pl.breakdown.integrated_density;
            assert_approx_eq!(nd.value, nl.value, nd.abserr + nl.abserr);

            let jacobian = magnetar_rates::LN_10 * DEFAULT_REFERENCE_MASS;
            assert_approx_eq!(pd.breakdown.reference_density / (jacobian * pl.breakdown.reference_density), 1., 1e-12);
        }
    }
}


#[test]
fn redshift_bins_cover_their_fits() {
    let engine = SchechterRateEngine::new();
    let query = RateQuery::new(1e-3, DEFAULT_REFERENCE_MASS).unwrap();

    for &z in &[0.03, 0.5, 1.0, 1.5, 2.0, 2.5, 3.25] {
        let bin = bin_for_redshift(z).unwrap();
        let params = bin.parameters().unwrap().per_gpc3();
        let r = engine.volumetric_rate(&query, &default_window(), &params).unwrap();
        assert!(r > 0.);
    }

    assert!(find_fit("2016weigel", 0.04).is_some());
    assert_eq!(FORMATION_CHANNELS.len(), 8);
}


#[test]
fn star_formation_bands_are_ordered() {
    let s = StarFormationScaling::default();
    let zs = Sampler::new(false, 0., 4.);
    let rates = Sampler::new(true, 1e-7, 1e-2);

    for _ in 0..100 {
        let z = zs.get();
        let r = rates.get();

        let smd = s.smd_scaled_rate(r, z).unwrap();
        assert!(smd.lower <= smd.nominal && smd.nominal <= smd.upper);
        assert!(smd.lower >= 0.);

        let sfr = s.sfr_scaled_rate(r, z).unwrap();
        assert!(sfr.lower < sfr.nominal && sfr.nominal < sfr.upper);
    }
}


#[test]
fn star_formation_peaks_near_cosmic_noon() {
    let peak = (0..=80)
        .map(|i| 0.05 * i as f64)
        .fold((0., 0.), |best, z| {
            let sfrd = madau_dickinson_sfrd(z).unwrap();
            if sfrd > best.1 { (z, sfrd) } else { best }
        });

    assert!(peak.0 > 1.5 && peak.0 < 2.2);
}


#[test]
fn spindown_scaling() {
    let m = MagnetarModel::default();
    let fields = Sampler::new(true, 1e13, 1e16);
    let periods = Sampler::new(true, 1e-3, 1e-1);

    for _ in 0..100 {
        let b = fields.get();
        let p = periods.get();
        let tau = m.em_spindown_timescale(b, p).unwrap();
        let tau2 = m.em_spindown_timescale(2. * b, p).unwrap();
        let tau3 = m.em_spindown_timescale(b, 3. * p).unwrap();
        assert_approx_eq!(tau / tau2, 4., 1e-12);
        assert_approx_eq!(tau3 / tau, 9., 1e-12);
    }

    // A white dwarf with a 10^9 G field collapses into a magnetar.
    assert!(flux_conserved_field(1e9).unwrap() > 1e14);
}
