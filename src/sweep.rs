// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Volumetric rates of each formation channel as a function of redshift.

For every published mass function fit we convert the fit to Gpc^-3, then
turn the channel's per-galaxy rate into a volumetric rate. The resulting
points trace out how the rate evolves with redshift if the per-galaxy rate
stays fixed and only the galaxy population changes.

*/

use crate::catalog::{FormationChannel, PublishedFit, FORMATION_CHANNELS, PUBLISHED_FITS};
use crate::errors::SchechterResult;
use crate::schechter::{MassWindow, RateBreakdown, RateQuery, SchechterRateEngine};


/// One point of a redshift sweep.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct SweepPoint {
    /// The citation key of the mass function fit.
    pub reference: &'static str,

    /// The redshift of the fit.
    pub z: f64,

    /// The rate calculation, with densities in Gpc^-3.
    pub breakdown: RateBreakdown,
}


/// All the points of one channel.
#[derive(Clone,Debug,PartialEq)]
pub struct ChannelSweep {
    /// The channel.
    pub channel: FormationChannel,

    /// One point per fit, in the order the fits were given.
    pub points: Vec<SweepPoint>,
}


/// Compute the volumetric rate of `channel` for each of `fits`.
pub fn redshift_sweep(engine: &SchechterRateEngine, channel: &FormationChannel, fits: &[PublishedFit],
                      window: &MassWindow, reference_mass: f64) -> SchechterResult<Vec<SweepPoint>> {
    let query = RateQuery::new(channel.rate_per_year, reference_mass)?;

    fits.iter()
        .map(|fit| -> SchechterResult<SweepPoint> {
            let params = fit.parameters()?.per_gpc3();
            let breakdown = engine.volumetric_rate_breakdown(&query, window, &params)?;

            Ok(SweepPoint {
                reference: fit.reference,
                z: fit.z,
                breakdown,
            })
        })
        .collect()
}


/// Sweep every formation channel over every published fit.
pub fn sweep_all(engine: &SchechterRateEngine, window: &MassWindow,
                 reference_mass: f64) -> SchechterResult<Vec<ChannelSweep>> {
    FORMATION_CHANNELS.iter()
        .map(|channel| -> SchechterResult<ChannelSweep> {
            let points = redshift_sweep(engine, channel, PUBLISHED_FITS, window, reference_mass)?;
            Ok(ChannelSweep { channel: *channel, points })
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use crate::catalog::{default_window, DEFAULT_REFERENCE_MASS};
    use crate::schechter::DensityConvention;
    use super::*;

    #[test]
    fn sweep_shape() {
        let engine = SchechterRateEngine::new().convention(DensityConvention::PerUnitMass);
        let all = sweep_all(&engine, &default_window(), DEFAULT_REFERENCE_MASS).unwrap();

        assert_eq!(all.len(), FORMATION_CHANNELS.len());

        for s in &all {
            assert_eq!(s.points.len(), PUBLISHED_FITS.len());
            assert!(s.points.iter().all(|p| p.breakdown.volumetric_rate > 0.));
        }
    }

    #[test]
    fn rate_scales_with_channel() {
        // The volumetric rate is linear in the per-galaxy rate.
        let engine = SchechterRateEngine::new();
        let w = default_window();
        let low = redshift_sweep(&engine, &FORMATION_CHANNELS[0], PUBLISHED_FITS, &w, 1e11).unwrap();
        let high = redshift_sweep(&engine, &FORMATION_CHANNELS[1], PUBLISHED_FITS, &w, 1e11).unwrap();

        for (l, h) in low.iter().zip(high.iter()) {
            assert_eq!(l.z, h.z);
            let ratio = h.breakdown.volumetric_rate / l.breakdown.volumetric_rate;
            assert_approx_eq!(ratio, 300., 1e-9);
        }
    }

    #[test]
    fn baldry_point_in_gpc3() {
        let engine = SchechterRateEngine::new().convention(DensityConvention::PerUnitMass);
        let pts = redshift_sweep(&engine, &FORMATION_CHANNELS[0], &PUBLISHED_FITS[..1],
                                 &default_window(), 1e11).unwrap();
        assert_eq!(pts[0].reference, "2012baldry");
        assert_approx_eq!(pts[0].breakdown.integrated_density.value / 3.25173247818679e7, 1., 1e-8);
        assert_approx_eq!(pts[0].breakdown.volumetric_rate / 1321.40106207, 1., 1e-8);
    }
}
