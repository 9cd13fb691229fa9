// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Volumetric rates scaled from cosmic star formation and stellar mass.

Two simpler alternatives to the mass function integral: scale a Milky Way
event rate `r_MW` by the cosmic star formation rate density relative to the
Milky Way's star formation rate, or by the cosmic stellar mass density
relative to the Milky Way's stellar mass. The former suits channels that
track young stellar populations; the latter suits channels with long delay
times, such as white dwarf mergers.

*/

use crate::errors::{require_non_negative, require_positive, SchechterError, SchechterResult};
use crate::schechter::MPC3_PER_GPC3;


/// The cosmic star formation rate density of Madau & Dickinson (2014), in
/// Msun Mpc^-3 yr^-1.
pub fn madau_dickinson_sfrd(z: f64) -> SchechterResult<f64> {
    require_non_negative("redshift must be finite and nonnegative", z)?;
    Ok(0.015 * (1. + z).powf(2.7) / (1. + ((1. + z) / 2.9).powf(5.6)))
}


/// Redshift bins of the stellar mass density measurements.
pub const SMD_REDSHIFT_BINS: &[(f64, f64)] = &[
    (0.2, 0.5), (0.5, 0.8), (0.8, 1.1), (1.1, 1.5), (1.5, 2.0),
    (2.0, 2.5), (2.5, 3.0), (3.0, 3.5), (3.5, 4.5),
];

/// Stellar mass density in each bin as `(value, +error, -error)`, in units
/// of 10^7 Msun Mpc^-3. The negative errors carry their sign.
pub const SMD_VALUES: &[(f64, f64, f64)] = &[
    (15.91, 1.50, -1.43),
    (15.49, 1.25, -1.17),
    (17.51, 1.33, -1.27),
    (12.64, 0.86, -0.82),
    (7.62, 0.62, -0.63),
    (4.25, 0.58, -0.54),
    (3.51, 0.33, -0.33),
    (2.22, 0.24, -0.28),
    (0.87, 0.08, -0.08),
];

/// Converts the tabulated units of 10^7 Msun Mpc^-3 into Msun Gpc^-3.
const SMD_TABLE_UNIT: f64 = 1e7 * MPC3_PER_GPC3;


/// A quantity with a lower and upper uncertainty bound.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct RateBand {
    /// The central value.
    pub nominal: f64,

    /// The lower bound.
    pub lower: f64,

    /// The upper bound.
    pub upper: f64,
}

impl RateBand {
    fn scaled(self, factor: f64) -> Self {
        RateBand {
            nominal: self.nominal * factor,
            lower: self.lower * factor,
            upper: self.upper * factor,
        }
    }
}


/// The cosmic stellar mass density as a function of redshift, interpolated
/// linearly between bin centers and extrapolated linearly beyond them.
#[derive(Clone,Debug,PartialEq)]
pub struct StellarMassDensity {
    z: Vec<f64>,
    nominal: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Default for StellarMassDensity {
    fn default() -> Self {
        let z = SMD_REDSHIFT_BINS.iter().map(|&(lo, hi)| 0.5 * (lo + hi)).collect();
        let nominal = SMD_VALUES.iter().map(|&(v, _, _)| v * SMD_TABLE_UNIT).collect();
        let upper = SMD_VALUES.iter().map(|&(v, up, _)| (v + up) * SMD_TABLE_UNIT).collect();
        let lower = SMD_VALUES.iter().map(|&(v, _, down)| (v + down) * SMD_TABLE_UNIT).collect();
        StellarMassDensity { z, nominal, lower, upper }
    }
}

impl StellarMassDensity {
    /// Build a table from redshift bins and `(value, +error, -error)` rows,
    /// where the values are multiplied by `unit` to get Msun Gpc^-3. At
    /// least two bins are needed and the bin centers must increase.
    pub fn from_table(bins: &[(f64, f64)], values: &[(f64, f64, f64)], unit: f64) -> SchechterResult<Self> {
        require_positive("density unit must be finite and positive", unit)?;

        if bins.len() != values.len() {
            return Err(SchechterError::invalid("bin and value counts differ", values.len() as f64));
        }

        if bins.len() < 2 {
            return Err(SchechterError::invalid("interpolation needs at least two bins", bins.len() as f64));
        }

        let z: Vec<f64> = bins.iter().map(|&(lo, hi)| 0.5 * (lo + hi)).collect();

        for pair in z.windows(2) {
            if !(pair[1] > pair[0]) {
                return Err(SchechterError::invalid("bin centers must increase", pair[1]));
            }
        }

        Ok(StellarMassDensity {
            z,
            nominal: values.iter().map(|&(v, _, _)| v * unit).collect(),
            upper: values.iter().map(|&(v, up, _)| (v + up) * unit).collect(),
            lower: values.iter().map(|&(v, _, down)| (v + down) * unit).collect(),
        })
    }

    /// The stellar mass density at redshift `z`, in Msun Gpc^-3.
    ///
    /// Linear extrapolation can go negative well beyond the last bin. A
    /// negative central value is an error. The lower bound is clipped at
    /// zero, so past the point where the lower row of the table would
    /// extrapolate below zero, the band differs from plain extrapolation of
    /// that row.
    pub fn at(&self, z: f64) -> SchechterResult<RateBand> {
        require_non_negative("redshift must be finite and nonnegative", z)?;

        let nominal = interpolate(&self.z, &self.nominal, z);

        if !(nominal > 0.) {
            return Err(SchechterError::invalid("stellar mass density extrapolates below zero at this redshift", z));
        }

        Ok(RateBand {
            nominal,
            lower: interpolate(&self.z, &self.lower, z).max(0.),
            upper: interpolate(&self.z, &self.upper, z),
        })
    }
}


/// Piecewise-linear interpolation through `(xs, ys)`, extending the first
/// and last segments beyond the ends. `xs` must be increasing with at least
/// two entries.
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len();

    let i = match xs.iter().position(|&xi| xi > x) {
        Some(0) => 0,
        Some(i) => i - 1,
        None => n - 2,
    }.min(n - 2);

    let t = (x - xs[i]) / (xs[i + 1] - xs[i]);
    ys[i] + t * (ys[i + 1] - ys[i])
}


/// The Milky Way properties that a per-galaxy rate is quoted against.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct MilkyWayReference {
    stellar_mass: f64,
    sfr: f64,
    sfr_error: f64,
}

impl Default for MilkyWayReference {
    /// A stellar mass of 10^10 Msun and a star formation rate of 2.0 +/- 0.7
    /// Msun per year.
    fn default() -> Self {
        MilkyWayReference { stellar_mass: 1e10, sfr: 2.0, sfr_error: 0.7 }
    }
}

impl MilkyWayReference {
    /// Create a new reference. The star formation rate error must be
    /// smaller than the rate itself.
    pub fn new(stellar_mass: f64, sfr: f64, sfr_error: f64) -> SchechterResult<Self> {
        require_positive("stellar mass must be finite and positive", stellar_mass)?;
        require_positive("star formation rate must be finite and positive", sfr)?;
        require_non_negative("star formation rate error must be finite and nonnegative", sfr_error)?;

        if sfr_error >= sfr {
            return Err(SchechterError::invalid("star formation rate error must be below the rate", sfr_error));
        }

        Ok(MilkyWayReference { stellar_mass, sfr, sfr_error })
    }

    /// Stellar mass in solar masses.
    pub fn stellar_mass(&self) -> f64 {
        self.stellar_mass
    }

    /// Star formation rate in Msun per year.
    pub fn sfr(&self) -> f64 {
        self.sfr
    }

    /// Uncertainty on the star formation rate.
    pub fn sfr_error(&self) -> f64 {
        self.sfr_error
    }
}


/// Scales Milky Way event rates to volumetric rates, in Gpc^-3 yr^-1.
#[derive(Clone,Debug,Default,PartialEq)]
pub struct StarFormationScaling {
    smd: StellarMassDensity,
    milky_way: MilkyWayReference,
}

impl StarFormationScaling {
    /// Use the given stellar mass density table and Milky Way reference.
    pub fn new(smd: StellarMassDensity, milky_way: MilkyWayReference) -> Self {
        StarFormationScaling { smd, milky_way }
    }

    /// The rate scaled by stellar mass density, `r_MW / M_MW * rho*(z)`. The
    /// band comes from the uncertainty of the density measurements.
    pub fn smd_scaled_rate(&self, r_mw: f64, z: f64) -> SchechterResult<RateBand> {
        require_non_negative("Milky Way rate must be finite and nonnegative", r_mw)?;
        let rho = self.smd.at(z)?;
        Ok(rho.scaled(r_mw / self.milky_way.stellar_mass))
    }

    /// The rate scaled by star formation rate density,
    /// `r_MW / SFR_MW * SFRD(z)`. The band comes from the uncertainty of the
    /// Milky Way star formation rate: a smaller SFR means a larger rate.
    pub fn sfr_scaled_rate(&self, r_mw: f64, z: f64) -> SchechterResult<RateBand> {
        require_non_negative("Milky Way rate must be finite and nonnegative", r_mw)?;
        let sfrd = madau_dickinson_sfrd(z)? * MPC3_PER_GPC3;
        let mw = &self.milky_way;

        Ok(RateBand {
            nominal: r_mw / mw.sfr * sfrd,
            lower: r_mw / (mw.sfr + mw.sfr_error) * sfrd,
            upper: r_mw / (mw.sfr - mw.sfr_error) * sfrd,
        })
    }
}
