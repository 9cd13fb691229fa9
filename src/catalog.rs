// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Published stellar mass function fits and magnetar formation channels.

All normalizations here are per Mpc^3 per dex. Use
`SchechterParameters::per_gpc3` to move to the Gpc^3 units in which
volumetric rates are usually quoted.

*/

use crate::errors::SchechterResult;
use crate::schechter::{MassWindow, SchechterParameters};


/// The stellar mass of the galaxy that per-galaxy event rates refer to: a
/// Milky-Way-like 10^11 Msun.
pub const DEFAULT_REFERENCE_MASS: f64 = 1e11;

/// Lower edge of the default integration window, in solar masses.
pub const DEFAULT_M_MIN: f64 = 1e8;

/// Upper edge of the default integration window, in solar masses.
pub const DEFAULT_M_MAX: f64 = 1e12;


/// The default integration window, 10^8 to 10^12 solar masses.
pub fn default_window() -> MassWindow {
    MassWindow::new_unchecked(DEFAULT_M_MIN, DEFAULT_M_MAX)
}


/// A published double Schechter fit at one redshift.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct PublishedFit {
    /// Short citation key, e.g. `"2012baldry"`.
    pub reference: &'static str,

    /// Redshift of the sample.
    pub z: f64,

    /// log10 of the characteristic mass in solar masses.
    pub log_m_star: f64,

    /// Normalization of the first component (Mpc^-3 dex^-1).
    pub phi1: f64,

    /// Normalization of the second component (Mpc^-3 dex^-1).
    pub phi2: f64,

    /// Slope of the first component.
    pub alpha1: f64,

    /// Slope of the second component.
    pub alpha2: f64,
}

impl PublishedFit {
    /// Turn the tabulated values into validated parameters.
    pub fn parameters(&self) -> SchechterResult<SchechterParameters> {
        SchechterParameters::from_log_m_star(self.phi1, self.phi2, self.alpha1, self.alpha2, self.log_m_star)
    }
}


/// The fits used for the redshift evolution of the volumetric rates: the
/// local GAMA fit, the local SDSS fit, and the 2021 HST CANDELS bins.
pub const PUBLISHED_FITS: &[PublishedFit] = &[
    PublishedFit { reference: "2012baldry", z: 0.03, log_m_star: 10.66, phi1: 3.96e-3, phi2: 0.79e-3, alpha1: -0.35, alpha2: -1.47 },
    PublishedFit { reference: "2016weigel", z: 0.04, log_m_star: 10.79, phi1: 4.90e-4, phi2: 9.77e-3, alpha1: -1.69, alpha2: -0.79 },
    PublishedFit { reference: "2021hst", z: 0.5, log_m_star: 10.64, phi1: 2.34e-3, phi2: 7.76e-4, alpha1: 0.25, alpha2: -1.49 },
    PublishedFit { reference: "2021hst", z: 1.0, log_m_star: 10.51, phi1: 2.14e-3, phi2: 8.51e-4, alpha1: 0.08, alpha2: -1.49 },
    PublishedFit { reference: "2021hst", z: 1.5, log_m_star: 10.54, phi1: 1.48e-3, phi2: 4.79e-4, alpha1: -0.07, alpha2: -1.60 },
    PublishedFit { reference: "2021hst", z: 2.0, log_m_star: 10.56, phi1: 8.91e-4, phi2: 3.09e-4, alpha1: -0.06, alpha2: -1.63 },
    PublishedFit { reference: "2021hst", z: 2.5, log_m_star: 10.55, phi1: 5.25e-4, phi2: 3.16e-4, alpha1: 0.02, alpha2: -1.66 },
    PublishedFit { reference: "2021hst", z: 3.25, log_m_star: 10.64, phi1: 8.32e-5, phi2: 1.82e-4, alpha1: 0.35, alpha2: -1.76 },
];


/// Find a published fit by citation key and redshift.
pub fn find_fit(reference: &str, z: f64) -> Option<&'static PublishedFit> {
    PUBLISHED_FITS.iter().find(|f| f.reference == reference && (f.z - z).abs() < 1e-9)
}


/// A double Schechter fit for a redshift range, with normalizations
/// tabulated as base-10 logarithms.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct RedshiftBinFit {
    /// Human-readable description of the redshift range.
    pub label: &'static str,

    /// Lower edge of the redshift range.
    pub z_min: f64,

    /// Upper edge of the redshift range.
    pub z_max: f64,

    /// log10 of the first normalization (Mpc^-3 dex^-1).
    pub log_phi1: f64,

    /// log10 of the second normalization (Mpc^-3 dex^-1).
    pub log_phi2: f64,

    /// log10 of the characteristic mass in solar masses.
    pub log_m_star: f64,

    /// Slope of the first component.
    pub alpha1: f64,

    /// Slope of the second component.
    pub alpha2: f64,
}

impl RedshiftBinFit {
    /// Turn the tabulated values into validated parameters.
    pub fn parameters(&self) -> SchechterResult<SchechterParameters> {
        SchechterParameters::from_log_m_star(
            10f64.powf(self.log_phi1),
            10f64.powf(self.log_phi2),
            self.alpha1,
            self.alpha2,
            self.log_m_star,
        )
    }

    /// Whether `z` falls in this bin, edges included.
    pub fn contains(&self, z: f64) -> bool {
        z >= self.z_min && z <= self.z_max
    }
}


/// Fits for seven redshift ranges out to z = 3.75.
pub const REDSHIFT_BINS: &[RedshiftBinFit] = &[
    RedshiftBinFit { label: "z < 0.06", z_min: 0., z_max: 0.06, log_phi1: -2.40, log_phi2: -3.10, log_m_star: 10.66, alpha1: -0.35, alpha2: -1.47 },
    RedshiftBinFit { label: "0.25 <= z <= 0.75", z_min: 0.25, z_max: 0.75, log_phi1: -2.77, log_phi2: -3.26, log_m_star: 10.8, alpha1: -0.61, alpha2: -1.52 },
    RedshiftBinFit { label: "0.75 <= z <= 1.25", z_min: 0.75, z_max: 1.25, log_phi1: -2.80, log_phi2: -3.26, log_m_star: 10.72, alpha1: -0.46, alpha2: -1.53 },
    RedshiftBinFit { label: "1.25 <= z <= 1.75", z_min: 1.25, z_max: 1.75, log_phi1: -2.94, log_phi2: -3.54, log_m_star: 10.72, alpha1: -0.55, alpha2: -1.65 },
    RedshiftBinFit { label: "1.75 <= z <= 2.25", z_min: 1.75, z_max: 2.25, log_phi1: -3.18, log_phi2: -3.84, log_m_star: 10.77, alpha1: -0.68, alpha2: -1.73 },
    RedshiftBinFit { label: "2.25 <= z <= 2.75", z_min: 2.25, z_max: 2.75, log_phi1: -3.39, log_phi2: -3.78, log_m_star: 10.77, alpha1: -0.62, alpha2: -1.74 },
    RedshiftBinFit { label: "2.75 <= z <= 3.75", z_min: 2.75, z_max: 3.75, log_phi1: -4.3, log_phi2: -3.94, log_m_star: 10.84, alpha1: -0.01, alpha2: -1.79 },
];


/// The first redshift bin containing `z`, if any.
pub fn bin_for_redshift(z: f64) -> Option<&'static RedshiftBinFit> {
    REDSHIFT_BINS.iter().find(|b| b.contains(z))
}


/// A magnetar formation channel with its per-galaxy event rate.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct FormationChannel {
    /// What the rate describes and where it comes from.
    pub label: &'static str,

    /// Events per year in a 10^11 Msun galaxy.
    pub rate_per_year: f64,
}


/// Per-galaxy rates for the formation channels under consideration. Where
/// the literature gives a range, both ends are listed.
pub const FORMATION_CHANNELS: &[FormationChannel] = &[
    FormationChannel { label: "BWD merger rate (Sigurdsson & Rees 97)", rate_per_year: 1e-6 },
    FormationChannel { label: "Magnetars from BWD mergers (Levan+06)", rate_per_year: 3e-4 },
    FormationChannel { label: "NSWD merger rate (Kim+04) min", rate_per_year: 1e-6 },
    FormationChannel { label: "NSWD merger rate (Kim+04) max", rate_per_year: 1e-5 },
    FormationChannel { label: "NSWD merger rate (multiple papers) min", rate_per_year: 1e-5 },
    FormationChannel { label: "NSWD merger rate (multiple papers) max", rate_per_year: 1e-3 },
    FormationChannel { label: "Magnetars from massive stars (Beniamini+19) min", rate_per_year: 1e-3 },
    FormationChannel { label: "Magnetars from massive stars (Beniamini+19) max", rate_per_year: 1e-2 },
];
