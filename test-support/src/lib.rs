// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! A tiny helper for testing convenience.

extern crate rand;
#[macro_use] extern crate slog;
extern crate slog_async;
extern crate slog_term;

use slog::Drain;

/// Create a simple `slog` logger for use in test programs.
///
/// It logs to the terminal using default parameters, as per the `slog` basic
/// example. This just saves us ~8 lines of boilerplate in all of our
/// test/demo programs.
pub fn default_log() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain)
        .overflow_strategy(slog_async::OverflowStrategy::Block)
        .build().fuse();
    slog::Logger::root(drain, o!())
}


/// A simple utility for sampling random numbers.
///
/// The distribution can be uniform or log-uniform.
#[derive(Clone, Copy, Debug)]
pub struct Sampler {
    is_log: bool,
    low: f64,
    range: f64
}

impl Sampler {
    /// Create a new Sampler.
    pub fn new(is_log: bool, mut low: f64, mut high: f64) -> Self {
        if low > high {
            std::mem::swap(&mut low, &mut high);
        }

        if is_log {
            low = low.ln();
            high = high.ln();
        }

        Sampler { is_log, low, range: high - low }
    }

    /// Sample a number from the distribution.
    pub fn get(&self) -> f64 {
        let n = self.low + rand::random::<f64>() * self.range;

        if self.is_log {
            n.exp()
        } else {
            n
        }
    }
}


/// Draws plausible double-Schechter parameter sets.
///
/// The ranges bracket the published stellar mass function fits out to z ~ 4:
/// normalizations between 1e-5 and 1e-2 per Mpc^3 per dex, slopes between
/// -1.9 and 0.4, and characteristic masses between 10^10.4 and 10^11 solar
/// masses. The result is a bare tuple so that this crate doesn't have to
/// depend on the library it helps to test.
#[derive(Clone, Copy, Debug)]
pub struct SchechterSampler {
    phi: Sampler,
    alpha: Sampler,
    m_star: Sampler,
}

impl Default for SchechterSampler {
    fn default() -> Self {
        SchechterSampler {
            phi: Sampler::new(true, 1e-5, 1e-2),
            alpha: Sampler::new(false, -1.9, 0.4),
            m_star: Sampler::new(true, 10f64.powf(10.4), 1e11),
        }
    }
}

impl SchechterSampler {
    /// Sample `(phi1, phi2, alpha1, alpha2, m_star)`.
    pub fn get(&self) -> (f64, f64, f64, f64, f64) {
        (self.phi.get(), self.phi.get(), self.alpha.get(), self.alpha.get(), self.m_star.get())
    }
}
