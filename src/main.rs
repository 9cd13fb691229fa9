// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! Command-line access to the volumetric rate calculations.

#[cfg(test)] #[macro_use] extern crate assert_approx_eq;
#[macro_use] extern crate clap;
#[macro_use] extern crate slog;

use clap::{Arg, ArgAction, ArgMatches, Command};
use slog::{Drain, Logger};
use std::process;
use thiserror::Error;

use magnetar_rates::catalog::{default_window, find_fit, DEFAULT_REFERENCE_MASS};
use magnetar_rates::sweep::sweep_all;
use magnetar_rates::{log_mass_grid, DensityConvention, MassWindow, RateQuery,
                     SchechterError, SchechterParameters, SchechterRateEngine};


#[derive(Debug, Error)]
enum CliError {
    #[error("expected a fit of the form REFERENCE@REDSHIFT, got \"{0}\"")]
    BadFitSpec(String),

    #[error("no published fit \"{0}\" at z = {1}")]
    UnknownFit(String, f64),

    #[error(transparent)]
    Schechter(#[from] SchechterError),
}

type CliResult<T> = Result<T, CliError>;


fn parameter_args() -> Vec<Arg> {
    let explicit = |name: &'static str, long: &'static str, help: &'static str| {
        Arg::new(name)
            .long(long)
            .help(help)
            .value_parser(value_parser!(f64))
            .allow_negative_numbers(true)
            .required_unless_present("fit")
            .conflicts_with("fit")
    };

    vec![
        Arg::new("fit")
            .long("fit")
            .value_name("REF@Z")
            .help("Use a published fit, e.g. 2012baldry@0.03"),
        explicit("phi1", "phi1", "Normalization of the first component"),
        explicit("phi2", "phi2", "Normalization of the second component"),
        explicit("alpha1", "alpha1", "Slope of the first component"),
        explicit("alpha2", "alpha2", "Slope of the second component"),
        explicit("log_m_star", "log-m-star", "log10 of the characteristic mass in Msun"),
        Arg::new("gpc3")
            .long("gpc3")
            .action(ArgAction::SetTrue)
            .help("Convert the normalizations from Mpc^-3 to Gpc^-3"),
    ]
}


/// `sweep` reproduces the published tables, which were computed per unit
/// mass; the other subcommands default to per dex.
fn engine_args(default_convention: &'static str) -> Vec<Arg> {
    vec![
        Arg::new("convention")
            .long("convention")
            .value_parser(["per-dex", "per-unit-mass", "log-scaled"])
            .default_value(default_convention)
            .help("How the mass function is normalized and integrated"),
        Arg::new("m_min")
            .long("m-min")
            .value_parser(value_parser!(f64))
            .help("Lower edge of the mass window in Msun [default: 1e8]"),
        Arg::new("m_max")
            .long("m-max")
            .value_parser(value_parser!(f64))
            .help("Upper edge of the mass window in Msun [default: 1e12]"),
    ]
}


fn cli() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .about("Turn per-galaxy magnetar formation rates into volumetric rates")
        .arg(Arg::new("verbose")
             .short('v')
             .long("verbose")
             .action(ArgAction::Count)
             .global(true)
             .help("Log more; repeat for even more"))
        .subcommand_required(true)
        .subcommand(Command::new("rate")
                    .about("Compute the volumetric rate for one per-galaxy rate")
                    .arg(Arg::new("EVENT_RATE")
                         .help("Events per year in the reference galaxy")
                         .value_parser(value_parser!(f64))
                         .required(true)
                         .index(1))
                    .arg(Arg::new("REFERENCE_MASS")
                         .help("Stellar mass of the reference galaxy in Msun")
                         .value_parser(value_parser!(f64))
                         .required(true)
                         .index(2))
                    .args(parameter_args())
                    .args(engine_args("per-dex")))
        .subcommand(Command::new("sweep")
                    .about("Compute every formation channel against every published fit, in Gpc^-3 yr^-1")
                    .args(engine_args("per-unit-mass")))
        .subcommand(Command::new("density")
                    .about("Tabulate the mass function on a logarithmic grid")
                    .arg(Arg::new("LOG_LO")
                         .help("log10 of the lowest mass")
                         .value_parser(value_parser!(f64))
                         .required(true)
                         .index(1))
                    .arg(Arg::new("LOG_HI")
                         .help("log10 of the highest mass")
                         .value_parser(value_parser!(f64))
                         .required(true)
                         .index(2))
                    .arg(Arg::new("N")
                         .help("Number of grid points")
                         .value_parser(value_parser!(usize))
                         .required(true)
                         .index(3))
                    .args(parameter_args())
                    .args(engine_args("per-dex")))
}


fn make_log(verbosity: u8) -> Logger {
    let level = match verbosity {
        0 => slog::Level::Warning,
        1 => slog::Level::Info,
        2 => slog::Level::Debug,
        _ => slog::Level::Trace,
    };

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog::LevelFilter::new(drain, level).fuse();
    let drain = slog_async::Async::new(drain)
        .overflow_strategy(slog_async::OverflowStrategy::Block)
        .build().fuse();
    Logger::root(drain, o!())
}


// clap guarantees that required and defaulted arguments are present, so the
// lookups below only fall back for arguments that are genuinely optional.

fn get_f64(m: &ArgMatches, name: &str) -> f64 {
    m.get_one::<f64>(name).copied().unwrap_or(f64::NAN)
}


fn parameters(m: &ArgMatches) -> CliResult<SchechterParameters> {
    let params = match m.get_one::<String>("fit") {
        Some(spec) => {
            let (reference, z) = spec.split_once('@')
                .ok_or_else(|| CliError::BadFitSpec(spec.clone()))?;
            let z: f64 = z.parse().map_err(|_| CliError::BadFitSpec(spec.clone()))?;
            let fit = find_fit(reference, z)
                .ok_or_else(|| CliError::UnknownFit(reference.to_owned(), z))?;
            fit.parameters()?
        },
        None => SchechterParameters::from_log_m_star(
            get_f64(m, "phi1"),
            get_f64(m, "phi2"),
            get_f64(m, "alpha1"),
            get_f64(m, "alpha2"),
            get_f64(m, "log_m_star"),
        )?,
    };

    Ok(if m.get_flag("gpc3") { params.per_gpc3() } else { params })
}


fn convention(m: &ArgMatches) -> DensityConvention {
    match m.get_one::<String>("convention").map(|s| s.as_str()) {
        Some("per-unit-mass") => DensityConvention::PerUnitMass,
        Some("log-scaled") => DensityConvention::LogScaledPerUnitMass,
        _ => DensityConvention::PerDex,
    }
}


fn engine(m: &ArgMatches, log: &Logger) -> SchechterRateEngine {
    let convention = convention(m);

    SchechterRateEngine::new()
        .convention(convention)
        .logger(log.new(o!("convention" => format!("{:?}", convention))))
}


fn window(m: &ArgMatches) -> CliResult<MassWindow> {
    let w = default_window();
    let m_min = m.get_one::<f64>("m_min").copied().unwrap_or(w.m_min());
    let m_max = m.get_one::<f64>("m_max").copied().unwrap_or(w.m_max());
    Ok(MassWindow::new(m_min, m_max)?)
}


fn do_rate(m: &ArgMatches, log: &Logger) -> CliResult<()> {
    let query = RateQuery::new(get_f64(m, "EVENT_RATE"), get_f64(m, "REFERENCE_MASS"))?;
    let params = parameters(m)?;
    let window = window(m)?;
    let b = engine(m, log).volumetric_rate_breakdown(&query, &window, &params)?;

    println!("r / M_ref:        {:e}", b.rate_per_unit_mass);
    println!("n:                {:e} +/- {:e}", b.integrated_density.value, b.integrated_density.abserr);
    println!("phi(M_ref):       {:e}", b.reference_density);
    println!("N:                {:e}", b.normalization);
    println!("volumetric rate:  {:e}", b.volumetric_rate);
    Ok(())
}


fn do_sweep(m: &ArgMatches, log: &Logger) -> CliResult<()> {
    let sweeps = sweep_all(&engine(m, log), &window(m)?, DEFAULT_REFERENCE_MASS)?;

    println!("channel\treference\tz\tn\tN\trate");

    for sweep in &sweeps {
        for p in &sweep.points {
            println!("{}\t{}\t{}\t{:e}\t{:e}\t{:e}", sweep.channel.label, p.reference, p.z,
                     p.breakdown.integrated_density.value, p.breakdown.normalization,
                     p.breakdown.volumetric_rate);
        }
    }

    Ok(())
}


fn do_density(m: &ArgMatches, log: &Logger) -> CliResult<()> {
    let n = m.get_one::<usize>("N").copied().unwrap_or(0);
    let masses = log_mass_grid(get_f64(m, "LOG_LO"), get_f64(m, "LOG_HI"), n)?;
    let params = parameters(m)?;
    let engine = engine(m, log);
    let phi = engine.evaluate_grid(&masses, &params)?;
    let cumulative = engine.cumulative_density(&masses, &params)?;

    println!("mass\tphi\tcumulative");

    for ((mass, phi), cum) in masses.iter().zip(phi.iter()).zip(cumulative.iter()) {
        println!("{:e}\t{:e}\t{:e}", mass, phi, cum.value);
    }

    Ok(())
}


fn main() {
    let matches = cli().get_matches();
    let log = make_log(matches.get_count("verbose"));

    let result = match matches.subcommand() {
        Some(("rate", m)) => do_rate(m, &log),
        Some(("sweep", m)) => do_sweep(m, &log),
        Some(("density", m)) => do_density(m, &log),
        _ => unreachable!(),
    };

    if let Err(e) = result {
        // Flush any pending async log records first.
        drop(log);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}


#[cfg(test)]
mod tests {
    use magnetar_rates::catalog::FORMATION_CHANNELS;
    use super::*;

    fn subcommand(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["magnetar-rates"];
        argv.extend_from_slice(args);
        let m = cli().try_get_matches_from(argv).unwrap();
        m.subcommand().unwrap().1.clone()
    }

    fn rate_with_fit(spec: &str) -> CliResult<SchechterParameters> {
        parameters(&subcommand(&["rate", "1e-6", "1e11", "--fit", spec]))
    }

    fn quiet() -> Logger {
        Logger::root(slog::Discard, o!())
    }

    #[test]
    fn fit_spec() {
        let p = rate_with_fit("2012baldry@0.03").unwrap();
        assert_eq!(p, find_fit("2012baldry", 0.03).unwrap().parameters().unwrap());

        let p = parameters(&subcommand(&["rate", "1e-6", "1e11", "--fit", "2012baldry@0.03", "--gpc3"])).unwrap();
        assert_approx_eq!(p.phi1() / 3.96e6, 1., 1e-12);
    }

    #[test]
    fn malformed_fit_specs() {
        for spec in &["2012baldry", "2012baldry@", "2012baldry@abc", "@"] {
            match rate_with_fit(spec) {
                Err(CliError::BadFitSpec(s)) => assert_eq!(s, *spec),
                other => panic!("expected BadFitSpec for {:?}, got {:?}", spec, other),
            }
        }
    }

    #[test]
    fn unknown_fits() {
        match rate_with_fit("nobody@0.03") {
            Err(CliError::UnknownFit(r, z)) => {
                assert_eq!(r, "nobody");
                assert_eq!(z, 0.03);
            },
            other => panic!("expected UnknownFit, got {:?}", other),
        }

        assert!(matches!(rate_with_fit("2012baldry@7.5"), Err(CliError::UnknownFit(..))));
    }

    #[test]
    fn explicit_parameters() {
        let m = subcommand(&["density", "8", "12", "5", "--phi1", "3.96e-3", "--phi2", "0.79e-3",
                             "--alpha1", "-0.35", "--alpha2", "-1.47", "--log-m-star", "10.66"]);
        let p = parameters(&m).unwrap();
        assert_eq!(p.alpha2(), -1.47);
        assert_approx_eq!(p.m_star().log10(), 10.66, 1e-12);

        // Half a parameter set is not enough, and cannot be mixed with a fit.
        let argv = ["magnetar-rates", "rate", "1", "1e11", "--phi1", "1e-3"];
        assert!(cli().try_get_matches_from(argv).is_err());
        let argv = ["magnetar-rates", "rate", "1", "1e11", "--fit", "2012baldry@0.03", "--phi1", "1e-3"];
        assert!(cli().try_get_matches_from(argv).is_err());
    }

    #[test]
    fn convention_defaults() {
        let rate = subcommand(&["rate", "1e-6", "1e11", "--fit", "2012baldry@0.03"]);
        assert_eq!(engine(&rate, &quiet()).density_convention(), DensityConvention::PerDex);

        let density = subcommand(&["density", "8", "12", "5", "--fit", "2012baldry@0.03"]);
        assert_eq!(engine(&density, &quiet()).density_convention(), DensityConvention::PerDex);

        let sweep = subcommand(&["sweep"]);
        assert_eq!(engine(&sweep, &quiet()).density_convention(), DensityConvention::PerUnitMass);

        let sweep = subcommand(&["sweep", "--convention", "log-scaled"]);
        assert_eq!(engine(&sweep, &quiet()).density_convention(), DensityConvention::LogScaledPerUnitMass);
    }

    #[test]
    fn default_sweep_matches_published_table() {
        let m = subcommand(&["sweep"]);
        let sweeps = sweep_all(&engine(&m, &quiet()), &window(&m).unwrap(), DEFAULT_REFERENCE_MASS).unwrap();

        let bwd = &sweeps[0];
        assert_eq!(bwd.channel, FORMATION_CHANNELS[0]);
        let local = bwd.points.iter().find(|p| p.reference == "2012baldry").unwrap();
        assert_approx_eq!(local.breakdown.volumetric_rate / 1321.4010620732338, 1., 1e-8);
    }

    #[test]
    fn mass_windows() {
        let w = window(&subcommand(&["sweep"])).unwrap();
        assert_eq!(w, default_window());

        let w = window(&subcommand(&["sweep", "--m-min", "1e9"])).unwrap();
        assert_eq!(w.m_min(), 1e9);
        assert_eq!(w.m_max(), default_window().m_max());

        assert!(window(&subcommand(&["sweep", "--m-min", "1e12", "--m-max", "1e8"])).is_err());
    }
}
