use std::error::Error;

use astrova_dasha::dasha::{
    DashaOptions, DashaTimeline, JdRange, TimelineRecord, YearConvention, build_dasha_timeline,
    nakshatra_lord, to_wire_records,
};
use astrova_dasha::{Anchor, DashaError, Nakshatra};
use astrova_time::{UtcTime, iso_to_jd, jd_to_iso};
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "astrova", version, about = "Vimshottari dasha period engine")]
struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    debug: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the Vimshottari lord of a nakshatra
    Lord {
        /// Nakshatra index (0 = Ashwini .. 26 = Revati)
        index: u8,
    },
    /// Show the birth balance of the first Mahadasha
    Balance {
        #[command(flatten)]
        anchor: AnchorArgs,
    },
    /// Print the dasha timeline
    Timeline {
        #[command(flatten)]
        anchor: AnchorArgs,
        #[command(flatten)]
        generation: GenerationArgs,
        /// Only periods overlapping [from, to) (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        /// Emit JSON records instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Find the active periods at an instant
    Locate {
        #[command(flatten)]
        anchor: AnchorArgs,
        #[command(flatten)]
        generation: GenerationArgs,
        /// Query UTC datetime (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        query: String,
        /// Emit JSON records instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct AnchorArgs {
    /// Moon nakshatra index (0-26)
    #[arg(long, required_unless_present = "moon_lon", conflicts_with = "moon_lon")]
    nakshatra: Option<u8>,
    /// Fraction of the nakshatra already traversed, [0, 1)
    #[arg(long, default_value = "0")]
    progress: f64,
    /// Moon sidereal longitude in degrees (alternative to --nakshatra/--progress)
    #[arg(long, allow_hyphen_values = true)]
    moon_lon: Option<f64>,
    /// Reference UTC datetime, usually birth (YYYY-MM-DDThh:mm:ssZ)
    #[arg(long)]
    at: String,
    /// Year length: gregorian (365.2425 d), julian (365.25 d) or savana (360 d)
    #[arg(long, default_value = "gregorian")]
    year: YearConvention,
}

#[derive(Args)]
struct GenerationArgs {
    /// Maximum dasha depth (1 = Mahadasha only)
    #[arg(long, default_value = "3")]
    depth: u8,
    /// Generate Mahadashas until this UTC datetime is covered
    #[arg(long)]
    horizon: Option<String>,
    /// Cap on generated Mahadashas
    #[arg(long)]
    max_periods: Option<usize>,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let default = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::try_from_env("ASTROVA_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::default().add_directive(default.into()));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(filter)
        .init();
}

fn execute_command(command: &Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Lord { index } => {
            let lord = nakshatra_lord(*index)?;
            let name = Nakshatra::from_index(*index).map_or("?", |n| n.name());
            println!(
                "{name} ({index}): {} / {} - {} years, cycle position {}",
                lord.graha.name(),
                lord.graha.english_name(),
                lord.years,
                lord.cycle_offset
            );
        }
        Commands::Balance { anchor } => {
            let a = anchor.resolve()?;
            let lord = a.lord();
            println!(
                "Nakshatra:      {} ({})",
                a.nakshatra().map_or("?", |n| n.name()),
                a.nakshatra_index()
            );
            println!("Progress:       {:.6}", a.progress());
            println!("Lord:           {} ({} years)", lord.graha.name(), lord.years);
            println!("Elapsed:        {:.4} years", a.elapsed_years());
            println!("Balance:        {:.4} years", a.balance_years());
            println!(
                "Nominal start:  {}",
                jd_to_iso(a.nominal_start_jd(anchor.year))?
            );
        }
        Commands::Timeline {
            anchor,
            generation,
            from,
            to,
            json,
        } => {
            let timeline = build(anchor, generation)?;
            let range = match (from, to) {
                (None, None) => None,
                (f, t) => Some(JdRange::new(
                    f.as_deref().map(iso_to_jd).transpose()?.unwrap_or(f64::NEG_INFINITY),
                    t.as_deref().map(iso_to_jd).transpose()?.unwrap_or(f64::INFINITY),
                )),
            };
            if *json {
                let records = timeline.records(generation.depth, range)?;
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                let records = match range {
                    Some(r) => timeline.flatten_range(generation.depth, r)?,
                    None => timeline.flatten(generation.depth)?,
                };
                println!(
                    "Vimshottari timeline from {} ({} Mahadashas, depth {})\n",
                    jd_to_iso(timeline.start_jd())?,
                    timeline.root_sequence().len(),
                    generation.depth
                );
                for r in &records {
                    print_row(r.depth, r.graha.name(), r.start_jd, r.end_jd, anchor.year)?;
                }
            }
        }
        Commands::Locate {
            anchor,
            generation,
            query,
            json,
        } => {
            let query_jd = iso_to_jd(query)?;
            let mut opts = build_options(generation, anchor.year)?;
            if opts.horizon_jd.is_none() {
                opts.horizon_jd = Some(query_jd);
            }
            let timeline = build_dasha_timeline(&anchor.resolve()?, &opts)?;
            let chain = timeline.locate(query_jd, generation.depth)?;
            if *json {
                let flat: Vec<TimelineRecord> = chain.iter().map(TimelineRecord::from).collect();
                let records = to_wire_records(&flat, anchor.year)?;
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                println!("Active periods at {query}\n");
                for p in &chain {
                    print_row(p.depth, p.graha.name(), p.start_jd, p.end_jd, anchor.year)?;
                }
            }
        }
    }
    Ok(())
}

impl AnchorArgs {
    fn resolve(&self) -> Result<Anchor, DashaError> {
        let reference: UtcTime = self.at.parse()?;
        let jd = reference.to_jd();
        match (self.moon_lon, self.nakshatra) {
            (Some(lon), _) => Anchor::from_moon_longitude(lon, jd),
            (None, Some(idx)) => Anchor::new(idx, self.progress, jd),
            (None, None) => Err(DashaError::InvalidAnchor(
                "either --nakshatra or --moon-lon is required",
            )),
        }
    }
}

fn build_options(
    generation: &GenerationArgs,
    year: YearConvention,
) -> Result<DashaOptions, DashaError> {
    let mut opts = DashaOptions::default()
        .with_max_depth(generation.depth)
        .with_year(year);
    if let Some(h) = &generation.horizon {
        opts = opts.with_horizon_jd(iso_to_jd(h)?);
    }
    if let Some(n) = generation.max_periods {
        opts = opts.with_max_top_level_periods(n);
    }
    Ok(opts)
}

fn build(anchor: &AnchorArgs, generation: &GenerationArgs) -> Result<DashaTimeline, DashaError> {
    let opts = build_options(generation, anchor.year)?;
    build_dasha_timeline(&anchor.resolve()?, &opts)
}

fn print_row(
    depth: u8,
    name: &str,
    start_jd: f64,
    end_jd: f64,
    year: YearConvention,
) -> Result<(), DashaError> {
    let indent = "  ".repeat(depth.saturating_sub(1) as usize);
    println!(
        "{indent}{:<8} {} - {}  ({:.3} y)",
        name,
        jd_to_iso(start_jd)?,
        jd_to_iso(end_jd)?,
        (end_jd - start_jd) / year.days_per_year(),
    );
    Ok(())
}
