use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use maqam::{
    analyze_modulations, catalogue_lattice, jins_transpositions, maqam_transpositions, Catalogue, Jins, Maqam,
    Modulations,
};

/// Maqam analysis over a catalogue of tuning systems, ajnas and maqamat
#[derive(Parser, Debug)]
#[clap(name = "maqam")]
struct Args {
    /// YAML catalogue to use instead of the built-in one
    #[clap(long, value_name = "FILE", global = true)]
    catalogue: Option<PathBuf>,

    /// Log search details to stderr
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the pitch-class lattice of a tuning system
    Lattice {
        tuning: String,
        #[clap(long)]
        starting_note: Option<String>,
    },
    /// List the transpositions of a jins
    Ajnas {
        tuning: String,
        jins: String,
        #[clap(long)]
        starting_note: Option<String>,
    },
    /// List the transpositions of a maqam with the ajnas inside them
    Maqamat {
        tuning: String,
        maqam: String,
        #[clap(long)]
        starting_note: Option<String>,
    },
    /// Sort the modulations of a maqam by scale degree
    Modulations {
        tuning: String,
        maqam: String,
        /// Show jins modulations instead of maqam modulations
        #[clap(long)]
        ajnas: bool,
        /// Start from the transposition on this note instead of the tahlil
        #[clap(long, value_name = "NOTE")]
        on: Option<String>,
    },
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let catalogue = match &args.catalogue {
        Some(path) => Catalogue::load(path)?,
        None => Catalogue::builtin()?,
    };
    debug!(source = ?args.catalogue, "catalogue ready");
    let options = catalogue.settings.transposition_options();

    match args.command {
        Command::Lattice { tuning, starting_note } => {
            let lattice = catalogue_lattice(&catalogue, &tuning, starting_note.as_deref())?;
            for pc in lattice.iter() {
                println!(
                    "{}\t{}\t{:<28}\t{:<6}\t{:>10}\t{:>9.3}\t{:>9.3}\t{:>+8.3}",
                    pc.octave,
                    pc.index,
                    pc.note_name,
                    pc.english_name,
                    pc.original_value,
                    pc.cents,
                    pc.frequency,
                    pc.cents_deviation
                );
            }
        }
        Command::Ajnas { tuning, jins, starting_note } => {
            let lattice = catalogue_lattice(&catalogue, &tuning, starting_note.as_deref())?;
            let template = catalogue.jins(&jins)?;
            for jins in jins_transpositions(&lattice, template, &options) {
                println!("{}", describe_jins(&jins));
            }
        }
        Command::Maqamat { tuning, maqam, starting_note } => {
            let lattice = catalogue_lattice(&catalogue, &tuning, starting_note.as_deref())?;
            let template = catalogue.maqam(&maqam)?;
            for maqam in maqam_transpositions(&lattice, template, &catalogue.ajnas, &options) {
                print_maqam(&maqam);
            }
        }
        Command::Modulations { tuning, maqam, ajnas, on } => {
            let report = analyze_modulations(&catalogue, &tuning, &maqam, on.as_deref())?;
            println!("{}", report.source.name);
            if ajnas {
                print_modulations(&report.ajnas, |jins| jins.name.clone());
            } else {
                print_modulations(&report.maqamat, |maqam| maqam.name.clone());
            }
        }
    }
    Ok(())
}

fn describe_jins(jins: &Jins) -> String {
    let marker = if jins.transposition { "taswir" } else { "tahlil" };
    format!("{} ({}): {}", jins.name, marker, jins.note_names().join(" "))
}

fn print_maqam(maqam: &Maqam) {
    let marker = if maqam.transposition { "taswir" } else { "tahlil" };
    println!("{} ({})", maqam.name, marker);
    println!("  ascending:  {}", maqam.ascending_note_names().join(" "));
    println!("  descending: {}", maqam.descending_note_names().join(" "));
    for (degree, jins) in maqam.ascending_ajnas.iter().enumerate() {
        if let Some(jins) = jins {
            println!("  {}: {}", degree + 1, jins.name);
        }
    }
}

fn print_modulations<T>(modulations: &Modulations<T>, name: impl Fn(&T) -> String) {
    if let Some(note) = modulations.alternate_third_note {
        println!("alternate third: {}", note);
    }
    for (degree, bucket) in modulations.iter() {
        let names: Vec<String> = bucket.iter().map(&name).collect();
        println!("{}: {}", degree.label(), names.join(", "));
    }
}
