use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;

use elemwise::chemistry::{atomic_number, calculate_density, element_name, molar_mass};
use elemwise::{run_programs, BenchConfig, Program, Timer};

#[derive(Parser)]
#[command(
    name = "elemwise",
    about = "Element-wise arithmetic micro-benchmarks (b*c + d/e - 3.14) and a chemistry lookup demo"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a fixed benchmark program; each timed region reports on stderr
    Run {
        /// Program to run
        #[arg(value_enum)]
        program: Target,

        /// RNG seed for the operands (default: OS entropy)
        #[arg(long)]
        seed: Option<u64>,

        /// Suppress all timer reports
        #[arg(short = 'q', long)]
        quiet: bool,

        /// Verbose progress output
        #[arg(short = 'v', long)]
        verbose: bool,
    },
    /// Print density, molar mass and atomic-number lookups
    Chemistry {
        /// Mass in grams
        #[arg(long, default_value = "10.0")]
        mass: f64,

        /// Volume in millilitres
        #[arg(long, default_value = "5.0")]
        volume: f64,

        /// Element name (case-sensitive)
        #[arg(long, default_value = "Hydrogen")]
        element: String,

        /// Atomic number to look up
        #[arg(long, default_value = "1")]
        atomic_number: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Operators,
    Arrays,
    Libraries,
    Simd,
    Expression,
    All,
}

impl Target {
    fn programs(self) -> Vec<Program> {
        match self {
            Target::Operators => vec![Program::Operators],
            Target::Arrays => vec![Program::Arrays],
            Target::Libraries => vec![Program::Libraries],
            Target::Simd => vec![Program::Simd],
            Target::Expression => vec![Program::Expression],
            Target::All => Program::ALL.to_vec(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            program,
            seed,
            quiet,
            verbose,
        } => {
            if quiet {
                Timer::silence();
            }
            let config = BenchConfig {
                seed,
                verbose,
                ..BenchConfig::default()
            };
            let programs = program.programs();
            let show_progress = programs.len() > 1 && !quiet && std::io::stderr().is_terminal();

            let measurements = run_programs(&programs, &config, show_progress)?;

            if verbose {
                for m in &measurements {
                    eprintln!("  {}: checksum {:.6e}", m.label, m.checksum);
                }
            }
        }
        Command::Chemistry {
            mass,
            volume,
            element,
            atomic_number: z,
        } => {
            println!("Density: {} g/mL", calculate_density(mass, volume));
            println!("Molar Mass of {}: {} g/mol", element, molar_mass(&element));
            println!("Element Name: {}", element_name(z));
            println!("Atomic Number of {}: {}", element, atomic_number(&element));
        }
    }

    Ok(())
}
