pub mod chemistry;
pub mod kernels;
pub mod operands;
pub mod pretty;
pub mod programs;
pub mod progress;
pub mod simd;
pub mod timer;

pub use pretty::pretty_count;
pub use programs::{run_program, run_programs, Measurement, Program, Workload};
pub use timer::{Silence, Timer};

/// Configuration shared by the benchmark programs.
pub struct BenchConfig {
    /// RNG seed for operand generation; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Print a line on stderr before each program starts.
    pub verbose: bool,
    /// Silence cell handed to every timer the programs create.
    ///
    /// Defaults to the process-wide cell, so `Timer::silence()` also
    /// quiets the programs.
    pub silence: Silence,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            seed: None,
            verbose: false,
            silence: Silence::global(),
        }
    }
}
