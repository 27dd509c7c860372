use std::hint::black_box;
use std::io;
use std::time::Duration;

use anyhow::{anyhow, Result};
use indicatif::ProgressBar;
use ndarray::Array1;

use crate::kernels::{fused_fixed, fused_ndarray, fused_series, fused_slices, fused_zip, Series, OFFSET};
use crate::operands::{rng_for, Operands};
use crate::progress::make_progress_bar;
use crate::simd;
use crate::timer::{Silence, Timer};
use crate::BenchConfig;

/// Sequence length and repetition count of a benchmark program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Workload {
    pub len: usize,
    pub iterations: usize,
}

const SMALL_LEN: usize = 10_000;

impl Workload {
    /// One million elements, 100 repetitions.
    pub const LARGE: Workload = Workload { len: 1_000_000, iterations: 100 };
    /// Ten thousand elements, 10,000 repetitions.
    pub const SMALL: Workload = Workload { len: SMALL_LEN, iterations: 10_000 };
    /// One hundred elements, one repetition; run before a LARGE region.
    pub const WARM_UP: Workload = Workload { len: 100, iterations: 1 };
}

/// The fixed benchmark programs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Program {
    /// Operator-overloaded sequence type, one temporary per operator.
    Operators,
    /// Boxed heap buffer vs `Vec`, single indexed loop.
    Arrays,
    /// ndarray expression, ndarray `Zip`, fixed-size array.
    Libraries,
    /// Explicit SIMD intrinsics.
    Simd,
    /// ndarray expression on the large workload, after a small warm-up run.
    Expression,
}

impl Program {
    pub const ALL: [Program; 5] = [
        Program::Operators,
        Program::Arrays,
        Program::Libraries,
        Program::Simd,
        Program::Expression,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Program::Operators => "operators",
            Program::Arrays => "arrays",
            Program::Libraries => "libraries",
            Program::Simd => "simd",
            Program::Expression => "expression",
        }
    }

    pub fn workload(self) -> Workload {
        match self {
            Program::Operators | Program::Expression => Workload::LARGE,
            Program::Arrays | Program::Libraries | Program::Simd => Workload::SMALL,
        }
    }
}

/// Result of one timed region.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub label: String,
    pub elapsed: Duration,
    /// Running sum of `a[0]` after each repetition; keeps the loop observable.
    pub checksum: f64,
}

/// Run `step` `iterations` times inside a timer scope labelled `label`.
///
/// `step` performs one repetition of the kernel and returns `a[0]`.
/// The timer reports when it goes out of scope at the end of this call.
fn timed<F>(label: &str, iterations: usize, silence: &Silence, mut step: F) -> Measurement
where
    F: FnMut() -> f64,
{
    let mut timer = Timer::with_sink(label, silence.clone(), io::stderr());
    let mut checksum = 0.0;
    for _ in 0..iterations {
        checksum += step();
    }
    timer.stop();
    Measurement {
        label: label.to_string(),
        elapsed: timer.elapsed(),
        checksum: black_box(checksum),
    }
}

pub fn run_program(program: Program, config: &BenchConfig) -> Result<Vec<Measurement>> {
    let workload = program.workload();
    if config.verbose {
        eprintln!(
            "Running {}: n={}, iterations={}",
            program.name(),
            workload.len,
            workload.iterations
        );
    }
    match program {
        Program::Operators => Ok(run_operators(workload, config)),
        Program::Arrays => Ok(run_arrays(workload, config)),
        Program::Libraries => run_libraries(config),
        Program::Simd => Ok(run_simd(workload, config)),
        Program::Expression => Ok(run_expression(Workload::WARM_UP, workload, config)),
    }
}

/// Run each program in order, ticking a progress bar between programs.
pub fn run_programs(
    programs: &[Program],
    config: &BenchConfig,
    show_progress: bool,
) -> Result<Vec<Measurement>> {
    let pb = make_progress_bar(programs.len() as u64, "programs", show_progress);
    drive(&pb, programs, |program| run_program(program, config))
}

/// Timer reports are plain stderr lines, and the bar's own line on stderr has
/// no trailing newline. Each program therefore runs with the bar suspended
/// (cleared before, redrawn after) so every report starts on its own line.
fn drive<F>(pb: &ProgressBar, programs: &[Program], mut run: F) -> Result<Vec<Measurement>>
where
    F: FnMut(Program) -> Result<Vec<Measurement>>,
{
    let mut measurements = Vec::new();
    for &program in programs {
        pb.set_message(program.name());
        measurements.extend(pb.suspend(|| run(program))?);
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(measurements)
}

fn run_operators(workload: Workload, config: &BenchConfig) -> Vec<Measurement> {
    let ops = Operands::random(workload.len, &mut rng_for(config.seed));
    let (b, c, d, e) = (Series(ops.b), Series(ops.c), Series(ops.d), Series(ops.e));
    let offset = Series::filled(workload.len, OFFSET);

    let mut a = Series(Vec::new());
    let m = timed("Vector Operations", workload.iterations, &config.silence, || {
        a = fused_series(&b, &c, &d, &e, &offset);
        a.as_slice()[0]
    });
    vec![m]
}

fn run_arrays(workload: Workload, config: &BenchConfig) -> Vec<Measurement> {
    let mut rng = rng_for(config.seed);
    let n = workload.len;

    let ops = Operands::random(n, &mut rng);
    let mut a: Box<[f64]> = vec![0.0; n].into_boxed_slice();
    let b: Box<[f64]> = ops.b.into_boxed_slice();
    let c: Box<[f64]> = ops.c.into_boxed_slice();
    let d: Box<[f64]> = ops.d.into_boxed_slice();
    let e: Box<[f64]> = ops.e.into_boxed_slice();
    let heap = timed("Heap Array Operations", workload.iterations, &config.silence, || {
        fused_slices(black_box(&mut a), &b, &c, &d, &e);
        a[0]
    });
    drop((a, b, c, d, e));

    let ops = Operands::random(n, &mut rng);
    let mut a = vec![0.0; n];
    let vector = timed(
        "Vec Operations (single loop)",
        workload.iterations,
        &config.silence,
        || {
            fused_slices(black_box(&mut a), &ops.b, &ops.c, &ops.d, &ops.e);
            a[0]
        },
    );

    vec![heap, vector]
}

fn boxed_array<const N: usize>(v: Vec<f64>) -> Result<Box<[f64; N]>> {
    let len = v.len();
    v.into_boxed_slice()
        .try_into()
        .map_err(|_| anyhow!("Expected {} elements for a fixed-size array, got {}", N, len))
}

fn run_libraries(config: &BenchConfig) -> Result<Vec<Measurement>> {
    let workload = Workload::SMALL;
    let mut rng = rng_for(config.seed);

    let ops = Operands::random(workload.len, &mut rng);
    let (b, c, d, e) = (
        Array1::from(ops.b),
        Array1::from(ops.c),
        Array1::from(ops.d),
        Array1::from(ops.e),
    );
    let mut a = Array1::<f64>::zeros(0);
    let expr = timed("ndarray", workload.iterations, &config.silence, || {
        a = fused_ndarray(&b, &c, &d, &e);
        a[0]
    });

    let mut a = Array1::<f64>::zeros(workload.len);
    let zip = timed("ndarray::Zip", workload.iterations, &config.silence, || {
        fused_zip(black_box(&mut a), &b, &c, &d, &e);
        a[0]
    });

    let ops = Operands::random(workload.len, &mut rng);
    let b = boxed_array::<SMALL_LEN>(ops.b)?;
    let c = boxed_array::<SMALL_LEN>(ops.c)?;
    let d = boxed_array::<SMALL_LEN>(ops.d)?;
    let e = boxed_array::<SMALL_LEN>(ops.e)?;
    let mut a = boxed_array::<SMALL_LEN>(vec![0.0; SMALL_LEN])?;
    let fixed = timed("fixed-size array", workload.iterations, &config.silence, || {
        fused_fixed::<SMALL_LEN>(black_box(&mut a), &b, &c, &d, &e);
        a[0]
    });

    Ok(vec![expr, zip, fixed])
}

fn run_simd(workload: Workload, config: &BenchConfig) -> Vec<Measurement> {
    let ops = Operands::random(workload.len, &mut rng_for(config.seed));
    let mut a = vec![0.0; workload.len];
    let label = format!("SIMD Operations ({})", simd::backend());
    let m = timed(&label, workload.iterations, &config.silence, || {
        simd::fused(black_box(&mut a), &ops.b, &ops.c, &ops.d, &ops.e);
        a[0]
    });
    vec![m]
}

/// Expression form on `workload`, preceded by one region on `warm_up`.
fn run_expression(warm_up: Workload, workload: Workload, config: &BenchConfig) -> Vec<Measurement> {
    let mut rng = rng_for(config.seed);
    let mut measurements = Vec::with_capacity(2);
    for (label, w) in [
        ("ndarray expression (warm-up)", warm_up),
        ("ndarray expression", workload),
    ] {
        let ops = Operands::random(w.len, &mut rng);
        let (b, c, d, e) = (
            Array1::from(ops.b),
            Array1::from(ops.c),
            Array1::from(ops.d),
            Array1::from(ops.e),
        );
        let mut a = Array1::<f64>::zeros(0);
        measurements.push(timed(label, w.iterations, &config.silence, || {
            a = fused_ndarray(&b, &c, &d, &e);
            a[0]
        }));
    }
    measurements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> BenchConfig {
        let silence = Silence::new();
        silence.silence();
        BenchConfig {
            seed: Some(1),
            verbose: false,
            silence,
        }
    }

    #[test]
    fn test_timed_counts_iterations() {
        let config = quiet();
        let mut calls = 0;
        let m = timed("count", 5, &config.silence, || {
            calls += 1;
            1.5
        });
        assert_eq!(calls, 5);
        assert_eq!(m.label, "count");
        assert_eq!(m.checksum, 7.5);
    }

    #[test]
    fn test_boxed_array_length_check() {
        assert!(boxed_array::<3>(vec![1.0, 2.0, 3.0]).is_ok());
        let err = boxed_array::<3>(vec![1.0]).unwrap_err();
        assert!(err.to_string().contains("Expected 3 elements"));
    }

    #[test]
    fn test_program_workloads() {
        assert_eq!(Program::Operators.workload(), Workload::LARGE);
        assert_eq!(Program::Simd.workload(), Workload::SMALL);
        assert_eq!(Workload::SMALL.len, SMALL_LEN);
    }

    #[test]
    fn test_expression_runs_warm_up_first() {
        let warm_up = Workload { len: 8, iterations: 1 };
        let main = Workload { len: 32, iterations: 3 };
        let m = run_expression(warm_up, main, &quiet());
        let labels: Vec<&str> = m.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["ndarray expression (warm-up)", "ndarray expression"]);
        assert!(m.iter().all(|m| m.checksum.is_finite()));
        assert_eq!(Program::Expression.workload(), Workload::LARGE);
        assert_eq!(Workload::WARM_UP, Workload { len: 100, iterations: 1 });
    }

    #[test]
    fn test_drive_with_progress_bar() {
        let pb = ProgressBar::hidden();
        pb.set_length(2);
        let mut seen = Vec::new();
        let m = drive(&pb, &[Program::Arrays, Program::Simd], |program| {
            seen.push(program);
            Ok(vec![Measurement {
                label: program.name().to_string(),
                elapsed: Duration::ZERO,
                checksum: 0.0,
            }])
        })
        .unwrap();
        assert_eq!(seen, [Program::Arrays, Program::Simd]);
        assert_eq!(m.len(), 2);
        assert_eq!(pb.position(), 2);
        assert!(pb.is_finished());
    }

    #[test]
    fn test_drive_stops_on_error() {
        let pb = ProgressBar::hidden();
        let mut calls = 0;
        let result = drive(&pb, &Program::ALL, |_| {
            calls += 1;
            Err(anyhow!("kernel failed"))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_run_programs_with_progress_shown() {
        // stderr is not a terminal under the test harness, so the bar stays
        // hidden; the path through `drive` with a requested bar is the same.
        let m = run_programs(&[Program::Simd], &quiet(), true).unwrap();
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_simd_program_label() {
        let m = run_program(Program::Simd, &quiet()).unwrap();
        assert_eq!(m.len(), 1);
        assert!(m[0].label.starts_with("SIMD Operations ("));
        assert!(m[0].checksum.is_finite());
    }
}
