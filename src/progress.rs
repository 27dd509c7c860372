use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar over a sequence of benchmark programs.
///
/// Returns a visible bar when `show` is true, or a hidden no-op bar otherwise.
/// The bar is written to stderr:
///   `  label [=====>     ] 2/4 programs (ETA 5s)`
pub fn make_progress_bar(n_programs: u64, label: &str, show: bool) -> ProgressBar {
    if !show || n_programs == 0 {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(n_programs);
    let style = ProgressStyle::with_template("  {msg} [{bar:30}] {pos}/{len} programs (ETA {eta})")
        .map(|s| s.progress_chars("=>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(label.to_string());
    pb
}
