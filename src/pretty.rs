/// Render a count (typically microseconds) at a human scale.
///
/// - below 10,000: the bare number
/// - below 1,000,000: thousands grouped with a comma, e.g. `12,345`
/// - above that: three significant digits with a `million`, `billion` or
///   `trillion` suffix, e.g. `2.5 million`
///
/// Every threshold is exclusive, so exactly 1,000,000 is `1 million`.
pub fn pretty_count(n: u64) -> String {
    if n < 10_000 {
        n.to_string()
    } else if n < 1_000_000 {
        let thousands = n / 1_000;
        format!("{},{:03}", thousands, n - 1_000 * thousands)
    } else if n < 1_000_000_000 {
        format!("{} million", sig3(n as f64 / 1e6))
    } else if n < 1_000_000_000_000 {
        format!("{} billion", sig3(n as f64 / 1e9))
    } else {
        format!("{} trillion", sig3(n as f64 / 1e12))
    }
}

/// Round to three significant figures in fixed notation, dropping trailing
/// zeros and a dangling decimal point.
pub fn sig3(x: f64) -> String {
    if x == 0.0 || !x.is_finite() {
        return format!("{}", x);
    }
    let exponent = x.abs().log10().floor() as i32;
    let decimals = (2 - exponent).max(0) as usize;
    let s = format!("{:.*}", decimals, x);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_counts_are_bare() {
        assert_eq!(pretty_count(0), "0");
        assert_eq!(pretty_count(7), "7");
        assert_eq!(pretty_count(9_999), "9999");
    }

    #[test]
    fn test_grouped_thousands() {
        assert_eq!(pretty_count(10_000), "10,000");
        assert_eq!(pretty_count(12_345), "12,345");
        assert_eq!(pretty_count(45_000), "45,000");
        assert_eq!(pretty_count(100_007), "100,007");
        assert_eq!(pretty_count(999_999), "999,999");
    }

    #[test]
    fn test_grouped_matches_floor_and_remainder() {
        for d in (10_000..1_000_000).step_by(7_919) {
            let t = d / 1000;
            let expected = format!("{},{:03}", t, d - 1000 * t);
            assert_eq!(pretty_count(d), expected, "d = {}", d);
            assert!(!pretty_count(d).contains(' '));
        }
    }

    #[test]
    fn test_million_boundary() {
        assert_eq!(pretty_count(1_000_000), "1 million");
        assert_eq!(pretty_count(2_500_000), "2.5 million");
        assert_eq!(pretty_count(12_345_678), "12.3 million");
        assert_eq!(pretty_count(123_456_789), "123 million");
    }

    #[test]
    fn test_billion_and_trillion() {
        assert_eq!(pretty_count(1_000_000_000), "1 billion");
        assert_eq!(pretty_count(4_560_000_000), "4.56 billion");
        assert_eq!(pretty_count(1_000_000_000_000), "1 trillion");
        assert_eq!(pretty_count(7_890_000_000_000_000), "7890 trillion");
    }

    #[test]
    fn test_sig3_rounding() {
        assert_eq!(sig3(2.5), "2.5");
        assert_eq!(sig3(1.0), "1");
        assert_eq!(sig3(12.345), "12.3");
        assert_eq!(sig3(1.2345), "1.23");
        assert_eq!(sig3(9.9996), "10");
        assert_eq!(sig3(999.9999), "1000");
        assert_eq!(sig3(0.001234), "0.00123");
        assert_eq!(sig3(-2.346), "-2.35");
        assert_eq!(sig3(0.0), "0");
    }
}
