use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::ScanError;
use crate::models::window::Window;

///
/// How the final window of a chromosome is sized
///
/// `CountRemainder` is the historical rule: `N = L / W + 1` windows, and the
/// last one spans `L % N` bases (or `W` when `L % N == 0`). The remainder is
/// taken against the window *count*, so the last stop can fall short of or
/// run past the chromosome end. This is the default.
///
/// `Tiled` covers `[0, L)` exactly with `ceil(L / W)` windows.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastWindowRule {
    #[default]
    CountRemainder,
    Tiled,
}

pub const DEFAULT_LAST_WINDOW_RULE: LastWindowRule = LastWindowRule::CountRemainder;

impl FromStr for LastWindowRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" | "count-remainder" => Ok(LastWindowRule::CountRemainder),
            "tiled" => Ok(LastWindowRule::Tiled),
            _ => Err(format!("Invalid last window rule: {}", s)),
        }
    }
}

impl Display for LastWindowRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastWindowRule::CountRemainder => write!(f, "legacy"),
            LastWindowRule::Tiled => write!(f, "tiled"),
        }
    }
}

/// Span of the final window under [`LastWindowRule::CountRemainder`].
pub fn legacy_last_window_span(length: u64, window_size: u64) -> u64 {
    let num_windows = length / window_size + 1;
    match length % num_windows {
        0 => window_size,
        remainder => remainder,
    }
}

///
/// Split a chromosome of `length` bases into windows of `window_size`
///
/// Windows are contiguous, non-overlapping and ordered by start.
///
pub fn partition_windows(
    chrom: &str,
    length: u64,
    window_size: u64,
    rule: LastWindowRule,
) -> Result<Vec<Window>, ScanError> {
    if window_size == 0 {
        return Err(ScanError::InvalidWindowSize);
    }

    match rule {
        LastWindowRule::CountRemainder => count_remainder_windows(chrom, length, window_size),
        LastWindowRule::Tiled => Ok(tiled_windows(chrom, length, window_size)),
    }
}

fn count_remainder_windows(
    chrom: &str,
    length: u64,
    window_size: u64,
) -> Result<Vec<Window>, ScanError> {
    let num_windows = length / window_size + 1;
    let last_window_span = legacy_last_window_span(length, window_size);

    let mut windows = Vec::with_capacity(num_windows as usize);
    let mut start = 0u64;
    let mut end = window_size;

    for window_id in 1..=num_windows {
        windows.push(Window::new(chrom, start, end));
        if window_id == num_windows {
            break;
        }

        // only the step into the final window uses the remainder
        let step = if window_id == num_windows - 1 {
            last_window_span
        } else {
            window_size
        };
        start = start
            .checked_add(window_size)
            .ok_or(ScanError::InvalidWindowSize)?;
        end = end.checked_add(step).ok_or(ScanError::InvalidWindowSize)?;
    }

    Ok(windows)
}

fn tiled_windows(chrom: &str, length: u64, window_size: u64) -> Vec<Window> {
    (0..length.div_ceil(window_size))
        .map(|i| {
            let start = i * window_size;
            Window::new(chrom, start, start.saturating_add(window_size).min(length))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn bounds(windows: &[Window]) -> Vec<(u64, u64)> {
        windows.iter().map(|w| (w.start, w.stop)).collect()
    }

    #[rstest]
    fn test_partition_chrx_example() {
        let windows =
            partition_windows("chrX", 1000, 300, LastWindowRule::CountRemainder).unwrap();

        assert_eq!(
            bounds(&windows),
            vec![(0, 300), (300, 600), (600, 900), (900, 1200)]
        );
        assert!(windows.iter().all(|w| w.chrom == "chrX"));
    }

    #[rstest]
    #[case(1050, 300, vec![(0, 300), (300, 600), (600, 900), (900, 902)])]
    #[case(900, 300, vec![(0, 300), (300, 600), (600, 900), (900, 1200)])]
    #[case(100, 300, vec![(0, 300)])]
    #[case(301, 300, vec![(0, 300), (300, 301)])]
    #[case(10, 1, (0..10).map(|i| (i, i + 1)).chain([(10, 20)]).collect())]
    fn test_partition_legacy_boundaries(
        #[case] length: u64,
        #[case] window_size: u64,
        #[case] expected: Vec<(u64, u64)>,
    ) {
        let windows =
            partition_windows("chr1", length, window_size, LastWindowRule::CountRemainder)
                .unwrap();
        assert_eq!(bounds(&windows), expected);
    }

    #[rstest]
    #[case(1000, 300, 300)]
    #[case(1050, 300, 2)]
    #[case(7, 10, 10)]
    fn test_legacy_last_window_span(
        #[case] length: u64,
        #[case] window_size: u64,
        #[case] expected: u64,
    ) {
        assert_eq!(legacy_last_window_span(length, window_size), expected);
    }

    #[rstest]
    fn test_partition_legacy_properties() {
        for length in 1..400u64 {
            for window_size in 1..40u64 {
                let windows = partition_windows(
                    "chr1",
                    length,
                    window_size,
                    LastWindowRule::CountRemainder,
                )
                .unwrap();

                assert_eq!(windows.len() as u64, length / window_size + 1);
                assert_eq!(windows[0].start, 0);
                for pair in windows.windows(2) {
                    assert_eq!(pair[0].stop, pair[1].start);
                    assert!(pair[0].start < pair[1].start);
                }
            }
        }
    }

    #[rstest]
    #[case(1000, 300, vec![(0, 300), (300, 600), (600, 900), (900, 1000)])]
    #[case(900, 300, vec![(0, 300), (300, 600), (600, 900)])]
    #[case(100, 300, vec![(0, 100)])]
    #[case(1000, u64::MAX, vec![(0, 1000)])]
    fn test_partition_tiled(
        #[case] length: u64,
        #[case] window_size: u64,
        #[case] expected: Vec<(u64, u64)>,
    ) {
        let windows = partition_windows("chr1", length, window_size, LastWindowRule::Tiled).unwrap();
        assert_eq!(bounds(&windows), expected);

        let covered: u64 = windows.iter().map(Window::span).sum();
        assert_eq!(covered, length);
    }

    #[rstest]
    #[case(LastWindowRule::CountRemainder)]
    #[case(LastWindowRule::Tiled)]
    fn test_partition_rejects_zero_window(#[case] rule: LastWindowRule) {
        let result = partition_windows("chr1", 1000, 0, rule);
        assert!(matches!(result, Err(ScanError::InvalidWindowSize)));
    }

    #[rstest]
    #[case(1000, u64::MAX, vec![(0, u64::MAX)])]
    #[case(1000, u64::MAX / 2 + 1, vec![(0, u64::MAX / 2 + 1)])]
    #[case(u64::MAX - 1, u64::MAX, vec![(0, u64::MAX)])]
    fn test_partition_legacy_huge_window(
        #[case] length: u64,
        #[case] window_size: u64,
        #[case] expected: Vec<(u64, u64)>,
    ) {
        let windows =
            partition_windows("chr1", length, window_size, LastWindowRule::CountRemainder)
                .unwrap();
        assert_eq!(bounds(&windows), expected);
    }

    #[rstest]
    fn test_partition_legacy_rejects_overflowing_stop() {
        // two windows, the second would end past u64::MAX
        let result = partition_windows(
            "chr1",
            u64::MAX,
            u64::MAX,
            LastWindowRule::CountRemainder,
        );
        assert!(matches!(result, Err(ScanError::InvalidWindowSize)));
    }

    #[rstest]
    #[case("legacy", LastWindowRule::CountRemainder)]
    #[case("count-remainder", LastWindowRule::CountRemainder)]
    #[case("Tiled", LastWindowRule::Tiled)]
    fn test_parse_rule(#[case] input: &str, #[case] expected: LastWindowRule) {
        assert_eq!(input.parse::<LastWindowRule>().unwrap(), expected);
    }

    #[rstest]
    fn test_default_rule_is_legacy() {
        assert_eq!(LastWindowRule::default(), DEFAULT_LAST_WINDOW_RULE);
        assert_eq!(DEFAULT_LAST_WINDOW_RULE, LastWindowRule::CountRemainder);
    }
}
