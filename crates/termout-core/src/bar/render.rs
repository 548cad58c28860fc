//! Frame formatting. The coordinator only ever sees the resulting string.

use super::stats::BarStats;
use super::Units;

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Render one frame, e.g. `42 / 100 [====>-----]  42.00%`. Byte bars append
/// throughput and ETA.
///
/// The frame stays narrower than `columns` so the line never wraps: the gauge
/// shrinks below `width` as needed, and when even a one-cell gauge does not
/// fit it is dropped and the numbers are cut at the right edge.
pub fn render_frame(stats: &BarStats, units: Units, width: usize, columns: usize) -> String {
    let (prefix, suffix) = match units {
        Units::Items => (
            format!("{} / {}", stats.current, stats.total),
            format!("{:6.2}%", stats.percent()),
        ),
        Units::Bytes => {
            let eta = stats
                .eta_secs()
                .map(|s| format!("{:.0}s", s))
                .unwrap_or_else(|| "?".to_string());
            (
                format!(
                    "{} / {}",
                    human_bytes(stats.current as f64),
                    human_bytes(stats.total as f64)
                ),
                format!(
                    "{:6.2}% {}/s ETA {}",
                    stats.percent(),
                    human_bytes(stats.per_sec()),
                    eta
                ),
            )
        }
    };

    // Last column stays free so the cursor never wraps.
    let limit = columns.saturating_sub(1).max(1);
    // " [" + "] "
    let fixed = prefix.len() + suffix.len() + 4;
    if fixed < limit {
        let gauge = gauge(stats.fraction(), width.min(limit - fixed));
        return format!("{} [{}] {}", prefix, gauge, suffix);
    }
    let mut text = format!("{} {}", prefix, suffix);
    text.truncate(limit);
    text
}

fn gauge(fraction: f64, width: usize) -> String {
    let filled = ((fraction * width as f64).floor() as usize).min(width);
    if filled == width {
        return "=".repeat(width);
    }
    let mut s = String::with_capacity(width);
    s.push_str(&"=".repeat(filled));
    s.push('>');
    s.push_str(&"-".repeat(width - filled - 1));
    s
}

/// Binary-prefixed size: `512 B`, `1.50 KiB`, `3.25 MiB`, `1.00 GiB`.
pub fn human_bytes(n: f64) -> String {
    if n < KIB {
        format!("{:.0} B", n)
    } else if n < MIB {
        format!("{:.2} KiB", n / KIB)
    } else if n < GIB {
        format!("{:.2} MiB", n / MIB)
    } else {
        format!("{:.2} GiB", n / GIB)
    }
}
