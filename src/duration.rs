use once_cell::sync::Lazy;
use regex::Regex;

static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?").expect("valid duration regex"));

/// Converts a compact `PT<h>H<m>M` duration into whole minutes.
///
/// Either component may be missing, and anything without a `PT` marker
/// yields 0. Components too large to represent saturate at `u32::MAX`.
pub fn parse_duration(code: &str) -> u32 {
    let Some(caps) = DURATION_RE.captures(code) else {
        return 0;
    };
    let component = |idx: usize| {
        // The capture is all digits, so a failed parse can only be overflow.
        caps.get(idx)
            .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
            .unwrap_or(0)
    };
    component(1)
        .saturating_mul(60)
        .saturating_add(component(2))
}

/// `PT2H30M` -> `2h30m`.
pub fn display_duration(code: &str) -> String {
    code.replacen("PT", "", 1).to_lowercase()
}

/// Histogram label for a bucket start: `2h`, `2h30m`, `0h45m`.
pub fn bucket_label(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{hours}h{mins}m")
    } else {
        format!("{hours}h")
    }
}

pub fn format_minutes(minutes: u32) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}
