//! Display formatting for movie metadata.

/// Formats a vote average to one decimal place, or `N/A` when absent.
///
/// Exact ties (x.x25, x.x75) round up: 7.25 -> "7.3".
#[must_use]
pub fn format_vote(vote: Option<f64>) -> String {
    vote.map_or_else(|| String::from("N/A"), round_one_decimal)
}

/// Rounds to one decimal, picking the larger neighbour on an exact tie.
///
/// `{:.1}` rounds exact ties to even, so 7.25 would print as "7.2".
fn round_one_decimal(v: f64) -> String {
    // Scaling by 4 is exact, so odd quarters are the only exact ties.
    let quarters = v * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        format!("{:.1}", (v * 10.0).ceil() / 10.0)
    } else {
        format!("{v:.1}")
    }
}

/// Formats a rating out of ten (e.g. 7.846 -> "7.8/10", absent -> "N/A/10").
#[must_use]
pub fn format_rating(vote: Option<f64>) -> String {
    format!("{}/10", format_vote(vote))
}

/// Formats a runtime in minutes as hours and minutes (e.g. 154 -> "2h 34m").
///
/// Absent runtimes display as `0h 0m`.
#[allow(clippy::arithmetic_side_effects)]
#[must_use]
pub fn format_runtime(minutes: Option<u32>) -> String {
    let total = minutes.unwrap_or(0);
    format!("{}h {}m", total / 60, total % 60)
}

/// Extracts the year from a release date (the text before the first `-`).
#[must_use]
pub fn release_year(date: &str) -> &str {
    date.split('-').next().unwrap_or_default()
}

/// Formats a dollar amount with thousands separators (e.g. 63000000 -> "$63,000,000").
#[allow(clippy::arithmetic_side_effects)]
#[must_use]
pub fn format_money(amount: u64) -> String {
    let s = amount.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3 + 1);
    result.push('$');
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Joins names with `", "`.
#[must_use]
pub fn join_names(names: &[String]) -> String {
    names.join(", ")
}
