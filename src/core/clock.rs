//! Clock display helpers.

/// Render a duration in seconds as `M:SS`, or `H:MM:SS` from one hour up.
///
/// ```
/// use table_clock::core::format_clock;
///
/// assert_eq!(format_clock(65), "1:05");
/// assert_eq!(format_clock(3_725), "1:02:05");
/// ```
#[must_use]
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
