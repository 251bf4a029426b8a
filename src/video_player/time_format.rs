// SPDX-License-Identifier: MPL-2.0
//! Time readout and progress helpers.
//!
//! Both functions are total: unknown, zero, negative or non-finite inputs map
//! to `0:00` / `0%` instead of producing `NaN` on screen.

/// Formats seconds as `m:ss`.
///
/// Minutes are not zero-padded and are not folded into hours.
///
/// # Examples
///
/// ```
/// use preview_modal::video_player::time_format::format_time;
///
/// assert_eq!(format_time(125.0), "2:05");
/// assert_eq!(format_time(0.0), "0:00");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time(seconds: f64) -> String {
    let total_secs = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Formats the `current / total` readout shown next to the controls.
#[must_use]
pub fn format_readout(current_secs: f64, duration_secs: Option<f64>) -> String {
    format!(
        "{} / {}",
        format_time(current_secs),
        format_time(duration_secs.unwrap_or(0.0))
    )
}

/// Returns the position of `time` within `duration` as a percentage in `[0, 100]`.
///
/// Short-circuits to `0.0` while the duration is unknown or zero.
///
/// # Examples
///
/// ```
/// use preview_modal::video_player::time_format::progress_percent;
///
/// assert_eq!(progress_percent(30.0, Some(120.0)), 25.0);
/// assert_eq!(progress_percent(30.0, Some(0.0)), 0.0);
/// assert_eq!(progress_percent(30.0, None), 0.0);
/// ```
#[must_use]
pub fn progress_percent(time: f64, duration: Option<f64>) -> f64 {
    match duration {
        Some(total) if total.is_finite() && total > 0.0 && time.is_finite() => {
            (time / total).clamp(0.0, 1.0) * 100.0
        }
        _ => 0.0,
    }
}
