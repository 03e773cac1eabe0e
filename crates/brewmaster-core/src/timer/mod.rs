//! Countdown timer engine.

mod engine;

pub use engine::{ActiveTimer, CountdownTimer, TimerState};

/// Format a duration in seconds as MM:SS.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::format_time;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(600), "10:00");
        assert_eq!(format_time(3599), "59:59");
    }
}
