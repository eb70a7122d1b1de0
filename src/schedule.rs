// file: src/schedule.rs
// description: daily send-window guard against a misconfigured scheduler
// reference: time-window predicate over the host local clock

use crate::config::ScheduleConfig;
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use tracing::debug;

/// Permits the daily job only inside a configured local window. External
/// cron is expected to fire inside it; this is the second line of defense
/// against duplicate or off-hours sends.
#[derive(Debug, Clone)]
pub struct SendWindow {
    start: NaiveTime,
    window: Duration,
}

impl SendWindow {
    pub fn new(config: &ScheduleConfig) -> Self {
        let start = NaiveTime::from_hms_opt(config.send_hour, config.send_minute, 0)
            .unwrap_or(NaiveTime::MIN);

        Self {
            start,
            window: Duration::minutes(i64::from(config.window_minutes)),
        }
    }

    /// True when `now` falls in `[start, start + window)` on its own day.
    pub fn permits_at(&self, now: NaiveDateTime) -> bool {
        let start = now.date().and_time(self.start);
        let end = start + self.window;
        start <= now && now < end
    }

    pub fn permits_now(&self) -> bool {
        let now = Local::now().naive_local();
        let open = self.permits_at(now);
        debug!(
            "Send window check at {}: {}",
            now.format("%H:%M:%S"),
            if open { "open" } else { "closed" }
        );
        open
    }

    pub fn describe(&self) -> String {
        format!(
            "{}-{} local time",
            self.start.format("%H:%M"),
            (self.start + self.window).format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window() -> SendWindow {
        SendWindow::new(&ScheduleConfig {
            send_hour: 8,
            send_minute: 0,
            window_minutes: 15,
        })
    }

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_window_boundaries() {
        let window = window();

        assert!(!window.permits_at(at(7, 59, 59)));
        assert!(window.permits_at(at(8, 0, 0)));
        assert!(window.permits_at(at(8, 14, 59)));
        assert!(!window.permits_at(at(8, 15, 0)));
        assert!(!window.permits_at(at(20, 0, 0)));
    }

    #[test]
    fn test_describe() {
        assert_eq!(window().describe(), "08:00-08:15 local time");
    }
}
