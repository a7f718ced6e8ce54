//! Local and destination clocks. The destination clock is derived from
//! the `timezone` offset the weather endpoint reports, so no tz database
//! lookup is involved.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local, Utc};
use tokio::task::JoinHandle;

/// Shift a UTC instant into the destination's fixed offset.
/// Returns `None` when the offset is out of range.
pub fn destination_at(now_utc: DateTime<Utc>, tz_offset_secs: i32) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(tz_offset_secs)?;
    Some(now_utc.with_timezone(&offset))
}

/// One-line rendering of the local clock, plus the destination clock
/// when an offset is known.
pub fn clock_line(tz_offset_secs: Option<i32>) -> String {
    let local = Local::now().format("%H:%M:%S");
    match tz_offset_secs.and_then(|secs| destination_at(Utc::now(), secs)) {
        Some(dest) => format!("Local {}  |  Destination {}", local, dest.format("%H:%M:%S")),
        None => format!("Local {}", local),
    }
}

/// Ticking clock that re-renders once a second until dropped.
pub struct LiveClock {
    handle: JoinHandle<()>,
}

impl LiveClock {
    pub fn start<F>(tz_offset_secs: Option<i32>, mut render: F) -> Self
    where
        F: FnMut(String) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            loop {
                ticker.tick().await;
                render(clock_line(tz_offset_secs));
            }
        });
        Self { handle }
    }
}

impl Drop for LiveClock {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_destination_shifts_by_offset() {
        let noon_utc = Utc.with_ymd_and_hms(2023, 1, 2, 12, 0, 0).unwrap();
        // Tijuana in winter sits at UTC-8.
        let dest = destination_at(noon_utc, -28800).unwrap();
        assert_eq!(dest.hour(), 4);
        assert_eq!(dest.minute(), 0);
    }

    #[test]
    fn test_destination_rejects_out_of_range_offset() {
        let now = Utc.with_ymd_and_hms(2023, 1, 2, 12, 0, 0).unwrap();
        assert!(destination_at(now, 200_000).is_none());
        assert!(destination_at(now, -200_000).is_none());
    }

    #[test]
    fn test_clock_line_with_and_without_offset() {
        let with_dest = clock_line(Some(0));
        assert!(with_dest.contains("Local "));
        assert!(with_dest.contains("Destination "));

        let local_only = clock_line(None);
        assert!(local_only.contains("Local "));
        assert!(!local_only.contains("Destination"));

        // An unusable offset falls back to the local-only line.
        assert!(!clock_line(Some(200_000)).contains("Destination"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_clock_ticks_until_dropped() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let clock = LiveClock::start(Some(0), move |line| {
            let _ = tx.send(line);
        });

        tokio::time::advance(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_ok());

        drop(clock);
        tokio::task::yield_now().await;
        while rx.try_recv().is_ok() {}

        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }
}
