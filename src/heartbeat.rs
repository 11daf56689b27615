use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// Consecutive late signals at which the monitor reports `Critical`.
pub const CRITICAL_FAILURES: u32 = 3;

/// Timing policy for a heartbeat monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatPolicy {
    /// The cadence the caller is expected to signal at.
    pub target_interval: Duration,
    /// Elapsed time up to which a signal still counts as on-time.
    pub tolerance: Duration,
}

impl Default for HeartbeatPolicy {
    fn default() -> Self {
        // 9.9s cadence with 100ms of slack.
        Self {
            target_interval: Duration::milliseconds(9_900),
            tolerance: Duration::milliseconds(10_000),
        }
    }
}

impl HeartbeatPolicy {
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_secs(target_secs: f64, tolerance_secs: f64) -> Self {
        Self {
            target_interval: Duration::milliseconds((target_secs * 1000.0) as i64),
            tolerance: Duration::milliseconds((tolerance_secs * 1000.0) as i64),
        }
    }
}

/// Classification of a single liveness signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatStatus {
    /// First signal ever seen; anchor recorded.
    Initialized,
    /// Signal arrived within tolerance of the anchor.
    OnTime { elapsed: Duration },
    /// Signal exceeded tolerance; `count` consecutive misses so far.
    Late { elapsed: Duration, count: u32 },
    /// `count` consecutive misses reached the critical threshold.
    Critical { count: u32 },
}

impl HeartbeatStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Initialized | Self::OnTime { .. })
    }
}

fn secs(elapsed: Duration) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let ms = elapsed.num_milliseconds() as f64;
    ms / 1000.0
}

impl fmt::Display for HeartbeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized => write!(f, "heartbeat initialized"),
            Self::OnTime { elapsed } => {
                write!(f, "heartbeat on time ({:.1}s)", secs(*elapsed))
            }
            Self::Late { elapsed, count } => write!(
                f,
                "heartbeat late ({:.1}s since last good signal, {count}/{CRITICAL_FAILURES} misses)",
                secs(*elapsed)
            ),
            Self::Critical { count } => {
                write!(f, "heartbeat critical: {count} consecutive misses")
            }
        }
    }
}

/// Tracks elapsed time between liveness signals and classifies each one.
///
/// The anchor time advances only on `Initialized` and `OnTime` signals. A
/// late signal leaves the anchor where it was, so lateness compounds against
/// the last good signal rather than the last call.
///
/// Single-writer state: callers driving signals from multiple threads must
/// serialize externally.
#[derive(Debug, Clone)]
pub struct HeartbeatMonitor {
    policy: HeartbeatPolicy,
    last_signal: Option<DateTime<Utc>>,
    consecutive_late: u32,
}

impl HeartbeatMonitor {
    pub fn new(policy: HeartbeatPolicy) -> Self {
        Self {
            policy,
            last_signal: None,
            consecutive_late: 0,
        }
    }

    pub fn policy(&self) -> HeartbeatPolicy {
        self.policy
    }

    /// Record a liveness signal at the current wall-clock time.
    pub fn signal(&mut self) -> HeartbeatStatus {
        self.signal_at(Utc::now())
    }

    /// Record a liveness signal at an explicit instant. Never fails.
    pub fn signal_at(&mut self, now: DateTime<Utc>) -> HeartbeatStatus {
        let Some(anchor) = self.last_signal else {
            self.last_signal = Some(now);
            self.consecutive_late = 0;
            return HeartbeatStatus::Initialized;
        };

        let elapsed = now - anchor;
        if elapsed <= self.policy.tolerance {
            self.last_signal = Some(now);
            self.consecutive_late = 0;
            return HeartbeatStatus::OnTime { elapsed };
        }

        self.consecutive_late += 1;
        if self.consecutive_late >= CRITICAL_FAILURES {
            HeartbeatStatus::Critical {
                count: self.consecutive_late,
            }
        } else {
            HeartbeatStatus::Late {
                elapsed,
                count: self.consecutive_late,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(offset_ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000 + offset_ms).unwrap()
    }

    fn monitor() -> HeartbeatMonitor {
        HeartbeatMonitor::new(HeartbeatPolicy::default())
    }

    #[test]
    fn first_signal_initializes() {
        let mut mon = monitor();
        assert_eq!(mon.signal_at(t(0)), HeartbeatStatus::Initialized);
    }

    #[test]
    fn signal_within_tolerance_is_on_time() {
        let mut mon = monitor();
        mon.signal_at(t(0));
        let status = mon.signal_at(t(9_900));
        assert_eq!(
            status,
            HeartbeatStatus::OnTime {
                elapsed: Duration::milliseconds(9_900)
            }
        );
    }

    #[test]
    fn boundary_elapsed_equal_to_tolerance_is_on_time() {
        let mut mon = monitor();
        mon.signal_at(t(0));
        assert!(mon.signal_at(t(10_000)).is_healthy());
    }

    #[test]
    fn three_consecutive_misses_escalate_to_critical() {
        let mut mon = monitor();
        mon.signal_at(t(0));

        let first = mon.signal_at(t(15_000));
        let second = mon.signal_at(t(30_000));
        let third = mon.signal_at(t(45_000));

        assert!(matches!(first, HeartbeatStatus::Late { count: 1, .. }));
        assert!(matches!(second, HeartbeatStatus::Late { count: 2, .. }));
        assert_eq!(third, HeartbeatStatus::Critical { count: 3 });
    }

    #[test]
    fn late_signal_does_not_move_the_anchor() {
        let mut mon = monitor();
        mon.signal_at(t(0));
        // Late: anchor stays at t(0).
        mon.signal_at(t(15_000));

        // 16s after the anchor, not 1s after the late call.
        let status = mon.signal_at(t(16_000));
        assert!(matches!(
            status,
            HeartbeatStatus::Late { count: 2, elapsed } if elapsed == Duration::milliseconds(16_000)
        ));
    }

    #[test]
    fn on_time_signals_keep_the_counter_at_zero() {
        let mut mon = monitor();
        mon.signal_at(t(0));
        assert!(mon.signal_at(t(9_000)).is_healthy());
        assert!(mon.signal_at(t(18_000)).is_healthy());

        // First miss after a run of good signals starts the count at 1,
        // measured from the t(18s) anchor.
        assert!(matches!(
            mon.signal_at(t(40_000)),
            HeartbeatStatus::Late { count: 1, .. }
        ));
    }

    #[test]
    fn counter_keeps_counting_past_critical() {
        let mut mon = monitor();
        mon.signal_at(t(0));
        for i in 1_u32..=5 {
            let status = mon.signal_at(t(i64::from(i) * 20_000));
            if i >= 3 {
                assert!(matches!(status, HeartbeatStatus::Critical { count } if count == i));
            }
        }
    }

    #[test]
    fn display_is_human_readable() {
        let status = HeartbeatStatus::Late {
            elapsed: Duration::milliseconds(15_300),
            count: 1,
        };
        let text = status.to_string();
        assert!(text.contains("15.3s"));
        assert!(text.contains("1/3"));
    }

    #[test]
    fn policy_from_secs_converts_to_millis() {
        let policy = HeartbeatPolicy::from_secs(9.9, 10.0);
        assert_eq!(policy.target_interval, Duration::milliseconds(9_900));
        assert_eq!(policy.tolerance, Duration::milliseconds(10_000));
    }
}
