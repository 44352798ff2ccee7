use std::time::Duration;

use crate::config::PollingSettings;

/// Refresh delay policy for the active-session poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    pub base_interval: Duration,
    pub max_backoff: Duration,
    pub offline_interval: Duration,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::from(&PollingSettings::default())
    }
}

impl From<&PollingSettings> for RefreshPolicy {
    fn from(settings: &PollingSettings) -> Self {
        Self {
            base_interval: Duration::from_secs(settings.base_interval_secs),
            max_backoff: Duration::from_secs(settings.max_backoff_secs),
            offline_interval: Duration::from_secs(settings.offline_interval_secs),
        }
    }
}

impl RefreshPolicy {
    /// Delay before the next refresh.
    ///
    /// Offline always waits `offline_interval`. Otherwise `failures` consecutive
    /// failures give `min(base * 2^(failures-1), max_backoff)`, and zero gives `base`.
    pub fn next_delay(&self, failures: u32, online: bool) -> Duration {
        if !online {
            return self.offline_interval;
        }
        if failures == 0 {
            return self.base_interval;
        }

        let factor = 2u32.checked_pow(failures - 1).unwrap_or(u32::MAX);
        self.base_interval
            .checked_mul(factor)
            .map_or(self.max_backoff, |delay| delay.min(self.max_backoff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_sequence() {
        let policy = RefreshPolicy::default();
        let secs: Vec<u64> = (0..=6)
            .map(|f| policy.next_delay(f, true).as_secs())
            .collect();
        assert_eq!(secs, vec![30, 30, 60, 120, 240, 300, 300]);
    }

    #[test]
    fn test_offline_ignores_failures() {
        let policy = RefreshPolicy::default();
        for failures in [0, 1, 4, 40] {
            assert_eq!(policy.next_delay(failures, false), Duration::from_secs(300));
        }
    }

    #[test]
    fn test_huge_failure_count_saturates() {
        let policy = RefreshPolicy::default();
        assert_eq!(policy.next_delay(200, true), Duration::from_secs(300));
    }

    #[test]
    fn test_settings_are_honored() {
        let policy = RefreshPolicy::from(&PollingSettings {
            base_interval_secs: 5,
            max_backoff_secs: 12,
            offline_interval_secs: 60,
        });
        assert_eq!(policy.next_delay(0, true), Duration::from_secs(5));
        assert_eq!(policy.next_delay(2, true), Duration::from_secs(10));
        assert_eq!(policy.next_delay(3, true), Duration::from_secs(12));
        assert_eq!(policy.next_delay(3, false), Duration::from_secs(60));
    }
}
