use std::time::Duration;

use crate::error::{Error, Result};

/// Capped exponential backoff used while waiting for the database.
///
/// The delay after failed attempt `n` (counted from zero) is
/// `min(initial_delay * factor^n, max_delay)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub factor: f64,
    pub max_delay: Duration,
    /// Upper bound on a single connection attempt.
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 12,
            initial_delay: Duration::from_millis(1500),
            factor: 1.5,
            max_delay: Duration::from_secs(10),
            attempt_timeout: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Build a policy from second-based values as they arrive from flags or the environment.
    pub fn from_secs(
        max_attempts: u32,
        initial_delay_secs: f64,
        factor: f64,
        max_delay_secs: f64,
        attempt_timeout_secs: f64,
    ) -> Result<Self> {
        let policy = Self {
            max_attempts,
            initial_delay: secs("initial delay", initial_delay_secs)?,
            factor,
            max_delay: secs("max delay", max_delay_secs)?,
            attempt_timeout: secs("connect timeout", attempt_timeout_secs)?,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max attempts must be at least 1".to_string(),
            ));
        }
        if !self.factor.is_finite() || self.factor < 1.0 {
            return Err(Error::InvalidConfig(format!(
                "backoff factor must be >= 1.0, got {}",
                self.factor
            )));
        }
        if self.max_delay < self.initial_delay {
            return Err(Error::InvalidConfig(
                "max delay must not be shorter than the initial delay".to_string(),
            ));
        }
        if self.attempt_timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "connect timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Delay to wait after the failed attempt with zero-based index `attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let cap = self.max_delay.as_secs_f64();
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let raw = self.initial_delay.as_secs_f64() * self.factor.powi(exponent);
        if !raw.is_finite() || raw >= cap {
            return self.max_delay;
        }
        if raw <= 0.0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(raw)
    }

    /// Every delay the policy can produce, one per failed attempt except the last.
    pub fn schedule(&self) -> Vec<Duration> {
        (0..self.max_attempts.saturating_sub(1))
            .map(|attempt| self.delay_for(attempt))
            .collect()
    }
}

fn secs(name: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value).map_err(|_| {
        Error::InvalidConfig(format!(
            "{name} must be a non-negative number of seconds, got {value}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_grows_then_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(1500));
        assert_eq!(policy.delay_for(1), Duration::from_millis(2250));
        assert_eq!(policy.delay_for(2), Duration::from_secs_f64(3.375));
        assert_eq!(policy.delay_for(5), Duration::from_secs(10));
        assert_eq!(policy.delay_for(u32::MAX), Duration::from_secs(10));
    }

    #[test]
    fn schedule_is_non_decreasing_and_capped() {
        let policy = RetryPolicy::default();
        let schedule = policy.schedule();
        assert_eq!(schedule.len(), 11);
        assert!(schedule.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(schedule.iter().all(|delay| *delay <= policy.max_delay));
        assert_eq!(schedule.last(), Some(&Duration::from_secs(10)));
    }

    #[test]
    fn factor_of_one_keeps_delay_constant() {
        let policy = RetryPolicy {
            factor: 1.0,
            ..RetryPolicy::default()
        };
        assert!(policy.schedule().iter().all(|delay| *delay == policy.initial_delay));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(RetryPolicy::from_secs(0, 1.5, 1.5, 10.0, 3.0).is_err());
        assert!(RetryPolicy::from_secs(3, -1.0, 1.5, 10.0, 3.0).is_err());
        assert!(RetryPolicy::from_secs(3, 1.5, 0.5, 10.0, 3.0).is_err());
        assert!(RetryPolicy::from_secs(3, 5.0, 1.5, 1.0, 3.0).is_err());
        assert!(RetryPolicy::from_secs(3, 1.5, 1.5, 10.0, 0.0).is_err());
        assert!(RetryPolicy::from_secs(3, 1.5, f64::NAN, 10.0, 3.0).is_err());
    }

    #[test]
    fn unvalidated_negative_factor_never_goes_below_zero() {
        let policy = RetryPolicy {
            factor: -2.0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.delay_for(0), Duration::from_millis(1500));
        assert_eq!(policy.delay_for(1), Duration::ZERO);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn accepts_defaults_in_seconds() {
        let policy = RetryPolicy::from_secs(12, 1.5, 1.5, 10.0, 3.0).expect("valid policy");
        assert_eq!(policy, RetryPolicy::default());
    }
}
