use rand::Rng;
use std::time::Duration;

/// Randomised pauses between browser actions to emulate human pacing
#[derive(Debug, Clone)]
pub struct HumanPacing {
    pub enabled: bool,
    pub min: Duration,
    pub max: Duration,
}

impl HumanPacing {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            enabled: true,
            min,
            max: max.max(min),
        }
    }

    /// Pacing that never sleeps
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    /// Pick the next pause, or `None` when pacing is off
    pub fn next_delay(&self) -> Option<Duration> {
        if !self.enabled {
            return None;
        }
        if self.max <= self.min {
            return Some(self.min);
        }
        let mut rng = rand::thread_rng();
        Some(rng.gen_range(self.min..=self.max))
    }

    pub async fn pause(&self) {
        if let Some(delay) = self.next_delay() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for HumanPacing {
    fn default() -> Self {
        Self::new(Duration::from_millis(300), Duration::from_millis(1000))
    }
}
