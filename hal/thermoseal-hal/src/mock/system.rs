//! Mock system reset

use crate::system::SystemReset;

/// Records restart requests instead of restarting
#[derive(Debug, Default)]
pub struct MockReset {
    restarts: u32,
}

impl MockReset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of restarts requested
    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}

impl SystemReset for MockReset {
    fn restart(&mut self) {
        self.restarts += 1;
    }
}
