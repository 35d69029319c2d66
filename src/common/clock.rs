use chrono::{DateTime, Utc};

/// Nguồn thời gian cho session. Tách ra trait để test điều khiển được `created_at`.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Đồng hồ hệ thống.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
