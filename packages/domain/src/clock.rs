//! # Clock（時刻プロバイダ）
//!
//! トークンの発行時刻・有効期限判定で `Utc::now()` を直接呼ばないための抽象化。
//! テストでは [`FixedClock`] を注入し、期限切れを実時間を待たずに再現する。

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// システム時刻を返す実装
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 明示的に進めない限り同じ時刻を返すテスト用実装
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// 時刻を `duration` だけ進める
    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now += duration;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_system_clockは現在時刻を返す() {
        let before = Utc::now();
        let result = SystemClock.now();
        let after = Utc::now();

        assert!(before <= result && result <= after);
    }

    #[test]
    fn test_fixed_clockは進めるまで同じ時刻を返す() {
        let fixed = Utc::now();
        let clock = FixedClock::new(fixed);

        assert_eq!(clock.now(), fixed);
        assert_eq!(clock.now(), fixed);
    }

    #[test]
    fn test_fixed_clockのadvanceで時刻が進む() {
        let fixed = Utc::now();
        let clock = FixedClock::new(fixed);

        clock.advance(Duration::seconds(3600));

        assert_eq!(clock.now(), fixed + Duration::seconds(3600));
    }
}
