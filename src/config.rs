//! 프로토콜 설정

use crate::{CHUNK_SIZE, DEFAULT_TICK_INTERVAL_US};

/// RFT 프로토콜 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 청크 크기 (바이트)
    pub chunk_size: usize,

    /// 초기 토큰 생성 간격 (마이크로초)
    /// 1이면 사실상 제한 없음
    pub initial_interval_us: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            initial_interval_us: DEFAULT_TICK_INTERVAL_US,
        }
    }
}

impl Config {
    /// 새 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 속도 제한 없는 설정
    pub fn unthrottled() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            initial_interval_us: 1,
        }
    }

    /// 지정 속도로 제한된 설정 (KB/s)
    pub fn throttled(kbps: u64) -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            initial_interval_us: (1_000_000 / kbps.max(1)).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_protocol_constants() {
        let config = Config::default();
        assert_eq!(config.chunk_size, 1024);
        assert_eq!(config.initial_interval_us, 1);
    }

    #[test]
    fn test_throttled_preset() {
        // 100KB/s → 10ms 간격
        assert_eq!(Config::throttled(100).initial_interval_us, 10_000);
        // 0은 1로 보정
        assert_eq!(Config::throttled(0).initial_interval_us, 1_000_000);
    }
}
