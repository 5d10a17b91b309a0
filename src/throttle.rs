//! 대역폭 스로틀
//!
//! 시간 기반 토큰 생성과 I/O 기반 토큰 소비를 분리한 전역 속도 제한기.
//! - 백그라운드 태스크가 `interval_us` 마이크로초마다 토큰 1개를 용량 1 큐에 투입
//! - 큐가 차 있으면 투입을 건너뛴다 → 버스트 허용량 없음 (최대 속도 = 1/interval)
//! - 송신측은 청크 1개를 쓰기 전에 토큰 1개를 소비
//!
//! 속도 값은 AtomicU64로 공유되어 동시 setRate 호출이 원자적으로 처리되며,
//! 변경은 다음 틱부터 적용된다.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use crate::{Error, Result};

/// 전역 송신 스로틀
///
/// Clone해서 여러 연결 핸들러가 공유한다. 토큰 생성 태스크는
/// 생성 시 한 번 spawn되며, 모든 핸들이 드롭되면 종료된다.
#[derive(Clone)]
pub struct Throttle {
    /// 토큰 생성 간격 (마이크로초)
    interval_us: Arc<AtomicU64>,

    /// 토큰 큐 수신단 (용량 1, 소비자끼리 공유)
    tokens: Arc<Mutex<mpsc::Receiver<()>>>,
}

impl Throttle {
    /// 새 스로틀 생성 및 토큰 생성 태스크 시작
    ///
    /// tokio 런타임 안에서 호출해야 한다.
    pub fn new(initial_interval_us: u64) -> Self {
        let interval_us = Arc::new(AtomicU64::new(initial_interval_us.max(1)));
        let (tx, rx) = mpsc::channel::<()>(1);

        let interval = interval_us.clone();
        tokio::spawn(async move {
            loop {
                let us = interval.load(Ordering::Relaxed);
                tokio::time::sleep(Duration::from_micros(us)).await;

                match tx.try_send(()) {
                    Ok(()) => {}
                    // 큐가 차 있으면 이번 틱은 버린다
                    Err(mpsc::error::TrySendError::Full(())) => {}
                    Err(mpsc::error::TrySendError::Closed(())) => break,
                }
            }
        });

        Self {
            interval_us,
            tokens: Arc::new(Mutex::new(rx)),
        }
    }

    /// 송신 속도 변경 (KB/s)
    ///
    /// `interval_us = 1_000_000 / kbps`로 재계산한다.
    /// 다음 틱부터 적용되며 즉시 효과는 없다.
    pub fn set_rate(&self, kbps: i32) -> Result<()> {
        if kbps <= 0 {
            return Err(Error::InvalidBandwidth(kbps));
        }

        let us = (1_000_000 / kbps as u64).max(1);
        self.interval_us.store(us, Ordering::Relaxed);
        debug!("throttle rate updated: {} KB/s ({} us/token)", kbps, us);

        Ok(())
    }

    /// 현재 토큰 생성 간격 (마이크로초)
    pub fn interval_us(&self) -> u64 {
        self.interval_us.load(Ordering::Relaxed)
    }

    /// 토큰 1개 획득 (가용할 때까지 대기)
    pub async fn acquire(&self) -> Result<()> {
        let mut rx = self.tokens.lock().await;
        rx.recv().await.ok_or(Error::ChannelError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_rate_recomputes_interval() {
        // 런타임 없이 검증하기 위해 내부 상태만 구성
        let interval_us = Arc::new(AtomicU64::new(1));
        let (_tx, rx) = mpsc::channel::<()>(1);
        let throttle = Throttle {
            interval_us,
            tokens: Arc::new(Mutex::new(rx)),
        };

        throttle.set_rate(100).unwrap();
        assert_eq!(throttle.interval_us(), 10_000);

        throttle.set_rate(1).unwrap();
        assert_eq!(throttle.interval_us(), 1_000_000);

        // 1GB/s 초과 요청은 최소 간격 1us로 고정
        throttle.set_rate(2_000_000).unwrap();
        assert_eq!(throttle.interval_us(), 1);
    }

    #[test]
    fn test_set_rate_rejects_non_positive() {
        let interval_us = Arc::new(AtomicU64::new(1));
        let (_tx, rx) = mpsc::channel::<()>(1);
        let throttle = Throttle {
            interval_us,
            tokens: Arc::new(Mutex::new(rx)),
        };

        assert!(matches!(throttle.set_rate(0), Err(Error::InvalidBandwidth(0))));
        assert!(matches!(throttle.set_rate(-1), Err(Error::InvalidBandwidth(-1))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_rate_lower_bound() {
        let throttle = Throttle::new(10_000);

        let start = tokio::time::Instant::now();
        for _ in 0..11 {
            throttle.acquire().await.unwrap();
        }

        // 토큰 n개 획득에는 최소 (n-1) * interval 이상 걸린다
        assert!(start.elapsed() >= Duration::from_micros(10_000 * 10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_burst_after_idle() {
        let throttle = Throttle::new(10_000);

        // 소비 없이 9틱 이상 경과시켜도 큐에는 토큰 1개만 남는다
        // (95ms: 틱 경계와 겹치지 않는 시점에서 깨어난다)
        tokio::time::sleep(Duration::from_micros(95_000)).await;

        throttle.acquire().await.unwrap();

        let start = tokio::time::Instant::now();
        throttle.acquire().await.unwrap();

        // 두 번째 토큰은 다음 틱(t=100ms)을 기다려야 한다
        assert!(start.elapsed() >= Duration::from_micros(4_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shared_across_clones() {
        let throttle = Throttle::new(1_000);
        let other = throttle.clone();

        throttle.acquire().await.unwrap();
        other.acquire().await.unwrap();

        // 속도 변경은 모든 클론에 반영된다
        other.set_rate(100).unwrap();
        assert_eq!(throttle.interval_us(), 10_000);
    }
}
