//! 전송 통계

use std::time::{Duration, Instant};

/// 전송 통계
///
/// 단일 스트림 전송의 바이트 수와 경과 시간을 기록한다.
#[derive(Debug, Clone)]
pub struct TransferStats {
    /// 시작 시간
    pub start_time: Instant,

    /// 총 전송 바이트
    pub total_bytes: u64,

    /// 전송된 청크 수
    pub total_chunks: u64,
}

impl TransferStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            total_bytes: 0,
            total_chunks: 0,
        }
    }

    /// 청크 전송 기록
    pub fn record(&mut self, bytes: usize) {
        self.total_bytes += bytes as u64;
        self.total_chunks += 1;
    }

    /// 경과 시간
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 처리율 (bytes/sec)
    pub fn throughput(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed == 0.0 {
            return 0.0;
        }
        self.total_bytes as f64 / elapsed
    }

    /// 통계 요약 문자열
    pub fn summary(&self) -> String {
        format!(
            "Elapsed: {:.2}s | Bytes: {} | Chunks: {} | Throughput: {:.2} KB/s",
            self.elapsed().as_secs_f64(),
            self.total_bytes,
            self.total_chunks,
            self.throughput() / 1_000.0,
        )
    }
}

impl Default for TransferStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates() {
        let mut stats = TransferStats::new();
        stats.record(1024);
        stats.record(1024);
        stats.record(512);

        assert_eq!(stats.total_bytes, 2560);
        assert_eq!(stats.total_chunks, 3);
    }

    #[test]
    fn test_summary_contains_totals() {
        let mut stats = TransferStats::new();
        stats.record(100);

        let summary = stats.summary();
        assert!(summary.contains("Bytes: 100"));
        assert!(summary.contains("Chunks: 1"));
    }
}
