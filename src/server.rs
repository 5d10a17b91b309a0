//! 전송 엔진 (서버측)
//!
//! 스트림당 처리 흐름:
//! 1. Request 1개 수신
//! 2. 속도 변경 명령이면 스로틀 갱신 후 OK 응답 + 틱 1회 대기
//! 3. 데이터 요청이면 남은 크기를 응답한 뒤 토큰 단위로 청크 송신
//!
//! 응답 전에 실패하면 에러 응답을 먼저 보내고 종료한다.
//! 청크 송신 중의 실패는 복구하지 않으며 클라이언트가 바이트 수
//! 부족으로 감지한다. 스트림 하나의 실패는 해당 태스크만 종료시킨다.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeekExt, AsyncWrite, AsyncWriteExt, SeekFrom};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::envelope::{read_message, send_message};
use crate::message::{Request, Response};
use crate::stats::TransferStats;
use crate::throttle::Throttle;
use crate::{Config, Error, Result};

/// 파일 전송 서버
///
/// accept 루프를 돌며 연결마다 처리 태스크를 spawn한다.
/// 스로틀은 전체 연결이 공유하는 단일 인스턴스다.
pub struct TransferServer {
    config: Config,
    throttle: Throttle,
}

impl TransferServer {
    /// 새 서버 생성 (스로틀 태스크 시작)
    pub fn new(config: Config) -> Self {
        let throttle = Throttle::new(config.initial_interval_us);
        Self { config, throttle }
    }

    /// 공유 스로틀 핸들
    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// accept 루프 실행
    ///
    /// 연결당 스트림 1개를 받아 처리 태스크로 넘긴다.
    /// 태스크 내부 에러는 로그만 남기고 격리된다.
    pub async fn run(&self, listener: TcpListener) -> Result<()> {
        info!("Server listening on {}", listener.local_addr()?);

        loop {
            let (mut stream, addr) = listener.accept().await?;
            info!("new connection: {}", addr);

            let throttle = self.throttle.clone();
            let chunk_size = self.config.chunk_size;

            tokio::spawn(async move {
                match handle_stream(&mut stream, &throttle, chunk_size).await {
                    Ok(sent) => info!("stream done: {} ({} bytes sent)", addr, sent),
                    Err(e) => warn!("stream failed: {} ({})", addr, e),
                }
            });
        }
    }
}

/// 스트림 1개 처리: Request 수신 → 분기 → 응답/청크 송신
///
/// 송신한 데이터 바이트 수를 반환한다 (속도 변경 요청이면 0).
pub async fn handle_stream<S>(stream: &mut S, throttle: &Throttle, chunk_size: usize) -> Result<u64>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let request: Request = match read_message(stream).await {
        Ok(req) => req,
        Err(e) => {
            // 응답 전 실패는 명시적 에러 응답으로 변환 (best effort)
            let _ = send_message(stream, &Response::error()).await;
            return Err(e);
        }
    };

    if request.is_rate_change() {
        handle_rate_change(stream, throttle, &request).await?;
        Ok(0)
    } else {
        handle_data_request(stream, throttle, &request, chunk_size).await
    }
}

/// 속도 변경 명령 처리
async fn handle_rate_change<S>(stream: &mut S, throttle: &Throttle, request: &Request) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    if let Err(e) = throttle.set_rate(request.bandwidth) {
        let _ = send_message(stream, &Response::error()).await;
        return Err(e);
    }

    send_message(stream, &Response::ok(0)).await?;
    info!(
        "bandwidth set: {} KB/s ({} us/token)",
        request.bandwidth,
        throttle.interval_us()
    );

    // 스로틀 틱 1회를 응답 확인용으로 소비
    throttle.acquire().await?;

    Ok(())
}

/// 데이터 요청 처리: 남은 크기 응답 후 청크 송신
async fn handle_data_request<S>(
    stream: &mut S,
    throttle: &Throttle,
    request: &Request,
    chunk_size: usize,
) -> Result<u64>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut file = match tokio::fs::File::open(&request.path).await {
        Ok(f) => f,
        Err(e) => {
            warn!("file open failed: {} ({})", request.path, e);
            let _ = send_message(stream, &Response::error()).await;
            return Err(Error::Io(e));
        }
    };

    let file_size = match file.metadata().await {
        Ok(m) => m.len(),
        Err(e) => {
            let _ = send_message(stream, &Response::error()).await;
            return Err(Error::Io(e));
        }
    };

    if request.offset < 0 || request.offset as u64 > file_size {
        let _ = send_message(stream, &Response::error()).await;
        return Err(Error::OffsetOutOfRange {
            offset: request.offset,
            file_size,
        });
    }

    let remaining = file_size as i64 - request.offset;
    send_message(stream, &Response::ok(remaining)).await?;
    debug!(
        "data request: path={}, offset={}, remaining={}",
        request.path, request.offset, remaining
    );

    if remaining == 0 {
        return Ok(0);
    }

    // 청크 스트림: 토큰 1개 = 청크 1개, EOF까지
    file.seek(SeekFrom::Start(request.offset as u64)).await?;

    let mut buf = vec![0u8; chunk_size];
    let mut stats = TransferStats::new();

    loop {
        throttle.acquire().await?;

        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }

        stream.write_all(&buf[..n]).await?;
        stats.record(n);
    }

    stream.flush().await?;
    info!("file send done: {} ({})", request.path, stats.summary());

    Ok(stats.total_bytes)
}
