//! 전송 클라이언트
//!
//! - 로컬 파일 크기로 재개 오프셋 계산
//! - Request 송신 후 Response의 size만큼 스트림을 드레인
//! - 응답 size 기준으로만 완료를 판단 (종료 마커 없음)
//!
//! 재시도는 하지 않는다. 실패 시 호출자가 다시 실행하면
//! 새로 계산된 오프셋으로 자연스럽게 이어받는다.

use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeekExt, AsyncWrite, AsyncWriteExt, SeekFrom};
use tracing::{debug, info};

use crate::envelope::{read_message, send_message};
use crate::message::{Request, Response, StatusCode};
use crate::stats::TransferStats;
use crate::{Error, Result, CHUNK_SIZE};

/// 원격 경로와 출력 지정으로 로컬 저장 경로 결정
///
/// - 지정 없음: 원격 경로의 파일명을 현재 디렉터리에 저장
/// - 디렉터리 지정 (trailing separator 또는 기존 디렉터리): 파일명을 붙여 저장
/// - 그 외: 지정 경로 그대로 사용
pub fn resolve_local_path(remote_path: &str, output: Option<&str>) -> Result<PathBuf> {
    let base = Path::new(remote_path).file_name().ok_or(Error::EmptyPath)?;

    match output {
        None => Ok(PathBuf::from(base)),
        Some(out) => {
            let out_path = Path::new(out);
            if out.ends_with('/') || out.ends_with(std::path::MAIN_SEPARATOR) || out_path.is_dir()
            {
                Ok(out_path.join(base))
            } else {
                Ok(out_path.to_path_buf())
            }
        }
    }
}

/// 원격 파일 다운로드 (이어받기 포함)
///
/// 로컬 파일이 이미 있으면 그 크기를 오프셋으로 요청하고,
/// 없으면 0부터 받는다. 수신한 바이트 수를 반환한다.
pub async fn download<S>(stream: &mut S, remote_path: &str, output: Option<&str>) -> Result<u64>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let local_path = resolve_local_path(remote_path, output)?;

    if let Some(parent) = local_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    // 기존 로컬 파일 크기 = 재개 오프셋
    let offset = match tokio::fs::metadata(&local_path).await {
        Ok(meta) => meta.len() as i64,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
        Err(e) => return Err(Error::Io(e)),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .open(&local_path)
        .await?;
    file.seek(SeekFrom::Start(offset as u64)).await?;

    debug!(
        "download request: remote={}, local={:?}, offset={}",
        remote_path, local_path, offset
    );
    send_message(stream, &Request::data(remote_path, offset)).await?;

    let resp: Response = read_message(stream).await?;
    if resp.status == StatusCode::Error {
        return Err(Error::Rejected);
    }

    let mut stats = TransferStats::new();
    if resp.size > 0 {
        let total = resp.size as u64;
        let mut buf = vec![0u8; CHUNK_SIZE];

        // 응답이 예고한 바이트 수만큼 정확히 읽는다 (부분 읽기 루프)
        while stats.total_bytes < total {
            let want = ((total - stats.total_bytes) as usize).min(buf.len());
            let n = stream.read(&mut buf[..want]).await?;
            if n == 0 {
                return Err(Error::ConnectionClosed);
            }

            file.write_all(&buf[..n]).await?;
            stats.record(n);
        }

        file.flush().await?;
    }

    info!(
        "download done: {:?} (offset {}, {})",
        local_path,
        offset,
        stats.summary()
    );

    Ok(stats.total_bytes)
}

/// 서버 송신 속도 변경 요청
///
/// 서버가 돌려준 상태 코드를 반환한다.
pub async fn set_bandwidth<S>(stream: &mut S, kbps: i32) -> Result<StatusCode>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    send_message(stream, &Request::set_bandwidth(kbps)).await?;

    let resp: Response = read_message(stream).await?;
    info!("set bandwidth: {} KB/s -> {:?}", kbps, resp.status);

    Ok(resp.status)
}
