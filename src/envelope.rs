//! RPC 엔벨로프
//!
//! 스트림 위에서 호출당 정확히 한 프레임을 읽고 쓴다.
//! 헤더와 페이로드는 하나의 버퍼로 합쳐 단일 write로 전송하므로
//! 같은 스트림의 다른 writer와 교차되지 않는다.
//!
//! 메시지 종류(Request/Response)는 호출자가 타입으로 지정한다.

use bytes::BytesMut;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::frame::FrameHeader;
use crate::{Error, Result, HEADER_SIZE, MAX_PAYLOAD_SIZE};

/// 메시지 한 개를 프레임으로 감싸 전송
pub async fn send_message<S, M>(stream: &mut S, msg: &M) -> Result<()>
where
    S: AsyncWrite + Unpin,
    M: Serialize,
{
    let payload = bincode::serialize(msg)?;
    let header = FrameHeader::new(payload.len() as u32);

    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(&header.encode());
    buf.extend_from_slice(&payload);

    stream.write_all(&buf).await?;
    stream.flush().await?;

    Ok(())
}

/// 스트림에서 프레임 한 개를 읽어 메시지로 역직렬화
pub async fn read_message<S, M>(stream: &mut S) -> Result<M>
where
    S: AsyncRead + Unpin,
    M: DeserializeOwned,
{
    let mut head_buf = [0u8; HEADER_SIZE];
    read_exact_or_incomplete(stream, &mut head_buf).await?;

    let header = FrameHeader::decode(&head_buf)?;
    let payload_len = header.payload_len as usize;
    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(Error::FrameTooLarge {
            max: MAX_PAYLOAD_SIZE,
            got: payload_len,
        });
    }

    let mut payload = vec![0u8; payload_len];
    read_exact_or_incomplete(stream, &mut payload).await?;

    Ok(bincode::deserialize(&payload)?)
}

/// read_exact 래퍼: 스트림이 먼저 닫히면 IncompleteFrame으로 변환
async fn read_exact_or_incomplete<S>(stream: &mut S, buf: &mut [u8]) -> Result<()>
where
    S: AsyncRead + Unpin,
{
    match stream.read_exact(buf).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(Error::IncompleteFrame {
            expected: buf.len(),
            got: 0,
        }),
        Err(e) => Err(Error::Io(e)),
    }
}
