//! 에러 타입 정의

use thiserror::Error;

/// RFT 프로토콜 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO 에러: {0}")]
    Io(#[from] std::io::Error),

    #[error("직렬화 에러: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("유효하지 않은 매직 넘버: expected {expected:08X}, got {got:08X}")]
    InvalidMagicNumber { expected: u32, got: u32 },

    #[error("손상된 프레임 헤더: {len}바이트 (기대값 {expected})")]
    MalformedHeader { len: usize, expected: usize },

    #[error("불완전한 프레임: expected {expected}바이트, got {got}바이트")]
    IncompleteFrame { expected: usize, got: usize },

    #[error("프레임 크기 초과: 최대 {max}바이트, got {got}바이트")]
    FrameTooLarge { max: usize, got: usize },

    #[error("오프셋 범위 초과: offset={offset}, file_size={file_size}")]
    OffsetOutOfRange { offset: i64, file_size: u64 },

    #[error("유효하지 않은 대역폭 값: {0} (KB/s, 양수 필요)")]
    InvalidBandwidth(i32),

    #[error("빈 파일 경로")]
    EmptyPath,

    #[error("서버 에러 응답")]
    Rejected,

    #[error("연결 종료")]
    ConnectionClosed,

    #[error("채널 에러")]
    ChannelError,
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, Error>;
