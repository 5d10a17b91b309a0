//! # RFT (Resumable File Transfer)
//!
//! 순서 보장 스트림 전송 계층 위의 재개 가능한 파일 전송 프로토콜
//!
//! ## 핵심 특징
//! - **고정폭 프레임**: magic + payload 길이 헤더로 메시지 경계 구분
//! - **재개 전송**: 로컬 파일 크기를 오프셋으로 삼아 이어받기
//! - **대역폭 스로틀**: 토큰 기반 전역 송신 속도 제한 (청크당 토큰 1개)
//! - **런타임 속도 변경**: 클라이언트 요청으로 서버 송신 속도 갱신
//! - **스트림당 단일 요청**: Request → Response → (청크 스트림) 순서 고정
//!
//! 전송 계층(연결 수립, 암호화 핸드쉐이크)은 외부 협력자이며,
//! 코어는 순서 보장 양방향 바이트 스트림만 소비한다.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod frame;
pub mod message;
pub mod server;
pub mod stats;
pub mod throttle;

pub use client::{download, resolve_local_path, set_bandwidth};
pub use config::Config;
pub use envelope::{read_message, send_message};
pub use error::{Error, Result};
pub use frame::FrameHeader;
pub use message::{Request, Response, StatusCode};
pub use server::TransferServer;
pub use stats::TransferStats;
pub use throttle::Throttle;

/// 매직 넘버 (프레임 식별용)
pub const MAGIC_NUMBER: u32 = 0x5246_5450; // "RFTP"

/// 프레임 헤더 크기 (바이트): magic(4) + payload_len(4)
pub const HEADER_SIZE: usize = 8;

/// 데이터 청크 크기 (바이트)
pub const CHUNK_SIZE: usize = 1024;

/// 메시지 페이로드 최대 크기 (바이트)
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024;

/// 기본 토큰 생성 간격 (마이크로초)
pub const DEFAULT_TICK_INTERVAL_US: u64 = 1;
