//! RFT 서버 - Resumable File Transfer
//!
//! 토큰 기반 스로틀로 송신 속도를 제한하는 파일 전송 서버
//! - 연결당 요청 1개 처리 (데이터 전송 또는 속도 변경)
//! - 속도 변경은 전체 연결에 즉시 공유
//!
//! 사용법:
//!   cargo run --release --bin rft-server -- [OPTIONS]
//!
//! 예시:
//!   # 기본 실행
//!   cargo run --release --bin rft-server -- --bind 0.0.0.0:8282
//!
//!   # 초기 속도 100KB/s로 제한
//!   cargo run --release --bin rft-server -- --interval 10000

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use rft::{Config, TransferServer};

/// 서버 설정
struct ServerArgs {
    bind_addr: SocketAddr,
    config: Config,
}

impl Default for ServerArgs {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8282".parse().unwrap(),
            config: Config::default(),
        }
    }
}

fn parse_args() -> ServerArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut server_args = ServerArgs::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    server_args.bind_addr = args[i + 1].parse().expect("유효한 주소 필요");
                    i += 1;
                }
            }
            "--interval" | "-t" => {
                if i + 1 < args.len() {
                    server_args.config.initial_interval_us =
                        args[i + 1].parse().expect("유효한 숫자 필요");
                    i += 1;
                }
            }
            "--chunk-size" => {
                if i + 1 < args.len() {
                    server_args.config.chunk_size = args[i + 1].parse().expect("유효한 숫자 필요");
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!(
                    r#"RFT Server - Resumable File Transfer 서버

토큰 기반 스로틀로 송신 속도를 제한하는 파일 전송 서버
- 연결당 요청 1개 (데이터 전송 또는 속도 변경)
- 클라이언트의 속도 변경 요청이 전체 연결에 공유됨

사용법:
  cargo run --release --bin rft-server -- [OPTIONS]

옵션:
  -b, --bind <ADDR>       바인드 주소 (기본: 0.0.0.0:8282)
  -t, --interval <US>     초기 토큰 간격 마이크로초 (기본: 1 = 제한 없음)
  --chunk-size <SIZE>     청크 크기 바이트 (기본: 1024)
  -h, --help              이 도움말 출력

예시:
  # 기본 실행
  cargo run --release --bin rft-server -- --bind 0.0.0.0:8282

  # 10ms 간격 = 약 100KB/s로 시작
  cargo run --release --bin rft-server -- -t 10000
"#
                );
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    server_args
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 로깅 설정
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let server_args = parse_args();

    info!("RFT Server starting...");
    info!("Bind address: {}", server_args.bind_addr);
    info!("Chunk size: {} bytes", server_args.config.chunk_size);
    info!(
        "Initial token interval: {} us",
        server_args.config.initial_interval_us
    );

    let listener = TcpListener::bind(server_args.bind_addr).await?;
    let server = TransferServer::new(server_args.config);

    server.run(listener).await?;

    Ok(())
}
