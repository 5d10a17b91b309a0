//! RFT 클라이언트 - Resumable File Transfer
//!
//! 파일 다운로드(이어받기 포함) 또는 서버 송신 속도 변경
//! - 로컬 파일이 이미 있으면 그 크기부터 이어받음
//! - `-b <KBPS>` 지정 시 속도 변경 요청으로 동작
//!
//! 사용법:
//!   cargo run --release --bin rft-client -- [OPTIONS]
//!
//! 예시:
//!   # 파일 다운로드
//!   cargo run --release --bin rft-client -- -s 127.0.0.1:8282 -f /data/a.bin
//!
//!   # 서버 속도를 100KB/s로 변경
//!   cargo run --release --bin rft-client -- -s 127.0.0.1:8282 -b 100

use std::net::SocketAddr;

use tokio::net::TcpStream;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use rft::{download, set_bandwidth};

/// 클라이언트 설정
struct ClientArgs {
    server_addr: SocketAddr,
    remote_path: String,
    output: Option<String>,
    bandwidth: i32,
}

impl Default for ClientArgs {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8282".parse().unwrap(),
            remote_path: String::new(),
            output: None,
            bandwidth: -1,
        }
    }
}

fn parse_args() -> ClientArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut client_args = ClientArgs::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--server" | "-s" => {
                if i + 1 < args.len() {
                    client_args.server_addr = args[i + 1].parse().expect("유효한 주소 필요");
                    i += 1;
                }
            }
            "--file" | "-f" => {
                if i + 1 < args.len() {
                    client_args.remote_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--output" | "-o" => {
                if i + 1 < args.len() {
                    client_args.output = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--bandwidth" | "-b" => {
                if i + 1 < args.len() {
                    client_args.bandwidth = args[i + 1].parse().expect("유효한 숫자 필요");
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!(
                    r#"RFT Client - Resumable File Transfer 클라이언트

파일 다운로드(이어받기 포함) 또는 서버 송신 속도 변경
- 로컬 파일이 이미 있으면 그 크기를 오프셋으로 이어받음
- 대역폭 값을 지정하면 속도 변경 요청으로 동작

사용법:
  cargo run --release --bin rft-client -- [OPTIONS]

옵션:
  -s, --server <ADDR>     서버 주소 (기본: 127.0.0.1:8282)
  -f, --file <PATH>       원격 파일 경로
  -o, --output <PATH>     저장 경로 (디렉터리 또는 파일, 기본: 파일명 그대로)
  -b, --bandwidth <KBPS>  서버 송신 속도 변경 (KB/s, 기본: -1 = 다운로드)
  -h, --help              이 도움말 출력

예시:
  # 파일 다운로드
  cargo run --release --bin rft-client -- -s 192.168.1.100:8282 -f /data/a.bin

  # 저장 위치 지정 + 이어받기
  cargo run --release --bin rft-client -- -f /data/a.bin -o downloads/

  # 서버 속도를 100KB/s로 변경
  cargo run --release --bin rft-client -- -b 100
"#
                );
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    client_args
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 로깅 설정
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let client_args = parse_args();

    info!("RFT Client starting...");
    info!("Server address: {}", client_args.server_addr);

    let mut stream = TcpStream::connect(client_args.server_addr).await?;
    info!("Connected to {}", client_args.server_addr);

    if client_args.bandwidth > 0 {
        // 속도 변경 요청
        let status = set_bandwidth(&mut stream, client_args.bandwidth).await?;
        info!(
            "Set bandwidth: {} KB/s -> {:?}",
            client_args.bandwidth, status
        );
    } else {
        // 파일 다운로드
        if client_args.remote_path.is_empty() {
            eprintln!("원격 파일 경로 필요 (-f <PATH>)");
            std::process::exit(1);
        }

        let start = std::time::Instant::now();
        let received = download(
            &mut stream,
            &client_args.remote_path,
            client_args.output.as_deref(),
        )
        .await?;

        info!("Transfer complete!");
        info!("  Bytes received: {}", received);
        info!("  Time: {:.2}s", start.elapsed().as_secs_f64());
    }

    Ok(())
}
