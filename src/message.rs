//! 프로토콜 메시지 정의
//!
//! 단일 요청/응답 프로토콜이므로 메시지는 두 종류뿐이다.
//! 페이로드는 bincode로 직렬화된다.

use serde::{Deserialize, Serialize};

/// 응답 상태 코드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum StatusCode {
    /// 성공
    Ok = 0,

    /// 실패 (파일 열기 실패, 오프셋 초과 등)
    Error = 1,
}

/// 파일 전송 요청
///
/// `bandwidth` 값으로 요청 종류가 갈린다:
/// - `-1`: 데이터 전송 요청 (`path` + `offset` 사용)
/// - `> 0`: 서버 송신 속도 변경 명령 (KB/s, `path`는 빈 문자열)
///
/// 두 해석은 상호 배타적이며 생성자로만 만들면 모호해질 수 없다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// 원격 파일 경로 (속도 변경 요청이면 빈 문자열)
    pub path: String,

    /// 재개 오프셋 (바이트, 0 이상)
    pub offset: i64,

    /// 대역폭 (KB/s). -1이면 데이터 요청
    pub bandwidth: i32,
}

impl Request {
    /// 데이터 전송 요청 생성
    pub fn data(path: impl Into<String>, offset: i64) -> Self {
        Self {
            path: path.into(),
            offset,
            bandwidth: -1,
        }
    }

    /// 속도 변경 요청 생성
    pub fn set_bandwidth(kbps: i32) -> Self {
        Self {
            path: String::new(),
            offset: 0,
            bandwidth: kbps,
        }
    }

    /// 속도 변경 요청 여부
    pub fn is_rate_change(&self) -> bool {
        self.bandwidth > 0
    }
}

/// 파일 전송 응답
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// 상태 코드
    pub status: StatusCode,

    /// 데이터 요청: offset부터 파일 끝까지 남은 바이트 수
    /// 속도 변경 요청: 미사용 (0)
    pub size: i64,
}

impl Response {
    /// 성공 응답 생성
    pub fn ok(size: i64) -> Self {
        Self {
            status: StatusCode::Ok,
            size,
        }
    }

    /// 에러 응답 생성
    pub fn error() -> Self {
        Self {
            status: StatusCode::Error,
            size: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_roundtrip() {
        let req = Request::data("dir/a.bin", 4096);
        let bytes = bincode::serialize(&req).unwrap();
        let restored: Request = bincode::deserialize(&bytes).unwrap();

        assert_eq!(req, restored);
        assert_eq!(restored.bandwidth, -1);
        assert!(!restored.is_rate_change());
    }

    #[test]
    fn test_request_boundary_values() {
        // 빈 경로 + 오프셋 0 + 대역폭 -1
        let req = Request::data("", 0);
        let restored: Request = bincode::deserialize(&bincode::serialize(&req).unwrap()).unwrap();
        assert_eq!(req, restored);

        // 대역폭 경계값 1
        let req = Request::set_bandwidth(1);
        let restored: Request = bincode::deserialize(&bincode::serialize(&req).unwrap()).unwrap();
        assert_eq!(req, restored);
        assert!(restored.is_rate_change());
    }

    #[test]
    fn test_rate_change_is_exclusive() {
        let rate = Request::set_bandwidth(100);
        assert!(rate.is_rate_change());
        assert!(rate.path.is_empty());
        assert_eq!(rate.offset, 0);

        let data = Request::data("a.bin", 6);
        assert!(!data.is_rate_change());
    }

    #[test]
    fn test_response_roundtrip() {
        let resp = Response::ok(10);
        let restored: Response = bincode::deserialize(&bincode::serialize(&resp).unwrap()).unwrap();
        assert_eq!(resp, restored);

        let resp = Response::error();
        let restored: Response = bincode::deserialize(&bincode::serialize(&resp).unwrap()).unwrap();
        assert_eq!(restored.status, StatusCode::Error);
        assert_eq!(restored.size, 0);
    }
}
