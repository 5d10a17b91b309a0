//! 프레임 헤더 인코딩/디코딩
//!
//! 모든 메시지 앞에 고정폭 헤더가 붙는다:
//! magic(u32 LE) + payload_len(u32 LE) = 8바이트
//!
//! 명시적 리틀엔디언 직렬화로 플랫폼 간 호환을 보장한다.

use crate::{Error, Result, HEADER_SIZE, MAGIC_NUMBER};

/// 프레임 헤더
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// 매직 넘버
    pub magic: u32,

    /// 뒤따르는 페이로드 길이 (바이트)
    pub payload_len: u32,
}

impl FrameHeader {
    /// 새 헤더 생성
    pub fn new(payload_len: u32) -> Self {
        Self {
            magic: MAGIC_NUMBER,
            payload_len,
        }
    }

    /// 헤더를 고정폭 바이트로 직렬화
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[..4].copy_from_slice(&self.magic.to_le_bytes());
        buf[4..].copy_from_slice(&self.payload_len.to_le_bytes());
        buf
    }

    /// 바이트에서 헤더 역직렬화
    ///
    /// 입력 길이가 맞지 않거나 매직 넘버가 다르면 실패한다.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != HEADER_SIZE {
            return Err(Error::MalformedHeader {
                len: bytes.len(),
                expected: HEADER_SIZE,
            });
        }

        let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if magic != MAGIC_NUMBER {
            return Err(Error::InvalidMagicNumber {
                expected: MAGIC_NUMBER,
                got: magic,
            });
        }

        let payload_len = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

        Ok(Self { magic, payload_len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_roundtrip() {
        let header = FrameHeader::new(1234);
        let bytes = header.encode();
        let restored = FrameHeader::decode(&bytes).unwrap();

        assert_eq!(header, restored);
        assert_eq!(restored.magic, MAGIC_NUMBER);
        assert_eq!(restored.payload_len, 1234);
    }

    #[test]
    fn test_zero_payload_roundtrip() {
        let header = FrameHeader::new(0);
        let restored = FrameHeader::decode(&header.encode()).unwrap();
        assert_eq!(restored.payload_len, 0);
    }

    #[test]
    fn test_invalid_magic() {
        let mut bytes = FrameHeader::new(10).encode();
        bytes[0] ^= 0xFF;

        match FrameHeader::decode(&bytes) {
            Err(Error::InvalidMagicNumber { expected, .. }) => {
                assert_eq!(expected, MAGIC_NUMBER);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_short_input() {
        let bytes = [0u8; 4];
        assert!(matches!(
            FrameHeader::decode(&bytes),
            Err(Error::MalformedHeader { len: 4, .. })
        ));
    }
}
