use cosmwasm_schema::cw_serde;
use rlp::{DecoderError, Rlp};

use crate::error::{CodecError, Result};

/// `type (1) | channel id (1) | sequence (8, big-endian)`
pub const PACKAGE_HEADER_LEN: usize = 10;

#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum PackageType {
    /// A request originated by a handler on the sending chain.
    Syn,
    /// A successful answer to a previously received `Syn` package.
    Ack,
    /// Sent back when the receiving handler failed to process a `Syn` package.
    FailAck,
}

impl PackageType {
    pub fn as_u8(self) -> u8 {
        match self {
            PackageType::Syn => 0,
            PackageType::Ack => 1,
            PackageType::FailAck => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Syn => "syn",
            PackageType::Ack => "ack",
            PackageType::FailAck => "fail_ack",
        }
    }
}

impl TryFrom<u8> for PackageType {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(PackageType::Syn),
            1 => Ok(PackageType::Ack),
            2 => Ok(PackageType::FailAck),
            other => Err(CodecError::UnknownPackageType(other)),
        }
    }
}

/// One cross-chain message: a fixed header followed by the channel-specific payload.
///
/// The payload is opaque to the router, but it must always be exactly one RLP item.
/// That makes the encoding self-delimiting, so both truncated and over-long inputs
/// are rejected without knowing the channel's schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub package_type: PackageType,
    pub channel_id: u8,
    pub sequence: u64,
    pub payload: Vec<u8>,
}

impl Package {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PACKAGE_HEADER_LEN + self.payload.len());
        out.push(self.package_type.as_u8());
        out.push(self.channel_id);
        out.extend_from_slice(&self.sequence.to_be_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < PACKAGE_HEADER_LEN {
            return Err(CodecError::Truncated {
                what: "package header",
                expected: PACKAGE_HEADER_LEN,
                actual: bytes.len(),
            });
        }
        let package_type = PackageType::try_from(bytes[0])?;
        let channel_id = bytes[1];
        let mut sequence = [0u8; 8];
        sequence.copy_from_slice(&bytes[2..PACKAGE_HEADER_LEN]);
        let payload = &bytes[PACKAGE_HEADER_LEN..];
        check_payload(payload)?;

        Ok(Package {
            package_type,
            channel_id,
            sequence: u64::from_be_bytes(sequence),
            payload: payload.to_vec(),
        })
    }
}

/// Checks that `payload` holds exactly one complete RLP item and nothing else.
pub fn check_payload(payload: &[u8]) -> Result<()> {
    if payload.is_empty() {
        return Err(CodecError::EmptyPayload);
    }
    let info = Rlp::new(payload).payload_info().map_err(|e| match e {
        DecoderError::RlpIsTooShort => CodecError::TruncatedPayload,
        other => other.into(),
    })?;
    let item_len = info.header_len + info.value_len;
    if item_len > payload.len() {
        return Err(CodecError::TruncatedPayload);
    }
    if item_len < payload.len() {
        return Err(CodecError::TrailingBytes {
            trailing: payload.len() - item_len,
        });
    }
    Ok(())
}
