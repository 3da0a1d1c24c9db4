use crate::error::{CodecError, Result};
use crate::package::Package;

/// `src chain id (2) | dst chain id (2) | oracle sequence (8)`, all big-endian.
pub const ENVELOPE_PREFIX_LEN: usize = 12;

/// The bytes validators sign: a package together with its routing information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub src_chain_id: u16,
    pub dst_chain_id: u16,
    pub oracle_sequence: u64,
    pub package: Package,
}

impl Envelope {
    pub fn encode(&self) -> Vec<u8> {
        let package = self.package.encode();
        let mut out = Vec::with_capacity(ENVELOPE_PREFIX_LEN + package.len());
        out.extend_from_slice(&self.src_chain_id.to_be_bytes());
        out.extend_from_slice(&self.dst_chain_id.to_be_bytes());
        out.extend_from_slice(&self.oracle_sequence.to_be_bytes());
        out.extend_from_slice(&package);
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < ENVELOPE_PREFIX_LEN {
            return Err(CodecError::Truncated {
                what: "envelope",
                expected: ENVELOPE_PREFIX_LEN,
                actual: bytes.len(),
            });
        }
        let src_chain_id = u16::from_be_bytes([bytes[0], bytes[1]]);
        let dst_chain_id = u16::from_be_bytes([bytes[2], bytes[3]]);
        let mut oracle_sequence = [0u8; 8];
        oracle_sequence.copy_from_slice(&bytes[4..ENVELOPE_PREFIX_LEN]);

        Ok(Envelope {
            src_chain_id,
            dst_chain_id,
            oracle_sequence: u64::from_be_bytes(oracle_sequence),
            package: Package::decode(&bytes[ENVELOPE_PREFIX_LEN..])?,
        })
    }
}
