use cosmwasm_std::Binary;

use crate::consensus::{decode_chain_id, encode_chain_id, hash_at, CHAIN_ID_LEN};
use crate::error::{LightClientError, Result};
use crate::validator::{ValidatorSet, HASH_LEN};

/// `chain id (32) | height (8) | validator set hash (32) | next validator set hash (32)`
pub const HEADER_PREFIX_LEN: usize = CHAIN_ID_LEN + 8 + 2 * HASH_LEN;

/// A remote block header as relayed to [`crate::ConsensusState::apply_header`].
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub chain_id: String,
    pub height: u64,
    pub validator_set_hash: Binary,
    pub next_validator_set_hash: Binary,
    /// Present when the header carries the full set, already checked against
    /// `validator_set_hash`.
    pub validator_set: Option<ValidatorSet>,
}

impl Header {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_PREFIX_LEN {
            return Err(LightClientError::InvalidLength {
                what: "header",
                expected: HEADER_PREFIX_LEN,
                actual: bytes.len(),
            });
        }
        let chain_id = decode_chain_id(&bytes[..CHAIN_ID_LEN])?;
        let mut height = [0u8; 8];
        height.copy_from_slice(&bytes[CHAIN_ID_LEN..CHAIN_ID_LEN + 8]);
        let validator_set_hash = hash_at(bytes, CHAIN_ID_LEN + 8);
        let next_validator_set_hash = hash_at(bytes, CHAIN_ID_LEN + 8 + HASH_LEN);

        let validators = &bytes[HEADER_PREFIX_LEN..];
        let validator_set = if validators.is_empty() {
            None
        } else {
            let set = ValidatorSet::decode(validators)?;
            if set.hash() != &validator_set_hash {
                return Err(LightClientError::HashMismatch {
                    claimed: hex::encode(&validator_set_hash),
                    computed: hex::encode(set.hash()),
                });
            }
            Some(set)
        };

        Ok(Header {
            chain_id,
            height: u64::from_be_bytes(height),
            validator_set_hash,
            next_validator_set_hash,
            validator_set,
        })
    }

    /// Encodes the header as is. Nothing ties `validator_set_hash` to the carried set
    /// here; [`Header::decode`] is where that is enforced.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(HEADER_PREFIX_LEN);
        encode_chain_id(&self.chain_id, &mut out)?;
        out.extend_from_slice(&self.height.to_be_bytes());
        out.extend_from_slice(&self.validator_set_hash);
        out.extend_from_slice(&self.next_validator_set_hash);
        if let Some(set) = &self.validator_set {
            out.extend_from_slice(&set.encode());
        }
        Ok(out)
    }
}
