use cosmwasm_schema::cw_serde;
use cosmwasm_std::Binary;

use crate::error::{LightClientError, Result};
use crate::header::Header;
use crate::validator::{ValidatorSet, HASH_LEN};

pub const CHAIN_ID_LEN: usize = 32;
/// `chain id (32) | height (8) | next validator set hash (32)`
pub const CONSENSUS_STATE_PREFIX_LEN: usize = CHAIN_ID_LEN + 8 + HASH_LEN;

/// Decodes a zero padded chain id field.
pub(crate) fn decode_chain_id(bytes: &[u8]) -> Result<String> {
    let end = bytes
        .iter()
        .rposition(|b| *b != 0)
        .map(|i| i + 1)
        .unwrap_or(0);
    String::from_utf8(bytes[..end].to_vec()).map_err(|_| LightClientError::InvalidChainId {})
}

pub(crate) fn encode_chain_id(chain_id: &str, out: &mut Vec<u8>) -> Result<()> {
    let bytes = chain_id.as_bytes();
    if bytes.len() > CHAIN_ID_LEN || bytes.contains(&0) {
        return Err(LightClientError::InvalidChainId {});
    }
    out.extend_from_slice(bytes);
    out.resize(out.len() + CHAIN_ID_LEN - bytes.len(), 0);
    Ok(())
}

pub(crate) fn hash_at(bytes: &[u8], offset: usize) -> Binary {
    Binary::from(&bytes[offset..offset + HASH_LEN])
}

/// What the light client currently believes about the remote chain.
#[cw_serde]
pub struct ConsensusState {
    pub chain_id: String,
    pub height: u64,
    /// Hash of the set the remote chain announced as its successor.
    pub next_validator_set_hash: Binary,
    pub validator_set: ValidatorSet,
}

impl ConsensusState {
    /// Decodes the trusted initial state.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < CONSENSUS_STATE_PREFIX_LEN {
            return Err(LightClientError::InvalidLength {
                what: "consensus state",
                expected: CONSENSUS_STATE_PREFIX_LEN,
                actual: bytes.len(),
            });
        }
        let chain_id = decode_chain_id(&bytes[..CHAIN_ID_LEN])?;
        let mut height = [0u8; 8];
        height.copy_from_slice(&bytes[CHAIN_ID_LEN..CHAIN_ID_LEN + 8]);
        let next_validator_set_hash = hash_at(bytes, CHAIN_ID_LEN + 8);
        let validator_set = ValidatorSet::decode(&bytes[CONSENSUS_STATE_PREFIX_LEN..])?;

        Ok(ConsensusState {
            chain_id,
            height: u64::from_be_bytes(height),
            next_validator_set_hash,
            validator_set,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(CONSENSUS_STATE_PREFIX_LEN);
        encode_chain_id(&self.chain_id, &mut out)?;
        out.extend_from_slice(&self.height.to_be_bytes());
        out.extend_from_slice(&self.next_validator_set_hash);
        out.extend_from_slice(&self.validator_set.encode());
        Ok(out)
    }

    /// Advances the state with a header for `height`. Returns the new state and
    /// whether the validator set was replaced.
    ///
    /// The header needs no signature. A set it carries must hash to the claimed
    /// value, and a set other than the current one is only taken if its hash is the
    /// one the previous header announced.
    pub fn apply_header(&self, header_bytes: &[u8], height: u64) -> Result<(Self, bool)> {
        if height <= self.height {
            return Err(LightClientError::StaleHeight {
                current: self.height,
                submitted: height,
            });
        }
        let header = Header::decode(header_bytes)?;
        if header.height != height {
            return Err(LightClientError::HeaderHeightMismatch {
                header: header.height,
                submitted: height,
            });
        }
        if header.chain_id != self.chain_id {
            return Err(LightClientError::ChainIdMismatch {
                expected: self.chain_id.clone(),
                actual: header.chain_id,
            });
        }

        let current_hash = self.validator_set.hash();
        let validator_set = match header.validator_set {
            None => {
                if &header.validator_set_hash != current_hash {
                    return Err(LightClientError::HashMismatch {
                        claimed: hex::encode(&header.validator_set_hash),
                        computed: hex::encode(current_hash),
                    });
                }
                None
            }
            Some(set) if set.hash() == current_hash => None,
            Some(set) => {
                if set.hash() != &self.next_validator_set_hash {
                    return Err(LightClientError::UnannouncedValidatorSet {
                        expected: hex::encode(&self.next_validator_set_hash),
                        actual: hex::encode(set.hash()),
                    });
                }
                Some(set)
            }
        };

        let rotated = validator_set.is_some();
        let state = ConsensusState {
            chain_id: self.chain_id.clone(),
            height,
            next_validator_set_hash: header.next_validator_set_hash,
            validator_set: validator_set.unwrap_or_else(|| self.validator_set.clone()),
        };
        Ok((state, rotated))
    }
}
