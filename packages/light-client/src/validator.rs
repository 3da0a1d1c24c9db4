use std::collections::HashSet;

use blst::min_pk::PublicKey;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::Binary;
use sha2::{Digest, Sha256};

use crate::error::{LightClientError, Result};

pub const CONSENSUS_PUBKEY_LEN: usize = 32;
pub const RELAYER_ADDRESS_LEN: usize = 20;
pub const BLS_PUBKEY_LEN: usize = 48;
/// `consensus pubkey (32) | voting power (8) | relayer address (20) | relayer BLS key (48)`
pub const VALIDATOR_BYTES_LEN: usize =
    CONSENSUS_PUBKEY_LEN + 8 + RELAYER_ADDRESS_LEN + BLS_PUBKEY_LEN;
/// Upper bound on the set size, fixed by the 256 bit signer bitmap.
pub const MAX_VALIDATORS: usize = 256;
pub const HASH_LEN: usize = 32;

#[cw_serde]
pub struct Validator {
    pub consensus_pubkey: Binary,
    pub voting_power: u64,
    /// Address of the relayer operated by this validator on the local chain.
    pub relayer_address: Binary,
    /// Compressed G1 point
    pub relayer_bls_key: Binary,
}

impl Validator {
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.consensus_pubkey);
        out.extend_from_slice(&self.voting_power.to_be_bytes());
        out.extend_from_slice(&self.relayer_address);
        out.extend_from_slice(&self.relayer_bls_key);
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != VALIDATOR_BYTES_LEN {
            return Err(LightClientError::InvalidLength {
                what: "validator",
                expected: VALIDATOR_BYTES_LEN,
                actual: bytes.len(),
            });
        }
        let (consensus_pubkey, rest) = bytes.split_at(CONSENSUS_PUBKEY_LEN);
        let (voting_power, rest) = rest.split_at(8);
        let (relayer_address, relayer_bls_key) = rest.split_at(RELAYER_ADDRESS_LEN);
        let mut power = [0u8; 8];
        power.copy_from_slice(voting_power);

        Ok(Validator {
            consensus_pubkey: Binary::from(consensus_pubkey),
            voting_power: u64::from_be_bytes(power),
            relayer_address: Binary::from(relayer_address),
            relayer_bls_key: Binary::from(relayer_bls_key),
        })
    }

    fn check_lengths(&self) -> Result<()> {
        let fields = [
            ("consensus pubkey", self.consensus_pubkey.len(), CONSENSUS_PUBKEY_LEN),
            ("relayer address", self.relayer_address.len(), RELAYER_ADDRESS_LEN),
            ("relayer BLS key", self.relayer_bls_key.len(), BLS_PUBKEY_LEN),
        ];
        for (what, actual, expected) in fields {
            if actual != expected {
                return Err(LightClientError::InvalidLength {
                    what,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Parses a compressed BLS public key, rejecting the point at infinity, points
/// outside the G1 subgroup and non-canonical encodings.
pub(crate) fn parse_bls_key(bytes: &[u8]) -> Option<PublicKey> {
    let key = PublicKey::key_validate(bytes).ok()?;
    (key.compress().as_slice() == bytes).then_some(key)
}

/// Decodes a concatenation of validators.
pub fn decode_validators(bytes: &[u8]) -> Result<Vec<Validator>> {
    if bytes.len() % VALIDATOR_BYTES_LEN != 0 {
        return Err(LightClientError::InvalidLength {
            what: "validator list",
            expected: (bytes.len() / VALIDATOR_BYTES_LEN + 1) * VALIDATOR_BYTES_LEN,
            actual: bytes.len(),
        });
    }
    bytes
        .chunks_exact(VALIDATOR_BYTES_LEN)
        .map(Validator::decode)
        .collect()
}

pub fn encode_validators(validators: &[Validator]) -> Vec<u8> {
    let mut out = Vec::with_capacity(validators.len() * VALIDATOR_BYTES_LEN);
    for validator in validators {
        validator.encode_into(&mut out);
    }
    out
}

/// sha256 over the concatenated validator encodings.
pub fn hash_validators(validators: &[Validator]) -> [u8; HASH_LEN] {
    Sha256::digest(encode_validators(validators)).into()
}

/// A checked, immutable snapshot of the remote validator set.
///
/// The only way to build one outside of deserialization is [`ValidatorSet::new`],
/// which enforces the set invariants and fixes the hash. A rotation replaces the
/// whole snapshot.
#[cw_serde]
pub struct ValidatorSet {
    validators: Vec<Validator>,
    total_voting_power: u64,
    hash: Binary,
}

impl ValidatorSet {
    pub fn new(validators: Vec<Validator>) -> Result<Self> {
        if validators.is_empty() {
            return Err(LightClientError::EmptyValidatorSet {});
        }
        if validators.len() > MAX_VALIDATORS {
            return Err(LightClientError::TooManyValidators(validators.len()));
        }

        let total_voting_power = Self::check(&validators)?;
        let hash = hash_validators(&validators);
        Ok(ValidatorSet {
            validators,
            total_voting_power,
            hash: Binary::from(hash),
        })
    }

    /// Returns the total voting power of a valid set.
    fn check(validators: &[Validator]) -> Result<u64> {
        let mut total_voting_power: u64 = 0;
        let mut seen_keys = HashSet::with_capacity(validators.len());
        for (index, validator) in validators.iter().enumerate() {
            validator.check_lengths()?;
            if validator.voting_power == 0 {
                return Err(LightClientError::ZeroVotingPower { index });
            }
            total_voting_power = total_voting_power
                .checked_add(validator.voting_power)
                .ok_or(LightClientError::VotingPowerOverflow {})?;
            if parse_bls_key(&validator.relayer_bls_key).is_none() {
                return Err(LightClientError::InvalidBlsKey { index });
            }
            if !seen_keys.insert(validator.relayer_bls_key.as_slice()) {
                return Err(LightClientError::DuplicateBlsKey { index });
            }
        }
        Ok(total_voting_power)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::new(decode_validators(bytes)?)
    }

    pub fn encode(&self) -> Vec<u8> {
        encode_validators(&self.validators)
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn total_voting_power(&self) -> u64 {
        self.total_voting_power
    }

    pub fn hash(&self) -> &Binary {
        &self.hash
    }

    pub fn relayer_addresses(&self) -> impl Iterator<Item = &Binary> {
        self.validators.iter().map(|v| &v.relayer_address)
    }

    pub fn is_relayer(&self, address: &[u8]) -> bool {
        self.relayer_addresses().any(|a| a.as_slice() == address)
    }
}
