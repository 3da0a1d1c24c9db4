use blst::min_pk::{AggregateSignature, SecretKey, Signature};
use cosmwasm_std::{Binary, Uint256};
use gnfd_codec::{Envelope, Package, PackageType};
use gnfd_light_client::{keccak256, ConsensusState, Header, Validator, ValidatorSet, BLS_DST};
use rand::{Rng, RngCore};

pub const TEST_CHAIN_ID: &str = "greenfield_1017-1";
/// Chain ids used in envelopes: the remote (Greenfield) side and the local side
pub const TEST_REMOTE_CHAIN_ID: u16 = 1017;
pub const TEST_LOCAL_CHAIN_ID: u16 = 56;

/// Generate random bytes of specified length using the provided RNG
pub fn gen_random_bytes<R: RngCore>(rng: &mut R, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen()).collect()
}

/// A validator together with the BLS secret key of its relayer
pub struct TestValidator {
    pub secret_key: SecretKey,
    pub validator: Validator,
}

impl TestValidator {
    /// Raw relayer address; humanize it with the mock API to get the relayer's `Addr`
    pub fn relayer_address(&self) -> &[u8] {
        self.validator.relayer_address.as_slice()
    }
}

/// Deterministic validator: every field is derived from `seed`
pub fn gen_validator(seed: u8, voting_power: u64) -> TestValidator {
    let secret_key = SecretKey::key_gen(&[seed; 32], &[]).unwrap();
    let validator = Validator {
        consensus_pubkey: Binary::from(vec![seed; 32]),
        voting_power,
        relayer_address: Binary::from(vec![seed; 20]),
        relayer_bls_key: Binary::from(secret_key.sk_to_pk().compress().to_vec()),
    };
    TestValidator {
        secret_key,
        validator,
    }
}

/// `count` validators of equal power, seeded from `first_seed` upwards
pub fn gen_validators(first_seed: u8, count: u8, voting_power: u64) -> Vec<TestValidator> {
    (0..count)
        .map(|i| gen_validator(first_seed + i, voting_power))
        .collect()
}

pub fn gen_random_validator<R: RngCore>(rng: &mut R) -> TestValidator {
    let mut ikm = [0u8; 32];
    rng.fill_bytes(&mut ikm);
    let secret_key = SecretKey::key_gen(&ikm, &[]).unwrap();
    let validator = Validator {
        consensus_pubkey: Binary::from(gen_random_bytes(rng, 32)),
        voting_power: rng.gen_range(1..1_000_000),
        relayer_address: Binary::from(gen_random_bytes(rng, 20)),
        relayer_bls_key: Binary::from(secret_key.sk_to_pk().compress().to_vec()),
    };
    TestValidator {
        secret_key,
        validator,
    }
}

pub fn validator_set(validators: &[TestValidator]) -> ValidatorSet {
    ValidatorSet::new(validators.iter().map(|v| v.validator.clone()).collect()).unwrap()
}

/// Bitmap selecting the validators at `indices`
pub fn bitmap(indices: &[usize]) -> Uint256 {
    indices
        .iter()
        .fold(Uint256::zero(), |acc, i| acc + (Uint256::one() << *i as u32))
}

/// Aggregate signature of the validators at `signers` over `keccak256(payload)`
pub fn sign(validators: &[TestValidator], signers: &[usize], payload: &[u8]) -> Vec<u8> {
    let digest = keccak256(payload);
    let signatures: Vec<Signature> = signers
        .iter()
        .map(|i| validators[*i].secret_key.sign(&digest, BLS_DST, &[]))
        .collect();
    let refs: Vec<&Signature> = signatures.iter().collect();
    AggregateSignature::aggregate(&refs, true)
        .unwrap()
        .to_signature()
        .compress()
        .to_vec()
}

/// Encoded initial consensus state at `height`, announcing `next` as the
/// successor set (the current set itself when `None`)
pub fn consensus_state(
    height: u64,
    validators: &[TestValidator],
    next: Option<&[TestValidator]>,
) -> Vec<u8> {
    let validator_set = validator_set(validators);
    let next_validator_set_hash = match next {
        Some(next) => self::validator_set(next).hash().clone(),
        None => validator_set.hash().clone(),
    };
    ConsensusState {
        chain_id: TEST_CHAIN_ID.to_string(),
        height,
        next_validator_set_hash,
        validator_set,
    }
    .encode()
    .unwrap()
}

/// Encoded header for `height` while `current` is in force. When `carried` is set,
/// the header includes that set and claims its hash.
pub fn header(
    height: u64,
    current: &[TestValidator],
    carried: Option<&[TestValidator]>,
    next: &[TestValidator],
) -> Vec<u8> {
    let current = validator_set(current);
    let carried = carried.map(validator_set);
    Header {
        chain_id: TEST_CHAIN_ID.to_string(),
        height,
        validator_set_hash: carried
            .as_ref()
            .map(|set| set.hash().clone())
            .unwrap_or_else(|| current.hash().clone()),
        next_validator_set_hash: validator_set(next).hash().clone(),
        validator_set: carried,
    }
    .encode()
    .unwrap()
}

/// The arguments of a `HandlePackage` call
#[derive(Debug, Clone)]
pub struct ProofBundle {
    pub payload: Vec<u8>,
    pub signature: Vec<u8>,
    pub bitmap: Uint256,
}

pub fn envelope(
    oracle_sequence: u64,
    package_type: PackageType,
    channel_id: u8,
    sequence: u64,
    payload: Vec<u8>,
) -> Envelope {
    Envelope {
        src_chain_id: TEST_REMOTE_CHAIN_ID,
        dst_chain_id: TEST_LOCAL_CHAIN_ID,
        oracle_sequence,
        package: Package {
            package_type,
            channel_id,
            sequence,
            payload,
        },
    }
}

/// Encodes `envelope` and signs it with the validators at `signers`
pub fn sign_envelope(
    envelope: &Envelope,
    validators: &[TestValidator],
    signers: &[usize],
) -> ProofBundle {
    let payload = envelope.encode();
    ProofBundle {
        signature: sign(validators, signers, &payload),
        bitmap: bitmap(signers),
        payload,
    }
}

/// Proof over an encoded header, signed by `validators` at `signers`
pub fn sign_header(
    header: Vec<u8>,
    validators: &[TestValidator],
    signers: &[usize],
) -> ProofBundle {
    ProofBundle {
        signature: sign(validators, signers, &header),
        bitmap: bitmap(signers),
        payload: header,
    }
}
