use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum LightClientError {
    #[error("Invalid {what} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Chain id must be valid UTF-8 of at most 32 bytes")]
    InvalidChainId {},
    #[error("Validator set is empty")]
    EmptyValidatorSet {},
    #[error("Validator set has {0} validators, more than the bitmap can address")]
    TooManyValidators(usize),
    #[error("Validator {index} has zero voting power")]
    ZeroVotingPower { index: usize },
    #[error("Total voting power overflows")]
    VotingPowerOverflow {},
    #[error("Validator {index} has an invalid BLS public key")]
    InvalidBlsKey { index: usize },
    #[error("Validator {index} repeats the BLS public key of an earlier validator")]
    DuplicateBlsKey { index: usize },
    #[error("Aggregate signature is not a valid compressed G2 point")]
    InvalidSignature {},
    #[error("Validator bitmap {0}")]
    InvalidBitmap(&'static str),
    #[error("Insufficient quorum: {signers} of {validators} validators holding {signed_power} of {total_power} voting power")]
    InsufficientQuorum {
        signers: usize,
        validators: usize,
        signed_power: u64,
        total_power: u64,
    },
    #[error("Aggregate signature does not verify against the selected validators")]
    SignatureInvalid {},
    #[error("Height {submitted} is not above the current height {current}")]
    StaleHeight { current: u64, submitted: u64 },
    #[error("Header is for height {header}, but height {submitted} was submitted")]
    HeaderHeightMismatch { header: u64, submitted: u64 },
    #[error("Header chain id {actual} does not match {expected}")]
    ChainIdMismatch { expected: String, actual: String },
    #[error("Validator set hash mismatch: claimed {claimed}, computed {computed}")]
    HashMismatch { claimed: String, computed: String },
    #[error("Validator set {actual} was not announced, expected {expected}")]
    UnannouncedValidatorSet { expected: String, actual: String },
}

pub type Result<T> = std::result::Result<T, LightClientError>;
