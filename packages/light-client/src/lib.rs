//! Light client for the Greenfield chain.
//!
//! Tracks the remote validator set through relayed headers and checks that
//! packages carry an aggregate BLS signature from a two-thirds quorum of it.
//! Everything here is pure; the contract owns the storage.

pub mod consensus;
pub mod error;
pub mod header;
pub mod validator;
pub mod verify;

pub use consensus::{ConsensusState, CHAIN_ID_LEN};
pub use error::LightClientError;
pub use header::Header;
pub use validator::{Validator, ValidatorSet, MAX_VALIDATORS, VALIDATOR_BYTES_LEN};
pub use verify::{keccak256, verify_package, Quorum, BLS_DST};
