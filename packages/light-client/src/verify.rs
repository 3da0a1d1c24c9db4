use bitvec::prelude::*;
use blst::min_pk::{AggregatePublicKey, PublicKey, Signature};
use blst::BLST_ERROR;
use cosmwasm_std::Uint256;
use tiny_keccak::{Hasher, Keccak};

use crate::error::{LightClientError, Result};
use crate::validator::{parse_bls_key, ValidatorSet};

/// Ciphersuite of the remote chain's relayer signatures.
pub const BLS_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";
pub const BLS_SIGNATURE_LEN: usize = 96;

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

/// Who signed an accepted package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quorum {
    pub signers: usize,
    pub signed_power: u64,
    pub total_power: u64,
}

/// Indices of the validators selected by `bitmap`, least significant bit first.
pub fn selected_validators(bitmap: Uint256, set_len: usize) -> Result<Vec<usize>> {
    let bytes = bitmap.to_le_bytes();
    let bits = bytes.view_bits::<Lsb0>();
    if bits.not_any() {
        return Err(LightClientError::InvalidBitmap("selects no validator"));
    }
    let selected: Vec<usize> = bits.iter_ones().collect();
    if selected.iter().any(|index| *index >= set_len) {
        return Err(LightClientError::InvalidBitmap(
            "selects a validator outside the current set",
        ));
    }
    Ok(selected)
}

/// Verifies that a two-thirds quorum of `set` signed `payload`.
///
/// Both the number of signers and their voting power must reach two-thirds of
/// the set. The aggregate signature is checked over `keccak256(payload)`, with the
/// selected keys aggregated in bitmap order.
pub fn verify_package(
    set: &ValidatorSet,
    payload: &[u8],
    signature: &[u8],
    bitmap: Uint256,
) -> Result<Quorum> {
    let selected = selected_validators(bitmap, set.len())?;
    let validators = set.validators();

    let signed_power = selected
        .iter()
        .map(|i| validators[*i].voting_power)
        .sum::<u64>();
    let total_power = set.total_voting_power();
    let has_quorum = selected.len() * 3 >= set.len() * 2
        && u128::from(signed_power) * 3 >= u128::from(total_power) * 2;
    if !has_quorum {
        return Err(LightClientError::InsufficientQuorum {
            signers: selected.len(),
            validators: set.len(),
            signed_power,
            total_power,
        });
    }

    let keys = selected
        .iter()
        .map(|i| {
            parse_bls_key(&validators[*i].relayer_bls_key)
                .ok_or(LightClientError::InvalidBlsKey { index: *i })
        })
        .collect::<Result<Vec<PublicKey>>>()?;
    let key_refs: Vec<&PublicKey> = keys.iter().collect();
    let aggregate_key = AggregatePublicKey::aggregate(&key_refs, false)
        .map_err(|_| LightClientError::SignatureInvalid {})?
        .to_public_key();

    if signature.len() != BLS_SIGNATURE_LEN {
        return Err(LightClientError::InvalidLength {
            what: "aggregate signature",
            expected: BLS_SIGNATURE_LEN,
            actual: signature.len(),
        });
    }
    let signature =
        Signature::from_bytes(signature).map_err(|_| LightClientError::InvalidSignature {})?;

    let digest = keccak256(payload);
    if signature.verify(true, &digest, BLS_DST, &[], &aggregate_key, false)
        != BLST_ERROR::BLST_SUCCESS
    {
        return Err(LightClientError::SignatureInvalid {});
    }

    Ok(Quorum {
        signers: selected.len(),
        signed_power,
        total_power,
    })
}
