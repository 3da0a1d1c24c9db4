use cosmwasm_std::{Binary, Deps, DepsMut, MessageInfo, Response, Uint256};
use cw_utils::nonpayable;
use gnfd_light_client::{verify_package, ConsensusState, Quorum};

use crate::access::{ensure_not_suspended, ensure_relayer};
use crate::cc_debug;
use crate::error::ContractError;
use crate::events::{new_init_light_client_event, new_sync_header_event};
use crate::state::config::ADMIN;
use crate::state::light_client::{get_consensus_state, CONSENSUS_STATE};

/// Stores the trusted consensus state. Can only happen once.
pub fn initialize(deps: DepsMut, consensus_state: &[u8]) -> Result<Response, ContractError> {
    if CONSENSUS_STATE.exists(deps.storage) {
        return Err(ContractError::AlreadyInitialized {});
    }
    let state = ConsensusState::decode(consensus_state)?;
    CONSENSUS_STATE.save(deps.storage, &state)?;

    cc_debug!(
        deps,
        "light_client",
        format!("initialized at height {}", state.height)
    );
    Ok(Response::new().add_event(new_init_light_client_event(
        &state.chain_id,
        state.height,
        state.validator_set.hash(),
    )))
}

pub fn handle_init_light_client(
    deps: DepsMut,
    info: MessageInfo,
    consensus_state: Binary,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;
    Ok(initialize(deps, &consensus_state)?.add_attribute("action", "init_light_client"))
}

pub fn handle_sync_header(
    deps: DepsMut,
    info: MessageInfo,
    header: Binary,
    height: u64,
    signature: Binary,
    validator_bitmap: Uint256,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_not_suspended(deps.storage)?;
    ensure_relayer(deps.as_ref(), &info.sender)?;

    // The header is signed by the set in force, before any rotation it carries
    let state = get_consensus_state(deps.storage)?;
    verify_package(&state.validator_set, &header, &signature, validator_bitmap)
        .map_err(ContractError::ProofRejected)?;
    let (state, rotated) = state.apply_header(&header, height)?;
    CONSENSUS_STATE.save(deps.storage, &state)?;

    if rotated {
        cc_debug!(
            deps,
            "light_client",
            format!(
                "validator set rotated at height {height} to {} validators",
                state.validator_set.len()
            )
        );
    }
    Ok(Response::new()
        .add_attribute("action", "sync_header")
        .add_event(new_sync_header_event(
            height,
            state.validator_set.hash(),
            rotated,
        )))
}

/// Checks a proof bundle against the validator set in force, without touching state.
pub fn verify(
    deps: Deps,
    payload: &[u8],
    signature: &[u8],
    validator_bitmap: Uint256,
) -> Result<Quorum, ContractError> {
    let state = get_consensus_state(deps.storage)?;
    verify_package(&state.validator_set, payload, signature, validator_bitmap)
        .map_err(ContractError::ProofRejected)
}
