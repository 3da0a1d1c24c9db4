use cosmwasm_std::{Addr, Binary, CanonicalAddr, Deps, Env, StdResult, Uint256};

use crate::error::ContractError;
use crate::light_client::verify;
use crate::msg::{
    ChannelsResponse, ConsensusStateResponse, InturnRelayerResponse, RelayersResponse,
    VerifyPackageResponse,
};
use crate::state::channel::list_channels;
use crate::state::config::CONFIG;
use crate::state::light_client::get_consensus_state;
use crate::state::sequence::{channel_sequences, oracle_sequences, Sequences};

pub fn consensus_state(deps: Deps) -> Result<ConsensusStateResponse, ContractError> {
    let state = get_consensus_state(deps.storage)?;
    Ok(ConsensusStateResponse {
        validator_set_hash: state.validator_set.hash().clone(),
        validators: state.validator_set.validators().to_vec(),
        chain_id: state.chain_id,
        height: state.height,
        next_validator_set_hash: state.next_validator_set_hash,
    })
}

pub fn height(deps: Deps) -> Result<u64, ContractError> {
    Ok(get_consensus_state(deps.storage)?.height)
}

pub fn validator_set_hash(deps: Deps) -> Result<Binary, ContractError> {
    Ok(get_consensus_state(deps.storage)?.validator_set.hash().clone())
}

fn relayer_addrs(deps: Deps) -> Result<Vec<Addr>, ContractError> {
    let state = get_consensus_state(deps.storage)?;
    state
        .validator_set
        .relayer_addresses()
        .map(|address| {
            deps.api
                .addr_humanize(&CanonicalAddr::from(address.as_slice()))
                .map_err(Into::into)
        })
        .collect()
}

pub fn relayers(deps: Deps) -> Result<RelayersResponse, ContractError> {
    Ok(RelayersResponse {
        relayers: relayer_addrs(deps)?,
    })
}

/// Relayers take turns in fixed windows of `inturn_relayer_relay_interval` seconds,
/// in validator order, starting from the unix epoch.
pub fn inturn_relayer(deps: Deps, env: Env) -> Result<InturnRelayerResponse, ContractError> {
    let interval = CONFIG.load(deps.storage)?.inturn_relayer_relay_interval;
    let mut relayers = relayer_addrs(deps)?;

    let now = env.block.time.seconds();
    let start = now - now % interval;
    let end = start
        .checked_add(interval)
        .ok_or(ContractError::RelayWindowOverflow {})?;
    let index = ((now / interval) % relayers.len() as u64) as usize;
    Ok(InturnRelayerResponse {
        relayer: relayers.swap_remove(index),
        start,
        end,
    })
}

pub fn verify_package(
    deps: Deps,
    payload: Binary,
    signature: Binary,
    validator_bitmap: Uint256,
) -> Result<VerifyPackageResponse, ContractError> {
    let quorum = verify(deps, &payload, &signature, validator_bitmap)?;
    Ok(VerifyPackageResponse {
        signers: quorum.signers as u32,
        signed_power: quorum.signed_power,
        total_power: quorum.total_power,
    })
}

pub fn channel_sequence(deps: Deps, channel_id: u8) -> StdResult<Sequences> {
    channel_sequences(deps.storage, channel_id)
}

pub fn oracle_sequence(deps: Deps) -> StdResult<Sequences> {
    oracle_sequences(deps.storage)
}

pub fn channels(
    deps: Deps,
    start_after: Option<u8>,
    limit: Option<u32>,
) -> StdResult<ChannelsResponse> {
    Ok(ChannelsResponse {
        channels: list_channels(deps.storage, start_after, limit)?,
    })
}
