use cosmwasm_std::{Addr, Deps, Storage};

use crate::error::ContractError;
use crate::state::channel::channel_handler;
use crate::state::config::{is_suspended, CONFIG};
use crate::state::light_client::get_consensus_state;

/// Relayers are identified by the relayer addresses of the validator set in force.
pub fn ensure_relayer(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let state = get_consensus_state(deps.storage)?;
    let canonical = deps.api.addr_canonicalize(sender.as_str())?;
    if !state.validator_set.is_relayer(canonical.as_slice()) {
        return Err(ContractError::Unauthorized { role: "relayer" });
    }
    Ok(())
}

pub fn ensure_emergency_operator(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if CONFIG.load(storage)?.emergency_operator != *sender {
        return Err(ContractError::Unauthorized {
            role: "emergency operator",
        });
    }
    Ok(())
}

pub fn ensure_handler(
    storage: &dyn Storage,
    channel_id: u8,
    sender: &Addr,
) -> Result<(), ContractError> {
    if channel_handler(storage, channel_id)? != *sender {
        return Err(ContractError::UnauthorizedHandler { channel_id });
    }
    Ok(())
}

pub fn ensure_not_suspended(storage: &dyn Storage) -> Result<(), ContractError> {
    if is_suspended(storage)? {
        return Err(ContractError::Suspended {});
    }
    Ok(())
}
