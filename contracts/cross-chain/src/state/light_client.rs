use cosmwasm_std::Storage;
use cw_storage_plus::Item;
use gnfd_light_client::ConsensusState;

use crate::error::ContractError;

/// Latest accepted consensus state, including the validator set in force
pub(crate) const CONSENSUS_STATE: Item<ConsensusState> = Item::new("consensus_state");

pub fn get_consensus_state(storage: &dyn Storage) -> Result<ConsensusState, ContractError> {
    CONSENSUS_STATE
        .may_load(storage)?
        .ok_or(ContractError::NotInitialized {})
}
