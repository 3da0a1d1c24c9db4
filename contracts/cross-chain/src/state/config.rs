use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage};
use cw_controllers::Admin;
use cw_storage_plus::Item;

pub(crate) const CONFIG: Item<Config> = Item::new("config");
pub(crate) const ADMIN: Admin = Admin::new("admin");
pub(crate) const SUSPENDED: Item<bool> = Item::new("suspended");

pub const DEFAULT_INTURN_RELAYER_RELAY_INTERVAL: u64 = 1800;

/// Config of the bridge end on this chain
#[cw_serde]
pub struct Config {
    /// Chain id stamped as source on outbound packages
    pub local_chain_id: u16,
    /// Chain id inbound packages must come from
    pub remote_chain_id: u16,
    pub emergency_operator: Addr,
    /// Seconds each relayer of the validator set stays in turn
    pub inturn_relayer_relay_interval: u64,
}

pub fn is_suspended(storage: &dyn Storage) -> StdResult<bool> {
    Ok(SUSPENDED.may_load(storage)?.unwrap_or_default())
}
