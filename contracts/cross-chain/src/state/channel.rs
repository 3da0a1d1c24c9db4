use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Map};

use crate::error::ContractError;
use crate::msg::ChannelInfo;

/// Channel id to handler contract. Entries are never replaced or removed
pub(crate) const CHANNELS: Map<u8, Addr> = Map::new("channels");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

pub fn register_channel(
    storage: &mut dyn Storage,
    channel_id: u8,
    handler: &Addr,
) -> Result<(), ContractError> {
    if CHANNELS.has(storage, channel_id) {
        return Err(ContractError::ChannelAlreadyRegistered(channel_id));
    }
    CHANNELS.save(storage, channel_id, handler)?;
    Ok(())
}

pub fn channel_handler(storage: &dyn Storage, channel_id: u8) -> Result<Addr, ContractError> {
    CHANNELS
        .may_load(storage, channel_id)?
        .ok_or(ContractError::UnknownChannel(channel_id))
}

pub fn list_channels(
    storage: &dyn Storage,
    start_after: Option<u8>,
    limit: Option<u32>,
) -> StdResult<Vec<ChannelInfo>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);
    CHANNELS
        .range(storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (channel_id, handler) = item?;
            Ok(ChannelInfo {
                channel_id,
                handler,
            })
        })
        .collect()
}
