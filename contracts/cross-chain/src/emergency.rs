use cosmwasm_std::{DepsMut, MessageInfo, Response};
use cw_utils::nonpayable;

use crate::access::ensure_emergency_operator;
use crate::cc_debug;
use crate::error::ContractError;
use crate::events::{new_emergency_change_sequence_event, new_suspension_event};
use crate::state::channel::channel_handler;
use crate::state::config::{is_suspended, SUSPENDED};
use crate::state::sequence::{adjust, SequenceTarget, Side};

/// Moves a single sequence counter. Allowed while suspended, so stuck
/// sequences can be repaired before reopening.
pub fn handle_change_sequence(
    deps: DepsMut,
    info: MessageInfo,
    target_oracle: bool,
    channel_id: u8,
    increase: bool,
    receive_side: bool,
    delta: u64,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_emergency_operator(deps.storage, &info.sender)?;
    if delta == 0 {
        return Err(ContractError::ZeroDelta {});
    }

    let target = if target_oracle {
        SequenceTarget::Oracle
    } else {
        channel_handler(deps.storage, channel_id)?;
        SequenceTarget::Channel(channel_id)
    };
    let side = if receive_side { Side::Receive } else { Side::Send };
    let (old, new) = adjust(deps.storage, target, side, increase, delta)?;

    cc_debug!(
        deps,
        "emergency",
        format!(
            "{} {} sequence moved from {old} to {new}",
            target.as_string(),
            side.as_str()
        )
    );
    Ok(Response::new()
        .add_attribute("action", "emergency_change_sequence")
        .add_event(new_emergency_change_sequence_event(
            target,
            side,
            old,
            new,
            &info.sender,
        )))
}

pub fn handle_suspend(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_emergency_operator(deps.storage, &info.sender)?;
    if is_suspended(deps.storage)? {
        return Err(ContractError::Suspended {});
    }
    SUSPENDED.save(deps.storage, &true)?;
    Ok(Response::new()
        .add_attribute("action", "suspend")
        .add_event(new_suspension_event(true, &info.sender)))
}

pub fn handle_reopen(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_emergency_operator(deps.storage, &info.sender)?;
    if !is_suspended(deps.storage)? {
        return Err(ContractError::NotSuspended {});
    }
    SUSPENDED.save(deps.storage, &false)?;
    Ok(Response::new()
        .add_attribute("action", "reopen")
        .add_event(new_suspension_event(false, &info.sender)))
}
