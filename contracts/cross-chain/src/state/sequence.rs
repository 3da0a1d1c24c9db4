use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;

/// Next sequence expected (receive) or to be assigned (send)
#[cw_serde]
#[derive(Copy, Default)]
pub struct Sequences {
    pub send: u64,
    pub receive: u64,
}

pub(crate) const CHANNEL_SEQUENCES: Map<u8, Sequences> = Map::new("channel_sequences");
/// Bridge-wide counters, advanced by every package regardless of channel
pub(crate) const ORACLE_SEQUENCES: Item<Sequences> = Item::new("oracle_sequences");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceTarget {
    Oracle,
    Channel(u8),
}

impl SequenceTarget {
    pub fn as_string(&self) -> String {
        match self {
            SequenceTarget::Oracle => "oracle".to_string(),
            SequenceTarget::Channel(id) => format!("channel_{id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Send,
    Receive,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Send => "send",
            Side::Receive => "receive",
        }
    }
}

pub fn channel_sequences(storage: &dyn Storage, channel_id: u8) -> StdResult<Sequences> {
    Ok(CHANNEL_SEQUENCES
        .may_load(storage, channel_id)?
        .unwrap_or_default())
}

pub fn oracle_sequences(storage: &dyn Storage) -> StdResult<Sequences> {
    Ok(ORACLE_SEQUENCES.may_load(storage)?.unwrap_or_default())
}

fn next(value: u64) -> Result<u64, ContractError> {
    value.checked_add(1).ok_or(ContractError::SequenceOverflow {})
}

/// Consumes an inbound package: `sequence` must be the channel's next receive
/// sequence and `oracle_sequence` the next oracle receive sequence. Both advance by
/// one; nothing changes on mismatch.
pub fn consume_receive(
    storage: &mut dyn Storage,
    channel_id: u8,
    sequence: u64,
    oracle_sequence: u64,
) -> Result<(), ContractError> {
    let mut channel = channel_sequences(storage, channel_id)?;
    if sequence != channel.receive {
        return Err(ContractError::SequenceMismatch {
            channel_id,
            expected: channel.receive,
            actual: sequence,
        });
    }
    let mut oracle = oracle_sequences(storage)?;
    if oracle_sequence != oracle.receive {
        return Err(ContractError::OracleSequenceMismatch {
            expected: oracle.receive,
            actual: oracle_sequence,
        });
    }

    channel.receive = next(channel.receive)?;
    oracle.receive = next(oracle.receive)?;
    CHANNEL_SEQUENCES.save(storage, channel_id, &channel)?;
    ORACLE_SEQUENCES.save(storage, &oracle)?;
    Ok(())
}

/// Assigns the channel and oracle sequences of an outbound package.
pub fn assign_send(storage: &mut dyn Storage, channel_id: u8) -> Result<(u64, u64), ContractError> {
    let mut channel = channel_sequences(storage, channel_id)?;
    let mut oracle = oracle_sequences(storage)?;
    let assigned = (channel.send, oracle.send);

    channel.send = next(channel.send)?;
    oracle.send = next(oracle.send)?;
    CHANNEL_SEQUENCES.save(storage, channel_id, &channel)?;
    ORACLE_SEQUENCES.save(storage, &oracle)?;
    Ok(assigned)
}

/// Moves one counter by `delta`. Returns the old and new values.
pub fn adjust(
    storage: &mut dyn Storage,
    target: SequenceTarget,
    side: Side,
    increase: bool,
    delta: u64,
) -> Result<(u64, u64), ContractError> {
    let mut sequences = match target {
        SequenceTarget::Oracle => oracle_sequences(storage)?,
        SequenceTarget::Channel(id) => channel_sequences(storage, id)?,
    };
    let counter = match side {
        Side::Send => &mut sequences.send,
        Side::Receive => &mut sequences.receive,
    };
    let old = *counter;
    let new = if increase {
        old.checked_add(delta).ok_or(ContractError::SequenceOverflow {})?
    } else {
        old.checked_sub(delta)
            .ok_or(ContractError::SequenceUnderflow {})?
    };
    *counter = new;

    match target {
        SequenceTarget::Oracle => ORACLE_SEQUENCES.save(storage, &sequences)?,
        SequenceTarget::Channel(id) => CHANNEL_SEQUENCES.save(storage, id, &sequences)?,
    }
    Ok((old, new))
}
