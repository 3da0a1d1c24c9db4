use cosmwasm_std::{Addr, Event};
use gnfd_codec::{Envelope, PackageType};

use crate::state::sequence::{SequenceTarget, Side};

/// Emitted for every outbound package. Relayers pick up `payload`, the hex encoded
/// envelope, and submit it to the remote chain.
pub fn new_cross_chain_package_event(envelope: &Envelope) -> Event {
    Event::new("cross_chain_package")
        .add_attribute("src_chain_id", envelope.src_chain_id.to_string())
        .add_attribute("dst_chain_id", envelope.dst_chain_id.to_string())
        .add_attribute("oracle_sequence", envelope.oracle_sequence.to_string())
        .add_attribute("channel_id", envelope.package.channel_id.to_string())
        .add_attribute("sequence", envelope.package.sequence.to_string())
        .add_attribute("package_type", envelope.package.package_type.as_str())
        .add_attribute("payload", hex::encode(envelope.encode()))
}

pub fn new_receive_package_event(envelope: &Envelope, relayer: &Addr) -> Event {
    Event::new("receive_package")
        .add_attribute("oracle_sequence", envelope.oracle_sequence.to_string())
        .add_attribute("channel_id", envelope.package.channel_id.to_string())
        .add_attribute("sequence", envelope.package.sequence.to_string())
        .add_attribute("package_type", envelope.package.package_type.as_str())
        .add_attribute("relayer", relayer)
}

/// Outcome of handing a received package to its handler
pub fn new_package_handled_event(
    channel_id: u8,
    sequence: u64,
    package_type: PackageType,
    error: Option<&str>,
) -> Event {
    let event = Event::new("package_handled")
        .add_attribute("channel_id", channel_id.to_string())
        .add_attribute("sequence", sequence.to_string())
        .add_attribute("package_type", package_type.as_str())
        .add_attribute("success", error.is_none().to_string());
    match error {
        Some(error) => event.add_attribute("error", error),
        None => event,
    }
}

pub fn new_sync_header_event(height: u64, validator_set_hash: &[u8], rotated: bool) -> Event {
    Event::new("sync_header")
        .add_attribute("height", height.to_string())
        .add_attribute("validator_set_hash", hex::encode(validator_set_hash))
        .add_attribute("validator_set_changed", rotated.to_string())
}

pub fn new_init_light_client_event(chain_id: &str, height: u64, validator_set_hash: &[u8]) -> Event {
    Event::new("init_light_client")
        .add_attribute("chain_id", chain_id)
        .add_attribute("height", height.to_string())
        .add_attribute("validator_set_hash", hex::encode(validator_set_hash))
}

pub fn new_emergency_change_sequence_event(
    target: SequenceTarget,
    side: Side,
    old: u64,
    new: u64,
    actor: &Addr,
) -> Event {
    Event::new("emergency_change_sequence")
        .add_attribute("target", target.as_string())
        .add_attribute("side", side.as_str())
        .add_attribute("old_sequence", old.to_string())
        .add_attribute("new_sequence", new.to_string())
        .add_attribute("actor", actor)
}

pub fn new_suspension_event(suspended: bool, actor: &Addr) -> Event {
    let ty = if suspended { "suspend" } else { "reopen" };
    Event::new(ty).add_attribute("actor", actor)
}

pub fn new_register_channel_event(channel_id: u8, handler: &Addr) -> Event {
    Event::new("register_channel")
        .add_attribute("channel_id", channel_id.to_string())
        .add_attribute("handler", handler)
}
