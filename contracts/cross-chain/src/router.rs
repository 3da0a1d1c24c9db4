use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    from_json, to_json_binary, Binary, DepsMut, Event, MessageInfo, Response, Storage, SubMsg,
    SubMsgResult, Uint256,
};
use cw_utils::nonpayable;
use gnfd_apis::{HandlerExecuteMsg, SendPackageResponse};
use gnfd_codec::{check_payload, Envelope, Package, PackageType};

use crate::access::{ensure_handler, ensure_not_suspended, ensure_relayer};
use crate::cc_debug;
use crate::error::ContractError;
use crate::events::{
    new_cross_chain_package_event, new_package_handled_event, new_receive_package_event,
};
use crate::light_client::verify;
use crate::state::channel::channel_handler;
use crate::state::config::CONFIG;
use crate::state::sequence::{assign_send, consume_receive};

pub const REPLY_ID_RECEIVE_PACKAGE: u64 = 1;

/// The package a handler call delivers, carried to `reply` as the sub-message payload
#[cw_serde]
struct PendingDelivery {
    channel_id: u8,
    package_type: PackageType,
    sequence: u64,
    payload: Binary,
}

/// Accepts a relayed package and hands it to the channel's handler.
///
/// The sequences are consumed before the handler runs. The handler is called with
/// reply-always semantics, so its failure only reverts its own changes and the
/// outcome is settled in [`handle_receive_reply`].
pub fn handle_package(
    deps: DepsMut,
    info: MessageInfo,
    payload: Binary,
    signature: Binary,
    validator_bitmap: Uint256,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_not_suspended(deps.storage)?;
    ensure_relayer(deps.as_ref(), &info.sender)?;

    verify(deps.as_ref(), &payload, &signature, validator_bitmap)?;

    let envelope = Envelope::decode(&payload)?;
    let cfg = CONFIG.load(deps.storage)?;
    if envelope.src_chain_id != cfg.remote_chain_id || envelope.dst_chain_id != cfg.local_chain_id
    {
        return Err(ContractError::ChainIdMismatch {
            src_chain_id: envelope.src_chain_id,
            dst_chain_id: envelope.dst_chain_id,
            expected_src_chain_id: cfg.remote_chain_id,
            expected_dst_chain_id: cfg.local_chain_id,
        });
    }

    let package = &envelope.package;
    consume_receive(
        deps.storage,
        package.channel_id,
        package.sequence,
        envelope.oracle_sequence,
    )?;
    let handler = channel_handler(deps.storage, package.channel_id)?;

    let payload = Binary::from(package.payload.clone());
    let delivery = to_json_binary(&PendingDelivery {
        channel_id: package.channel_id,
        package_type: package.package_type,
        sequence: package.sequence,
        payload: payload.clone(),
    })?;
    let msg = HandlerExecuteMsg::ReceivePackage {
        channel_id: package.channel_id,
        package_type: package.package_type,
        sequence: package.sequence,
        payload,
    }
    .into_cosmos_msg(handler)?;

    Ok(Response::new()
        .add_submessage(
            SubMsg::reply_always(msg, REPLY_ID_RECEIVE_PACKAGE).with_payload(delivery),
        )
        .add_attribute("action", "handle_package")
        .add_event(new_receive_package_event(&envelope, &info.sender)))
}

/// Settles a handler call. A failed `Syn` package is answered with a `FailAck`
/// carrying the original payload; failed acknowledgements are only reported.
pub fn handle_receive_reply(
    deps: DepsMut,
    result: SubMsgResult,
    payload: &Binary,
) -> Result<Response, ContractError> {
    let delivery: PendingDelivery = from_json(payload)?;

    let error = match result {
        SubMsgResult::Ok(_) => {
            return Ok(Response::new().add_event(new_package_handled_event(
                delivery.channel_id,
                delivery.sequence,
                delivery.package_type,
                None,
            )));
        }
        SubMsgResult::Err(error) => error,
    };

    cc_debug!(
        deps,
        "router",
        format!(
            "handler of channel {} failed on sequence {}",
            delivery.channel_id, delivery.sequence
        ),
        error
    );
    let res = Response::new().add_event(new_package_handled_event(
        delivery.channel_id,
        delivery.sequence,
        delivery.package_type,
        Some(&error),
    ));
    if delivery.package_type != PackageType::Syn {
        return Ok(res);
    }

    let (event, _) = queue_package(
        deps.storage,
        delivery.channel_id,
        PackageType::FailAck,
        delivery.payload.to_vec(),
    )?;
    Ok(res.add_event(event))
}

pub fn handle_send_package(
    deps: DepsMut,
    info: MessageInfo,
    channel_id: u8,
    package_type: PackageType,
    payload: Binary,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_not_suspended(deps.storage)?;
    ensure_handler(deps.storage, channel_id, &info.sender)?;
    check_payload(&payload)?;

    let (event, sent) = queue_package(deps.storage, channel_id, package_type, payload.to_vec())?;
    Ok(Response::new()
        .add_attribute("action", "send_package")
        .add_event(event)
        .set_data(to_json_binary(&sent)?))
}

/// Assigns the outbound sequences and builds the event relayers pick the package from.
fn queue_package(
    storage: &mut dyn Storage,
    channel_id: u8,
    package_type: PackageType,
    payload: Vec<u8>,
) -> Result<(Event, SendPackageResponse), ContractError> {
    let cfg = CONFIG.load(storage)?;
    let (sequence, oracle_sequence) = assign_send(storage, channel_id)?;
    let envelope = Envelope {
        src_chain_id: cfg.local_chain_id,
        dst_chain_id: cfg.remote_chain_id,
        oracle_sequence,
        package: Package {
            package_type,
            channel_id,
            sequence,
            payload,
        },
    };
    Ok((
        new_cross_chain_package_event(&envelope),
        SendPackageResponse {
            sequence,
            oracle_sequence,
        },
    ))
}
