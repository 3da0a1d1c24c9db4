use cosmwasm_std::{
    attr, to_json_binary, Deps, DepsMut, Env, MessageInfo, QueryResponse, Reply, Response,
};
use cw2::set_contract_version;
use cw_utils::{maybe_addr, nonpayable};

use crate::emergency::{handle_change_sequence, handle_reopen, handle_suspend};
use crate::error::ContractError;
use crate::events::new_register_channel_event;
use crate::light_client::{handle_init_light_client, handle_sync_header, initialize};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::queries;
use crate::router::{
    handle_package, handle_receive_reply, handle_send_package, REPLY_ID_RECEIVE_PACKAGE,
};
use crate::state::channel::register_channel;
use crate::state::config::{
    is_suspended, Config, ADMIN, CONFIG, DEFAULT_INTURN_RELAYER_RELAY_INTERVAL,
};

pub const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn instantiate(
    mut deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    msg.validate()?;

    let api = deps.api;
    let cfg = Config {
        local_chain_id: msg.local_chain_id,
        remote_chain_id: msg.remote_chain_id,
        emergency_operator: api.addr_validate(&msg.emergency_operator)?,
        inturn_relayer_relay_interval: msg
            .inturn_relayer_relay_interval
            .unwrap_or(DEFAULT_INTURN_RELAYER_RELAY_INTERVAL),
    };
    CONFIG.save(deps.storage, &cfg)?;
    ADMIN.set(deps.branch(), maybe_addr(api, msg.admin)?)?;

    let mut res = Response::new().add_attribute("action", "instantiate");
    for channel in msg.channels {
        let handler = api.addr_validate(&channel.handler)?;
        register_channel(deps.storage, channel.channel_id, &handler)?;
        res = res.add_event(new_register_channel_event(channel.channel_id, &handler));
    }
    if let Some(consensus_state) = msg.consensus_state {
        let init = initialize(deps.branch(), &consensus_state)?;
        res = res.add_events(init.events);
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(res)
}

pub fn reply(deps: DepsMut, _env: Env, reply: Reply) -> Result<Response, ContractError> {
    match reply.id {
        REPLY_ID_RECEIVE_PACKAGE => handle_receive_reply(deps, reply.result, &reply.payload),
        _ => Err(ContractError::InvalidReplyId(reply.id)),
    }
}

pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<QueryResponse, ContractError> {
    match msg {
        QueryMsg::Config {} => Ok(to_json_binary(&CONFIG.load(deps.storage)?)?),
        QueryMsg::Admin {} => to_json_binary(&ADMIN.query_admin(deps)?).map_err(Into::into),
        QueryMsg::ConsensusState {} => Ok(to_json_binary(&queries::consensus_state(deps)?)?),
        QueryMsg::Height {} => Ok(to_json_binary(&queries::height(deps)?)?),
        QueryMsg::ValidatorSetHash {} => Ok(to_json_binary(&queries::validator_set_hash(deps)?)?),
        QueryMsg::Relayers {} => Ok(to_json_binary(&queries::relayers(deps)?)?),
        QueryMsg::InturnRelayer {} => Ok(to_json_binary(&queries::inturn_relayer(deps, env)?)?),
        QueryMsg::VerifyPackage {
            payload,
            signature,
            validator_bitmap,
        } => Ok(to_json_binary(&queries::verify_package(
            deps,
            payload,
            signature,
            validator_bitmap,
        )?)?),
        QueryMsg::ChannelSequence { channel_id } => Ok(to_json_binary(
            &queries::channel_sequence(deps, channel_id)?,
        )?),
        QueryMsg::OracleSequence {} => Ok(to_json_binary(&queries::oracle_sequence(deps)?)?),
        QueryMsg::Channels { start_after, limit } => Ok(to_json_binary(&queries::channels(
            deps,
            start_after,
            limit,
        )?)?),
        QueryMsg::Suspended {} => Ok(to_json_binary(&is_suspended(deps.storage)?)?),
    }
}

pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let prev_version = cw2::get_contract_version(deps.storage)?;
    if prev_version.contract != CONTRACT_NAME {
        return Err(ContractError::InvalidContractName {
            expected: CONTRACT_NAME.to_string(),
            actual: prev_version.contract,
        });
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", prev_version.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}

pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let api = deps.api;
    match msg {
        ExecuteMsg::UpdateAdmin { admin } => ADMIN
            .execute_update_admin(deps, info, maybe_addr(api, admin)?)
            .map_err(Into::into),
        ExecuteMsg::UpdateEmergencyOperator { emergency_operator } => {
            handle_update_emergency_operator(deps, info, emergency_operator)
        }
        ExecuteMsg::RegisterChannel {
            channel_id,
            handler,
        } => handle_register_channel(deps, info, channel_id, handler),
        ExecuteMsg::InitLightClient { consensus_state } => {
            handle_init_light_client(deps, info, consensus_state)
        }
        ExecuteMsg::SyncHeader {
            header,
            height,
            signature,
            validator_bitmap,
        } => handle_sync_header(deps, info, header, height, signature, validator_bitmap),
        ExecuteMsg::HandlePackage {
            payload,
            signature,
            validator_bitmap,
        } => handle_package(deps, info, payload, signature, validator_bitmap),
        ExecuteMsg::SendPackage {
            channel_id,
            package_type,
            payload,
        } => handle_send_package(deps, info, channel_id, package_type, payload),
        ExecuteMsg::EmergencyChangeSequence {
            target_oracle,
            channel_id,
            increase,
            receive_side,
            delta,
        } => handle_change_sequence(
            deps,
            info,
            target_oracle,
            channel_id,
            increase,
            receive_side,
            delta,
        ),
        ExecuteMsg::Suspend {} => handle_suspend(deps, info),
        ExecuteMsg::Reopen {} => handle_reopen(deps, info),
    }
}

fn handle_update_emergency_operator(
    deps: DepsMut,
    info: MessageInfo,
    emergency_operator: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;
    let mut cfg = CONFIG.load(deps.storage)?;
    cfg.emergency_operator = deps.api.addr_validate(&emergency_operator)?;
    CONFIG.save(deps.storage, &cfg)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "update_emergency_operator"),
        attr("emergency_operator", emergency_operator),
        attr("sender", info.sender),
    ]))
}

fn handle_register_channel(
    deps: DepsMut,
    info: MessageInfo,
    channel_id: u8,
    handler: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;
    let handler = deps.api.addr_validate(&handler)?;
    register_channel(deps.storage, channel_id, &handler)?;

    Ok(Response::new()
        .add_attribute("action", "register_channel")
        .add_event(new_register_channel_event(channel_id, &handler)))
}
