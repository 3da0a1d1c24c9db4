use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{Deps, DepsMut, Env, MessageInfo, QueryResponse, Reply, Response};

mod access;
mod emergency;
mod light_client;
mod router;

pub mod contract;
pub mod error;
pub mod events;
pub mod msg;
pub mod queries;
pub mod state;

#[cfg(test)]
mod multitest;

#[macro_export]
macro_rules! cc_debug {
    // Generic version (cc_debug!(deps, "router", "..."))
    ($deps:expr, $prefix:expr, $msg:expr) => {
        $deps
            .api
            .debug(&format!("contracts::cross-chain::{}: {}", $prefix, $msg))
    };
    // With error (cc_debug!(deps, "router", "handler failed", e))
    ($deps:expr, $prefix:expr, $msg:expr, $e:expr) => {
        $deps.api.debug(&format!(
            "contracts::cross-chain::{}: {}: {:?}",
            $prefix, $msg, $e
        ))
    };
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    contract::instantiate(deps, env, info, msg)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, reply: Reply) -> Result<Response, ContractError> {
    contract::reply(deps, env, reply)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<QueryResponse, ContractError> {
    contract::query(deps, env, msg)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, env: Env, msg: MigrateMsg) -> Result<Response, ContractError> {
    contract::migrate(deps, env, msg)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    contract::execute(deps, env, info, msg)
}
