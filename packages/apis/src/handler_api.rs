/// Handler messages / API
/// Every contract registered as a channel handler must accept `HandlerExecuteMsg`.
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Binary, CosmosMsg, StdResult, WasmMsg};

use gnfd_codec::PackageType;

#[cw_serde]
pub enum HandlerExecuteMsg {
    /// Delivers an inbound package whose proof and sequence were already checked.
    ///
    /// Returning an error rejects the package: the router keeps it consumed, reverts
    /// the handler's state and, for `Syn` packages, answers the remote chain with a
    /// `FailAck` carrying the original payload.
    ReceivePackage {
        channel_id: u8,
        package_type: PackageType,
        sequence: u64,
        /// RLP encoded, channel specific payload
        payload: Binary,
    },
}

impl HandlerExecuteMsg {
    pub fn into_cosmos_msg(self, handler: impl Into<String>) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: handler.into(),
            msg: to_json_binary(&self)?,
            funds: vec![],
        }
        .into())
    }
}
