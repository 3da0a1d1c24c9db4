/// Router messages / API
/// The subset of the router's execute interface available to handler contracts.
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Binary, CosmosMsg, StdResult, WasmMsg};

use gnfd_codec::PackageType;

#[cw_serde]
pub enum RouterExecuteMsg {
    /// Queues an outbound package. Only the handler registered for `channel_id`
    /// may send on it.
    SendPackage {
        channel_id: u8,
        package_type: PackageType,
        payload: Binary,
    },
}

impl RouterExecuteMsg {
    pub fn into_cosmos_msg(self, router: impl Into<String>) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: router.into(),
            msg: to_json_binary(&self)?,
            funds: vec![],
        }
        .into())
    }
}

/// Data set on the response of `SendPackage`.
#[cw_serde]
pub struct SendPackageResponse {
    /// Channel sequence assigned to the package
    pub sequence: u64,
    pub oracle_sequence: u64,
}
