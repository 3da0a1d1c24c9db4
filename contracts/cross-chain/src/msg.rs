use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint256};
use gnfd_codec::PackageType;
use gnfd_light_client::Validator;

use crate::error::ContractError;
#[cfg(not(target_arch = "wasm32"))]
use {
    crate::state::config::Config, crate::state::sequence::Sequences,
    cw_controllers::AdminResponse,
};

#[cw_serde]
pub struct ChannelInit {
    pub channel_id: u8,
    /// Contract receiving the channel's inbound packages
    pub handler: String,
}

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: Option<String>,
    /// Identity allowed to repair sequences and suspend the bridge
    pub emergency_operator: String,
    pub local_chain_id: u16,
    pub remote_chain_id: u16,
    /// Seconds each relayer stays in turn. Defaults to 1800
    pub inturn_relayer_relay_interval: Option<u64>,
    /// Encoded trusted consensus state. The light client can also be initialized
    /// later by the admin through `InitLightClient`
    pub consensus_state: Option<Binary>,
    pub channels: Vec<ChannelInit>,
}

impl InstantiateMsg {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.local_chain_id == self.remote_chain_id {
            return Err(ContractError::SameChainIds {});
        }
        if self.inturn_relayer_relay_interval == Some(0) {
            return Err(ContractError::ZeroRelayInterval {});
        }
        let mut seen = [false; 256];
        for channel in &self.channels {
            let slot = &mut seen[channel.channel_id as usize];
            if *slot {
                return Err(ContractError::DuplicateChannel(channel.channel_id));
            }
            *slot = true;
        }
        Ok(())
    }
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Change the admin
    UpdateAdmin { admin: Option<String> },
    /// Change the emergency operator. Admin only
    UpdateEmergencyOperator { emergency_operator: String },
    /// Bind a handler to a channel that has none yet. Admin only
    RegisterChannel { channel_id: u8, handler: String },
    /// Set the trusted consensus state, if instantiation did not. Admin only
    InitLightClient { consensus_state: Binary },
    /// Advance the light client to `height`.
    ///
    /// Only the relayers of the current validator set can sync headers, and `header`
    /// must carry a quorum signature of that set, in the same form as `HandlePackage`
    SyncHeader {
        header: Binary,
        height: u64,
        signature: Binary,
        validator_bitmap: Uint256,
    },
    /// Deliver an inbound package.
    ///
    /// `payload` is the encoded envelope, `signature` the aggregate BLS signature of
    /// the validators selected by `validator_bitmap` (bit `i` for validator `i`)
    HandlePackage {
        payload: Binary,
        signature: Binary,
        validator_bitmap: Uint256,
    },
    /// Queue an outbound package. Only the handler registered for `channel_id`.
    /// The response data is a `gnfd_apis::SendPackageResponse`
    SendPackage {
        channel_id: u8,
        package_type: PackageType,
        payload: Binary,
    },
    /// Move a stuck sequence by `delta`. Emergency operator only
    EmergencyChangeSequence {
        /// Change the oracle sequence instead of a channel sequence
        target_oracle: bool,
        /// Ignored when `target_oracle` is set
        channel_id: u8,
        increase: bool,
        receive_side: bool,
        delta: u64,
    },
    /// Stop relaying in both directions. Emergency operator only
    Suspend {},
    /// Resume after `Suspend`. Emergency operator only
    Reopen {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    /// Returns the current admin of the contract.
    #[returns(AdminResponse)]
    Admin {},
    #[returns(ConsensusStateResponse)]
    ConsensusState {},
    /// Height of the last synced remote header
    #[returns(u64)]
    Height {},
    #[returns(Binary)]
    ValidatorSetHash {},
    /// Relayers of the current validator set, in validator order
    #[returns(RelayersResponse)]
    Relayers {},
    /// The relayer whose turn window contains the current block time
    #[returns(InturnRelayerResponse)]
    InturnRelayer {},
    /// Checks a proof bundle against the current validator set. Fails with the
    /// rejection reason
    #[returns(VerifyPackageResponse)]
    VerifyPackage {
        payload: Binary,
        signature: Binary,
        validator_bitmap: Uint256,
    },
    /// Next send / receive sequence of a channel
    #[returns(Sequences)]
    ChannelSequence { channel_id: u8 },
    #[returns(Sequences)]
    OracleSequence {},
    #[returns(ChannelsResponse)]
    Channels {
        start_after: Option<u8>,
        limit: Option<u32>,
    },
    #[returns(bool)]
    Suspended {},
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct ConsensusStateResponse {
    pub chain_id: String,
    pub height: u64,
    pub validator_set_hash: Binary,
    pub next_validator_set_hash: Binary,
    pub validators: Vec<Validator>,
}

#[cw_serde]
pub struct RelayersResponse {
    pub relayers: Vec<Addr>,
}

#[cw_serde]
pub struct InturnRelayerResponse {
    pub relayer: Addr,
    /// Window bounds, in seconds
    pub start: u64,
    pub end: u64,
}

#[cw_serde]
pub struct VerifyPackageResponse {
    pub signers: u32,
    pub signed_power: u64,
    pub total_power: u64,
}

#[cw_serde]
pub struct ChannelInfo {
    pub channel_id: u8,
    pub handler: Addr,
}

#[cw_serde]
pub struct ChannelsResponse {
    pub channels: Vec<ChannelInfo>,
}
