use cosmwasm_std::StdError;
use cw_controllers::AdminError;
use cw_utils::PaymentError;
use gnfd_codec::CodecError;
use gnfd_light_client::LightClientError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),
    #[error(transparent)]
    Admin(#[from] AdminError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error("Malformed package: {0}")]
    Codec(#[from] CodecError),
    #[error(transparent)]
    LightClient(#[from] LightClientError),
    #[error("Package proof rejected: {0}")]
    ProofRejected(LightClientError),
    #[error("Light client is already initialized")]
    AlreadyInitialized {},
    #[error("Light client is not initialized")]
    NotInitialized {},
    #[error("Local and remote chain ids must differ")]
    SameChainIds {},
    #[error("In-turn relayer relay interval must be greater than 0")]
    ZeroRelayInterval {},
    #[error("In-turn relayer window ends past the last representable time")]
    RelayWindowOverflow {},
    #[error("Channel {0} is listed more than once")]
    DuplicateChannel(u8),
    #[error("Package routed from chain {src_chain_id} to {dst_chain_id}, expected {expected_src_chain_id} to {expected_dst_chain_id}")]
    ChainIdMismatch {
        src_chain_id: u16,
        dst_chain_id: u16,
        expected_src_chain_id: u16,
        expected_dst_chain_id: u16,
    },
    #[error("Channel {channel_id} expects sequence {expected}, got {actual}")]
    SequenceMismatch {
        channel_id: u8,
        expected: u64,
        actual: u64,
    },
    #[error("Expected oracle sequence {expected}, got {actual}")]
    OracleSequenceMismatch { expected: u64, actual: u64 },
    #[error("No handler registered for channel {0}")]
    UnknownChannel(u8),
    #[error("Channel {0} is already registered")]
    ChannelAlreadyRegistered(u8),
    #[error("Sender is not the handler of channel {channel_id}")]
    UnauthorizedHandler { channel_id: u8 },
    #[error("Sender is not the {role}")]
    Unauthorized { role: &'static str },
    #[error("Cross-chain communication is suspended")]
    Suspended {},
    #[error("Cross-chain communication is not suspended")]
    NotSuspended {},
    #[error("Sequence change delta must be greater than 0")]
    ZeroDelta {},
    #[error("Sequence change would go below 0")]
    SequenceUnderflow {},
    #[error("Sequence change would overflow")]
    SequenceOverflow {},
    #[error("Invalid reply id: {0}")]
    InvalidReplyId(u64),
    #[error("Invalid contract name, expected {expected}, got {actual}")]
    InvalidContractName { expected: String, actual: String },
}
