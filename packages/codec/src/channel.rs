//! Well-known channels of the Greenfield bridge and the RLP payloads they carry.
//!
//! The router never looks inside a payload. These types exist so that handler
//! contracts on both sides agree on a single encoding.

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

use crate::error::Result;
use crate::package::check_payload;

pub const TRANSFER_IN_CHANNEL: u8 = 0x01;
pub const TRANSFER_OUT_CHANNEL: u8 = 0x02;
pub const GOV_CHANNEL: u8 = 0x03;
pub const BUCKET_CHANNEL: u8 = 0x04;
pub const OBJECT_CHANNEL: u8 = 0x05;
pub const GROUP_CHANNEL: u8 = 0x06;
pub const PERMISSION_CHANNEL: u8 = 0x07;
pub const MULTI_MESSAGE_CHANNEL: u8 = 0x08;
pub const GNFD_EXECUTOR_CHANNEL: u8 = 0x09;

pub const ALL_CHANNELS: [u8; 9] = [
    TRANSFER_IN_CHANNEL,
    TRANSFER_OUT_CHANNEL,
    GOV_CHANNEL,
    BUCKET_CHANNEL,
    OBJECT_CHANNEL,
    GROUP_CHANNEL,
    PERMISSION_CHANNEL,
    MULTI_MESSAGE_CHANNEL,
    GNFD_EXECUTOR_CHANNEL,
];

pub fn channel_name(channel_id: u8) -> Option<&'static str> {
    let name = match channel_id {
        TRANSFER_IN_CHANNEL => "transfer_in",
        TRANSFER_OUT_CHANNEL => "transfer_out",
        GOV_CHANNEL => "gov",
        BUCKET_CHANNEL => "bucket",
        OBJECT_CHANNEL => "object",
        GROUP_CHANNEL => "group",
        PERMISSION_CHANNEL => "permission",
        MULTI_MESSAGE_CHANNEL => "multi_message",
        GNFD_EXECUTOR_CHANNEL => "gnfd_executor",
        _ => return None,
    };
    Some(name)
}

pub const ADDRESS_LEN: usize = 20;

/// Status codes carried by acknowledgement payloads.
pub const STATUS_SUCCESS: u32 = 0;
pub const STATUS_FAILED: u32 = 1;
pub const STATUS_UNEXPECTED: u32 = 2;

pub type EvmAddress = [u8; ADDRESS_LEN];

fn address_at(rlp: &Rlp<'_>, index: usize) -> std::result::Result<EvmAddress, DecoderError> {
    let bytes: Vec<u8> = rlp.val_at(index)?;
    bytes
        .try_into()
        .map_err(|_| DecoderError::Custom("address must be 20 bytes"))
}

fn expect_list(rlp: &Rlp<'_>, len: usize) -> std::result::Result<(), DecoderError> {
    if rlp.item_count()? != len {
        return Err(DecoderError::RlpIncorrectListLen);
    }
    Ok(())
}

/// Moves `amount` of the native token to `recipient`. Both transfer channels
/// use it for their `Syn` packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPackage {
    pub amount: u128,
    pub recipient: EvmAddress,
    pub refund_address: EvmAddress,
}

impl Encodable for TransferPackage {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3);
        s.append(&self.amount);
        s.append(&self.recipient.to_vec());
        s.append(&self.refund_address.to_vec());
    }
}

impl Decodable for TransferPackage {
    fn decode(rlp: &Rlp<'_>) -> std::result::Result<Self, DecoderError> {
        expect_list(rlp, 3)?;
        Ok(Self {
            amount: rlp.val_at(0)?,
            recipient: address_at(rlp, 1)?,
            refund_address: address_at(rlp, 2)?,
        })
    }
}

/// Acknowledgement of a [`TransferPackage`] that could not be (fully) credited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundPackage {
    pub refund_amount: u128,
    pub refund_address: EvmAddress,
    pub status: u32,
}

impl Encodable for RefundPackage {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3);
        s.append(&self.refund_amount);
        s.append(&self.refund_address.to_vec());
        s.append(&self.status);
    }
}

impl Decodable for RefundPackage {
    fn decode(rlp: &Rlp<'_>) -> std::result::Result<Self, DecoderError> {
        expect_list(rlp, 3)?;
        Ok(Self {
            refund_amount: rlp.val_at(0)?,
            refund_address: address_at(rlp, 1)?,
            status: rlp.val_at(2)?,
        })
    }
}

/// Resource lifecycle command (bucket, object, group and permission channels).
/// `data` is the operation specific body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdPackage {
    pub operation: u8,
    pub data: Vec<u8>,
}

impl Encodable for CmdPackage {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(2);
        s.append(&self.operation);
        s.append(&self.data);
    }
}

impl Decodable for CmdPackage {
    fn decode(rlp: &Rlp<'_>) -> std::result::Result<Self, DecoderError> {
        expect_list(rlp, 2)?;
        Ok(Self {
            operation: rlp.val_at(0)?,
            data: rlp.val_at(1)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdAckPackage {
    pub status: u32,
    pub operation: u8,
    pub resource_id: u128,
    pub extra_data: Vec<u8>,
}

impl Encodable for CmdAckPackage {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4);
        s.append(&self.status);
        s.append(&self.operation);
        s.append(&self.resource_id);
        s.append(&self.extra_data);
    }
}

impl Decodable for CmdAckPackage {
    fn decode(rlp: &Rlp<'_>) -> std::result::Result<Self, DecoderError> {
        expect_list(rlp, 4)?;
        Ok(Self {
            status: rlp.val_at(0)?,
            operation: rlp.val_at(1)?,
            resource_id: rlp.val_at(2)?,
            extra_data: rlp.val_at(3)?,
        })
    }
}

/// Governance parameter change. `values[i]` applies to `targets[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamChangePackage {
    pub key: String,
    pub values: Vec<Vec<u8>>,
    pub targets: Vec<Vec<u8>>,
}

impl Encodable for ParamChangePackage {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3);
        s.append(&self.key);
        s.append_list::<Vec<u8>, _>(&self.values);
        s.append_list::<Vec<u8>, _>(&self.targets);
    }
}

impl Decodable for ParamChangePackage {
    fn decode(rlp: &Rlp<'_>) -> std::result::Result<Self, DecoderError> {
        expect_list(rlp, 3)?;
        let values: Vec<Vec<u8>> = rlp.list_at(1)?;
        let targets: Vec<Vec<u8>> = rlp.list_at(2)?;
        if values.len() != targets.len() {
            return Err(DecoderError::Custom("values and targets differ in length"));
        }
        Ok(Self {
            key: rlp.val_at(0)?,
            values,
            targets,
        })
    }
}

pub fn encode_payload<T: Encodable>(value: &T) -> Vec<u8> {
    rlp::encode(value).to_vec()
}

/// Decodes a typed payload, rejecting anything that is not exactly one RLP item.
pub fn decode_payload<T: Decodable>(payload: &[u8]) -> Result<T> {
    check_payload(payload)?;
    Ok(rlp::decode(payload)?)
}
