//! Wire format of Greenfield cross-chain packages.
//!
//! A relayed message is an [`Envelope`] wrapping a [`Package`]; the package payload
//! is a single RLP item whose schema is defined per channel (see [`channel`]).

pub mod channel;
pub mod envelope;
pub mod error;
pub mod package;

pub use envelope::{Envelope, ENVELOPE_PREFIX_LEN};
pub use error::CodecError;
pub use package::{check_payload, Package, PackageType, PACKAGE_HEADER_LEN};
