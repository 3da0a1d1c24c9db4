//! Messages exchanged between the cross-chain router contract and the handler
//! contracts registered on its channels.

pub mod handler_api;
pub mod router_api;

pub use gnfd_codec::PackageType;
pub use handler_api::HandlerExecuteMsg;
pub use router_api::{RouterExecuteMsg, SendPackageResponse};
