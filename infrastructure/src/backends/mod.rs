//! Backend adapters behind the catalog tools
//!
//! - [`SimulatedWarehouse`]: fixed-latency stock lookups (`WarehouseProbe`)
//! - [`HttpStatusCheck`]: GET against a status URL (`ServiceStatusPort`)

mod http_status;
mod warehouse;

pub use http_status::HttpStatusCheck;
pub use warehouse::SimulatedWarehouse;
