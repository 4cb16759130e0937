pub mod command;
pub mod employee;
pub mod probe;
pub mod report;
pub mod session;

pub use crate::domain::model::{FieldProbeResult, ProbeOutcome, ProbeTarget, Record};
pub use crate::domain::ports::{ConfigProvider, OdooRpc};
pub use crate::utils::error::Result;
