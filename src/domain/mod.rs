// Domain layer: the probe's data model and the ports it talks through.

pub mod model;
pub mod ports;
