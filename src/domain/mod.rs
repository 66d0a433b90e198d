// Domain layer: feed schemas and the storage port. No I/O here.

pub mod model;
pub mod ports;
