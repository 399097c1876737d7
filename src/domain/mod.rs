// Domain layer: value types, wire payloads and ports. No I/O.

pub mod model;
pub mod ports;
