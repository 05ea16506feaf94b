// Domain layer: records and the repository ports the services depend on.

pub mod model;
pub mod ports;
