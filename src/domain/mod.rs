// Domain layer: typed API records, output rows and the ports the pipelines depend on.

pub mod model;
pub mod ports;
