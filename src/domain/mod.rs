// Domain layer: catalog models and the ports the corrector drives.

pub mod model;
pub mod ports;
