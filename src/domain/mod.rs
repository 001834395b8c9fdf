// Domain layer: the university record and the ports the screen talks through.

pub mod model;
pub mod ports;
