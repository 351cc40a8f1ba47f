// Domain layer: the values read off MinKNOW responses and the ports the
// control flow talks through. Nothing here depends on the wire format.

pub mod model;
pub mod ports;
