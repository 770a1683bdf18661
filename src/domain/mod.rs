// Domain layer: models, the composed query language, and ports (interfaces).

pub mod catalog;
pub mod model;
pub mod ports;
pub mod query;
