pub mod coerce;
pub mod objectives;
pub mod stats;
pub mod team;
