pub mod sdk;
pub mod funding_floor;
