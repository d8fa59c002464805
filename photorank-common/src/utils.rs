pub mod fsutils;
pub mod percent;
