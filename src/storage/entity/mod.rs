pub mod character_row;
pub mod relic_row;
