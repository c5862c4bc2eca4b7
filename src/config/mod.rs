pub mod ini;
pub mod values;
