pub mod health;
pub mod shifts;
