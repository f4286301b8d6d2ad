pub mod health;
pub mod thefts;
