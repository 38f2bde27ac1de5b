pub mod health;
pub mod revenue;
pub mod stripe;
