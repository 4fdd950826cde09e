pub mod authenticate;
pub mod health;
