pub mod campaign;
pub mod catalog;
pub mod health;
pub mod media;
