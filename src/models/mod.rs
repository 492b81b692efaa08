pub mod booking;
pub mod budget;
pub mod chat;
pub mod expense;
pub mod knowledge;
pub mod plan;
pub mod trip;
pub mod user;
