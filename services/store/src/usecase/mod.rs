pub mod access;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod dashboard;
pub mod order;
pub mod user;
