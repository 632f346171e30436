pub mod admin;
pub mod battle;
pub mod meal;
