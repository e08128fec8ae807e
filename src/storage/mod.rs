pub mod db;
mod enrollments;
pub mod models;
mod profiles;
mod tables;

pub use db::{Database, DatabaseError};
pub use tables::*;
