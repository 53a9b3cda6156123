pub mod healthscribe;
pub mod observability;
pub mod persistence;
