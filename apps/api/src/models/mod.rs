pub mod customer;
pub mod signal;
pub mod team;
