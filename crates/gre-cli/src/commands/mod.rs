pub mod auth;
pub mod customers;
pub mod sales_people;
pub mod sessions;
