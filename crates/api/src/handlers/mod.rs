pub mod home;
pub mod person;
pub mod schema;
