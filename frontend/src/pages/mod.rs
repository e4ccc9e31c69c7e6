pub mod dashboard;
pub mod home;
pub mod login;
pub mod products;
pub mod sign_up;
