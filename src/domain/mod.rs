pub mod listing;
pub mod price;
pub mod repository;
pub mod validation;
