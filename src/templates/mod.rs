pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{card, form_errors, listing_table, status_message};
pub use layouts::desktop::desktop_layout;
