pub mod errors;
pub mod html;
pub mod json;
pub mod static_files;

pub use errors::{html_error_response, json_error_response, ResultResp};

// Normal HTML response
pub use html::{html_response, html_status_response};
pub use json::json_response;
pub use static_files::static_file_response;
