pub mod error;
pub mod home;
pub mod listing_detail;
pub mod listing_forms;
pub mod price_search;
pub mod search_id;
pub mod search_name;
pub mod view_data;

pub use error::{error_page, not_found_page};
pub use home::home_page;
pub use listing_detail::listing_detail_page;
pub use listing_forms::{add_listing_page, delete_listing_page, update_listing_page, ListingFormVm};
pub use price_search::{price_search_page, PriceSearchVm};
pub use search_id::{search_id_page, SearchIdVm};
pub use search_name::{search_name_page, SearchNameVm};
pub use view_data::view_data_page;
