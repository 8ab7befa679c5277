pub mod error;
pub mod messages;
pub mod url;

pub use error::{
    extract_language, handle_domain_error, handle_validation_errors, json_error_handler,
    not_found, path_error_handler,
};
pub use url::construct_full_url;
