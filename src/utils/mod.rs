pub mod filename;
pub mod url_validator;

pub use filename::sanitize_filename;
pub use url_validator::validate_url;
