pub mod error;
pub mod locate_postal_code;
