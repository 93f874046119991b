//! Fixed fallback images, one per failure class.

pub const NO_API_KEY: &str = "https://via.placeholder.com/500x750?text=No+API+Key";
pub const NO_POSTER: &str = "https://via.placeholder.com/500x750?text=No+Poster";
pub const CONNECTION_ERROR: &str = "https://via.placeholder.com/500x750?text=Connection+Error";
pub const TIMEOUT: &str = "https://via.placeholder.com/500x750?text=Timeout";
pub const ERROR: &str = "https://via.placeholder.com/500x750?text=Error";
