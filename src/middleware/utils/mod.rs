pub mod cookie_utils;
pub mod extractor_utils;
