mod bucket_scanner;
mod tiering_service_impl;

pub use bucket_scanner::BucketScanner;
pub use tiering_service_impl::TieringServiceImpl;
