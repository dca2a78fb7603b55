mod tiering_service;

pub use tiering_service::TieringService;
