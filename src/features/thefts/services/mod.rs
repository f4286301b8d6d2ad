mod theft_service;

pub use theft_service::TheftService;
