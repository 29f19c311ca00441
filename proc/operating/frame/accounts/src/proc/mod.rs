pub mod account_service;
pub mod behavior;
pub mod status_service;
