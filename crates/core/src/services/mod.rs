pub mod chart_service;
pub mod update_service;
