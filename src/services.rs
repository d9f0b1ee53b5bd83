pub mod measurement_service;
pub mod station_service;

pub use measurement_service::{DateWindow, MeasurementService, ServiceError};
pub use station_service::StationService;
