use crate::db::{DbError, Station, StationRepository};

#[derive(Clone)]
pub struct StationService {
    station_repo: StationRepository,
}

impl StationService {
    pub fn new(station_repo: StationRepository) -> Self {
        Self { station_repo }
    }

    /// Every station code in the dataset
    pub async fn list_station_codes(&self) -> Result<Vec<String>, DbError> {
        self.station_repo.find_all_codes().await
    }

    /// Station records including name, coordinates and elevation
    pub async fn list_stations(&self) -> Result<Vec<Station>, DbError> {
        self.station_repo.find_all().await
    }
}
