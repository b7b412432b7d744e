use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::location::repo::SeaOrmLocationRepository;
use service::shift::repo::SeaOrmShiftRepository;
use service::worker::repo::SeaOrmWorkerRepository;
use service::{LocationService, ShiftService, WorkerService};

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub workers: Arc<WorkerService<SeaOrmWorkerRepository>>,
    pub locations: Arc<LocationService<SeaOrmLocationRepository>>,
    pub shifts: Arc<ShiftService<SeaOrmShiftRepository>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            workers: Arc::new(WorkerService::new(Arc::new(SeaOrmWorkerRepository { db: db.clone() }))),
            locations: Arc::new(LocationService::new(Arc::new(SeaOrmLocationRepository { db: db.clone() }))),
            shifts: Arc::new(ShiftService::new(Arc::new(SeaOrmShiftRepository { db }))),
        }
    }
}
