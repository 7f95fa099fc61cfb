//! Business logic layer

pub mod derive;
pub mod equipment;
pub mod inventory;
pub mod movements;

use std::time::Duration;

use crate::{config::DataConfig, repository::Repository};

pub use equipment::EquipmentService;
pub use inventory::InventoryService;
pub use movements::MovementsService;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: EquipmentService,
    pub inventory: InventoryService,
    pub movements: MovementsService,
}

impl Services {
    pub fn new(repository: Repository, data: &DataConfig) -> Self {
        Self {
            equipment: EquipmentService::new(
                repository.clone(),
                data.default_tag_threshold_days,
            ),
            inventory: InventoryService::new(
                repository.clone(),
                Duration::from_millis(data.read_timeout_ms),
            ),
            movements: MovementsService::new(repository),
        }
    }
}
