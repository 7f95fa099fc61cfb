//! Data models for GearLog

pub mod enums;
pub mod equipment;
pub mod import_report;
pub mod movement;

// Re-export commonly used types
pub use enums::{CanonicalStatus, Condition, EventType, FilterBucket, TagState};
pub use equipment::{CreateEquipment, EnrichedEquipment, Equipment, EquipmentUpdate, UpdateEquipment};
pub use import_report::{ImportAction, ImportReport, ImportRowResult};
pub use movement::{CreateMovement, Movement};
