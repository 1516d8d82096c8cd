//! Client-side state for the unit map and the import pipeline that feeds it.

mod events;
pub mod flags;
mod import;
mod stats;
mod store;

pub use events::{event_channel, ChannelClosed, EventSender, StoreEvent};
pub use flags::{derive_flags, unit_from_record, unit_id};
pub use import::{ImportError, ImportPipeline, ImportProgress, ImportReport, ImportStage};
pub use stats::{MunicipalityStats, StoreStats};
pub use store::{StoreError, UnitStore};
