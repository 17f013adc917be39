// Re-export key components
pub use crate::Error;
pub use crate::loading::{DatasetConfig, load_dataset};
pub use crate::model::{
    Line, LineId, LineStop, LineStopId, Stop, StopEvent, StopEventId, StopId, Trip, TripId,
    VehicleType,
};
pub use crate::query::{QueryId, QueryParams, QueryReport, run_all, run_query};
pub use crate::store::TransitStore;
