pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod spec;
pub mod store;
pub mod task;
pub mod templates;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use controller::TaskController;
pub use error::{Result, SpecflowError};
pub use spec::{SpecId, Specification};
pub use store::{SpecStore, StoreSnapshot};
pub use types::Status;
