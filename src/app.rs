pub mod alert;
pub mod bootstrap;
pub mod controller;
pub mod presenter;
pub mod state;

pub use alert::{Alert, ErrorKind, Failure, Resolution};
pub use controller::{Delivery, SelectionController};
pub use presenter::{Presenter, QuoteView, Trend};
pub use state::{FetchStatus, Phase, SelectionState};
