//! Social-platform backends behind the `Publisher` capability.

pub mod dummy;
pub mod x_api;

pub use dummy::{DummyPublisher, ScriptedOutcome};
pub use x_api::XApiClient;

pub mod prelude {
    pub use pulse_core::{PostReceipt, Publisher, Result};
}
