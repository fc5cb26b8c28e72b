//! Text generation backends behind the `TextGenerator` capability.

pub mod cohere;
pub mod dummy;

pub use cohere::CohereClient;
pub use dummy::DummyGenerator;

pub mod prelude {
    pub use pulse_core::{GenerationOptions, Result, TextGenerator};
}
