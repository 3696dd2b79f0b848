pub mod consumer;
pub mod dispatcher;
pub mod generator;
pub mod worker;

pub use dispatcher::{DispatchError, InsightDispatcher, InsightJob};
