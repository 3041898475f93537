pub mod deadline;
pub mod metrics;
pub mod retry;
