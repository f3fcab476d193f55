pub mod invocation;
pub mod orchestrator;
