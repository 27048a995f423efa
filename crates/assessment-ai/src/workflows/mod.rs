pub mod gateway;
pub mod intake;
pub mod report;
pub mod scoring;
pub mod session;
