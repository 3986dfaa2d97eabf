pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod partition;
pub mod integrator;
pub mod snapshot;
pub mod channel;
pub mod driver;
pub mod scenario;
