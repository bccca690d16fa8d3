pub mod histogram;
pub mod io;
pub mod network;
pub mod proposer;
pub mod rng;
pub mod sampler;
pub mod stats;
