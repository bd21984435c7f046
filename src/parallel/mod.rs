mod cluster;
mod domain;
mod worker;

pub mod comm;
pub(crate) mod message;

pub use cluster::Cluster;
pub use comm::{Communicator, SingleProcess};
pub use domain::Domain;
pub use worker::build_pool;
