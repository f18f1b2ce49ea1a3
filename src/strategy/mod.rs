pub mod arrivals;
pub mod service;
pub mod traits;
