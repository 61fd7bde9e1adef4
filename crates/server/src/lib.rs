pub mod errors;
pub mod routes;
pub mod startup;
pub mod state;
pub mod viewer;

pub use startup::serve;
