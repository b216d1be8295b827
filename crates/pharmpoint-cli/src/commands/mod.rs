pub mod batch;
pub mod derive;
