pub mod analysis;
pub mod observation;
