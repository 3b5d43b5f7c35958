// Re-export main structures
pub use crate::models::adducts::{AdductShift, AdductTable, AdductTables, IonizationMode};
pub use crate::models::annotation::{Annotation, MZ_TOLERANCE, UNKNOWN_ADDUCT};
pub use crate::models::lipid::{head_group_rank, Lipid};
pub use crate::models::peak::Peak;

// Declare modules
pub mod errors;
pub mod models;
pub mod utils;
