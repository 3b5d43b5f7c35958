pub mod adducts;
pub mod annotation;
pub mod lipid;
pub mod peak;

pub use adducts::AdductShift;
pub use adducts::AdductTable;
pub use adducts::AdductTables;
pub use adducts::IonizationMode;
pub use annotation::Annotation;
pub use lipid::Lipid;
pub use peak::Peak;
