pub mod drive;
pub mod temp;

pub use self::drive::{GoogleDriveRelay, ServiceAccountKey};
pub use self::temp::TempStore;
