pub mod bucket_roster_store;
pub mod fs_roster_store;

pub use bucket_roster_store::BucketRosterStore;
pub use fs_roster_store::FsRosterStore;
