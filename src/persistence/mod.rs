pub mod files;
pub mod store;

pub use files::{db_path, ensure_data_dir, get_data_dir, init_local_dir, DB_FILE};
pub use store::TaskStore;
