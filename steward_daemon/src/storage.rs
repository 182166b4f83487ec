pub mod fs_kv_store;
pub mod kv_store;
