pub mod bridge_tab_client;
pub mod file_storage_area;
pub mod storage_area;
pub mod tab_client;
