pub mod scrollmark_config;
