pub mod api;
pub mod config;
pub mod consts;
pub mod data_url;
pub mod error;
pub mod mapping;
pub mod search;
pub mod status;
pub mod viewer;
