pub mod build;
pub mod config;
pub mod dispatch;
pub mod search;
pub mod serve;
pub mod show;
pub mod site;
pub mod status;
