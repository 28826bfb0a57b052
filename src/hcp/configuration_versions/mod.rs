//! Configuration versions module

mod api;
mod models;

pub use api::ConfigurationVersions;
pub use models::{
    ConfigurationVersion, ConfigurationVersionAttributes, ConfigurationVersionCreateOptions,
    ConfigurationVersionLinks, ConfigurationVersionListOptions,
};
