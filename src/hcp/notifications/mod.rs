//! Notification configurations module

mod api;
mod models;

pub use api::NotificationConfigurations;
pub use models::{
    triggers, DeliveryResponse, DestinationType, NotificationConfiguration,
    NotificationConfigurationAttributes, NotificationConfigurationCreateOptions,
    NotificationConfigurationRelationships, NotificationConfigurationUpdateOptions,
};
