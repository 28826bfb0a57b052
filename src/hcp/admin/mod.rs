//! Site administration (Terraform Enterprise only)
//!
//! Settings live at `/admin/<kind>-settings` as singleton resources; every
//! request needs a site-admin token.

mod organizations;
mod settings;

pub use organizations::{
    AdminOrganization, AdminOrganizationAttributes, AdminOrganizationListOptions,
    AdminOrganizationUpdateOptions, AdminOrganizations,
};
pub use settings::{
    AdminSetting, AdminSettings, CostEstimationSettings, CostEstimationSettingsUpdate,
    CustomizationSettings, CustomizationSettingsUpdate, GeneralSettings, GeneralSettingsUpdate,
    SamlSettings, SamlSettingsUpdate, SmtpAuthType, SmtpSettings, SmtpSettingsUpdate,
    TwilioSettings, TwilioSettingsUpdate,
};
