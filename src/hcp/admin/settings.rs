//! Admin settings models and API operations

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::hcp::helpers::valid_string;
use crate::hcp::jsonapi::RequestDocument;
use crate::hcp::TfeClient;

/// A singleton settings resource; `id` is the settings kind (e.g. "general")
#[derive(Deserialize, Debug, Clone)]
pub struct AdminSetting<A> {
    pub id: String,
    pub attributes: A,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct GeneralSettings {
    pub limit_user_organization_creation: bool,
    pub api_rate_limiting_enabled: bool,
    pub api_rate_limit: u32,
    pub send_passing_statuses_for_untriggered_speculative_plans: bool,
    pub allow_speculative_plans_on_pull_requests_from_forks: bool,
    pub default_remote_state_access: bool,
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct GeneralSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_user_organization_creation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_rate_limiting_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_rate_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_passing_statuses_for_untriggered_speculative_plans: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_speculative_plans_on_pull_requests_from_forks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_remote_state_access: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct CostEstimationSettings {
    pub enabled: bool,
    pub aws_access_key_id: Option<String>,
    pub aws_enabled: bool,
    pub aws_instance_profile_enabled: bool,
    pub gcp_enabled: bool,
    pub azure_enabled: bool,
    pub azure_client_id: Option<String>,
    pub azure_subscription_id: Option<String>,
    pub azure_tenant_id: Option<String>,
}

/// Secret fields are write-only and never echoed back
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CostEstimationSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_access_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_instance_profile_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcp_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcp_credentials: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_subscription_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_tenant_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct SamlSettings {
    pub enabled: bool,
    pub debug: bool,
    pub team_management_enabled: bool,
    pub authn_requests_signed: bool,
    pub want_assertions_signed: bool,
    pub idp_cert: Option<String>,
    pub old_idp_cert: Option<String>,
    pub slo_endpoint_url: Option<String>,
    pub sso_endpoint_url: Option<String>,
    pub attr_username: Option<String>,
    pub attr_groups: Option<String>,
    pub attr_site_admin: Option<String>,
    pub site_admin_role: Option<String>,
    pub sso_api_token_session_timeout: Option<u64>,
    pub acs_consumer_url: Option<String>,
    pub metadata_url: Option<String>,
    pub certificate: Option<String>,
    pub signature_signing_method: Option<String>,
    pub signature_digest_method: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SamlSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_management_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authn_requests_signed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub want_assertions_signed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slo_endpoint_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sso_endpoint_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attr_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attr_groups: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attr_site_admin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_admin_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sso_api_token_session_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_signing_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_digest_method: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SmtpAuthType {
    #[default]
    None,
    Plain,
    Login,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct SmtpSettings {
    pub enabled: bool,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub sender: Option<String>,
    pub auth: SmtpAuthType,
    pub username: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SmtpSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<SmtpAuthType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// The server sends a test message here before saving
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_email_address: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct TwilioSettings {
    pub enabled: bool,
    pub account_sid: Option<String>,
    pub from_number: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct TwilioSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_number: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "kebab-case")]
struct TwilioVerifyAttributes<'a> {
    test_number: &'a str,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct CustomizationSettings {
    pub support_email_address: Option<String>,
    pub login_help: Option<String>,
    pub footer: Option<String>,
    pub error: Option<String>,
    pub new_user: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CustomizationSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_user: Option<String>,
}

/// Admin settings service
pub struct AdminSettings<'a> {
    client: &'a TfeClient,
}

impl TfeClient {
    pub fn admin_settings(&self) -> AdminSettings<'_> {
        AdminSettings { client: self }
    }
}

fn settings_path(kind: &str) -> String {
    format!("/admin/{}-settings", kind)
}

impl AdminSettings<'_> {
    async fn read<A: DeserializeOwned>(&self, kind: &str) -> Result<AdminSetting<A>> {
        self.client.read_data(&settings_path(kind)).await
    }

    async fn update<A, U>(&self, kind: &str, options: &U) -> Result<AdminSetting<A>>
    where
        A: DeserializeOwned,
        U: Serialize,
    {
        debug!("Updating {} settings", kind);
        let body = RequestDocument::new(&format!("{}-settings", kind), options);
        self.client.update_data(&settings_path(kind), &body).await
    }

    pub async fn general(&self) -> Result<AdminSetting<GeneralSettings>> {
        self.read("general").await
    }

    pub async fn update_general(
        &self,
        options: &GeneralSettingsUpdate,
    ) -> Result<AdminSetting<GeneralSettings>> {
        self.update("general", options).await
    }

    pub async fn cost_estimation(&self) -> Result<AdminSetting<CostEstimationSettings>> {
        self.read("cost-estimation").await
    }

    pub async fn update_cost_estimation(
        &self,
        options: &CostEstimationSettingsUpdate,
    ) -> Result<AdminSetting<CostEstimationSettings>> {
        self.update("cost-estimation", options).await
    }

    pub async fn saml(&self) -> Result<AdminSetting<SamlSettings>> {
        self.read("saml").await
    }

    pub async fn update_saml(
        &self,
        options: &SamlSettingsUpdate,
    ) -> Result<AdminSetting<SamlSettings>> {
        self.update("saml", options).await
    }

    /// Drop the previous IdP certificate after a rotation
    pub async fn revoke_idp_cert(&self) -> Result<AdminSetting<SamlSettings>> {
        let path = format!("{}/actions/revoke-old-certificate", settings_path("saml"));
        self.client.post_for_data(&path).await
    }

    pub async fn smtp(&self) -> Result<AdminSetting<SmtpSettings>> {
        self.read("smtp").await
    }

    pub async fn update_smtp(
        &self,
        options: &SmtpSettingsUpdate,
    ) -> Result<AdminSetting<SmtpSettings>> {
        self.update("smtp", options).await
    }

    pub async fn twilio(&self) -> Result<AdminSetting<TwilioSettings>> {
        self.read("twilio").await
    }

    pub async fn update_twilio(
        &self,
        options: &TwilioSettingsUpdate,
    ) -> Result<AdminSetting<TwilioSettings>> {
        self.update("twilio", options).await
    }

    /// Send a test SMS through the configured Twilio account
    pub async fn verify_twilio(&self, test_number: &str) -> Result<()> {
        if !valid_string(Some(test_number)) {
            return Err(ValidationError::RequiredTestNumber.into());
        }
        let path = format!("{}/verify", settings_path("twilio"));
        let body = RequestDocument::new("twilio-settings", TwilioVerifyAttributes { test_number });
        self.client.post_body(&path, &body).await
    }

    pub async fn customization(&self) -> Result<AdminSetting<CustomizationSettings>> {
        self.read("customization").await
    }

    pub async fn update_customization(
        &self,
        options: &CustomizationSettingsUpdate,
    ) -> Result<AdminSetting<CustomizationSettings>> {
        self.update("customization", options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;
    use wiremock::matchers::{body_json, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_read_general_settings() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/admin/general-settings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "id": "general",
                    "type": "general-settings",
                    "attributes": {
                        "limit-user-organization-creation": true,
                        "api-rate-limiting-enabled": true,
                        "api-rate-limit": 30
                    }
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let settings = client.admin_settings().general().await.unwrap();
        assert_eq!(settings.id, "general");
        assert!(settings.attributes.limit_user_organization_creation);
        assert_eq!(settings.attributes.api_rate_limit, 30);
        assert!(!settings.attributes.default_remote_state_access);
    }

    #[tokio::test]
    async fn test_update_smtp_settings() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("PATCH"))
            .and(path("/admin/smtp-settings"))
            .and(body_json(serde_json::json!({
                "data": {
                    "type": "smtp-settings",
                    "attributes": {"enabled": true, "host": "smtp.example.com", "auth": "login"}
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "id": "smtp",
                    "type": "smtp-settings",
                    "attributes": {"enabled": true, "host": "smtp.example.com", "auth": "login"}
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let update = SmtpSettingsUpdate {
            enabled: Some(true),
            host: Some("smtp.example.com".into()),
            auth: Some(SmtpAuthType::Login),
            ..Default::default()
        };
        let settings = client.admin_settings().update_smtp(&update).await.unwrap();
        assert_eq!(settings.attributes.auth, SmtpAuthType::Login);
    }

    #[tokio::test]
    async fn test_verify_twilio() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/admin/twilio-settings/verify"))
            .and(body_partial_json(serde_json::json!({
                "data": {"attributes": {"test-number": "+15555550100"}}
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        client
            .admin_settings()
            .verify_twilio("+15555550100")
            .await
            .unwrap();

        let err = client.admin_settings().verify_twilio("").await.unwrap_err();
        assert!(matches!(
            err,
            TfeError::Validation(ValidationError::RequiredTestNumber)
        ));
    }

    #[tokio::test]
    async fn test_revoke_idp_cert() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/admin/saml-settings/actions/revoke-old-certificate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"id": "saml", "type": "saml-settings", "attributes": {"enabled": true}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let settings = client.admin_settings().revoke_idp_cert().await.unwrap();
        assert!(settings.attributes.enabled);
        assert!(settings.attributes.old_idp_cert.is_none());
    }

    #[tokio::test]
    async fn test_settings_forbidden_for_non_admin() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/admin/customization-settings"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let err = client.admin_settings().customization().await.unwrap_err();
        assert!(err.is_not_found());
    }
}
