use std::fmt;

/// Client-side validation failures, raised before any request is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    RequiredName,
    InvalidName,
    InvalidOrg,
    InvalidWorkspaceId,
    InvalidWorkspaceValue,
    RequiredWorkspace,
    RequiredWorkspacesList,
    InvalidProjectId,
    RequiredProject,
    InvalidRunId,
    InvalidPlanId,
    InvalidApplyId,
    InvalidConfigVersionId,
    InvalidStateVersionId,
    InvalidOutputId,
    InvalidVariableId,
    InvalidVariableSetId,
    RequiredKey,
    RequiredCategory,
    InvalidPolicyId,
    InvalidPolicySetId,
    RequiredPolicies,
    RequiredQuery,
    InvalidPolicyCheckId,
    InvalidTeamId,
    InvalidTeamAccessId,
    RequiredAccess,
    RequiredUsernames,
    RequiredEmail,
    InvalidMembershipId,
    InvalidOAuthClientId,
    InvalidOAuthTokenId,
    RequiredServiceProvider,
    RequiredApiUrl,
    RequiredHttpUrl,
    RequiredOAuthToken,
    InvalidSshKeyId,
    RequiredValue,
    InvalidNotificationConfigId,
    RequiredDestinationType,
    RequiredEnabled,
    RequiredUrl,
    InvalidNotificationTrigger,
    InvalidRunTriggerId,
    RequiredSourceable,
    InvalidRunTriggerType,
    InvalidAgentPoolId,
    InvalidAgentTokenId,
    RequiredDescription,
    InvalidTagId,
    RequiredTags,
    InvalidCommentId,
    RequiredBody,
    InvalidStackId,
    RequiredVcsRepo,
    InvalidEmail,
    RequiredSerial,
    RequiredMd5,
    RequiredState,
    RequiredAgentPoolId,
    RequiredAgentMode,
    BothTriggerPatternsAndPrefixes,
    RequiredTestNumber,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationError::RequiredName => "name is required",
            ValidationError::InvalidName => "invalid value for name",
            ValidationError::InvalidOrg => "invalid value for organization",
            ValidationError::InvalidWorkspaceId => "invalid value for workspace ID",
            ValidationError::InvalidWorkspaceValue => "invalid value for workspace",
            ValidationError::RequiredWorkspace => "workspace is required",
            ValidationError::RequiredWorkspacesList => "no workspaces list provided",
            ValidationError::InvalidProjectId => "invalid value for project ID",
            ValidationError::RequiredProject => "project is required",
            ValidationError::InvalidRunId => "invalid value for run ID",
            ValidationError::InvalidPlanId => "invalid value for plan ID",
            ValidationError::InvalidApplyId => "invalid value for apply ID",
            ValidationError::InvalidConfigVersionId => {
                "invalid value for configuration version ID"
            }
            ValidationError::InvalidStateVersionId => "invalid value for state version ID",
            ValidationError::InvalidOutputId => "invalid value for state version output ID",
            ValidationError::InvalidVariableId => "invalid value for variable ID",
            ValidationError::InvalidVariableSetId => "invalid value for variable set ID",
            ValidationError::RequiredKey => "key is required",
            ValidationError::RequiredCategory => "category is required",
            ValidationError::InvalidPolicyId => "invalid value for policy ID",
            ValidationError::InvalidPolicySetId => "invalid value for policy set ID",
            ValidationError::RequiredPolicies => "policies is required",
            ValidationError::RequiredQuery => "query cannot be empty",
            ValidationError::InvalidPolicyCheckId => "invalid value for policy check ID",
            ValidationError::InvalidTeamId => "invalid value for team ID",
            ValidationError::InvalidTeamAccessId => "invalid value for team access ID",
            ValidationError::RequiredAccess => "access type is required",
            ValidationError::RequiredUsernames => "usernames or organization membership IDs are required",
            ValidationError::RequiredEmail => "email is required",
            ValidationError::InvalidMembershipId => "invalid value for membership ID",
            ValidationError::InvalidOAuthClientId => "invalid value for OAuth client ID",
            ValidationError::InvalidOAuthTokenId => "invalid value for OAuth token ID",
            ValidationError::RequiredServiceProvider => "service provider is required",
            ValidationError::RequiredApiUrl => "API URL is required",
            ValidationError::RequiredHttpUrl => "HTTP URL is required",
            ValidationError::RequiredOAuthToken => "OAuth token is required",
            ValidationError::InvalidSshKeyId => "invalid value for SSH key ID",
            ValidationError::RequiredValue => "value is required",
            ValidationError::InvalidNotificationConfigId => {
                "invalid value for notification configuration ID"
            }
            ValidationError::RequiredDestinationType => "destination type is required",
            ValidationError::RequiredEnabled => "enabled is required",
            ValidationError::RequiredUrl => "url is required",
            ValidationError::InvalidNotificationTrigger => "invalid value for notification trigger",
            ValidationError::InvalidRunTriggerId => "invalid value for run trigger ID",
            ValidationError::RequiredSourceable => "sourceable is required",
            ValidationError::InvalidRunTriggerType => {
                "invalid value or no value for RunTriggerType. It must be either `inbound` or `outbound`"
            }
            ValidationError::InvalidAgentPoolId => "invalid value for agent pool ID",
            ValidationError::InvalidAgentTokenId => "invalid value for agent token ID",
            ValidationError::RequiredDescription => "description is required",
            ValidationError::InvalidTagId => "invalid value for tag ID",
            ValidationError::RequiredTags => "tags are required",
            ValidationError::InvalidCommentId => "invalid value for comment ID",
            ValidationError::RequiredBody => "body is required",
            ValidationError::InvalidStackId => "invalid value for stack ID",
            ValidationError::RequiredVcsRepo => "vcs repo is required",
            ValidationError::InvalidEmail => "invalid email address",
            ValidationError::RequiredSerial => "serial is required",
            ValidationError::RequiredMd5 => "MD5 is required",
            ValidationError::RequiredState => "state is required",
            ValidationError::RequiredAgentPoolId => {
                "'agent' execution mode requires an agent pool ID to be specified"
            }
            ValidationError::RequiredAgentMode => {
                "specifying an agent pool ID requires 'agent' execution mode"
            }
            ValidationError::BothTriggerPatternsAndPrefixes => {
                "trigger patterns and trigger prefixes cannot be set at the same time"
            }
            ValidationError::RequiredTestNumber => "test number is required",
        };
        write!(f, "{}", msg)
    }
}

/// Custom error type for TFE operations
#[derive(Debug)]
pub enum TfeError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned an error response
    Api { status: u16, message: String },
    /// API returned 401
    Unauthorized,
    /// API returned 404
    NotFound,
    /// Lock requested on an already locked workspace
    WorkspaceLocked,
    /// Unlock requested on a workspace that is not locked
    WorkspaceNotLocked,
    /// Options failed client-side validation
    Validation(ValidationError),
    /// Token not found in any source
    TokenNotFound(String),
    /// Failed to read or parse credentials file
    Credentials(String),
    /// JSON parsing error
    Json(String),
    /// Configuration error
    Config(String),
    /// Local I/O failure (downloads, uploads)
    Io(String),
    /// A wait gave up before the resource reached the expected state
    Timeout(String),
    /// The resource exists but has nothing to serve (no log URL, no upload, errored)
    Unavailable(String),
}

impl fmt::Display for TfeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TfeError::Http(e) => write!(f, "HTTP request failed: {}", e),
            TfeError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            TfeError::Unauthorized => write!(f, "unauthorized"),
            TfeError::NotFound => write!(f, "resource not found"),
            TfeError::WorkspaceLocked => write!(f, "workspace already locked"),
            TfeError::WorkspaceNotLocked => write!(f, "workspace already unlocked"),
            TfeError::Validation(e) => write!(f, "{}", e),
            TfeError::TokenNotFound(msg) => write!(f, "{}", msg),
            TfeError::Credentials(msg) => write!(f, "{}", msg),
            TfeError::Json(msg) => write!(f, "JSON error: {}", msg),
            TfeError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TfeError::Io(msg) => write!(f, "I/O error: {}", msg),
            TfeError::Timeout(msg) => write!(f, "timed out: {}", msg),
            TfeError::Unavailable(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TfeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TfeError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl TfeError {
    /// True for the 404 sentinel
    pub fn is_not_found(&self) -> bool {
        matches!(self, TfeError::NotFound)
    }

    /// HTTP status associated with this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            TfeError::Api { status, .. } => Some(*status),
            TfeError::Unauthorized => Some(401),
            TfeError::NotFound => Some(404),
            TfeError::WorkspaceLocked | TfeError::WorkspaceNotLocked => Some(409),
            TfeError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<ValidationError> for TfeError {
    fn from(err: ValidationError) -> Self {
        TfeError::Validation(err)
    }
}

impl From<reqwest::Error> for TfeError {
    fn from(err: reqwest::Error) -> Self {
        TfeError::Http(err)
    }
}

impl From<serde_json::Error> for TfeError {
    fn from(err: serde_json::Error) -> Self {
        TfeError::Json(err.to_string())
    }
}

impl From<std::io::Error> for TfeError {
    fn from(err: std::io::Error) -> Self {
        TfeError::Io(err.to_string())
    }
}

impl From<url::ParseError> for TfeError {
    fn from(err: url::ParseError) -> Self {
        TfeError::Config(format!("invalid URL: {}", err))
    }
}

/// Result type alias for TFE operations
pub type Result<T> = std::result::Result<T, TfeError>;
