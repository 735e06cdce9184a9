use serde::Deserialize;

/// Names of the user entity and its identity fields.
///
/// Present in every run; `[auth]` in the manifest overrides the defaults and
/// enables the server auth stage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityFields {
    #[serde(default = "default_user_entity")]
    pub user_entity: String,

    #[serde(default = "default_username_field")]
    pub username_field: String,

    #[serde(default = "default_password_field")]
    pub password_field: String,

    #[serde(default = "default_roles_field")]
    pub roles_field: String,
}

fn default_user_entity() -> String {
    "User".to_string()
}

fn default_username_field() -> String {
    "username".to_string()
}

fn default_password_field() -> String {
    "password".to_string()
}

fn default_roles_field() -> String {
    "roles".to_string()
}

impl Default for IdentityFields {
    fn default() -> Self {
        Self {
            user_entity: default_user_entity(),
            username_field: default_username_field(),
            password_field: default_password_field(),
            roles_field: default_roles_field(),
        }
    }
}

impl IdentityFields {
    /// The identity fields paired with their `[auth]` key.
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("username_field", self.username_field.as_str()),
            ("password_field", self.password_field.as_str()),
            ("roles_field", self.roles_field.as_str()),
        ]
    }
}
