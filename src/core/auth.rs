//! Viewer context and audience visibility rules
//!
//! Who is looking decides what a list shows. The viewer is resolved once by
//! the surrounding application and handed to every view computation:
//! - Managers see everything, drafts included
//! - Owners see published items addressed to owners, scoped to the
//!   properties they own
//! - Tenants see published items addressed to tenants, scoped to the
//!   property of their active tenancy

use crate::core::entity::Entity;
use crate::core::error::ConfigError;
use crate::core::field::{FieldKind, FieldValue};
use crate::core::schema::EntitySchema;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;
use uuid::Uuid;

/// Status value that makes an entity visible beyond the manager role
pub const PUBLISHED: &str = "Published";

/// Role of the current viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Owner,
    Tenant,
}

/// The active tenancy of a tenant viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenancy {
    pub property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Identity and scope of the current viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub role: Role,
    /// Names of the properties an owner owns
    #[serde(default)]
    pub owned_properties: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenancy: Option<Tenancy>,
}

impl ViewerContext {
    /// A property manager
    pub fn manager() -> Self {
        Self {
            user_id: None,
            role: Role::Manager,
            owned_properties: BTreeSet::new(),
            tenancy: None,
        }
    }

    /// An owner of the given properties
    pub fn owner<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id: None,
            role: Role::Owner,
            owned_properties: properties.into_iter().map(Into::into).collect(),
            tenancy: None,
        }
    }

    /// A tenant of `property`, optionally in a specific unit
    pub fn tenant(property: impl Into<String>, unit: Option<String>) -> Self {
        Self {
            user_id: None,
            role: Role::Tenant,
            owned_properties: BTreeSet::new(),
            tenancy: Some(Tenancy {
                property: property.into(),
                unit,
            }),
        }
    }

    pub fn with_user_id(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }

    /// Whether the viewer may see content scoped to `property`.
    ///
    /// Managers are unrestricted. A tenant without an active tenancy has
    /// access to no property at all.
    pub fn can_access_property(&self, property: &str) -> bool {
        match self.role {
            Role::Manager => true,
            Role::Owner => self.owned_properties.contains(property),
            Role::Tenant => self
                .tenancy
                .as_ref()
                .is_some_and(|t| t.property == property),
        }
    }
}

/// Declared target audience of an announcement or document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Audience {
    All,
    Owners,
    Tenants,
}

impl Audience {
    /// Parse an audience value. Matching ignores case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Audience::All),
            "owners" | "owner" => Some(Audience::Owners),
            "tenants" | "tenant" => Some(Audience::Tenants),
            _ => None,
        }
    }

    /// Whether a viewer with `role` belongs to this audience
    pub fn admits(self, role: Role) -> bool {
        match (self, role) {
            (Audience::All, _) => true,
            (_, Role::Manager) => true,
            (Audience::Owners, Role::Owner) => true,
            (Audience::Tenants, Role::Tenant) => true,
            _ => false,
        }
    }
}

/// One visibility check over an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Drafts are manager-only; others need `field == "Published"`
    Published { field: String },
    /// The audience named by `field` must admit the viewer's role
    AudienceClass { field: String },
    /// The properties named by `field` must intersect the viewer's access.
    /// No properties at all means the entity is global.
    PropertyScope { field: String },
}

impl Gate {
    /// Parse a gate as written in screen configuration:
    /// `published:<field>`, `audience:<field>` or `scope:<field>`.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        static GATE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = GATE_REGEX.get_or_init(|| {
            Regex::new(r"^(published|audience|scope):([A-Za-z_][A-Za-z0-9_]*)$").unwrap()
        });

        let invalid = || ConfigError::InvalidValue {
            field: "audience".to_string(),
            value: s.to_string(),
            message: "expected published:<field>, audience:<field> or scope:<field>"
                .to_string(),
        };

        let caps = regex.captures(s.trim()).ok_or_else(invalid)?;
        let field = caps[2].to_string();
        match &caps[1] {
            "published" => Ok(Gate::Published { field }),
            "audience" => Ok(Gate::AudienceClass { field }),
            "scope" => Ok(Gate::PropertyScope { field }),
            _ => Err(invalid()),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Gate::Published { field }
            | Gate::AudienceClass { field }
            | Gate::PropertyScope { field } => field,
        }
    }

    /// Check if the entity passes this gate for the viewer
    pub fn check<E: Entity + ?Sized>(&self, entity: &E, viewer: &ViewerContext) -> bool {
        let value = entity.field_value(self.field()).unwrap_or(FieldValue::Null);
        match self {
            Gate::Published { .. } => viewer.is_manager() || value.as_string() == Some(PUBLISHED),

            Gate::AudienceClass { .. } => {
                let text = value.display_text();
                if text.trim().is_empty() {
                    return true;
                }
                match Audience::parse(&text) {
                    Some(audience) => audience.admits(viewer.role),
                    None => viewer.is_manager(),
                }
            }

            Gate::PropertyScope { .. } => {
                let targets = value.scope_entries();
                targets.is_empty() || targets.iter().any(|p| viewer.can_access_property(p))
            }
        }
    }
}

/// Visibility rule for a collection: every gate must pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudienceRule {
    gates: Vec<Gate>,
}

impl AudienceRule {
    pub fn new(gates: Vec<Gate>) -> Self {
        Self { gates }
    }

    /// Announcements: published, addressed to the viewer, in scope
    pub fn announcements() -> Self {
        Self::new(vec![
            Gate::Published {
                field: "status".into(),
            },
            Gate::AudienceClass {
                field: "targetAudience".into(),
            },
            Gate::PropertyScope {
                field: "targetProperties".into(),
            },
        ])
    }

    /// Documents share the announcement rules
    pub fn documents() -> Self {
        Self::announcements()
    }

    /// Capital projects are scoped to their single `property`
    pub fn capital_projects() -> Self {
        Self::new(vec![Gate::PropertyScope {
            field: "property".into(),
        }])
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Check every gate field against a schema.
    pub(crate) fn validate(&self, schema: &EntitySchema) -> Result<(), ConfigError> {
        for gate in &self.gates {
            let kind = schema.require(gate.field(), "audience rule")?;
            if matches!(gate, Gate::PropertyScope { .. })
                && !matches!(kind, FieldKind::List | FieldKind::Text)
            {
                return Err(ConfigError::InvalidValue {
                    field: gate.field().to_string(),
                    value: format!("{:?}", kind),
                    message: "property scope needs a list or text field".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Check the entity against all gates in order.
    ///
    /// Without a resolved viewer nothing is visible.
    pub fn check<E: Entity + ?Sized>(&self, entity: &E, viewer: Option<&ViewerContext>) -> bool {
        let Some(viewer) = viewer else {
            return false;
        };
        self.gates.iter().all(|gate| gate.check(entity, viewer))
    }
}

/// Whether `entity` is visible to `viewer` under `rule`
pub fn is_visible<E: Entity + ?Sized>(
    entity: &E,
    viewer: Option<&ViewerContext>,
    rule: &AudienceRule,
) -> bool {
    rule.check(entity, viewer)
}
