//! Screen configuration loading and management
//!
//! Screens are declared in YAML and turned into validated view specs:
//!
//! ```yaml
//! screens:
//!   - name: announcements
//!     collection: announcements
//!     search_fields: [title, content]
//!     filters:
//!       - name: propertyFilter
//!         field: targetProperties
//!         op: contains
//!         sentinel: All Properties
//!     sort: { field: createdAt, direction: desc }
//!     audience: ["published:status", "audience:targetAudience", "scope:targetProperties"]
//! ```

use crate::catalog;
use crate::core::auth::{AudienceRule, Gate};
use crate::core::error::ConfigError;
use crate::core::field::FieldValue;
use crate::core::filter::{ALL_CATEGORIES, ALL_PROPERTIES, ALL_STATUSES, Filter, FilterOp};
use crate::core::sort::SortDirection;
use crate::core::view::ViewSpec;
use crate::screen::Screen;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

fn default_op() -> String {
    "eq".to_string()
}

/// Configuration for one filter of a screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Name used to address the filter (defaults to the field name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub field: String,

    /// `eq`, `ne`, `contains`, `gt`, `gte`, `lt` or `lte`
    #[serde(default = "default_op")]
    pub op: String,

    /// Initial value. Defaults to the sentinel when one is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,

    /// Value meaning "no constraint"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentinel: Option<FieldValue>,
}

impl FilterConfig {
    fn to_filter(&self, screen: &str) -> Result<Filter, ConfigError> {
        let op = FilterOp::parse(&self.op).ok_or_else(|| ConfigError::InvalidValue {
            field: format!("{}.filters.{}.op", screen, self.field),
            value: self.op.clone(),
            message: "unknown filter operation".to_string(),
        })?;

        let value = self
            .value
            .clone()
            .or_else(|| self.sentinel.clone())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: format!("{}.filters.{}.value", screen, self.field),
                value: String::new(),
                message: "a filter needs a value or a sentinel".to_string(),
            })?;

        let mut filter = Filter::new(self.field.clone(), op, value);
        if let Some(name) = &self.name {
            filter = filter.named(name.clone());
        }
        if let Some(sentinel) = &self.sentinel {
            filter = filter.with_sentinel(sentinel.clone());
        }
        Ok(filter)
    }
}

/// Default sort of a screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Configuration for one list screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub name: String,

    /// Collection in the data store (must be a catalog collection)
    pub collection: String,

    #[serde(default)]
    pub search_fields: Vec<String>,

    #[serde(default)]
    pub filters: Vec<FilterConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortConfig>,

    /// Visibility gates, e.g. `published:status`
    #[serde(default)]
    pub audience: Vec<String>,
}

impl ScreenConfig {
    /// Build the validated view spec for this screen
    pub fn build_spec(&self) -> Result<ViewSpec, ConfigError> {
        let schema = catalog::schema_for(&self.collection).ok_or_else(|| {
            ConfigError::UnknownCollection {
                collection: self.collection.clone(),
            }
        })?;

        let mut builder = ViewSpec::builder(schema).search_fields(self.search_fields.iter().cloned());

        for filter in &self.filters {
            builder = builder.filter(filter.to_filter(&self.name)?);
        }

        if let Some(sort) = &self.sort {
            builder = builder.sort_by(sort.field.clone(), sort.direction);
        }

        if !self.audience.is_empty() {
            let gates = self
                .audience
                .iter()
                .map(|g| Gate::parse(g))
                .collect::<Result<Vec<_>, _>>()?;
            builder = builder.audience(AudienceRule::new(gates));
        }

        builder.build()
    }

    /// Build the screen, view state included
    pub fn build_screen(&self) -> Result<Screen, ConfigError> {
        Ok(Screen::new(
            self.name.clone(),
            self.collection.clone(),
            self.build_spec()?,
        ))
    }
}

/// Complete configuration for the dashboard screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewsConfig {
    pub screens: Vec<ScreenConfig>,
}

impl ViewsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;

        tracing::info!(
            path = %path.display(),
            screens = config.screens.len(),
            "loaded view configuration"
        );
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })
    }

    /// Find a screen configuration by name
    pub fn screen(&self, name: &str) -> Option<&ScreenConfig> {
        self.screens.iter().find(|s| s.name == name)
    }

    /// Validate and build every screen.
    ///
    /// Fails on the first invalid screen; screen names must be unique.
    pub fn build_screens(&self) -> Result<Vec<Screen>, ConfigError> {
        let mut seen = HashSet::new();
        self.screens
            .iter()
            .map(|config| {
                if !seen.insert(config.name.as_str()) {
                    return Err(ConfigError::InvalidValue {
                        field: "screens.name".to_string(),
                        value: config.name.clone(),
                        message: "duplicate screen name".to_string(),
                    });
                }
                config.build_screen()
            })
            .collect()
    }

    /// The stock dashboard screens
    pub fn default_config() -> Self {
        let sentinel_filter = |name: &str, field: &str, op: &str, sentinel: &str| FilterConfig {
            name: Some(name.to_string()),
            field: field.to_string(),
            op: op.to_string(),
            value: None,
            sentinel: Some(FieldValue::from(sentinel)),
        };
        let sort = |field: &str, direction| Some(SortConfig {
            field: field.to_string(),
            direction,
        });
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let announcement_gates = strings(&[
            "published:status",
            "audience:targetAudience",
            "scope:targetProperties",
        ]);

        Self {
            screens: vec![
                ScreenConfig {
                    name: "announcements".to_string(),
                    collection: catalog::ANNOUNCEMENTS.to_string(),
                    search_fields: strings(&["title", "content"]),
                    filters: vec![sentinel_filter(
                        "propertyFilter",
                        "targetProperties",
                        "contains",
                        ALL_PROPERTIES,
                    )],
                    sort: sort("createdAt", SortDirection::Descending),
                    audience: announcement_gates.clone(),
                },
                ScreenConfig {
                    name: "capital-projects".to_string(),
                    collection: catalog::CAPITAL_PROJECTS.to_string(),
                    search_fields: strings(&["name", "description"]),
                    filters: vec![
                        sentinel_filter("propertyFilter", "property", "eq", ALL_PROPERTIES),
                        sentinel_filter("statusFilter", "status", "eq", ALL_STATUSES),
                    ],
                    sort: sort("startDate", SortDirection::Descending),
                    audience: strings(&["scope:property"]),
                },
                ScreenConfig {
                    name: "chart-of-accounts".to_string(),
                    collection: catalog::ACCOUNTS.to_string(),
                    search_fields: strings(&["number", "name", "description"]),
                    filters: vec![sentinel_filter("typeFilter", "type", "eq", ALL_CATEGORIES)],
                    sort: sort("number", SortDirection::Ascending),
                    audience: Vec::new(),
                },
                ScreenConfig {
                    name: "lease-templates".to_string(),
                    collection: catalog::LEASE_TEMPLATES.to_string(),
                    search_fields: strings(&["name", "propertyType"]),
                    filters: Vec::new(),
                    sort: sort("updatedAt", SortDirection::Descending),
                    audience: Vec::new(),
                },
                ScreenConfig {
                    name: "documents".to_string(),
                    collection: catalog::DOCUMENTS.to_string(),
                    search_fields: strings(&["name", "category"]),
                    filters: vec![
                        sentinel_filter("propertyFilter", "targetProperties", "contains", ALL_PROPERTIES),
                        sentinel_filter("categoryFilter", "category", "eq", ALL_CATEGORIES),
                    ],
                    sort: sort("uploadedAt", SortDirection::Descending),
                    audience: announcement_gates,
                },
                ScreenConfig {
                    name: "notifications".to_string(),
                    collection: catalog::NOTIFICATIONS.to_string(),
                    search_fields: strings(&["title", "message"]),
                    filters: Vec::new(),
                    sort: sort("createdAt", SortDirection::Descending),
                    audience: Vec::new(),
                },
                ScreenConfig {
                    name: "messages".to_string(),
                    collection: catalog::MESSAGES.to_string(),
                    search_fields: strings(&["sender", "body"]),
                    filters: Vec::new(),
                    sort: sort("sentAt", SortDirection::Ascending),
                    audience: Vec::new(),
                },
                ScreenConfig {
                    name: "vendors".to_string(),
                    collection: catalog::VENDORS.to_string(),
                    search_fields: strings(&["name", "specialty"]),
                    filters: Vec::new(),
                    sort: sort("name", SortDirection::Ascending),
                    audience: Vec::new(),
                },
            ],
        }
    }
}
