use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{empty_as_none, lenient_timestamp, null_as_default, wire_enum, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PropertySize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

wire_enum!(PropertySize, "property_size", {
    Small => "small",
    Medium => "medium",
    Large => "large",
    ExtraLarge => "extra_large",
});

impl PropertySize {
    pub fn label(&self) -> &'static str {
        match self {
            PropertySize::Small => "Small Lot",
            PropertySize::Medium => "Medium Lot",
            PropertySize::Large => "Large Lot",
            PropertySize::ExtraLarge => "Estate",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

wire_enum!(CustomerStatus, "customer status", {
    Active => "active",
    Inactive => "inactive",
});

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_address: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub property_size: Option<PropertySize>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: CustomerStatus,
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub service_address: String,
    pub property_size: PropertySize,
    pub notes: Option<String>,
    pub status: CustomerStatus,
}

impl Record for Customer {
    type Input = CustomerInput;
    const ENTITY: &'static str = "Customer";

    fn id(&self) -> &str { &self.id }
}
