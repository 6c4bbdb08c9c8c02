// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
    Other(String),
}

impl BillStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
            BillStatus::Other(s) => s.as_str(),
        }
    }
}

impl From<&str> for BillStatus {
    fn from(s: &str) -> Self {
        match s {
            "pending" => BillStatus::Pending,
            "accepted" => BillStatus::Accepted,
            "refused" => BillStatus::Refused,
            other => BillStatus::Other(other.to_string()),
        }
    }
}

impl Serialize for BillStatus {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BillStatus {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Ok(BillStatus::from(s.as_str()))
    }
}

/// A bill exactly as the remote store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBill {
    pub id: String,
    #[serde(default)]
    pub email: String,
    pub r#type: String,
    #[serde(default)]
    pub name: String,
    pub date: String,
    pub amount: Decimal,
    pub status: BillStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pct: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
}

/// Display-ready bill. Only lives for one fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedBill {
    pub id: String,
    pub r#type: String,
    pub name: String,
    pub date: String,
    pub raw_date: String,
    #[serde(skip)]
    pub sort_key: Option<NaiveDate>,
    pub amount: Decimal,
    pub status: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub r#type: String,
    pub name: String,
    pub date: String,
    pub amount: Decimal,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pct: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default = "pending")]
    pub status: BillStatus,
}

fn pending() -> BillStatus {
    BillStatus::Pending
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserType {
    Employee,
    Admin,
    Other(String),
}

impl Serialize for UserType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            UserType::Employee => "Employee",
            UserType::Admin => "Admin",
            UserType::Other(other) => other.as_str(),
        })
    }
}

impl<'de> Deserialize<'de> for UserType {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Ok(match s.as_str() {
            "Employee" => UserType::Employee,
            "Admin" => UserType::Admin,
            other => UserType::Other(other.to_string()),
        })
    }
}

/// The `{type, email}` descriptor kept under the `user` storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub r#type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
