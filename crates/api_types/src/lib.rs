use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Decoding helpers for decimal amounts.
///
/// The server may encode decimals either as JSON numbers or as strings
/// (`"42.50"`); both decode to `f64`.
pub mod amount {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(value),
            Raw::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("invalid amount: {text:?}"))),
        }
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterRequest {
        pub username: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RefreshRequest {
        pub refresh: String,
    }

    /// Token pair issued by `/token/`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TokenPair {
        pub access: String,
        pub refresh: String,
    }

    /// Response of `/token/refresh/`.
    ///
    /// Servers without refresh rotation only return a new access token.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct RefreshedToken {
        pub access: String,
        pub refresh: Option<String>,
    }
}

pub mod household {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Household {
        pub id: i64,
        pub name: String,
    }

    /// Body of both `/households/` (create) and `/households/join/`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct HouseholdName {
        pub name: String,
    }
}

pub mod member {
    use super::*;
    use crate::household::Household;

    /// Compact member reference nested in other resources.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MemberRef {
        pub id: i64,
        pub name: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Member {
        pub id: i64,
        pub name: String,
        /// `None` means the member still has to create or join a household.
        pub household: Option<Household>,
        #[serde(default, deserialize_with = "crate::amount::deserialize")]
        pub balance: f64,
        #[serde(default, deserialize_with = "crate::amount::deserialize")]
        pub total_owed: f64,
        #[serde(default, deserialize_with = "crate::amount::deserialize")]
        pub total_paid: f64,
    }

    /// Net position between the current member and one counterparty.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct DetailedBalance {
        pub member: MemberRef,
        #[serde(deserialize_with = "crate::amount::deserialize")]
        pub you_owe: f64,
        #[serde(deserialize_with = "crate::amount::deserialize")]
        pub owes_you: f64,
        #[serde(deserialize_with = "crate::amount::deserialize")]
        pub net_balance: f64,
    }
}

pub mod category {
    use super::*;
    use crate::household::Household;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DistributionType {
        pub id: i64,
        pub name: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryRef {
        pub id: i64,
        pub name: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Category {
        pub id: i64,
        pub name: String,
        pub household: Option<Household>,
        pub distribution_type: Option<DistributionType>,
        pub created_at: Option<DateTime<FixedOffset>>,
        pub updated_at: Option<DateTime<FixedOffset>>,
    }

    /// Create/update body for `/categories/`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryWrite {
        pub name: String,
        pub distribution_type_id: i64,
    }
}

pub mod movement {
    use super::*;
    use crate::{category::CategoryRef, member::MemberRef};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Movement {
        pub id: i64,
        #[serde(deserialize_with = "crate::amount::deserialize")]
        pub amount: f64,
        pub member: MemberRef,
        pub category: CategoryRef,
        pub date: NaiveDate,
        pub description: Option<String>,
        pub created_at: Option<DateTime<FixedOffset>>,
    }

    /// Create/update body for `/movements/`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MovementWrite {
        pub amount: f64,
        /// Serialized as `YYYY-MM-DD`.
        pub date: NaiveDate,
        pub category_id: i64,
        pub description: String,
    }
}

pub mod salary {
    use std::{fmt, sync::LazyLock};

    use regex::Regex;

    use super::*;
    use crate::member::MemberRef;

    const PERIOD_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}$";

    #[allow(clippy::expect_used)]
    static PERIOD_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(PERIOD_PATTERN).expect("period pattern compiles"));

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    #[error("invalid period {0:?}: expected YYYY-MM")]
    pub struct InvalidPeriod(pub String);

    /// A `YYYY-MM` label.
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct PeriodLabel(String);

    impl PeriodLabel {
        pub fn is_valid(input: &str) -> bool {
            PERIOD_RE.is_match(input)
        }

        pub fn parse(input: &str) -> Result<Self, InvalidPeriod> {
            if Self::is_valid(input) {
                Ok(Self(input.to_string()))
            } else {
                Err(InvalidPeriod(input.to_string()))
            }
        }

        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl fmt::Display for PeriodLabel {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Period {
        pub id: i64,
        pub period: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PeriodNew {
        pub period: PeriodLabel,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Salary {
        pub id: i64,
        #[serde(deserialize_with = "crate::amount::deserialize")]
        pub amount: f64,
        pub period: Option<Period>,
        pub member: Option<MemberRef>,
    }

    /// Create/update body for `/salaries/`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalaryWrite {
        pub amount: f64,
        pub period: PeriodLabel,
        pub member_id: i64,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct User {
        pub id: i64,
        pub username: String,
        #[serde(default)]
        pub email: String,
    }
}
