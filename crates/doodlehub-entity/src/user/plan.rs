//! User subscription plan enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription plan controlling generation quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_plan", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserPlan {
    /// Free tier, subject to the daily generation limit.
    Free,
    /// Paid tier with unlimited generations.
    Premium,
}

impl UserPlan {
    /// Check if this plan is premium.
    pub fn is_premium(&self) -> bool {
        matches!(self, Self::Premium)
    }

    /// Return the plan as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for UserPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserPlan {
    type Err = doodlehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "premium" => Ok(Self::Premium),
            _ => Err(doodlehub_core::AppError::validation(format!(
                "Invalid user plan: '{s}'. Expected one of: free, premium"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("free".parse::<UserPlan>().unwrap(), UserPlan::Free);
        assert_eq!("PREMIUM".parse::<UserPlan>().unwrap(), UserPlan::Premium);
        assert!("gold".parse::<UserPlan>().is_err());
    }
}
