use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rental unit category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShareType {
    PrivateApartment,
    Studio,
    PrivateRoom,
    SharedRoom,
}

impl ShareType {
    pub const ALL: [ShareType; 4] = [
        ShareType::PrivateApartment,
        ShareType::Studio,
        ShareType::PrivateRoom,
        ShareType::SharedRoom,
    ];

    /// Wire value, as used in the `shareType` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            ShareType::PrivateApartment => "PrivateApartment",
            ShareType::Studio => "Studio",
            ShareType::PrivateRoom => "PrivateRoom",
            ShareType::SharedRoom => "SharedRoom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShareType::PrivateApartment => "Private Apartment",
            ShareType::Studio => "Studio",
            ShareType::PrivateRoom => "Private Room",
            ShareType::SharedRoom => "Shared Room",
        }
    }
}

impl fmt::Display for ShareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown share type")]
pub struct UnknownShareType;

impl FromStr for ShareType {
    type Err = UnknownShareType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShareType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(UnknownShareType)
    }
}

/// Value/label pair for a share-type control
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareTypeOption {
    pub value: String,
    pub label: String,
}

impl From<ShareType> for ShareTypeOption {
    fn from(share_type: ShareType) -> Self {
        Self {
            value: share_type.as_str().to_string(),
            label: share_type.label().to_string(),
        }
    }
}

/// Human-readable label for a raw share-type value; unknown values pass through unchanged
pub fn format_share_type(raw: &str) -> String {
    raw.parse::<ShareType>()
        .map(|t| t.label().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Every share type, in display order
pub fn share_type_options() -> Vec<ShareTypeOption> {
    ShareType::ALL.into_iter().map(ShareTypeOption::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_known_and_passes_through_unknown() {
        assert_eq!(format_share_type("PrivateApartment"), "Private Apartment");
        assert_eq!(format_share_type("SharedRoom"), "Shared Room");
        assert_eq!(format_share_type("Penthouse"), "Penthouse");
    }

    #[test]
    fn parses_wire_values_only() {
        assert_eq!("Studio".parse::<ShareType>(), Ok(ShareType::Studio));
        assert!("studio".parse::<ShareType>().is_err());
        assert!("Private Room".parse::<ShareType>().is_err());
    }

    #[test]
    fn unknown_share_type_is_a_std_error() {
        let err: Box<dyn std::error::Error + Send + Sync> =
            Box::new("Castle".parse::<ShareType>().unwrap_err());
        assert_eq!(err.to_string(), "unknown share type");
    }
}
