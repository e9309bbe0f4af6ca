#![forbid(unsafe_code)]

pub mod catalog;
pub mod contract;
pub mod dates;
pub mod execution;
pub mod metrics;

pub mod ids {
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct ContractId(String);

    impl ContractId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn into_string(self) -> String {
            self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, ReferenceError> {
            let value = value.into();
            let trimmed = validate_reference(&value)?;
            Ok(Self(trimmed.to_string()))
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct ProjectId(String);

    impl ProjectId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn into_string(self) -> String {
            self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, ReferenceError> {
            let value = value.into();
            let trimmed = validate_reference(&value)?;
            Ok(Self(trimmed.to_string()))
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum ReferenceError {
        Empty,
        TooLong,
        ContainsPipe,
        ContainsControl,
    }

    impl ReferenceError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "reference must not be empty",
                Self::TooLong => "reference is too long",
                Self::ContainsPipe => "reference must not contain '|'",
                Self::ContainsControl => "reference contains control characters",
            }
        }
    }

    impl std::fmt::Display for ReferenceError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.message())
        }
    }

    impl std::error::Error for ReferenceError {}

    fn validate_reference(value: &str) -> Result<&str, ReferenceError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ReferenceError::Empty);
        }
        if trimmed.len() > 64 {
            return Err(ReferenceError::TooLong);
        }
        if trimmed.contains('|') {
            return Err(ReferenceError::ContainsPipe);
        }
        if trimmed.chars().any(|c| c.is_control()) {
            return Err(ReferenceError::ContainsControl);
        }
        Ok(trimmed)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn contract_id_validation() {
            assert_eq!(
                ContractId::try_new("").unwrap_err(),
                ReferenceError::Empty
            );
            assert_eq!(
                ContractId::try_new("   ").unwrap_err(),
                ReferenceError::Empty
            );
            assert_eq!(
                ContractId::try_new("bad|ref").unwrap_err(),
                ReferenceError::ContainsPipe
            );
            assert_eq!(
                ContractId::try_new("bad\u{0007}ref").unwrap_err(),
                ReferenceError::ContainsControl
            );
            assert_eq!(
                ContractId::try_new("x".repeat(65)).unwrap_err(),
                ReferenceError::TooLong
            );
            assert!(ContractId::try_new("M-2024-017").is_ok());
        }

        #[test]
        fn references_are_trimmed() {
            let id = ProjectId::try_new("  PRJ-01  ").unwrap();
            assert_eq!(id.as_str(), "PRJ-01");
        }
    }
}

pub mod auth {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Role {
        Admin,
        Editor,
        Guest,
    }

    impl Role {
        pub fn as_str(self) -> &'static str {
            match self {
                Role::Admin => "admin",
                Role::Editor => "editor",
                Role::Guest => "guest",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value.trim() {
                "admin" => Some(Role::Admin),
                "editor" => Some(Role::Editor),
                "guest" => Some(Role::Guest),
                _ => None,
            }
        }

        pub fn can_write(self) -> bool {
            !matches!(self, Role::Guest)
        }
    }

    /// Capability context passed explicitly to every mutating operation;
    /// there is no module-level current user.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Actor {
        pub name: String,
        pub role: Role,
    }

    impl Actor {
        pub fn new(name: impl Into<String>, role: Role) -> Self {
            Self {
                name: name.into(),
                role,
            }
        }
    }
}
