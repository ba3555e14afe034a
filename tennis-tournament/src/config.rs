//! Configuration types for a tournament

/// What to do with a registration that arrives after the field has closed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LateRegistration {
    /// Fail with `TournamentError::RegistrationClosed`
    #[default]
    Reject,
    /// Drop the competitor with a warning
    Ignore,
}

/// Tournament configuration
#[derive(Clone, Debug)]
pub struct TournamentConfig {
    /// Display name used in logs and reports
    pub name: String,
    /// Policy for registrations after equipment assignment
    pub late_registration: LateRegistration,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            name: "Open".to_string(),
            late_registration: LateRegistration::default(),
        }
    }
}

impl TournamentConfig {
    /// Create config with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_late_registration(mut self, policy: LateRegistration) -> Self {
        self.late_registration = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TournamentConfig::default();
        assert_eq!(config.name, "Open");
        assert_eq!(config.late_registration, LateRegistration::Reject);
        assert_eq!(LateRegistration::default(), LateRegistration::Reject);
    }

    #[test]
    fn test_builders() {
        let config = TournamentConfig::named("Club")
            .with_late_registration(LateRegistration::Ignore)
            .with_name("Club Finals");
        assert_eq!(config.name, "Club Finals");
        assert_eq!(config.late_registration, LateRegistration::Ignore);
    }
}
