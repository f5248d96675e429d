/// Roles allowed to read version history. Read access is deliberately wide:
/// viewers may browse history but nothing here grants mutation rights.
const HISTORY_ROLES: [&str; 6] = [
    "saas_admin",
    "tenant_admin",
    "admin",
    "manager",
    "developer",
    "viewer",
];

pub struct CanViewVersionHistorySpec<'a> {
    role: &'a str,
}

impl<'a> CanViewVersionHistorySpec<'a> {
    pub fn new(role: &'a str) -> Self {
        Self { role }
    }

    pub fn is_satisfied(&self) -> bool {
        HISTORY_ROLES.contains(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_roles_are_permitted() {
        assert!(CanViewVersionHistorySpec::new("viewer").is_satisfied());
        assert!(CanViewVersionHistorySpec::new("developer").is_satisfied());
        assert!(CanViewVersionHistorySpec::new("saas_admin").is_satisfied());
    }

    #[test]
    fn unknown_roles_are_rejected() {
        assert!(!CanViewVersionHistorySpec::new("customer").is_satisfied());
        assert!(!CanViewVersionHistorySpec::new("").is_satisfied());
        assert!(!CanViewVersionHistorySpec::new("Viewer").is_satisfied());
    }
}
