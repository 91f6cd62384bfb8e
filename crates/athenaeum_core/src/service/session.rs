//! Curator access toggle.

/// In-process admin flag. There are no credentials; entering the vault just
/// flips the toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminSession {
    is_admin: bool,
}

impl AdminSession {
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn curator() -> Self {
        Self { is_admin: true }
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Flips between guest and curator; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.is_admin = !self.is_admin;
        self.is_admin
    }
}

#[cfg(test)]
mod tests {
    use super::AdminSession;

    #[test]
    fn toggle_flips_state() {
        let mut session = AdminSession::guest();
        assert!(!session.is_admin());
        assert!(session.toggle());
        assert!(session.is_admin());
        assert!(!session.toggle());
    }
}
