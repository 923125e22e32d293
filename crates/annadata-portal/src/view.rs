//! # Portal View State Machine
//!
//! The portal shows one section at a time. Navigation is hub-and-spoke:
//!
//! ```text
//!            ┌──▶ Schemes ─────┐
//!            ├──▶ Eligibility ─┤
//!   Home ────┼──▶ Contact ─────┼──▶ Home
//!            ├──▶ Alerts ──────┤
//!            └──▶ Admin* ──────┘
//!
//!   * requires an AdminGrant
//! ```
//!
//! Moving directly from one section to another is rejected; navigating
//! to the view already shown is a no-op.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::AdminGrant;

// ─── Views ───────────────────────────────────────────────────────────

/// A top-level portal section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalView {
    #[default]
    Home,
    Schemes,
    Eligibility,
    Contact,
    Alerts,
    Admin,
}

impl PortalView {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Schemes => "schemes",
            Self::Eligibility => "eligibility",
            Self::Contact => "contact",
            Self::Alerts => "alerts",
            Self::Admin => "admin",
        }
    }

    /// Whether entering this view requires an [`AdminGrant`].
    pub fn is_restricted(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether `self -> to` is a legal edge, ignoring authorization.
    pub fn can_transition_to(&self, to: PortalView) -> bool {
        *self == to || *self == Self::Home || to == Self::Home
    }
}

impl std::fmt::Display for PortalView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("invalid view transition: {from} -> {to}")]
    InvalidTransition { from: PortalView, to: PortalView },

    #[error("the admin view requires an admin grant")]
    AdminAccessRequired,
}

// ─── Navigator ───────────────────────────────────────────────────────

/// Tracks the current view and enforces legal transitions.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: PortalView,
    admin: Option<AdminGrant>,
}

impl Navigator {
    /// Start on the home view.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> PortalView {
        self.current
    }

    /// The grant under which the admin view was entered, while it is shown.
    pub fn admin_grant(&self) -> Option<&AdminGrant> {
        self.admin.as_ref()
    }

    /// Move to an unrestricted view.
    pub fn navigate(&mut self, to: PortalView) -> Result<PortalView, ViewError> {
        if to.is_restricted() && self.current != to {
            return Err(ViewError::AdminAccessRequired);
        }
        self.transition(to)
    }

    /// Enter the admin view under `grant`.
    pub fn enter_admin(&mut self, grant: &AdminGrant) -> Result<PortalView, ViewError> {
        self.transition(PortalView::Admin)?;
        self.admin = Some(grant.clone());
        Ok(self.current)
    }

    /// Return to the home view. Always legal.
    pub fn back_home(&mut self) -> PortalView {
        self.current = PortalView::Home;
        self.admin = None;
        self.current
    }

    fn transition(&mut self, to: PortalView) -> Result<PortalView, ViewError> {
        let from = self.current;
        if !from.can_transition_to(to) {
            return Err(ViewError::InvalidTransition { from, to });
        }
        if from != to {
            tracing::debug!(from = %from, to = %to, "view transition");
        }
        if to != PortalView::Admin {
            self.admin = None;
        }
        self.current = to;
        Ok(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTIONS: [PortalView; 4] = [
        PortalView::Schemes,
        PortalView::Eligibility,
        PortalView::Contact,
        PortalView::Alerts,
    ];

    #[test]
    fn home_reaches_every_section_and_back() {
        for section in SECTIONS {
            let mut nav = Navigator::new();
            assert_eq!(nav.navigate(section), Ok(section));
            assert_eq!(nav.navigate(PortalView::Home), Ok(PortalView::Home));
        }
    }

    #[test]
    fn section_to_section_rejected() {
        let mut nav = Navigator::new();
        nav.navigate(PortalView::Schemes).unwrap();
        assert_eq!(
            nav.navigate(PortalView::Alerts),
            Err(ViewError::InvalidTransition {
                from: PortalView::Schemes,
                to: PortalView::Alerts,
            })
        );
        assert_eq!(nav.current(), PortalView::Schemes);
    }

    #[test]
    fn same_view_is_noop() {
        let mut nav = Navigator::new();
        nav.navigate(PortalView::Eligibility).unwrap();
        assert_eq!(
            nav.navigate(PortalView::Eligibility),
            Ok(PortalView::Eligibility)
        );
    }

    #[test]
    fn admin_requires_grant() {
        let mut nav = Navigator::new();
        assert_eq!(
            nav.navigate(PortalView::Admin),
            Err(ViewError::AdminAccessRequired)
        );

        let grant = AdminGrant::new("officer@agri.gov.in".to_string());
        assert_eq!(nav.enter_admin(&grant), Ok(PortalView::Admin));
        assert_eq!(nav.admin_grant().map(|g| g.identity()), Some("officer@agri.gov.in"));

        nav.back_home();
        assert!(nav.admin_grant().is_none());
    }

    #[test]
    fn admin_only_from_home() {
        let mut nav = Navigator::new();
        nav.navigate(PortalView::Contact).unwrap();
        let grant = AdminGrant::new("officer@agri.gov.in".to_string());
        assert!(matches!(
            nav.enter_admin(&grant),
            Err(ViewError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(PortalView::Eligibility.to_string(), "eligibility");
        let err = ViewError::InvalidTransition {
            from: PortalView::Schemes,
            to: PortalView::Contact,
        };
        assert_eq!(err.to_string(), "invalid view transition: schemes -> contact");
    }
}
