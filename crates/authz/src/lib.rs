//! Authorization hooks and guards for the catalog front-end.
//!
//! Which affordances a visitor gets on a book depends on two inputs only: the
//! book's [`Availability`] and the visitor's [`Role`]. [`permitted_actions`]
//! maps that pair to a fixed slice of [`Action`]s.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Role of the visitor browsing the catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Admin,
    Member,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Availability of a catalog record.
///
/// Deserializes through [`Availability::parse_lenient`], so the English names
/// and the French labels the catalog API has historically returned are both
/// accepted, in any case. Anything unrecognized becomes `Unknown`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Borrowed,
    Reserved,
    Unavailable,
    #[default]
    Unknown,
}

impl Availability {
    /// Statuses an admin may pick when creating a record.
    pub const SELECTABLE: [Availability; 4] = [
        Availability::Available,
        Availability::Borrowed,
        Availability::Reserved,
        Availability::Unavailable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Borrowed => "borrowed",
            Availability::Reserved => "reserved",
            Availability::Unavailable => "unavailable",
            Availability::Unknown => "unknown",
        }
    }

    /// Human-readable label shown on the status badge.
    pub fn label(self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Borrowed => "Borrowed",
            Availability::Reserved => "Reserved",
            Availability::Unavailable => "Unavailable",
            Availability::Unknown => "Unknown status",
        }
    }

    /// CSS class list for the status badge.
    pub fn badge_class(self) -> &'static str {
        match self {
            Availability::Available => "status-badge available",
            Availability::Borrowed => "status-badge borrowed",
            Availability::Reserved => "status-badge reserved",
            Availability::Unavailable => "status-badge unavailable",
            Availability::Unknown => "status-badge",
        }
    }

    /// Parses a wire, form or CLI value, ignoring case and surrounding
    /// whitespace. Anything else is `Unknown`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "available" | "disponible" => Availability::Available,
            "borrowed" | "emprunté" | "emprunte" => Availability::Borrowed,
            "reserved" | "réservé" | "reserve" => Availability::Reserved,
            "unavailable" | "indisponible" | "maintenance" => Availability::Unavailable,
            _ => Availability::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for Availability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Availability::parse_lenient(&raw))
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Affordance offered next to a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Edit,
    Delete,
    Receive,
    Borrow,
    Reserve,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Edit => "Edit",
            Action::Delete => "Delete",
            Action::Receive => "Receive",
            Action::Borrow => "Borrow",
            Action::Reserve => "Reserve",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Action::Edit => "loan-button edit-button",
            Action::Delete => "loan-button delete-button",
            Action::Receive => "loan-button reserve-button",
            Action::Borrow => "loan-button borrow-button",
            Action::Reserve => "loan-button reserve-button",
        }
    }
}

const ADMIN_AVAILABLE: &[Action] = &[Action::Edit, Action::Delete];
const ADMIN_BORROWED: &[Action] = &[Action::Receive];
const MEMBER_AVAILABLE: &[Action] = &[Action::Borrow];
const MEMBER_BORROWED: &[Action] = &[Action::Reserve];
const NONE: &[Action] = &[];

/// Actions offered for a book with `status` to a visitor with `role`.
///
/// An empty slice means the book is shown with a disabled control labelled
/// by its status.
pub fn permitted_actions(status: Availability, role: Role) -> &'static [Action] {
    match (role, status) {
        (Role::Admin, Availability::Available) => ADMIN_AVAILABLE,
        (Role::Admin, Availability::Borrowed) => ADMIN_BORROWED,
        (Role::Member, Availability::Available) => MEMBER_AVAILABLE,
        (Role::Member, Availability::Borrowed) => MEMBER_BORROWED,
        (_, Availability::Reserved | Availability::Unavailable | Availability::Unknown) => NONE,
    }
}

/// Returned when a role attempts an admin-only operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denied {
    pub role: Role,
    pub operation: &'static str,
}

impl fmt::Display for Denied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "role '{}' may not {}", self.role, self.operation)
    }
}

impl std::error::Error for Denied {}

/// Guards operations reserved to the admin role.
pub fn require_admin(role: Role, operation: &'static str) -> Result<(), Denied> {
    if role.is_admin() {
        Ok(())
    } else {
        tracing::debug!(target: "verne-authz", %role, operation, "admin-only operation denied");
        Err(Denied { role, operation })
    }
}
