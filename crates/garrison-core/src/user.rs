//! User records and the enums that classify them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::types::{Timestamp, UserId};

/// Military rank of a user or of the personnel named in a report.
///
/// `None` is the "not selected" sentinel: registration refuses it, reports
/// may carry it when the rank is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    /// Officer candidate.
    Aspirant,
    /// Second lieutenant.
    SecondLieutenant,
    /// First lieutenant.
    FirstLieutenant,
    /// Captain.
    Captain,
    /// Major.
    Major,
    /// Lieutenant colonel.
    LieutenantColonel,
    /// Colonel.
    Colonel,
    /// Brigadier.
    Brigadier,
    /// Major brigadier.
    MajorBrigadier,
    /// Lieutenant brigadier.
    LieutenantBrigadier,
    /// No rank selected.
    #[default]
    None,
}

impl Rank {
    /// Every selectable rank, lowest first (excludes [`Rank::None`]).
    pub const ASSIGNABLE: [Rank; 10] = [
        Self::Aspirant,
        Self::SecondLieutenant,
        Self::FirstLieutenant,
        Self::Captain,
        Self::Major,
        Self::LieutenantColonel,
        Self::Colonel,
        Self::Brigadier,
        Self::MajorBrigadier,
        Self::LieutenantBrigadier,
    ];

    /// Whether a real rank was chosen.
    #[must_use]
    pub fn is_assigned(self) -> bool {
        self != Self::None
    }

    /// Stable machine tag, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aspirant => "aspirant",
            Self::SecondLieutenant => "second_lieutenant",
            Self::FirstLieutenant => "first_lieutenant",
            Self::Captain => "captain",
            Self::Major => "major",
            Self::LieutenantColonel => "lieutenant_colonel",
            Self::Colonel => "colonel",
            Self::Brigadier => "brigadier",
            Self::MajorBrigadier => "major_brigadier",
            Self::LieutenantBrigadier => "lieutenant_brigadier",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Aspirant => "Aspirant",
            Self::SecondLieutenant => "Second Lieutenant",
            Self::FirstLieutenant => "First Lieutenant",
            Self::Captain => "Captain",
            Self::Major => "Major",
            Self::LieutenantColonel => "Lieutenant Colonel",
            Self::Colonel => "Colonel",
            Self::Brigadier => "Brigadier",
            Self::MajorBrigadier => "Major Brigadier",
            Self::LieutenantBrigadier => "Lieutenant Brigadier",
            Self::None => "None",
        };
        f.write_str(label)
    }
}

impl FromStr for Rank {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ASSIGNABLE
            .into_iter()
            .chain(std::iter::once(Self::None))
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| ParseError::new("rank", s))
    }
}

/// Administrative role.
///
/// `Owner` is the highest role. `Comgep`, `Sefa` and `Dirad` are the three
/// named administrative commands. `Unassigned` is held by every user until
/// an administrator approves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Highest administrative role.
    Owner,
    /// Personnel command.
    Comgep,
    /// Financial secretariat.
    Sefa,
    /// Administration directorate.
    Dirad,
    /// No role yet.
    #[default]
    Unassigned,
}

impl Role {
    /// All roles, highest first.
    pub const ALL: [Role; 5] = [
        Self::Owner,
        Self::Comgep,
        Self::Sefa,
        Self::Dirad,
        Self::Unassigned,
    ];

    /// Whether this role sees the approvals and user-management views and
    /// may act on other users.
    #[must_use]
    pub fn has_admin_visibility(self) -> bool {
        matches!(self, Self::Owner | Self::Comgep | Self::Sefa | Self::Dirad)
    }

    /// Stable machine tag, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Comgep => "COMGEP",
            Self::Sefa => "SEFA",
            Self::Dirad => "DIRAD",
            Self::Unassigned => "UNASSIGNED",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| ParseError::new("role", s))
    }
}

/// Lifecycle state of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    /// Registered, awaiting an administrator.
    Pending,
    /// May log in.
    Approved,
    /// Refused or revoked. Terminal.
    Rejected,
}

impl UserStatus {
    /// Stable machine tag, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained capability, orthogonal to [`Role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Approve or reject access requests.
    ApproveUsers,
    /// Edit other users' profiles.
    EditProfiles,
    /// Create reports.
    GenerateReports,
    /// Read disciplinary proceedings.
    ViewDisciplinary,
    /// Change ranks.
    AssignRanks,
}

impl Permission {
    /// The fixed capability list.
    pub const ALL: [Permission; 5] = [
        Self::ApproveUsers,
        Self::EditProfiles,
        Self::GenerateReports,
        Self::ViewDisciplinary,
        Self::AssignRanks,
    ];

    /// The full permission set, as granted to owners.
    #[must_use]
    pub fn all() -> BTreeSet<Permission> {
        Self::ALL.into_iter().collect()
    }

    /// Stable machine tag, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ApproveUsers => "APPROVE_USERS",
            Self::EditProfiles => "EDIT_PROFILES",
            Self::GenerateReports => "GENERATE_REPORTS",
            Self::ViewDisciplinary => "VIEW_DISCIPLINARY",
            Self::AssignRanks => "ASSIGN_RANKS",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| ParseError::new("permission", s))
    }
}

/// A person with (or requesting) access to the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique record ID.
    pub id: UserId,
    /// Login email, unique across the directory.
    pub email: String,
    /// Name the user is addressed by (war name).
    pub display_name: String,
    /// Military rank.
    pub rank: Rank,
    /// Organizational unit.
    pub command: String,
    /// Administrative role.
    pub role: Role,
    /// Lifecycle state.
    pub status: UserStatus,
    /// Granted capabilities.
    pub permissions: BTreeSet<Permission>,
    /// When the record was created.
    pub created_at: Timestamp,
}

impl User {
    /// Build a fresh access request: pending, unassigned, no permissions.
    #[must_use]
    pub fn pending(
        email: impl Into<String>,
        display_name: impl Into<String>,
        rank: Rank,
        command: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            display_name: display_name.into(),
            rank,
            command: command.into(),
            role: Role::Unassigned,
            status: UserStatus::Pending,
            permissions: BTreeSet::new(),
            created_at: Timestamp::now(),
        }
    }

    /// Whether this record's email matches `email`, ignoring case and
    /// surrounding whitespace.
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }

    /// Whether the user is approved and holds an administrative role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.status == UserStatus::Approved && self.role.has_admin_visibility()
    }

    /// Whether the user may exercise `permission`. Only approved users hold
    /// permissions; an approved owner holds all of them.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.status == UserStatus::Approved
            && (self.role == Role::Owner || self.permissions.contains(&permission))
    }

    /// The permissions [`has_permission`](Self::has_permission) grants.
    #[must_use]
    pub fn effective_permissions(&self) -> BTreeSet<Permission> {
        Permission::ALL
            .into_iter()
            .filter(|p| self.has_permission(*p))
            .collect()
    }
}
