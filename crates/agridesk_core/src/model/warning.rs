//! Warning domain model.
//!
//! # Responsibility
//! - Define the event-triggered alert record with a validity window.
//! - Keep resolution state and resolution timestamps consistent.
//!
//! # Invariants
//! - `status != Active` ⇔ exactly one of `resolved_at`/`dismissed_at` is set.
//! - `priority_score` stays within 0–100 and never changes after creation.
//! - Expiry is a derived predicate, never a stored status change.

use crate::model::{PriorityTier, Provenance, ValidationError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stable identifier for a warning.
pub type WarningId = Uuid;

/// Upper bound of the externally assigned ranking score.
pub const MAX_PRIORITY_SCORE: u8 = 100;

/// Subsystem that raised the warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCategory {
    Weather,
    CropHealth,
    Weed,
    Resource,
    Activity,
    Supervisor,
    Worker,
}

impl WarningCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::CropHealth => "crop_health",
            Self::Weed => "weed",
            Self::Resource => "resource",
            Self::Activity => "activity",
            Self::Supervisor => "supervisor",
            Self::Worker => "worker",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weather" => Ok(Self::Weather),
            "crop_health" => Ok(Self::CropHealth),
            "weed" => Ok(Self::Weed),
            "resource" => Ok(Self::Resource),
            "activity" => Ok(Self::Activity),
            "supervisor" => Ok(Self::Supervisor),
            "worker" => Ok(Self::Worker),
            _ => Err(ValidationError::UnknownToken {
                field: "warning category",
                value: value.to_string(),
            }),
        }
    }
}

/// Severity of an alert. Maps onto the shared priority tiers for
/// ranking weight and notification eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ValidationError::UnknownToken {
                field: "severity",
                value: value.to_string(),
            }),
        }
    }

    /// Corresponding priority tier for routing and ranking policy.
    pub fn tier(self) -> PriorityTier {
        match self {
            Self::Critical => PriorityTier::Critical,
            Self::High => PriorityTier::High,
            Self::Medium => PriorityTier::Medium,
            Self::Low => PriorityTier::Low,
        }
    }
}

/// Warning lifecycle state. `Resolved` and `Dismissed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningStatus {
    Active,
    Resolved,
    Dismissed,
}

impl WarningStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "resolved" => Ok(Self::Resolved),
            "dismissed" => Ok(Self::Dismissed),
            _ => Err(ValidationError::UnknownToken {
                field: "warning status",
                value: value.to_string(),
            }),
        }
    }
}

/// One crop/field/resource the warning applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedTarget {
    /// Crop or field reference, matched by the crop filter criterion.
    pub reference: String,
    /// Human-readable impact description.
    pub impact: String,
}

/// Create input for a warning raised by a detector or a manual report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWarning {
    pub title: String,
    pub description: String,
    pub category: WarningCategory,
    pub severity: Severity,
    pub affected_targets: Vec<AffectedTarget>,
    pub recommended_actions: Vec<String>,
    pub expires_at: NaiveDateTime,
    /// Externally assigned ranking score, 0–100.
    pub priority_score: u8,
    pub provenance: Option<Provenance>,
    pub reporter: Option<String>,
}

/// An event-triggered alert tracked to resolution or dismissal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub id: WarningId,
    pub title: String,
    pub description: String,
    pub category: WarningCategory,
    pub severity: Severity,
    pub status: WarningStatus,
    pub affected_targets: Vec<AffectedTarget>,
    pub recommended_actions: Vec<String>,
    pub created_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
    /// Immutable after creation; severity changes never recompute it.
    #[serde(deserialize_with = "deserialize_score")]
    pub priority_score: u8,
    pub provenance: Provenance,
    pub is_read: bool,
    pub reporter: Option<String>,
    pub resolved_at: Option<NaiveDateTime>,
    pub dismissed_at: Option<NaiveDateTime>,
}

impl Warning {
    /// Creates an active warning from validated draft input.
    pub fn from_draft(draft: NewWarning, now: NaiveDateTime) -> Result<Self, ValidationError> {
        Self::from_draft_with_id(Uuid::new_v4(), draft, now)
    }

    /// Creates a warning with a caller-provided stable id.
    pub fn from_draft_with_id(
        id: WarningId,
        draft: NewWarning,
        now: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        if id.is_nil() {
            return Err(ValidationError::NilId);
        }
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        if draft.priority_score > MAX_PRIORITY_SCORE {
            return Err(ValidationError::ScoreOutOfRange {
                value: draft.priority_score,
            });
        }
        if draft.expires_at < now {
            return Err(ValidationError::ExpiryBeforeCreation {
                created_at: now,
                expires_at: draft.expires_at,
            });
        }

        Ok(Self {
            id,
            title,
            description: draft.description,
            category: draft.category,
            severity: draft.severity,
            status: WarningStatus::Active,
            affected_targets: draft.affected_targets,
            recommended_actions: draft.recommended_actions,
            created_at: now,
            expires_at: draft.expires_at,
            priority_score: draft.priority_score,
            provenance: draft.provenance.unwrap_or_else(Provenance::manual),
            is_read: false,
            reporter: draft.reporter,
            resolved_at: None,
            dismissed_at: None,
        })
    }

    /// Checks stored-state invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        if self.priority_score > MAX_PRIORITY_SCORE {
            return Err(ValidationError::ScoreOutOfRange {
                value: self.priority_score,
            });
        }
        if self.expires_at < self.created_at {
            return Err(ValidationError::ExpiryBeforeCreation {
                created_at: self.created_at,
                expires_at: self.expires_at,
            });
        }
        let resolution_stamps =
            usize::from(self.resolved_at.is_some()) + usize::from(self.dismissed_at.is_some());
        let consistent = match self.status {
            WarningStatus::Active => resolution_stamps == 0,
            WarningStatus::Resolved => self.resolved_at.is_some() && self.dismissed_at.is_none(),
            WarningStatus::Dismissed => self.dismissed_at.is_some() && self.resolved_at.is_none(),
        };
        if !consistent {
            return Err(ValidationError::ResolutionStateMismatch);
        }
        Ok(())
    }

    /// True once the validity window has passed. Purely derived; the
    /// stored status is untouched.
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expires_at <= now
    }

    /// True while the warning still accepts transitions.
    pub fn is_active(&self) -> bool {
        self.status == WarningStatus::Active
    }

    /// Marks the warning as seen. Not a lifecycle transition.
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = u8::deserialize(deserializer)?;
    if value > MAX_PRIORITY_SCORE {
        return Err(serde::de::Error::custom(format!(
            "priority score {value} is outside 0-{MAX_PRIORITY_SCORE}"
        )));
    }
    Ok(value)
}
