pub mod buy_zone;
pub mod macro_regime;
pub mod price_point;
pub mod scores;
pub mod stock;
pub mod tag;
pub mod thesis;
pub mod trigger;

pub use buy_zone::BuyZoneEntry;
pub use macro_regime::MacroRegime;
pub use price_point::PricePoint;
pub use scores::StockScores;
pub use stock::{Stock, StockWithDetails};
pub use tag::StockTag;
pub use thesis::StockThesis;
pub use trigger::TriggerAlert;

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Buy-readiness zone of a tracked stock. Always derived from
/// (current_price, buy_target, macro_gated); never set independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    BuyZone,
    WatchZone,
    Extended,
    Avoid,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::BuyZone => "buy_zone",
            Status::WatchZone => "watch_zone",
            Status::Extended => "extended",
            Status::Avoid => "avoid",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Status {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "buy_zone" => Ok(Status::BuyZone),
            "watch_zone" => Ok(Status::WatchZone),
            "extended" => Ok(Status::Extended),
            "avoid" => Ok(Status::Avoid),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// AllocationHint
// ---------------------------------------------------------------------------

/// Position-sizing hint. Closed vocabulary; stored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationHint {
    Starter,
    Half,
    FullSend,
    OptionsOnly,
}

impl AllocationHint {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s {
            "starter" => Some(AllocationHint::Starter),
            "half" => Some(AllocationHint::Half),
            "full_send" => Some(AllocationHint::FullSend),
            "options_only" => Some(AllocationHint::OptionsOnly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationHint::Starter => "starter",
            AllocationHint::Half => "half",
            AllocationHint::FullSend => "full_send",
            AllocationHint::OptionsOnly => "options_only",
        }
    }
}

// ---------------------------------------------------------------------------
// TagKind
// ---------------------------------------------------------------------------

/// Tag dimensions. Only a fixed vocabulary is meaningful, so this is a
/// closed set rather than free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    MacroSensitivity,
    NarrativePhase,
    OwnershipQuality,
}

impl TagKind {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s {
            "macro_sensitivity" => Some(TagKind::MacroSensitivity),
            "narrative_phase" => Some(TagKind::NarrativePhase),
            "ownership_quality" => Some(TagKind::OwnershipQuality),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::MacroSensitivity => "macro_sensitivity",
            TagKind::NarrativePhase => "narrative_phase",
            TagKind::OwnershipQuality => "ownership_quality",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for TagKind {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        TagKind::from_api_str(&s).ok_or_else(|| format!("unknown tag kind: {s}"))
    }
}
