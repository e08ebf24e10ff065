use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteEndpoint {
    pub id: i32,
    pub name: String,
    pub floor: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Walk,
    Stairs,
    Elevator,
    Turn,
}

impl StepKind {
    /// Name of the icon rendered next to a step of this kind.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Walk => "navigation",
            Self::Stairs => "stairs",
            Self::Elevator => "elevator",
            Self::Turn => "arrow-right",
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteStep {
    pub order: u32,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: Option<StepKind>,
    pub floor: Option<i32>,
}

impl RouteStep {
    /// Steps without a tag are rendered like walking steps.
    pub fn kind_or_walk(&self) -> StepKind {
        self.kind.unwrap_or(StepKind::Walk)
    }

    pub fn icon(&self) -> &'static str {
        self.kind_or_walk().icon()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteResult {
    pub from: RouteEndpoint,
    pub to: RouteEndpoint,
    pub distance_m: u32,
    pub estimated_time_min: u32,
    pub steps: Vec<RouteStep>,
}

impl RouteResult {
    /// Steps in ascending `order`, regardless of how they were delivered.
    pub fn ordered_steps(&self) -> Vec<&RouteStep> {
        let mut steps = self.steps.iter().collect::<Vec<_>>();
        steps.sort_by_key(|step| step.order);
        steps
    }

    pub fn changes_floor(&self) -> bool {
        self.from.floor != self.to.floor
    }
}

/// Plain text rendering of the turn-by-turn directions.
impl fmt::Display for RouteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "From: {} (Floor {})\nTo: {} (Floor {})\n{}m, {} min",
            self.from.name,
            self.from.floor,
            self.to.name,
            self.to.floor,
            self.distance_m,
            self.estimated_time_min
        )?;
        for step in self.ordered_steps() {
            write!(f, "{}. [{}] {}", step.order, step.icon(), step.text)?;
            if let Some(floor) = step.floor {
                write!(f, " (Floor {})", floor)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
