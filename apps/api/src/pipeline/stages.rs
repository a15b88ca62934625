//! Pipeline Model: status string → stage position.
//!
//! The stage catalog is compiled in and not configurable per job. Mapping is
//! total: every status string lands on a stage, with unrecognized and terminal
//! statuses falling back to the first stage. Terminal statuses are reported
//! separately through `Outcome` so a view can still render them distinctly.

use serde::{Deserialize, Serialize};

/// The four display stages, in pipeline order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Submitted = 1,
    AiInterview = 2,
    UnderReview = 3,
    FinalStages = 4,
}

pub const STAGES: [PipelineStage; 4] = [
    PipelineStage::Submitted,
    PipelineStage::AiInterview,
    PipelineStage::UnderReview,
    PipelineStage::FinalStages,
];

impl PipelineStage {
    /// 1-based position in the pipeline.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            PipelineStage::Submitted => "Application Submitted",
            PipelineStage::AiInterview => "AI Interview",
            PipelineStage::UnderReview => "Under Review",
            PipelineStage::FinalStages => "Final Stages",
        }
    }
}

/// Closed set of persisted application statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    Interview,
    UnderReview,
    FinalStages,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub fn parse(raw: &str) -> Option<ApplicationStatus> {
        match raw {
            "submitted" => Some(ApplicationStatus::Submitted),
            "interview" => Some(ApplicationStatus::Interview),
            "under_review" => Some(ApplicationStatus::UnderReview),
            "final_stages" => Some(ApplicationStatus::FinalStages),
            "hired" => Some(ApplicationStatus::Hired),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    /// Stage this status sits on, or `None` for statuses outside the
    /// four-stage scale (terminal ones).
    pub fn stage(self) -> Option<PipelineStage> {
        match self {
            ApplicationStatus::Submitted => Some(PipelineStage::Submitted),
            ApplicationStatus::Interview => Some(PipelineStage::AiInterview),
            ApplicationStatus::UnderReview => Some(PipelineStage::UnderReview),
            ApplicationStatus::FinalStages => Some(PipelineStage::FinalStages),
            ApplicationStatus::Hired | ApplicationStatus::Rejected => None,
        }
    }

    pub fn outcome(self) -> Option<Outcome> {
        match self {
            ApplicationStatus::Hired => Some(Outcome::Hired),
            ApplicationStatus::Rejected => Some(Outcome::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Hired,
    Rejected,
}

/// Where an application sits in the pipeline.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StagePosition {
    pub index: u8,
    pub current: PipelineStage,
    pub title: &'static str,
    /// Always the contiguous prefix `1..=index`.
    pub completed: Vec<PipelineStage>,
    pub outcome: Option<Outcome>,
}

/// Maps a raw status to its pipeline position. Never fails.
pub fn stage_of(status: &str) -> StagePosition {
    let parsed = ApplicationStatus::parse(status);
    let current = match parsed.and_then(ApplicationStatus::stage) {
        Some(stage) => stage,
        // Fail-open: unknown and terminal statuses display as the first stage.
        None => PipelineStage::Submitted,
    };

    StagePosition {
        index: current.index(),
        current,
        title: current.title(),
        completed: STAGES.iter().copied().filter(|s| *s <= current).collect(),
        outcome: parsed.and_then(ApplicationStatus::outcome),
    }
}

/// Human-readable status: underscores become spaces.
pub fn status_label(status: &str) -> String {
    status.replace('_', " ")
}
