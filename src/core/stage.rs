//! Board stages, WIP stage groups, and resource kinds.
//!
//! A story moves through a fixed pipeline:
//!
//! ```text
//! hidden -> backlog -> prioritized -> analyzed-in-progress -> analyzed-done
//!        -> developed-in-progress -> developed-done -> testing -> deployed
//! ```
//!
//! Three stages are "in progress" and consume labor of a matching kind:
//! analysts work `analyzed-in-progress`, developers work
//! `developed-in-progress`, and testers work `testing`.

use serde::{Deserialize, Serialize};

use super::error::KanbanError;

/// Position of a story in the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Not yet revealed on the board.
    Hidden,
    Backlog,
    Prioritized,
    AnalyzedInProgress,
    AnalyzedDone,
    DevelopedInProgress,
    DevelopedDone,
    Testing,
    /// Terminal. Deployed stories earn their price every round.
    Deployed,
}

impl Stage {
    /// The eight visible board columns, in pipeline order.
    pub const BOARD: [Stage; 8] = [
        Stage::Backlog,
        Stage::Prioritized,
        Stage::AnalyzedInProgress,
        Stage::AnalyzedDone,
        Stage::DevelopedInProgress,
        Stage::DevelopedDone,
        Stage::Testing,
        Stage::Deployed,
    ];

    /// Column name used by presentation layers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Hidden => "hidden",
            Stage::Backlog => "backlog",
            Stage::Prioritized => "prioritized",
            Stage::AnalyzedInProgress => "analyzed-in-progress",
            Stage::AnalyzedDone => "analyzed-done",
            Stage::DevelopedInProgress => "developed-in-progress",
            Stage::DevelopedDone => "developed-done",
            Stage::Testing => "testing",
            Stage::Deployed => "deployed",
        }
    }

    /// Resource kind that performs work in this stage.
    ///
    /// `None` for every stage that is not in progress.
    #[must_use]
    pub const fn work_kind(self) -> Option<ResourceKind> {
        match self {
            Stage::AnalyzedInProgress => Some(ResourceKind::Analyst),
            Stage::DevelopedInProgress => Some(ResourceKind::Developer),
            Stage::Testing => Some(ResourceKind::Tester),
            _ => None,
        }
    }

    /// Check if stories in this stage consume labor.
    #[must_use]
    pub const fn is_in_progress(self) -> bool {
        self.work_kind().is_some()
    }

    /// Stage reached when the work of an in-progress stage completes.
    #[must_use]
    pub const fn completion(self) -> Option<Stage> {
        match self {
            Stage::AnalyzedInProgress => Some(Stage::AnalyzedDone),
            Stage::DevelopedInProgress => Some(Stage::DevelopedDone),
            Stage::Testing => Some(Stage::Deployed),
            _ => None,
        }
    }

    /// WIP-limited group this stage counts toward.
    #[must_use]
    pub const fn wip_group(self) -> Option<StageGroup> {
        match self {
            Stage::Prioritized => Some(StageGroup::Prioritized),
            Stage::AnalyzedInProgress | Stage::AnalyzedDone => Some(StageGroup::Analysis),
            Stage::DevelopedInProgress | Stage::DevelopedDone => Some(StageGroup::Development),
            Stage::Testing => Some(StageGroup::Testing),
            _ => None,
        }
    }

    /// Check if this stage is visible on the board.
    #[must_use]
    pub const fn is_revealed(self) -> bool {
        !matches!(self, Stage::Hidden)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hidden" => Ok(Stage::Hidden),
            "backlog" => Ok(Stage::Backlog),
            "prioritized" => Ok(Stage::Prioritized),
            "analyzed-in-progress" => Ok(Stage::AnalyzedInProgress),
            "analyzed-done" => Ok(Stage::AnalyzedDone),
            "developed-in-progress" => Ok(Stage::DevelopedInProgress),
            "developed-done" => Ok(Stage::DevelopedDone),
            "testing" => Ok(Stage::Testing),
            "deployed" => Ok(Stage::Deployed),
            other => Err(KanbanError::UnknownStage(other.to_string())),
        }
    }
}

/// A set of stages sharing one WIP limit.
///
/// Analysis and development each span two sub-stages (in progress and
/// done) that are counted together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageGroup {
    Prioritized,
    Analysis,
    Development,
    Testing,
}

impl StageGroup {
    /// All limited groups, in pipeline order.
    pub const ALL: [StageGroup; 4] = [
        StageGroup::Prioritized,
        StageGroup::Analysis,
        StageGroup::Development,
        StageGroup::Testing,
    ];

    /// Check if a stage counts toward this group.
    #[must_use]
    pub fn contains(self, stage: Stage) -> bool {
        stage.wip_group() == Some(self)
    }
}

impl std::fmt::Display for StageGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StageGroup::Prioritized => "prioritized",
            StageGroup::Analysis => "analysis",
            StageGroup::Development => "development",
            StageGroup::Testing => "testing",
        };
        f.write_str(name)
    }
}

/// Kind of labor a resource provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Analyst,
    Developer,
    Tester,
}

impl ResourceKind {
    /// All kinds, in pool creation order.
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Analyst,
        ResourceKind::Developer,
        ResourceKind::Tester,
    ];

    /// The in-progress stage this kind works on.
    #[must_use]
    pub const fn work_stage(self) -> Stage {
        match self {
            ResourceKind::Analyst => Stage::AnalyzedInProgress,
            ResourceKind::Developer => Stage::DevelopedInProgress,
            ResourceKind::Tester => Stage::Testing,
        }
    }

    /// Check if this kind can work a story in `stage`.
    #[must_use]
    pub fn can_work(self, stage: Stage) -> bool {
        stage.work_kind() == Some(self)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Analyst => "analyst",
            ResourceKind::Developer => "developer",
            ResourceKind::Tester => "tester",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_round_trips_through_str() {
        for stage in Stage::BOARD.iter().copied().chain([Stage::Hidden]) {
            let parsed: Stage = stage.as_str().parse().unwrap();
            assert_eq!(parsed, stage);
        }
        assert!("review".parse::<Stage>().is_err());
    }

    #[test]
    fn test_work_kind_matches_work_stage() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.work_stage().work_kind(), Some(kind));
            assert!(kind.can_work(kind.work_stage()));
        }
        assert!(!ResourceKind::Developer.can_work(Stage::Testing));
        assert_eq!(Stage::AnalyzedDone.work_kind(), None);
    }

    #[test]
    fn test_completion() {
        assert_eq!(Stage::AnalyzedInProgress.completion(), Some(Stage::AnalyzedDone));
        assert_eq!(Stage::DevelopedInProgress.completion(), Some(Stage::DevelopedDone));
        assert_eq!(Stage::Testing.completion(), Some(Stage::Deployed));
        assert_eq!(Stage::Backlog.completion(), None);
    }

    #[test]
    fn test_wip_groups() {
        assert!(StageGroup::Analysis.contains(Stage::AnalyzedInProgress));
        assert!(StageGroup::Analysis.contains(Stage::AnalyzedDone));
        assert!(StageGroup::Development.contains(Stage::DevelopedDone));
        assert!(!StageGroup::Testing.contains(Stage::Deployed));
        assert_eq!(Stage::Backlog.wip_group(), None);
        assert_eq!(Stage::Deployed.wip_group(), None);
    }

    #[test]
    fn test_stage_serde_uses_column_names() {
        let json = serde_json::to_string(&Stage::DevelopedInProgress).unwrap();
        assert_eq!(json, "\"developed-in-progress\"");
    }
}
