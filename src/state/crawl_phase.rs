/// Crawl phase definitions for tracking a single crawl invocation
///
/// A coordinator moves through these phases exactly once:
/// `Idle -> Running -> {ExhaustedFrontier | BudgetReached | Cancelled} -> Terminated`.
use std::fmt;

/// Represents where a crawl invocation is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    // ===== Active States =====
    /// Coordinator created, nothing fetched yet
    Idle,

    /// The fetch/classify/expand loop is executing
    Running,

    // ===== Stop Reasons =====
    /// The frontier ran dry before the budget was spent
    ExhaustedFrontier,

    /// The page budget was fully spent
    BudgetReached,

    /// An external cancellation (deadline, interrupt) stopped the loop
    Cancelled,

    // ===== Final State =====
    /// Results have been handed back; no further transitions
    Terminated,
}

impl CrawlPhase {
    /// Returns true if the loop has stopped for a definite reason
    pub fn is_stop_reason(&self) -> bool {
        matches!(
            self,
            Self::ExhaustedFrontier | Self::BudgetReached | Self::Cancelled
        )
    }

    /// Returns true if the transition `self -> next` is allowed
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        match self {
            Self::Idle => matches!(next, Self::Running),
            Self::Running => next.is_stop_reason(),
            Self::ExhaustedFrontier | Self::BudgetReached | Self::Cancelled => {
                matches!(next, Self::Terminated)
            }
            Self::Terminated => false,
        }
    }

    /// Short label used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::ExhaustedFrontier => "exhausted_frontier",
            Self::BudgetReached => "budget_reached",
            Self::Cancelled => "cancelled",
            Self::Terminated => "terminated",
        }
    }

    /// Returns all possible phases
    pub fn all_phases() -> Vec<Self> {
        vec![
            Self::Idle,
            Self::Running,
            Self::ExhaustedFrontier,
            Self::BudgetReached,
            Self::Cancelled,
            Self::Terminated,
        ]
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
