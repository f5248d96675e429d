use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    ChangesRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Approved,
    Rejected,
    ChangesRequested,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalStage {
    pub name: String,
    pub required_approvals: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Approver {
    pub user_id: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub reviewer: String,
    pub status: ReviewStatus,
    pub comments: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Ordered review stages gating a version's path toward publication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalWorkflow {
    pub stages: Vec<ApprovalStage>,
    #[serde(default)]
    pub approvers: Vec<Approver>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub status: ApprovalStatus,
}

impl ApprovalWorkflow {
    /// Default two-stage workflow: peer review, then technical-lead approval.
    pub fn standard() -> Self {
        Self {
            stages: vec![
                ApprovalStage {
                    name: "Peer Review".to_owned(),
                    required_approvals: 1,
                },
                ApprovalStage {
                    name: "Technical Lead Approval".to_owned(),
                    required_approvals: 1,
                },
            ],
            approvers: Vec::new(),
            reviews: Vec::new(),
            status: ApprovalStatus::Pending,
        }
    }

    /// Workflow used when the creator skips approval: no stages to satisfy.
    pub fn auto_approved() -> Self {
        Self {
            stages: Vec::new(),
            approvers: Vec::new(),
            reviews: Vec::new(),
            status: ApprovalStatus::Approved,
        }
    }

    pub fn required_approvals(&self) -> u32 {
        self.stages.iter().map(|stage| stage.required_approvals).sum()
    }

    /// Appends a review and recomputes the overall status. A rejection or a
    /// change request short-circuits; otherwise the workflow is approved once
    /// the approval count covers every stage.
    pub fn record_review(&mut self, review: Review) {
        self.reviews.push(review);
        self.status = if self
            .reviews
            .iter()
            .any(|r| r.status == ReviewStatus::Rejected)
        {
            ApprovalStatus::Rejected
        } else if self
            .reviews
            .iter()
            .any(|r| r.status == ReviewStatus::ChangesRequested)
        {
            ApprovalStatus::ChangesRequested
        } else {
            let approvals = self
                .reviews
                .iter()
                .filter(|r| r.status == ReviewStatus::Approved)
                .count() as u32;
            if approvals >= self.required_approvals() {
                ApprovalStatus::Approved
            } else {
                ApprovalStatus::Pending
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(status: ReviewStatus) -> Review {
        Review {
            reviewer: "sam".to_owned(),
            status,
            comments: None,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn standard_workflow_needs_two_approvals() {
        let mut workflow = ApprovalWorkflow::standard();
        assert_eq!(workflow.status, ApprovalStatus::Pending);

        workflow.record_review(review(ReviewStatus::Approved));
        assert_eq!(workflow.status, ApprovalStatus::Pending);

        workflow.record_review(review(ReviewStatus::Approved));
        assert_eq!(workflow.status, ApprovalStatus::Approved);
    }

    #[test]
    fn rejection_wins_over_approvals() {
        let mut workflow = ApprovalWorkflow::standard();
        workflow.record_review(review(ReviewStatus::Approved));
        workflow.record_review(review(ReviewStatus::Rejected));
        workflow.record_review(review(ReviewStatus::Approved));
        assert_eq!(workflow.status, ApprovalStatus::Rejected);
    }

    #[test]
    fn change_request_blocks_approval() {
        let mut workflow = ApprovalWorkflow::standard();
        workflow.record_review(review(ReviewStatus::ChangesRequested));
        assert_eq!(workflow.status, ApprovalStatus::ChangesRequested);
    }

    #[test]
    fn auto_approved_workflow_has_no_stages() {
        let workflow = ApprovalWorkflow::auto_approved();
        assert_eq!(workflow.status, ApprovalStatus::Approved);
        assert!(workflow.stages.is_empty());
    }
}
