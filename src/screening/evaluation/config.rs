use serde::{Deserialize, Serialize};

use crate::screening::rule::RuleAction;

/// Severity ordering used to reduce several matched actions into one final
/// action. Highest severity first. The default mirrors how the denial
/// management screens rank outcomes; deployments may supply their own order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPrecedence {
    order: Vec<RuleAction>,
}

impl ActionPrecedence {
    /// Build a precedence from a highest-first ordering. Actions missing from
    /// `order` are appended in default order so every action has a rank.
    pub fn new(order: Vec<RuleAction>) -> Self {
        let mut full = Vec::with_capacity(RuleAction::ALL.len());
        for action in order {
            if !full.contains(&action) {
                full.push(action);
            }
        }
        for action in RuleAction::ALL {
            if !full.contains(&action) {
                full.push(action);
            }
        }
        Self { order: full }
    }

    /// Rank of an action; lower is more severe.
    pub fn severity(&self, action: RuleAction) -> usize {
        self.order
            .iter()
            .position(|candidate| *candidate == action)
            .unwrap_or(self.order.len())
    }

    /// Pick the most severe action, falling back to the default-allow policy
    /// when nothing matched.
    pub(crate) fn resolve<I>(&self, actions: I) -> RuleAction
    where
        I: IntoIterator<Item = RuleAction>,
    {
        actions
            .into_iter()
            .min_by_key(|action| self.severity(*action))
            .unwrap_or(RuleAction::Allow)
    }
}

impl Default for ActionPrecedence {
    fn default() -> Self {
        Self::new(RuleAction::ALL.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_ranks_deny_above_everything() {
        let precedence = ActionPrecedence::default();
        for action in RuleAction::ALL {
            assert!(precedence.severity(RuleAction::Deny) <= precedence.severity(action));
        }
        assert!(
            precedence.severity(RuleAction::FlagForReview)
                < precedence.severity(RuleAction::AutoAdjust)
        );
    }

    #[test]
    fn custom_order_backfills_missing_actions() {
        let precedence = ActionPrecedence::new(vec![RuleAction::FlagForReview]);
        assert_eq!(precedence.severity(RuleAction::FlagForReview), 0);
        // Everything else keeps the default relative order after the override.
        assert!(precedence.severity(RuleAction::Deny) < precedence.severity(RuleAction::Allow));
    }
}
