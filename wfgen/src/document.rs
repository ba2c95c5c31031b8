//! Workflow document
//!
//! An explicit model of the workflow definition consumed by the engine.
//! The generator assembles one of these, which is only turned into XML
//! once complete.

use std::fmt;

/// The catalog field holding the state of a content object.
pub const STATE_VARIABLE: &str = "review_state";

/// Guard expression that can never be satisfied.
pub const DISABLED_GUARD: &str = "python: False";

#[derive(Clone, Debug, PartialEq)]
pub struct WorkflowDoc {
    pub workflow_id: String,
    pub title: String,
    pub description: String,
    pub initial_state: String,
    pub state_variable: String,
    pub manager_bypass: bool,
    /// Managed permissions, sorted.
    pub permissions: Vec<String>,
    pub states: Vec<StateNode>,
    pub transitions: Vec<TransitionNode>,
    pub worklists: Vec<WorklistNode>,
    pub variables: Vec<VariableNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StateNode {
    pub state_id: String,
    pub title: String,
    pub exit_transitions: Vec<String>,
    pub permission_maps: Vec<PermissionMap>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PermissionMap {
    pub name: String,
    pub acquired: bool,
    /// Engine roles granted the permission; empty grants nobody.
    pub roles: Vec<String>,
}

/// Generated transitions are only ever triggered by a user.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Trigger {
    #[default]
    User,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActionNode {
    pub category: String,
    pub icon: String,
    pub url: String,
    pub label: String,
}

/// Who may use a transition or a worklist.
#[derive(Clone, Debug, PartialEq)]
pub enum GuardNode {
    /// Sorted, never empty.
    Roles(Vec<String>),
    /// Nobody may use it.
    Disabled,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitionNode {
    pub new_state: String,
    pub title: String,
    pub transition_id: String,
    pub after_script: String,
    pub before_script: String,
    pub trigger: Trigger,
    pub action: ActionNode,
    pub guard: GuardNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorklistNode {
    pub title: String,
    pub worklist_id: String,
    pub action: ActionNode,
    pub match_name: String,
    pub match_values: String,
    pub guard: GuardNode,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariableNode {
    pub variable_id: &'static str,
    pub for_catalog: bool,
    pub for_status: bool,
    pub update_always: bool,
    pub description: &'static str,
    pub default_expression: &'static str,
    pub guard_permissions: &'static [&'static str],
}

/// The variables declared by every generated workflow.
pub const VARIABLES: &[VariableNode] = &[
    VariableNode {
        variable_id: "action",
        for_catalog: false,
        for_status: true,
        update_always: true,
        description: "Previous transition",
        default_expression: "transition/getId|nothing",
        guard_permissions: &[],
    },
    VariableNode {
        variable_id: "actor",
        for_catalog: false,
        for_status: true,
        update_always: true,
        description: "The ID of the user who performed the previous transition",
        default_expression: "user/getId",
        guard_permissions: &[],
    },
    VariableNode {
        variable_id: "comments",
        for_catalog: false,
        for_status: true,
        update_always: true,
        description: "Comment about the last transition",
        default_expression: "python:state_change.kwargs.get('comment', '')",
        guard_permissions: &[],
    },
    VariableNode {
        variable_id: "review_history",
        for_catalog: false,
        for_status: false,
        update_always: false,
        description: "Provides access to workflow history",
        default_expression: "state_change/getHistory",
        guard_permissions: &[
            "Request review",
            "Review portal content",
        ],
    },
    VariableNode {
        variable_id: "time",
        for_catalog: false,
        for_status: true,
        update_always: true,
        description: "When the previous transition was performed",
        default_expression: "state_change/getDateTime",
        guard_permissions: &[],
    },
];

impl From<Vec<String>> for GuardNode {
    fn from(roles: Vec<String>) -> Self {
        if roles.is_empty() {
            GuardNode::Disabled
        } else {
            let mut roles = roles;
            roles.sort();
            roles.dedup();
            GuardNode::Roles(roles)
        }
    }
}

impl GuardNode {
    pub fn roles(&self) -> &[String] {
        match self {
            GuardNode::Roles(roles) => roles,
            GuardNode::Disabled => &[],
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, GuardNode::Disabled)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Trigger::User => "USER",
        })
    }
}

mod xml;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn guard_from_roles() {
        assert_eq!(GuardNode::from(vec![]), GuardNode::Disabled);
        assert_eq!(
            GuardNode::from(vec![
                "Reviewer".to_string(),
                "Editor".to_string(),
                "Reviewer".to_string(),
            ]),
            GuardNode::Roles(vec![
                "Editor".to_string(),
                "Reviewer".to_string(),
            ]),
        );
        assert!(GuardNode::Disabled.roles().is_empty());
        assert!(GuardNode::Disabled.is_disabled());
    }
}
