//! Workflow specification
//!
//! The structs provided by this module describe a workflow in terms of
//! the customer: statuses, the transitions between them and who may do
//! what while content sits in each status.  They are consumed read-only
//! by the generator, which turns them into a workflow definition for the
//! engine.

use serde::{Deserialize, Serialize};
use std::collections::{
    BTreeMap,
    BTreeSet,
};

/// A customer role is permitted to perform the action, where the action
/// is either the name of an action group or the title of a transition.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Statement {
    pub role: String,
    pub action: String,
}

/// The inheritor receives everything explicitly granted to the base.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct RoleInheritance {
    pub inheritor: String,
    pub base: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Status {
    pub title: String,
    #[serde(default)]
    pub statements: BTreeSet<Statement>,
    #[serde(default)]
    pub role_inheritance: BTreeSet<RoleInheritance>,
    /// Customer roles that get a worklist for content in this status.
    #[serde(default)]
    pub worklist_viewers: BTreeSet<String>,
}

/// A transition references its endpoints by their status titles.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Transition {
    pub title: String,
    pub src_status: Option<String>,
    pub dest_status: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Specification {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// The title of the status new content starts in.
    pub initial_status: String,
    #[serde(default)]
    pub states: BTreeMap<String, Status>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
    /// Customer role to engine role.
    #[serde(default)]
    pub role_mapping: BTreeMap<String, String>,
    #[serde(default)]
    pub role_inheritance: BTreeSet<RoleInheritance>,
    /// Statements that apply to every status.
    #[serde(default)]
    pub generals: BTreeSet<Statement>,
    #[serde(default)]
    pub custom_transition_url: Option<String>,
}

mod impls;
