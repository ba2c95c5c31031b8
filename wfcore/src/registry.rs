//! In-memory action group registry
//!
//! Maps permissions into action groups, globally and per workflow, in a
//! form that may be loaded from a configuration document.

use serde::{Deserialize, Serialize};
use std::collections::{
    BTreeMap,
    BTreeSet,
};

/// Permission to action group mapping.
///
/// A workflow specific mapping takes precedence over the global mapping
/// for the permissions it names, and permissions ignored for a workflow
/// are not managed by that workflow at all.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ActionGroupMap {
    /// Permissions known to the platform, whether mapped or not.
    #[serde(default)]
    pub permissions: BTreeSet<String>,
    /// Action group to the permissions it contains.
    #[serde(default)]
    pub action_groups: BTreeMap<String, BTreeSet<String>>,
    /// Workflow id to its own action group mapping.
    #[serde(default)]
    pub workflows: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
    /// Workflow id to the permissions it leaves unmanaged.
    #[serde(default)]
    pub ignores: BTreeMap<String, BTreeSet<String>>,
}

mod impls;
