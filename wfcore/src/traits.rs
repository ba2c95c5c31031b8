use std::collections::BTreeSet;

use crate::error::RegistryError;

/// Resolves the action group a permission belongs to.  The answer may
/// differ per workflow as workflows are able to override the global
/// mapping.
pub trait ActionGroupRegistry {
    fn action_group_for_permission(
        &self,
        permission: &str,
        workflow_id: &str,
    ) -> Result<Option<String>, RegistryError>;
    fn action_groups_for_workflow(
        &self,
        workflow_id: &str,
    ) -> Result<BTreeSet<String>, RegistryError>;
}

/// Provides the permissions a workflow is expected to manage.
pub trait PermissionCollector {
    fn collect(
        &self,
        workflow_id: &str,
    ) -> Result<BTreeSet<String>, RegistryError>;
}

/// Turns arbitrary text into an identifier-safe slug.
///
/// Implementations must be pure and idempotent, i.e. normalizing an
/// already normalized value returns it unchanged.
pub trait Normalizer {
    fn normalize(&self, text: &str) -> String;
}
