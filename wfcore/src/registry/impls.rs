use std::collections::{
    BTreeMap,
    BTreeSet,
};

use crate::{
    error::RegistryError,
    traits::{
        ActionGroupRegistry,
        PermissionCollector,
    },
};
use super::ActionGroupMap;

impl ActionGroupMap {
    pub fn new() -> Self {
        Default::default()
    }

    /// Maps the permissions into the action group, for every workflow
    /// or only for the named one.
    pub fn map_permissions<S, I>(
        &mut self,
        action_group: &str,
        permissions: I,
        workflow_id: Option<&str>,
    ) -> &mut Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let groups = match workflow_id {
            Some(workflow_id) => self.workflows
                .entry(workflow_id.to_string())
                .or_default(),
            None => &mut self.action_groups,
        };
        groups.entry(action_group.to_string())
            .or_default()
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn ignore<S, I>(
        &mut self,
        permissions: I,
        workflow_id: &str,
    ) -> &mut Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.ignores
            .entry(workflow_id.to_string())
            .or_default()
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Every permission this registry is aware of, mapped or not.
    pub fn known_permissions(&self) -> BTreeSet<String> {
        self.permissions.iter()
            .chain(self.action_groups.values().flatten())
            .chain(self.workflows.values().flat_map(|m| m.values()).flatten())
            .cloned()
            .collect()
    }

    /// The permission to action group mapping in effect for the workflow.
    fn effective(&self, workflow_id: &str) -> BTreeMap<&str, &str> {
        let mut result = BTreeMap::new();
        for (group, permissions) in self.action_groups.iter() {
            for permission in permissions.iter() {
                if let Some(previous) = result.insert(permission.as_str(), group.as_str()) {
                    log::warn!(
                        "permission `{permission}` mapped to both `{previous}` \
                        and `{group}`; using `{group}`"
                    );
                }
            }
        }
        if let Some(groups) = self.workflows.get(workflow_id) {
            for (group, permissions) in groups.iter() {
                result.extend(permissions.iter()
                    .map(|permission| (permission.as_str(), group.as_str())));
            }
        }
        if let Some(ignored) = self.ignores.get(workflow_id) {
            result.retain(|permission, _| !ignored.contains(*permission));
        }
        result
    }
}

impl ActionGroupRegistry for ActionGroupMap {
    fn action_group_for_permission(
        &self,
        permission: &str,
        workflow_id: &str,
    ) -> Result<Option<String>, RegistryError> {
        Ok(self.effective(workflow_id)
            .get(permission)
            .map(|group| group.to_string()))
    }

    fn action_groups_for_workflow(
        &self,
        workflow_id: &str,
    ) -> Result<BTreeSet<String>, RegistryError> {
        Ok(self.effective(workflow_id)
            .into_values()
            .map(str::to_string)
            .collect())
    }
}

impl PermissionCollector for ActionGroupMap {
    fn collect(
        &self,
        workflow_id: &str,
    ) -> Result<BTreeSet<String>, RegistryError> {
        Ok(self.effective(workflow_id)
            .into_keys()
            .map(str::to_string)
            .collect())
    }
}
