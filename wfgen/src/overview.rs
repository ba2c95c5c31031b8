use serde::Serialize;
use std::collections::BTreeMap;
use wfcore::{
    error::RegistryError,
    traits::ActionGroupRegistry,
};

/// Which permissions a workflow manages, grouped by action group, and
/// which it leaves alone.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PermissionOverview {
    pub managed: BTreeMap<String, Vec<String>>,
    pub unmanaged: Vec<String>,
}

/// Sorts the permissions into those managed by the workflow and those
/// not.  Permissions with a comma in their name cannot be mapped and
/// are left out entirely.
pub fn permission_overview<S, I, R>(
    workflow_id: &str,
    permissions: I,
    registry: &R,
) -> Result<PermissionOverview, RegistryError>
where
    S: AsRef<str>,
    I: IntoIterator<Item = S>,
    R: ActionGroupRegistry,
{
    let mut result = PermissionOverview::default();
    for permission in permissions {
        let permission = permission.as_ref();
        if permission.contains(',') {
            log::debug!("skipping unsupported permission `{permission}`");
            continue;
        }
        match registry.action_group_for_permission(permission, workflow_id)? {
            Some(group) => result.managed
                .entry(group)
                .or_default()
                .push(permission.to_string()),
            None => result.unmanaged.push(permission.to_string()),
        }
    }
    result.managed
        .values_mut()
        .for_each(|permissions| permissions.sort());
    result.unmanaged.sort();
    Ok(result)
}
