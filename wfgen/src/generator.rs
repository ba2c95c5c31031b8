use std::collections::{
    BTreeMap,
    BTreeSet,
};
use wfcore::{
    spec::{
        RoleInheritance,
        Specification,
        Status,
    },
    traits::{
        ActionGroupRegistry,
        Normalizer,
        PermissionCollector,
    },
};

use crate::{
    classify::{
        classify,
        Classified,
    },
    document::{
        ActionNode,
        GuardNode,
        PermissionMap,
        StateNode,
        TransitionNode,
        Trigger,
        WorkflowDoc,
        WorklistNode,
        STATE_VARIABLE,
        VARIABLES,
    },
    error::GeneratorError,
    ids::{
        unique_ids,
        IdNamespace,
        Ids,
    },
    normalize::IdNormalizer,
    resolve::resolve_inherited_roles,
};

/// The action url used when the specification provides none.
pub const DEFAULT_TRANSITION_URL: &str =
    "%%(content_url)s/content_status_modify?workflow_action=%(transition)s";

/// Generates workflow documents out of specifications.
///
/// The registry is consulted for the action groups of the workflow and
/// the action group of every managed permission; the normalizer for the
/// identifiers.  Neither is cached across or within a generation.
pub struct WorkflowGenerator<'a, R, N = IdNormalizer> {
    registry: &'a R,
    normalizer: N,
    manager_bypass: bool,
}

/// Statements of a status after classification, with customer roles
/// already translated into engine roles.
#[derive(Default)]
struct StatusStatements<'s> {
    inheritance: BTreeSet<RoleInheritance>,
    // (engine role, action group)
    grants: Vec<(&'s str, String)>,
    // (engine role, transition title)
    guards: Vec<(&'s str, String)>,
}

fn engine_role<'s>(
    spec: &'s Specification,
    customer_role: &str,
) -> Result<&'s str, GeneratorError> {
    spec.engine_role(customer_role)
        .ok_or_else(|| GeneratorError::UnmappedRole(customer_role.to_string()))
}

/// Fills in `%(transition)s` with the transition id; `%%` stands for a
/// literal `%` and any other placeholder is left for the engine.
fn transition_url(template: &str, transition_id: &str) -> String {
    let mut result = String::with_capacity(template.len() + transition_id.len());
    let mut rest = template;
    while let Some(pos) = rest.find('%') {
        result.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        rest = if let Some(after) = tail.strip_prefix("%%") {
            result.push('%');
            after
        } else if let Some(after) = tail.strip_prefix("%(transition)s") {
            result.push_str(transition_id);
            after
        } else {
            result.push('%');
            &tail[1..]
        };
    }
    result.push_str(rest);
    result
}

impl<'a, R> WorkflowGenerator<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self {
            registry,
            normalizer: IdNormalizer,
            manager_bypass: true,
        }
    }
}

impl<'a, R, N> WorkflowGenerator<'a, R, N> {
    pub fn with_normalizer<M: Normalizer>(
        self,
        normalizer: M,
    ) -> WorkflowGenerator<'a, R, M> {
        WorkflowGenerator {
            registry: self.registry,
            normalizer,
            manager_bypass: self.manager_bypass,
        }
    }

    pub fn manager_bypass(mut self, val: bool) -> Self {
        self.manager_bypass = val;
        self
    }
}

impl<'a, R, N: Normalizer> WorkflowGenerator<'a, R, N> {
    /// Maps every status id and transition id to its title.
    pub fn translations(
        &self,
        workflow_id: &str,
        spec: &Specification,
    ) -> Result<BTreeMap<String, String>, GeneratorError> {
        let ids = Ids::new(workflow_id, &self.normalizer);
        let states = unique_ids(
            IdNamespace::State,
            spec.states.values()
                .map(|status| (ids.status_id(&status.title), status.title.as_str())),
        )?;
        let transitions = unique_ids(
            IdNamespace::Transition,
            spec.transitions.iter()
                .map(|transition| Ok((ids.transition_id(transition)?, transition.title.as_str())))
                .collect::<Result<Vec<_>, GeneratorError>>()?,
        )?;
        Ok(states.into_iter()
            .chain(transitions)
            .map(|(id, title)| (id, title.to_string()))
            .collect())
    }

    /// The status ids of the specification, ordered by status title.
    pub fn state_ids(
        &self,
        workflow_id: &str,
        spec: &Specification,
    ) -> Vec<String> {
        let ids = Ids::new(workflow_id, &self.normalizer);
        spec.states.values()
            .map(|status| ids.status_id(&status.title))
            .collect()
    }
}

impl<'a, R, N> WorkflowGenerator<'a, R, N>
where
    R: ActionGroupRegistry,
    N: Normalizer,
{
    /// Builds the document for the specification, declaring the given
    /// managed permissions.
    pub fn build_document(
        &self,
        workflow_id: &str,
        spec: &Specification,
        managed_permissions: &[String],
    ) -> Result<WorkflowDoc, GeneratorError> {
        spec.validate()?;
        log::trace!("generating workflow `{workflow_id}` from `{}`", spec.title);
        let ids = Ids::new(workflow_id, &self.normalizer);
        let permissions = managed_permissions.iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();

        // keys are status titles, so these are in title order.
        let states = spec.states.values().collect::<Vec<_>>();
        let mut transitions = spec.transitions.iter().collect::<Vec<_>>();
        transitions.sort_by(|a, b| a.title.cmp(&b.title));

        let state_ids = unique_ids(
            IdNamespace::State,
            states.iter().map(|status| (ids.status_id(&status.title), status.title.as_str())),
        )?;
        unique_ids(
            IdNamespace::Worklist,
            states.iter().map(|status| (ids.worklist_id(&status.title), status.title.as_str())),
        )?;
        let transition_ids = transitions.iter()
            .map(|transition| Ok((ids.transition_id(transition)?, transition.title.as_str())))
            .collect::<Result<Vec<_>, GeneratorError>>()?;
        unique_ids(IdNamespace::Transition, transition_ids.iter().cloned())?;
        // title -> id, for both namespaces
        let state_id = state_ids.into_iter()
            .map(|(id, title)| (title, id))
            .collect::<BTreeMap<_, _>>();
        let transition_id = transition_ids.into_iter()
            .map(|(id, title)| (title, id))
            .collect::<BTreeMap<_, _>>();

        // skeleton nodes
        let mut state_nodes = states.iter()
            .map(|status| StateNode {
                state_id: state_id[status.title.as_str()].clone(),
                title: status.title.clone(),
                exit_transitions: transitions.iter()
                    .filter(|transition| transition.src_status.as_deref() == Some(status.title.as_str()))
                    .map(|transition| transition_id[transition.title.as_str()].clone())
                    .collect(),
                permission_maps: Vec::with_capacity(permissions.len()),
            })
            .collect::<Vec<_>>();
        let url_template = spec.custom_transition_url
            .as_deref()
            .unwrap_or(DEFAULT_TRANSITION_URL);
        let mut transition_nodes = transitions.iter()
            .map(|transition| {
                let id = transition_id[transition.title.as_str()].clone();
                log::trace!("transition {id}");
                Ok(TransitionNode {
                    new_state: state_id[transition.dest()?].clone(),
                    title: transition.title.clone(),
                    after_script: String::new(),
                    before_script: String::new(),
                    trigger: Trigger::User,
                    action: ActionNode {
                        category: "workflow".to_string(),
                        icon: String::new(),
                        url: transition_url(url_template, &id),
                        label: transition.title.clone(),
                    },
                    guard: GuardNode::Disabled,
                    transition_id: id,
                })
            })
            .collect::<Result<Vec<_>, GeneratorError>>()?;

        // classify all statements before anything is applied, as the
        // transition guards depend on the inheritance of their source.
        let per_status = self.classify_statements(workflow_id, spec, &states)?;

        let mut worklists = Vec::new();
        for (status, node) in states.iter().zip(state_nodes.iter_mut()) {
            let statements = &per_status[status.title.as_str()];
            for permission in permissions.iter() {
                let group = self.registry
                    .action_group_for_permission(permission, workflow_id)?;
                let roles = statements.grants.iter()
                    .filter(|(_, action_group)| Some(action_group.as_str()) == group.as_deref())
                    .map(|(role, _)| role.to_string())
                    .collect::<BTreeSet<_>>();
                let roles = resolve_inherited_roles(roles, &statements.inheritance);
                node.permission_maps.push(PermissionMap {
                    name: permission.clone(),
                    acquired: false,
                    roles: roles.into_iter().collect(),
                });
            }
            if let Some(worklist) = self.worklist(
                &ids,
                spec,
                status,
                &state_id[status.title.as_str()],
                &statements.inheritance,
            )? {
                worklists.push(worklist);
            }
        }

        for (transition, node) in transitions.iter().zip(transition_nodes.iter_mut()) {
            let statements = &per_status[transition.src()?];
            let roles = statements.guards.iter()
                .filter(|(_, title)| title == &transition.title)
                .map(|(role, _)| role.to_string())
                .collect::<BTreeSet<_>>();
            let roles = resolve_inherited_roles(roles, &statements.inheritance);
            node.guard = GuardNode::from(roles.into_iter().collect::<Vec<_>>());
            if node.guard.is_disabled() {
                log::debug!("transition `{}` is granted to nobody", transition.title);
            }
        }
        warn_stray_guards(spec, &states, &per_status);

        Ok(WorkflowDoc {
            workflow_id: workflow_id.to_string(),
            title: spec.title.clone(),
            description: spec.description.clone().unwrap_or_default(),
            initial_state: state_id[spec.initial_status()?.title.as_str()].clone(),
            state_variable: STATE_VARIABLE.to_string(),
            manager_bypass: self.manager_bypass,
            permissions,
            states: state_nodes,
            transitions: transition_nodes,
            worklists,
            variables: VARIABLES.to_vec(),
        })
    }

    fn classify_statements<'s>(
        &self,
        workflow_id: &str,
        spec: &'s Specification,
        states: &[&'s Status],
    ) -> Result<BTreeMap<&'s str, StatusStatements<'s>>, GeneratorError> {
        let action_groups = self.registry.action_groups_for_workflow(workflow_id)?;
        let transition_titles = spec.transitions.iter()
            .map(|transition| transition.title.as_str())
            .collect::<BTreeSet<_>>();
        let mut result = BTreeMap::new();
        for status in states.iter() {
            let mut statements = StatusStatements {
                inheritance: merged_role_inheritance(spec, status)?,
                .. Default::default()
            };
            for classified in classify(
                &status.title,
                status.statements.union(&spec.generals),
                &action_groups,
                &transition_titles,
            )? {
                match classified {
                    Classified::Grant { role, action_group } => {
                        statements.grants.push((engine_role(spec, &role)?, action_group));
                    }
                    Classified::Guard { role, transition } => {
                        statements.guards.push((engine_role(spec, &role)?, transition));
                    }
                }
            }
            result.insert(status.title.as_str(), statements);
        }
        Ok(result)
    }

    fn worklist(
        &self,
        ids: &Ids<'_, N>,
        spec: &Specification,
        status: &Status,
        status_id: &str,
        inheritance: &BTreeSet<RoleInheritance>,
    ) -> Result<Option<WorklistNode>, GeneratorError> {
        if status.worklist_viewers.is_empty() {
            return Ok(None);
        }
        let roles = status.worklist_viewers.iter()
            .map(|role| engine_role(spec, role).map(str::to_string))
            .collect::<Result<BTreeSet<_>, _>>()?;
        let roles = resolve_inherited_roles(roles, inheritance);
        Ok(Some(WorklistNode {
            title: String::new(),
            worklist_id: ids.worklist_id(&status.title),
            action: ActionNode {
                category: "global".to_string(),
                icon: String::new(),
                url: format!("%(portal_url)s/search?review_state={status_id}"),
                label: format!("{} (%(count)d)", status.title),
            },
            match_name: STATE_VARIABLE.to_string(),
            match_values: status_id.to_string(),
            guard: GuardNode::from(roles.into_iter().collect::<Vec<_>>()),
        }))
    }
}

impl<'a, R, N> WorkflowGenerator<'a, R, N>
where
    R: ActionGroupRegistry + PermissionCollector,
    N: Normalizer,
{
    /// Builds the document for the specification, declaring every
    /// permission the collector reports for the workflow.
    pub fn generate(
        &self,
        workflow_id: &str,
        spec: &Specification,
    ) -> Result<WorkflowDoc, GeneratorError> {
        let permissions = self.registry
            .collect(workflow_id)?
            .into_iter()
            .collect::<Vec<_>>();
        self.build_document(workflow_id, spec, &permissions)
    }
}

/// Global and status-local inheritance, in engine roles.
fn merged_role_inheritance(
    spec: &Specification,
    status: &Status,
) -> Result<BTreeSet<RoleInheritance>, GeneratorError> {
    spec.role_inheritance
        .union(&status.role_inheritance)
        .map(|RoleInheritance { inheritor, base }| Ok(RoleInheritance {
            inheritor: engine_role(spec, inheritor)?.to_string(),
            base: engine_role(spec, base)?.to_string(),
        }))
        .collect()
}

fn warn_stray_guards(
    spec: &Specification,
    states: &[&Status],
    per_status: &BTreeMap<&str, StatusStatements<'_>>,
) {
    for status in states.iter() {
        for (_, title) in per_status[status.title.as_str()].guards.iter() {
            if !spec.transitions_from(&status.title).any(|transition| &transition.title == title) {
                log::warn!(
                    "statement on `{}` names transition `{title}` which does \
                    not leave that status",
                    status.title,
                );
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn url_template() {
        assert_eq!(
            transition_url(DEFAULT_TRANSITION_URL, "wf--TRANSITION--publish--a_b"),
            "%(content_url)s/content_status_modify?workflow_action=wf--TRANSITION--publish--a_b",
        );
        assert_eq!(
            transition_url("%(content_url)s/@@%(transition)s?rate=100%", "t"),
            "%(content_url)s/@@t?rate=100%",
        );
        assert_eq!(transition_url("", "t"), "");
        assert_eq!(transition_url("%%%%", "t"), "%%");
    }
}
