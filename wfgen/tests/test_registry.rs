use std::collections::BTreeSet;
use test_wf::{
    core::MockRegistry,
    fixtures,
};
use wfcore::error::RegistryError;
use wfgen::{
    error::GeneratorError,
    overview::permission_overview,
    WorkflowGenerator,
};

#[test]
fn registry_consulted_per_workflow() -> anyhow::Result<()> {
    let mut registry = MockRegistry::new();
    registry.expect_collect()
        .times(1)
        .withf(|workflow_id| workflow_id == "wf")
        .returning(|_| Ok(BTreeSet::from(["View".to_string()])));
    registry.expect_action_groups_for_workflow()
        .times(1)
        .withf(|workflow_id| workflow_id == "wf")
        .returning(|_| Ok(BTreeSet::from(["view".to_string()])));
    // once for each of the two states
    registry.expect_action_group_for_permission()
        .times(2)
        .withf(|permission, workflow_id| permission == "View" && workflow_id == "wf")
        .returning(|_, _| Ok(Some("view".to_string())));

    let mut spec = fixtures::publication();
    spec.generals.insert(("boss", "view").into());
    let doc = WorkflowGenerator::new(&registry).generate("wf", &spec)?;
    assert_eq!(doc.permissions, ["View"]);
    assert!(doc.states.iter().all(|state| state.permission_maps[0].roles == ["Reviewer"]));
    Ok(())
}

#[test]
fn registry_unavailable() {
    let mut registry = MockRegistry::new();
    registry.expect_action_groups_for_workflow()
        .times(1)
        .returning(|_| Err(RegistryError::Unavailable("connection refused".to_string())));
    registry.expect_action_group_for_permission()
        .never();

    let err = WorkflowGenerator::new(&registry)
        .build_document("wf", &fixtures::publication(), &[])
        .expect_err("should be an error");
    assert!(matches!(
        err,
        GeneratorError::Registry(RegistryError::Unavailable(reason))
            if reason == "connection refused"
    ));
}

#[test]
fn overview_from_registry() -> anyhow::Result<()> {
    let mut registry = MockRegistry::new();
    registry.expect_action_group_for_permission()
        .times(2)
        .returning(|permission, _| Ok(match permission {
            "View" => Some("view".to_string()),
            _ => None,
        }));
    let overview = permission_overview("wf", [
        "View",
        "Delete objects",
        "Public, everyone can access",
    ], &registry)?;
    assert_eq!(overview.managed["view"], ["View"]);
    assert_eq!(overview.unmanaged, ["Delete objects"]);
    Ok(())
}
