use wfcore::{
    registry::ActionGroupMap,
    spec::{
        Specification,
        Status,
        Transition,
    },
};

/// A registry with the common content permissions mapped into the
/// `view`, `edit` and `manage` action groups.
pub fn registry() -> ActionGroupMap {
    let mut registry = ActionGroupMap::new();
    registry
        .map_permissions("view", ["View", "Access contents information"], None)
        .map_permissions("edit", ["Modify portal content"], None)
        .map_permissions("manage", ["Manage portal"], None);
    registry
}

/// A specification with a single status and nothing else.
pub fn minimal() -> Specification {
    let mut spec = Specification::new("Example Workflow", "Foo");
    spec.description = Some("the Description".to_string());
    spec.add_status(Status {
        title: "Foo".to_string(),
        .. Default::default()
    });
    spec
}

/// Private and Published with a transition in either direction; the
/// employee may publish, the boss may publish and retract.
pub fn publication() -> Specification {
    let mut spec = Specification::new("Workflow", "Private");
    spec.add_status(Status::new("Private", [
            ("employee", "publish"),
            ("boss", "publish"),
        ]))
        .add_status(Status::new("Published", [
            ("boss", "retract"),
        ]))
        .add_transition(Transition::new("publish", "Private", "Published"))
        .add_transition(Transition::new("retract", "Published", "Private"))
        .map_role("employee", "Editor")
        .map_role("boss", "Reviewer");
    spec
}
