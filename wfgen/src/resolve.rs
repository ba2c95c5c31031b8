use std::collections::{
    BTreeSet,
    HashMap,
    HashSet,
};
use wfcore::spec::RoleInheritance;

/// Extends the roles with every role that inherits from them, directly
/// or through other inheritors.
///
/// The inheritance pairs must already be expressed as engine roles.  No
/// role is ever removed, and without any inheritance the roles are
/// returned untouched.
pub fn resolve_inherited_roles(
    mut roles: BTreeSet<String>,
    inheritance: &BTreeSet<RoleInheritance>,
) -> BTreeSet<String> {
    if inheritance.is_empty() {
        return roles;
    }

    // base -> [inheritor, ..]
    let mut inheritors: HashMap<&str, Vec<&str>> = HashMap::new();
    for RoleInheritance { inheritor, base } in inheritance.iter() {
        inheritors.entry(base.as_str())
            .or_default()
            .push(inheritor.as_str());
    }

    let discovered = {
        let mut discovered = Vec::new();
        let mut seen = roles.iter()
            .map(String::as_str)
            .collect::<HashSet<_>>();
        let mut stack = seen.iter()
            .copied()
            .collect::<Vec<_>>();
        while let Some(role) = stack.pop() {
            for &inheritor in inheritors.get(role).into_iter().flatten() {
                // a role already seen is never revisited, which also
                // terminates the walk on cyclic inheritance.
                if seen.insert(inheritor) {
                    discovered.push(inheritor.to_string());
                    stack.push(inheritor);
                }
            }
        }
        discovered
    };
    log::trace!("roles {roles:?} extended by inheritors {discovered:?}");
    roles.extend(discovered);
    roles
}

#[cfg(test)]
mod test {
    use super::*;

    fn roles(values: &[&str]) -> BTreeSet<String> {
        values.iter()
            .map(|v| v.to_string())
            .collect()
    }

    fn inheritance(pairs: &[(&str, &str)]) -> BTreeSet<RoleInheritance> {
        pairs.iter()
            .copied()
            .map(RoleInheritance::from)
            .collect()
    }

    #[test]
    fn identity_without_inheritance() {
        let input = roles(&["Reader", "Editor"]);
        assert_eq!(
            resolve_inherited_roles(input.clone(), &BTreeSet::new()),
            input,
        );
        assert_eq!(
            resolve_inherited_roles(BTreeSet::new(), &BTreeSet::new()),
            BTreeSet::new(),
        );
    }

    #[test]
    fn direct() {
        assert_eq!(
            resolve_inherited_roles(
                roles(&["Editor"]),
                &inheritance(&[("Administrator", "Editor")]),
            ),
            roles(&["Administrator", "Editor"]),
        );
    }

    #[test]
    fn transitive() {
        let pairs = inheritance(&[
            ("Reviewer", "Editor"),
            ("Manager", "Reviewer"),
            ("Site Administrator", "Manager"),
            ("Contributor", "Reader"),
        ]);
        assert_eq!(
            resolve_inherited_roles(roles(&["Editor"]), &pairs),
            roles(&["Editor", "Manager", "Reviewer", "Site Administrator"]),
        );
        assert_eq!(
            resolve_inherited_roles(roles(&["Manager", "Reader"]), &pairs),
            roles(&["Contributor", "Manager", "Reader", "Site Administrator"]),
        );
        // unrelated inheritance does not grant anything
        assert_eq!(
            resolve_inherited_roles(BTreeSet::new(), &pairs),
            BTreeSet::new(),
        );
    }

    #[test]
    fn cyclic() {
        let pairs = inheritance(&[
            ("Editor", "Reviewer"),
            ("Reviewer", "Editor"),
            ("Manager", "Editor"),
        ]);
        assert_eq!(
            resolve_inherited_roles(roles(&["Reviewer"]), &pairs),
            roles(&["Editor", "Manager", "Reviewer"]),
        );
    }

    #[test]
    fn inclusive() {
        let pairs = inheritance(&[("Manager", "Editor")]);
        for input in [
            roles(&["Editor"]),
            roles(&["Reader", "Owner"]),
            roles(&["Manager"]),
        ] {
            let result = resolve_inherited_roles(input.clone(), &pairs);
            assert!(input.is_subset(&result));
        }
    }
}
