use std::collections::BTreeSet;
use wfcore::spec::Statement;

use crate::error::GeneratorError;

/// A statement once its action has been identified.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Classified {
    /// The role is granted the permissions of the action group.
    Grant {
        role: String,
        action_group: String,
    },
    /// The role may perform the transition.
    Guard {
        role: String,
        transition: String,
    },
}

/// Classifies the statements declared on a status.
///
/// An action matching a transition title takes precedence over an
/// action group of the same name; an action that is neither fails the
/// whole classification.
pub fn classify<'s, I>(
    status: &str,
    statements: I,
    action_groups: &BTreeSet<String>,
    transition_titles: &BTreeSet<&str>,
) -> Result<Vec<Classified>, GeneratorError>
where
    I: IntoIterator<Item = &'s Statement>,
{
    statements.into_iter()
        .map(|Statement { role, action }| {
            if transition_titles.contains(action.as_str()) {
                log::debug!("{status}: `{role}` may perform transition `{action}`");
                Ok(Classified::Guard {
                    role: role.clone(),
                    transition: action.clone(),
                })
            } else if action_groups.contains(action) {
                log::debug!("{status}: `{role}` granted action group `{action}`");
                Ok(Classified::Grant {
                    role: role.clone(),
                    action_group: action.clone(),
                })
            } else {
                Err(GeneratorError::UnclassifiableAction {
                    action: action.clone(),
                    status: status.to_string(),
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn groups() -> BTreeSet<String> {
        ["view", "edit", "publish"].into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn split() -> anyhow::Result<()> {
        let statements = [
            Statement::from(("writer", "view")),
            Statement::from(("writer", "submit")),
            Statement::from(("boss", "edit")),
        ];
        let result = classify(
            "Private",
            &statements,
            &groups(),
            &BTreeSet::from(["submit"]),
        )?;
        assert_eq!(result, [
            Classified::Grant {
                role: "writer".to_string(),
                action_group: "view".to_string(),
            },
            Classified::Guard {
                role: "writer".to_string(),
                transition: "submit".to_string(),
            },
            Classified::Grant {
                role: "boss".to_string(),
                action_group: "edit".to_string(),
            },
        ]);
        Ok(())
    }

    #[test]
    fn transition_takes_precedence() -> anyhow::Result<()> {
        let statements = [Statement::from(("boss", "publish"))];
        let result = classify(
            "Pending",
            &statements,
            &groups(),
            &BTreeSet::from(["publish"]),
        )?;
        assert_eq!(result, [
            Classified::Guard {
                role: "boss".to_string(),
                transition: "publish".to_string(),
            },
        ]);
        Ok(())
    }

    #[test]
    fn unclassifiable() {
        let statements = [
            Statement::from(("writer", "view")),
            Statement::from(("writer", "fly")),
        ];
        let err = classify(
            "Private",
            &statements,
            &groups(),
            &BTreeSet::new(),
        ).expect_err("should be an error");
        assert!(matches!(
            &err,
            GeneratorError::UnclassifiableAction { action, status }
                if action == "fly" && status == "Private"
        ));
        assert_eq!(
            err.to_string(),
            "action `fly` on status `Private` is neither action group nor transition",
        );
    }
}
