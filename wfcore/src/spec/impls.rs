use std::collections::HashSet;

use crate::error::SpecificationError;
use super::*;

impl<R, A> From<(R, A)> for Statement
where
    R: Into<String>,
    A: Into<String>,
{
    fn from((role, action): (R, A)) -> Self {
        Self {
            role: role.into(),
            action: action.into(),
        }
    }
}

impl<I, B> From<(I, B)> for RoleInheritance
where
    I: Into<String>,
    B: Into<String>,
{
    fn from((inheritor, base): (I, B)) -> Self {
        Self {
            inheritor: inheritor.into(),
            base: base.into(),
        }
    }
}

impl Status {
    pub fn new<S, I>(title: impl Into<String>, statements: I) -> Self
    where
        S: Into<Statement>,
        I: IntoIterator<Item = S>,
    {
        Self {
            title: title.into(),
            statements: statements.into_iter()
                .map(Into::into)
                .collect(),
            .. Default::default()
        }
    }

    pub fn role_inheritance<R, I>(mut self, pairs: I) -> Self
    where
        R: Into<RoleInheritance>,
        I: IntoIterator<Item = R>,
    {
        self.role_inheritance.extend(pairs.into_iter().map(Into::into));
        self
    }

    pub fn worklist_viewers<S, I>(mut self, roles: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.worklist_viewers.extend(roles.into_iter().map(Into::into));
        self
    }
}

impl Transition {
    pub fn new(
        title: impl Into<String>,
        src_status: impl Into<String>,
        dest_status: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            src_status: Some(src_status.into()),
            dest_status: Some(dest_status.into()),
        }
    }

    pub fn src(&self) -> Result<&str, SpecificationError> {
        self.src_status
            .as_deref()
            .ok_or_else(|| SpecificationError::MissingSource(self.title.clone()))
    }

    pub fn dest(&self) -> Result<&str, SpecificationError> {
        self.dest_status
            .as_deref()
            .ok_or_else(|| SpecificationError::MissingDestination(self.title.clone()))
    }
}

impl Specification {
    pub fn new(
        title: impl Into<String>,
        initial_status: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            initial_status: initial_status.into(),
            .. Default::default()
        }
    }

    /// Registers the status under its own title, replacing any status
    /// previously registered under that title.
    pub fn add_status(&mut self, status: Status) -> &mut Self {
        self.states.insert(status.title.clone(), status);
        self
    }

    pub fn add_transition(&mut self, transition: Transition) -> &mut Self {
        self.transitions.push(transition);
        self
    }

    pub fn map_role(
        &mut self,
        customer_role: impl Into<String>,
        engine_role: impl Into<String>,
    ) -> &mut Self {
        self.role_mapping.insert(customer_role.into(), engine_role.into());
        self
    }

    pub fn status(&self, title: &str) -> Option<&Status> {
        self.states.get(title)
    }

    pub fn initial_status(&self) -> Result<&Status, SpecificationError> {
        self.status(&self.initial_status)
            .ok_or_else(|| SpecificationError::MissingInitialStatus(
                self.initial_status.clone()
            ))
    }

    pub fn find_transition(&self, title: &str) -> Option<&Transition> {
        self.transitions.iter()
            .find(|transition| transition.title == title)
    }

    /// Transitions leaving the given status, in declaration order.
    pub fn transitions_from<'a>(
        &'a self,
        status: &'a str,
    ) -> impl Iterator<Item = &'a Transition> + 'a {
        self.transitions.iter()
            .filter(move |transition| transition.src_status.as_deref() == Some(status))
    }

    pub fn engine_role(&self, customer_role: &str) -> Option<&str> {
        self.role_mapping
            .get(customer_role)
            .map(String::as_str)
    }

    pub fn validate(&self) -> Result<(), SpecificationError> {
        for (key, status) in self.states.iter() {
            if status.title.is_empty() {
                return Err(SpecificationError::EmptyStatusTitle);
            }
            if key != &status.title {
                return Err(SpecificationError::StatusKeyMismatch {
                    key: key.clone(),
                    title: status.title.clone(),
                });
            }
        }
        self.initial_status()?;

        let mut seen = HashSet::new();
        for transition in self.transitions.iter() {
            if transition.title.is_empty() {
                return Err(SpecificationError::EmptyTransitionTitle);
            }
            if !seen.insert(transition.title.as_str()) {
                return Err(SpecificationError::DuplicateTransition(
                    transition.title.clone()
                ));
            }
            for status in [transition.src()?, transition.dest()?] {
                if !self.states.contains_key(status) {
                    return Err(SpecificationError::UnknownStatus {
                        transition: transition.title.clone(),
                        status: status.to_string(),
                    });
                }
            }
        }
        log::trace!(
            "specification `{}` validated: {} states, {} transitions",
            self.title,
            self.states.len(),
            self.transitions.len(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn publication() -> Specification {
        let mut spec = Specification::new("Workflow", "Private");
        spec.add_status(Status::new("Private", [("employee", "publish")]))
            .add_status(Status::new("Published", [("boss", "retract")]))
            .add_transition(Transition::new("publish", "Private", "Published"))
            .add_transition(Transition::new("retract", "Published", "Private"))
            .map_role("employee", "Editor")
            .map_role("boss", "Reviewer");
        spec
    }

    #[test]
    fn valid() -> anyhow::Result<()> {
        let spec = publication();
        spec.validate()?;
        assert_eq!(spec.initial_status()?.title, "Private");
        assert_eq!(spec.engine_role("boss"), Some("Reviewer"));
        assert_eq!(spec.engine_role("nobody"), None);
        assert_eq!(
            spec.transitions_from("Published")
                .map(|t| t.title.as_str())
                .collect::<Vec<_>>(),
            ["retract"],
        );
        assert!(spec.find_transition("publish").is_some());
        assert!(spec.find_transition("Publish").is_none());
        Ok(())
    }

    #[test]
    fn missing_initial_status() {
        let mut spec = publication();
        spec.initial_status = "Draft".to_string();
        assert_eq!(
            spec.validate(),
            Err(SpecificationError::MissingInitialStatus("Draft".to_string())),
        );
    }

    #[test]
    fn missing_source() {
        let mut spec = publication();
        spec.add_transition(Transition {
            title: "revive".to_string(),
            src_status: None,
            dest_status: Some("Private".to_string()),
        });
        assert_eq!(
            spec.validate(),
            Err(SpecificationError::MissingSource("revive".to_string())),
        );
    }

    #[test]
    fn missing_destination() {
        let mut spec = publication();
        spec.add_transition(Transition {
            title: "archive".to_string(),
            src_status: Some("Published".to_string()),
            dest_status: None,
        });
        assert_eq!(
            spec.validate(),
            Err(SpecificationError::MissingDestination("archive".to_string())),
        );
    }

    #[test]
    fn empty_titles() {
        let mut spec = publication();
        spec.states.insert("".to_string(), Status::default());
        assert_eq!(spec.validate(), Err(SpecificationError::EmptyStatusTitle));

        let mut spec = publication();
        spec.add_transition(Transition::new("", "Private", "Published"));
        assert_eq!(spec.validate(), Err(SpecificationError::EmptyTransitionTitle));
    }

    #[test]
    fn unknown_destination() {
        let mut spec = publication();
        spec.add_transition(Transition::new("archive", "Published", "Archived"));
        assert_eq!(
            spec.validate(),
            Err(SpecificationError::UnknownStatus {
                transition: "archive".to_string(),
                status: "Archived".to_string(),
            }),
        );
    }

    #[test]
    fn duplicate_transition() {
        let mut spec = publication();
        spec.add_transition(Transition::new("publish", "Published", "Published"));
        assert_eq!(
            spec.validate(),
            Err(SpecificationError::DuplicateTransition("publish".to_string())),
        );
    }

    #[test]
    fn status_key_mismatch() {
        let mut spec = publication();
        spec.states.insert("Draft".to_string(), Status::new("Private", [
            ("employee", "view"),
        ]));
        assert!(matches!(
            spec.validate(),
            Err(SpecificationError::StatusKeyMismatch { key, title })
                if key == "Draft" && title == "Private"
        ));
    }

    #[test]
    fn deserialize() -> anyhow::Result<()> {
        let spec: Specification = serde_json::from_str(r#"{
            "title": "Workflow",
            "initial_status": "Private",
            "states": {
                "Private": {
                    "title": "Private",
                    "statements": [
                        {"role": "employee", "action": "publish"}
                    ],
                    "worklist_viewers": ["boss"]
                },
                "Published": {
                    "title": "Published",
                    "role_inheritance": [
                        {"inheritor": "boss", "base": "employee"}
                    ]
                }
            },
            "transitions": [
                {
                    "title": "publish",
                    "src_status": "Private",
                    "dest_status": "Published"
                }
            ],
            "role_mapping": {
                "employee": "Editor",
                "boss": "Reviewer"
            }
        }"#)?;
        spec.validate()?;
        assert_eq!(spec.description, None);
        assert!(spec.generals.is_empty());
        assert_eq!(
            spec.status("Private").map(|s| s.worklist_viewers.len()),
            Some(1),
        );
        assert_eq!(
            spec.status("Published")
                .and_then(|s| s.role_inheritance.iter().next())
                .cloned(),
            Some(RoleInheritance::from(("boss", "employee"))),
        );
        Ok(())
    }
}
