use std::{
    collections::BTreeMap,
    fmt,
};
use wfcore::{
    error::SpecificationError,
    spec::Transition,
    traits::Normalizer,
};

use crate::error::GeneratorError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IdNamespace {
    State,
    Transition,
    Worklist,
}

impl fmt::Display for IdNamespace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            IdNamespace::State => "state",
            IdNamespace::Transition => "transition",
            IdNamespace::Worklist => "worklist",
        })
    }
}

/// Produces the identifiers of the nodes within a workflow document.
pub struct Ids<'a, N> {
    workflow_id: &'a str,
    normalizer: &'a N,
}

impl<'a, N: Normalizer> Ids<'a, N> {
    pub fn new(workflow_id: &'a str, normalizer: &'a N) -> Self {
        Self {
            workflow_id,
            normalizer,
        }
    }

    pub fn status_id(&self, title: &str) -> String {
        format!(
            "{}--STATUS--{}",
            self.workflow_id,
            self.normalizer.normalize(title),
        )
    }

    /// Both endpoints are part of the identifier.
    pub fn transition_id(
        &self,
        transition: &Transition,
    ) -> Result<String, SpecificationError> {
        Ok(format!(
            "{}--TRANSITION--{}--{}_{}",
            self.workflow_id,
            self.normalizer.normalize(&transition.title),
            self.normalizer.normalize(transition.src()?),
            self.normalizer.normalize(transition.dest()?),
        ))
    }

    pub fn worklist_id(&self, title: &str) -> String {
        format!(
            "{}--WORKLIST--{}",
            self.workflow_id,
            self.normalizer.normalize(title),
        )
    }
}

/// Collects the (id, title) entries into a map, failing when two
/// distinct titles produced the same id.
pub fn unique_ids<'t, I>(
    namespace: IdNamespace,
    entries: I,
) -> Result<BTreeMap<String, &'t str>, GeneratorError>
where
    I: IntoIterator<Item = (String, &'t str)>,
{
    let mut result: BTreeMap<String, &'t str> = BTreeMap::new();
    for (id, title) in entries {
        match result.get(&id) {
            Some(&first) if first != title => {
                return Err(GeneratorError::IdentifierCollision {
                    namespace,
                    id,
                    first: first.to_string(),
                    second: title.to_string(),
                });
            }
            Some(_) => (),
            None => {
                result.insert(id, title);
            }
        }
    }
    Ok(result)
}

#[cfg(test)]
mod test {
    use crate::IdNormalizer;
    use super::*;

    #[test]
    fn identifiers() -> anyhow::Result<()> {
        let normalizer = IdNormalizer;
        let ids = Ids::new("example-workflow", &normalizer);
        assert_eq!(ids.status_id("Foo"), "example-workflow--STATUS--foo");
        assert_eq!(ids.worklist_id("Pending review"), "example-workflow--WORKLIST--pending-review");
        assert_eq!(
            ids.transition_id(&Transition::new("b\u{e4}rize", "Foo", "Bar"))?,
            "example-workflow--TRANSITION--barize--foo_bar",
        );
        assert_eq!(
            ids.transition_id(&Transition {
                title: "orphan".to_string(),
                src_status: None,
                dest_status: Some("Foo".to_string()),
            }),
            Err(SpecificationError::MissingSource("orphan".to_string())),
        );
        Ok(())
    }

    #[test]
    fn collision() {
        let normalizer = IdNormalizer;
        let ids = Ids::new("wf", &normalizer);
        let titles = ["Pending Review", "pending-review"];
        let err = unique_ids(
            IdNamespace::State,
            titles.iter().map(|title| (ids.status_id(title), *title)),
        ).expect_err("should be an error");
        assert_eq!(
            err.to_string(),
            "state id `wf--STATUS--pending-review` is produced by both \
            `Pending Review` and `pending-review`",
        );
    }

    #[test]
    fn no_collision() -> anyhow::Result<()> {
        let normalizer = IdNormalizer;
        let ids = Ids::new("wf", &normalizer);
        let result = unique_ids(
            IdNamespace::Worklist,
            ["Private", "Published"].into_iter()
                .map(|title| (ids.worklist_id(title), title)),
        )?;
        assert_eq!(result.get("wf--WORKLIST--private"), Some(&"Private"));
        assert_eq!(result.len(), 2);
        Ok(())
    }
}
