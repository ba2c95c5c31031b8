use mockall::mock;
use std::collections::BTreeSet;
use wfcore::{
    error::RegistryError,
    traits::{
        ActionGroupRegistry,
        PermissionCollector,
    },
};

mock! {
    pub Registry {}

    impl ActionGroupRegistry for Registry {
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

    impl PermissionCollector for Registry {
        fn collect(
            &self,
            workflow_id: &str,
        ) -> Result<BTreeSet<String>, RegistryError>;
    }
}
