use std::{
    fs::File,
    io::{
        BufReader,
        Read,
    },
    path::Path,
};
use wfcore::{
    registry::ActionGroupMap,
    spec::Specification,
};

use crate::error::WfbinError;

pub fn read_specification<R>(reader: R) -> Result<Specification, WfbinError>
where
    R: Read
{
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_registry<R>(reader: R) -> Result<ActionGroupMap, WfbinError>
where
    R: Read
{
    Ok(serde_json::from_reader(reader)?)
}

pub fn registry_from_path(path: &Path) -> Result<ActionGroupMap, WfbinError> {
    log::debug!("reading registry from {}", path.display());
    read_registry(BufReader::new(File::open(path)?))
}

/// The name of the directory holding the specification file.
pub fn workflow_id_for(spec_path: &Path) -> Result<String, WfbinError> {
    spec_path.canonicalize()?
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| WfbinError::NoWorkflowId(spec_path.display().to_string()))
}

/// Reads the specification at the path, returning it along with the
/// workflow id, which is derived from the path unless one is given.
pub fn load_workflow(
    spec_path: &Path,
    workflow_id: Option<String>,
) -> Result<(String, Specification), WfbinError> {
    let workflow_id = match workflow_id {
        Some(workflow_id) => workflow_id,
        None => workflow_id_for(spec_path)?,
    };
    log::debug!("reading workflow `{workflow_id}` from {}", spec_path.display());
    let spec = read_specification(BufReader::new(File::open(spec_path)?))?;
    Ok((workflow_id, spec))
}
