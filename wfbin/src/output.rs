use std::{
    fs::File,
    io::{
        BufWriter,
        Write,
    },
    path::Path,
};
use wfgen::{
    document::WorkflowDoc,
    error::GeneratorError,
};

use crate::error::WfbinError;

pub fn write_definition<W>(doc: &WorkflowDoc, writer: W) -> Result<W, WfbinError>
where
    W: Write
{
    Ok(doc.write_xml(writer).map_err(GeneratorError::from)?)
}

/// Writes the definition to the path, replacing any existing file.
pub fn save_definition(doc: &WorkflowDoc, path: &Path) -> Result<(), WfbinError> {
    let mut writer = write_definition(doc, BufWriter::new(File::create(path)?))?;
    writer.flush()?;
    log::info!("wrote workflow `{}` to {}", doc.workflow_id, path.display());
    Ok(())
}
