use crate::error::CliError;
use filter_syntax::FilterNode;
use model::Schema;
use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
};
use tracing::debug;

pub fn load_filter(path: &str) -> Result<FilterNode, CliError> {
    let node: FilterNode = read_json(path)?;
    debug!("Loaded filter with {} node(s) from {}", node.node_count(), path);
    Ok(node)
}

pub fn load_schema(path: &str) -> Result<Schema, CliError> {
    let schema: Schema = read_json(path)?;
    debug!(
        "Loaded schema '{}' with {} field(s) from {}",
        schema.name,
        schema.fields.len(),
        path
    );
    Ok(schema)
}

/// Opens the records source: a file, or stdin for `None` and `-`.
pub fn open_records(path: Option<&str>) -> Result<Box<dyn BufRead>, CliError> {
    match path {
        None | Some("-") => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
    }
}

fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, CliError> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::JsonFile {
        path: path.to_string(),
        source,
    })
}
