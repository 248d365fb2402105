use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_path_to_error as spte;

use crate::error::ExtractError;

/// Leser en fil som tekst. Manglende fil gir `Ok(None)`.
pub fn read_to_string(path: &Path) -> Result<Option<String>, ExtractError> {
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("mangler {}", path.display());
            Ok(None)
        }
        Err(source) => Err(ExtractError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parser JSON-tekst til `T`.
/// Syntaksfeil gir `Json`, formfeil gir `Schema` med sti (f.eks. `data[3].data`).
pub fn parse_json<T: DeserializeOwned>(text: &str, path: &Path) -> Result<T, ExtractError> {
    parse_json_at(text, path, None)
}

pub(crate) fn parse_json_at<T: DeserializeOwned>(
    text: &str,
    path: &Path,
    line: Option<usize>,
) -> Result<T, ExtractError> {
    let mut de = serde_json::Deserializer::from_str(text);
    let value: T = spte::deserialize(&mut de).map_err(|e| classify(e, path, line))?;
    de.end().map_err(|source| ExtractError::Json {
        path: path.to_path_buf(),
        line,
        source,
    })?;
    Ok(value)
}

fn classify(e: spte::Error<serde_json::Error>, path: &Path, line: Option<usize>) -> ExtractError {
    match e.inner().classify() {
        Category::Data => {
            let location = e.path().to_string();
            ExtractError::Schema {
                path: path.to_path_buf(),
                location: match line {
                    Some(l) => format!("linje {l}: {location}"),
                    None => location,
                },
                message: e.inner().to_string(),
            }
        }
        Category::Io | Category::Syntax | Category::Eof => ExtractError::Json {
            path: path.to_path_buf(),
            line,
            source: e.into_inner(),
        },
    }
}
