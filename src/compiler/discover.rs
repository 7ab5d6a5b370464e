//! Action discovery: which files in the actions folder are actions, and what
//! resource each one is mounted as.

use std::future::Future;
use std::io;
use std::path::Path;

use tracing::{debug, error};

use super::ActionDescriptor;

/// Lists the file names (not paths) directly inside a folder.
pub trait ListFiles: Send + Sync {
    fn list_files(&self, folder: &Path) -> impl Future<Output = io::Result<Vec<String>>> + Send;
}

/// Lists files on the local disk. Subdirectories and names that are not
/// valid UTF-8 are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiskFolder;

impl ListFiles for DiskFolder {
    async fn list_files(&self, folder: &Path) -> io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(folder).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(name) => debug!(file = ?name, "skipping non UTF-8 file name"),
            }
        }
        Ok(files)
    }
}

/// Lists the action files in `folder` and derives each one's path name.
///
/// `extension` may be given with or without its leading dot. Results are
/// sorted by file name. A folder that cannot be read yields no actions: the
/// error is logged and the app starts with zero routes.
pub async fn discover<F: ListFiles>(files: &F, folder: &Path, extension: &str) -> Vec<ActionDescriptor> {
    let mut names = match files.list_files(folder).await {
        Ok(names) => names,
        Err(e) => {
            error!(
                folder = %folder.display(),
                error = %e,
                "unable to read actions folder, check the `actions_folder` setting",
            );
            return Vec::new();
        }
    };
    names.sort();

    let suffix = format!(".{}", extension.trim_start_matches('.'));
    names
        .into_iter()
        .filter_map(|file_name| {
            let path_name = file_name.strip_suffix(&suffix)?;
            if path_name.is_empty() {
                return None;
            }
            let path_name = path_name.to_owned();
            Some(ActionDescriptor::new(file_name, path_name))
        })
        .collect()
}
