use std::path::{Path, PathBuf};

/// Recursively lists the instance files under `folder`, keeping only files
/// with the given extension. Paths come back sorted.
pub fn collect_instances(folder: &Path, extension: &str) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut instances = Vec::new();
    collect_into(folder, extension, &mut instances)?;
    instances.sort();

    Ok(instances)
}

fn collect_into(
    folder: &Path,
    extension: &str,
    instances: &mut Vec<PathBuf>,
) -> Result<(), std::io::Error> {
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_into(&path, extension, instances)?;
        } else if path.extension().is_some_and(|ext| ext == extension) {
            instances.push(path);
        }
    }

    Ok(())
}
