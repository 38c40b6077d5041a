use anyhow::Result;

use crate::node::{Child, Children};

/// Depth-first walk over `children` in insertion order. `callback`
/// sees every entry together with its correlation path (keys joined
/// by `_`, prefixed by `base_path` if that is non-empty). Nested lists
/// are passed to the callback themselves and then walked with their
/// own path as the base. The first error stops the walk.
pub fn walk<F>(children: &Children, base_path: &str, callback: &mut F) -> Result<()>
where F: FnMut(&Child, &str) -> Result<()>
{
    for (key, value) in children.iter() {
        let path = if base_path.is_empty() {
            key.to_string()
        } else {
            format!("{base_path}_{key}")
        };
        callback(value, &path)?;
        if let Child::List(list) = value {
            walk(list, &path, callback)?;
        }
    }
    Ok(())
}
