use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's `Cargo.toml`, used to find the path under which a
/// `backfield` crate is reachable from generated code.
///
/// # Example
///
/// ```rust
/// # use backfield_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("backfield_meta"));
/// ```
///
/// Reading the manifest is not free. Call [`Manifest::shared`] once per
/// macro invocation and pass the resulting path around.
///
/// # Resolution rules
///
/// For `dependencies`, then `dev-dependencies`:
///
/// 1. If the requested crate is listed by its own name, return `::crate_name`.
/// 2. If the requested crate starts with `backfield_` and the facade crate
///    `backfield` is listed, possibly renamed through `package = "backfield"`,
///    return `::<key>::short_name` (e.g. `backfield_meta` -> `::backfield::meta`).
///
/// Otherwise fall back to `::crate_name`.
///
/// A crate that refers to itself should declare `extern crate self as <name>;`
/// in its root so that the absolute path also works inside the crate.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "backfield";
const CRATE_PREFIX: &str = "backfield_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn parse_path(text: &str) -> syn::Path {
        syn::parse_str(text).unwrap_or_else(|_| panic!("`{text}` is not a valid path"))
    }

    // Key under which the facade crate is listed, following `package = ".."` renames.
    fn facade_key(deps: &Table) -> Option<&str> {
        if deps.contains_key(FACADE_NAME) {
            return Some(FACADE_NAME);
        }
        deps.iter().find_map(|(key, item)| {
            let package = item.get("package")?.as_str()?;
            (package == FACADE_NAME).then_some(key)
        })
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_path(&format!("::{name}")));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        let facade = Self::facade_key(deps)?;
        Some(Self::parse_path(&format!("::{facade}::{module}")))
    }

    /// Returns the [`syn::Path`] of the crate `name` as seen from the caller.
    ///
    /// See the type-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|section| match self.manifest.get(section) {
                Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| Self::parse_path(&format!("::{name}")))
    }

    /// Runs `func` with the caller's manifest.
    ///
    /// Manifests are cached per path and re-read when the file's modified
    /// time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time =
            Self::modified_time(&path).expect("The Cargo.toml should have a modified time.");

        {
            let cache = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = cache.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use toml_edit::Document;

    use super::Manifest;

    fn path_string(path: &syn::Path) -> String {
        let segments = path
            .segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect::<Vec<_>>()
            .join("::");
        match path.leading_colon {
            Some(_) => format!("::{segments}"),
            None => segments,
        }
    }

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.to_owned().into_boxed_str()).unwrap(),
            modified_time: std::time::SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\nbackfield_meta = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("backfield_meta")), "::backfield_meta");
    }

    #[test]
    fn through_facade() {
        let m = manifest("[dependencies]\nbackfield = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("backfield_meta")), "::backfield::meta");
    }

    #[test]
    fn through_renamed_facade() {
        let m = manifest("[dependencies]\nbf = { package = \"backfield\", version = \"0.0.1\" }\n");
        assert_eq!(path_string(&m.get_crate_path("backfield_meta")), "::bf::meta");
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let m = manifest("[dev-dependencies]\nbackfield = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("backfield_meta")), "::backfield::meta");

        let m = manifest("[dependencies]\nserde = \"1\"\n");
        assert_eq!(path_string(&m.get_crate_path("backfield_meta")), "::backfield_meta");
    }
}
