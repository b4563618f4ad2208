//! Tool catalogue
//!
//! Each endpoint is a [`ToolSpec`]: its route, the operation tag used in
//! error codes, the request schema, how validated fields map onto a
//! [`RemoteTask`], and how the result is named. The server mounts every
//! entry of [`ALL`] on the same pipeline.

mod compress;
mod convert;
mod lock;
mod merge;
mod page_number;
mod rotate;
mod split;
mod watermark;

pub use compress::COMPRESS;
pub use convert::{IMAGES_TO_PDF, OFFICE_TO_PDF, PDF_TO_JPG};
pub use lock::{LOCK, UNLOCK};
pub use merge::MERGE;
pub use page_number::PAGE_NUMBER;
pub use rotate::ROTATE;
pub use split::SPLIT;
pub use watermark::WATERMARK;

use crate::output::FileKind;
use crate::remote::RemoteTask;
use crate::validate::{Schema, ValidatedForm};

pub(crate) const PDF_ONLY: &[&str] = &["application/pdf"];

/// `"true"`/`"false"` form flags
pub(crate) const BOOLEAN: &[&str] = &["true", "false"];

const FALLBACK_BASE_NAME: &str = "document.pdf";

/// Download name for a single-document result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileName {
    /// Always the same name
    Fixed(&'static str),
    /// Prefix followed by the first upload's name
    Prefixed(&'static str),
}

impl FileName {
    pub fn render(&self, form: &ValidatedForm) -> String {
        match *self {
            FileName::Fixed(name) => name.to_string(),
            FileName::Prefixed(prefix) => {
                let base = match form.first_file_name() {
                    "" => FALLBACK_BASE_NAME,
                    name => name,
                };
                format!("{}{}", prefix, base)
            }
        }
    }
}

/// How a tool's result is delivered
#[derive(Debug, Clone, Copy)]
pub struct OutputSpec {
    /// Document kind of a single result (and of kept archive entries)
    pub kind: FileKind,
    pub single_name: FileName,
    pub archive_name: &'static str,
}

/// One endpoint of the toolbox
pub struct ToolSpec {
    /// Route path, e.g. `/api/rotate-pdf`
    pub route: &'static str,
    /// Tag appended to internal and credential error codes
    pub operation: &'static str,
    pub schema: Schema,
    pub output: OutputSpec,
    /// Map validated fields onto the remote task
    pub build_task: fn(&ValidatedForm) -> RemoteTask,
}

/// Every endpoint, in mount order
pub static ALL: &[&ToolSpec] = &[
    &COMPRESS,
    &MERGE,
    &SPLIT,
    &ROTATE,
    &PAGE_NUMBER,
    &WATERMARK,
    &LOCK,
    &UNLOCK,
    &IMAGES_TO_PDF,
    &PDF_TO_JPG,
    &OFFICE_TO_PDF,
];


#[cfg(test)]
mod tests {
    use super::test_support::form_for;
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_routes_and_tags_are_unique() {
        let routes: HashSet<_> = ALL.iter().map(|t| t.route).collect();
        let tags: HashSet<_> = ALL.iter().map(|t| t.operation).collect();
        assert_eq!(routes.len(), ALL.len());
        assert_eq!(tags.len(), ALL.len());
        assert!(ALL.iter().all(|t| t.route.starts_with("/api/")));
    }

    #[test]
    fn test_file_caps() {
        let caps: Vec<_> = ALL.iter().map(|t| (t.route, t.schema.files.max)).collect();
        assert!(caps.contains(&("/api/compress-pdf", 2)));
        assert!(caps.contains(&("/api/merge-pdf", 2)));
        assert!(caps.contains(&("/api/convert-images-to-pdf", 4)));
        assert!(ALL
            .iter()
            .all(|t| [1, 2, 4].contains(&t.schema.files.max)));
    }

    #[test]
    fn test_prefixed_name_uses_first_upload() {
        let form = form_for(&COMPRESS, &[]);
        assert_eq!(
            FileName::Prefixed("compressed-").render(&form),
            "compressed-input-1.pdf"
        );
        assert_eq!(FileName::Fixed("merge.pdf").render(&form), "merge.pdf");
    }
}
