//! Parallel conversion of several files.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::parser::ConvertOptions;

use super::{Conversion, Converter};

/// Outcome for one input of a batch.
#[derive(Debug)]
pub struct BatchItem {
    /// Input path
    pub path: PathBuf,
    /// Conversion or the error that stopped it
    pub result: Result<Conversion>,
}

impl BatchItem {
    /// Check if the file converted.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Convert files concurrently, one converter per file.
///
/// Results come back in input order. A failing file does not affect the others.
pub fn convert_batch<P>(paths: &[P], options: &ConvertOptions) -> Vec<BatchItem>
where
    P: AsRef<Path> + Sync,
{
    convert_batch_with(paths, options, |_| {})
}

/// Like [`convert_batch`], calling `on_done` as each file finishes.
///
/// `on_done` runs on worker threads in completion order.
pub fn convert_batch_with<P, F>(paths: &[P], options: &ConvertOptions, on_done: F) -> Vec<BatchItem>
where
    P: AsRef<Path> + Sync,
    F: Fn(&BatchItem) + Sync,
{
    log::debug!("Converting {} files", paths.len());
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref().to_path_buf();
            let result = Converter::new(options.clone()).and_then(|c| c.convert_file(&path));
            let item = BatchItem { path, result };
            on_done(&item);
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        std::fs::write(
            &good,
            r#"{"pages":[{"lines":[{"spans":[{"text":"Hello","size":12}]}]}]}"#,
        )
        .unwrap();
        let missing = dir.path().join("missing.pdf");

        let items = convert_batch(&[good.clone(), missing.clone()], &ConvertOptions::default());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].path, good);
        assert!(items[0].is_ok());
        assert_eq!(items[1].path, missing);
        assert!(matches!(items[1].result, Err(Error::Io(_))));
    }

    #[test]
    fn test_batch_reports_each_completion() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let done = AtomicUsize::new(0);
        let items = convert_batch_with(&["x.pdf", "y.pdf", "z.json"], &ConvertOptions::default(), |_| {
            done.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(items.len(), 3);
        assert_eq!(done.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_batch_invalid_options_fail_every_item() {
        let options = ConvertOptions::new().with_heading_threshold(-1.0);
        let items = convert_batch(&["a.pdf", "b.pdf"], &options);
        assert!(items
            .iter()
            .all(|i| matches!(i.result, Err(Error::InvalidConfig(_)))));
    }
}
