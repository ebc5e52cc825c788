//! Validate the content files the sites will serve.

use std::path::Path;

use thiserror::Error;

use atelier_core::content::{ContentStores, StoreError, Validate};

/// Check outcome for the whole directory.
#[derive(Debug, Error)]
#[error("{failures} of {total} content files failed validation")]
pub struct CheckFailed {
    pub failures: usize,
    pub total: usize,
}

/// Validate every content file under `dir`.
///
/// Missing optional files (catalog, order book) pass; a missing homepage or
/// about file fails, since the storefront cannot render without them.
///
/// # Errors
///
/// Returns [`CheckFailed`] when any file is unreadable or invalid.
#[allow(clippy::print_stdout)]
pub fn run(dir: &Path) -> Result<(), CheckFailed> {
    let stores = ContentStores::new(dir);
    let mut failures = 0;
    let total = 4;

    // Loading re-runs the same write-time checks the admin applies.
    failures += usize::from(!report("products.json", check(stores.catalog().load_or_default())));
    failures += usize::from(!report("homepage.json", check(stores.homepage().load())));
    failures += usize::from(!report("about.json", check(stores.about().load())));
    failures += usize::from(!report("orders.json", check(stores.orders().load_or_default())));

    if failures == 0 {
        println!("all content files ok");
        Ok(())
    } else {
        Err(CheckFailed { failures, total })
    }
}

fn check<T: Validate>(result: Result<T, StoreError>) -> Result<(), String> {
    let value = result.map_err(|e| e.to_string())?;
    value.validate().map_err(|e| e.to_string())
}

#[allow(clippy::print_stdout)]
fn report(name: &str, result: Result<(), String>) -> bool {
    match result {
        Ok(()) => {
            println!("ok    {name}");
            true
        }
        Err(reason) => {
            println!("FAIL  {name}: {reason}");
            false
        }
    }
}
