//! Built-in verification scenarios
//!
//! A handful of fixed scenarios exercising the parse, mapping, snapping and
//! IMCA lookup paths against known answers. Hosts can run these at startup
//! to confirm a build behaves before trusting its numbers; the CLI exposes
//! them as the `check` command.

use crate::dataset::Dataset;
use crate::depth::imca_limit;
use crate::record::AnnotationFlag;
use crate::{Error, Result};

/// Run every verification scenario, returning a description of each check
/// that passed. The first failure aborts with [`Error::SelfCheck`].
pub fn run() -> Result<Vec<String>> {
    let mut passed = Vec::new();

    // Parsing and annotation-flag mapping
    let sample = "Depth(m/sw),BottomTime Min,Time till(1st stop Min)\n\
                  9,400,0.9\n\
                  15,200,0.6,,,,,,,,,,,,,,41.5,83,146,1\n";
    let dataset = Dataset::from_csv(sample);
    ensure(dataset.len() == 2, "sample CSV parses to two records")?;
    passed.push("sample CSV parses to two records".to_string());
    ensure(
        dataset.records()[1].flag() == Some(AnnotationFlag::One),
        "trailing annotation flag maps to 1",
    )?;
    passed.push("trailing annotation flag maps to 1".to_string());

    // Dataset depth snapping
    let synthetic = "Depth(m/sw),BottomTime Min,Time till(1st stop Min)\n\
                     18,60,1.5\n19,60,1.3\n36,60,2.1\n";
    let dataset = Dataset::from_csv(synthetic);
    let m = dataset.filter_by_depth(18.5);
    ensure(
        m.used_depth == Some(19.0) && m.snapped,
        "18.5 msw snaps to dataset depth 19",
    )?;
    passed.push("18.5 msw snaps to dataset depth 19".to_string());
    let m = dataset.filter_by_depth(33.4);
    ensure(
        m.used_depth == Some(36.0) && m.snapped,
        "33.4 msw snaps to dataset depth 36",
    )?;
    passed.push("33.4 msw snaps to dataset depth 36".to_string());

    // IMCA limit table
    ensure(
        imca_limit(17.0).map(|l| l.depth) == Some(18.0)
            && imca_limit(22.1).map(|l| l.depth) == Some(23.0)
            && imca_limit(51.0).map(|l| l.depth) == Some(51.0)
            && imca_limit(55.0).is_none(),
        "IMCA lookups snap upward and cap at 51 msw",
    )?;
    passed.push("IMCA lookups snap upward and cap at 51 msw".to_string());

    Ok(passed)
}

fn ensure(condition: bool, what: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::self_check(what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_checks_pass() {
        let passed = run().expect("self-checks must pass");
        assert_eq!(passed.len(), 5);
    }
}
