//! Fuzz target for evidence file parsing.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_evidence_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use regaudit_domain::ComplianceEvaluator;
use regaudit_evidence::EvidenceIndex;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(index) = EvidenceIndex::parse(text) else {
        return;
    };

    // Every department in the index must answer lookups without panicking.
    for department in index.departments() {
        let _ = index.evaluate(department, "GEN.20316");
    }
});
