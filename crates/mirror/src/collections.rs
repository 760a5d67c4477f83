//! The fixed set of tracker projects that hold mirrored documentation.

use crate::Collection;

/// Every documentation project in the tracker, in the order they are scanned.
///
/// When two issues declare the same source path, the one scanned last wins,
/// so this order is observable.
pub static DOC_COLLECTIONS: &[Collection] = &[
    Collection::new("Docs: ADRs (Locked)", "e1fc9ac8-c77a-4166-8108-bda48af1439a"),
    Collection::new("Docs: Architecture", "b4270666-78bf-4470-a0f0-ec9e9a249396"),
    Collection::new("Docs: CLI", "5c99c1c2-bb8f-46f8-99c0-50f9235e0256"),
    Collection::new("Docs: Engineering", "951b0719-0595-4a32-b686-69ccd4416662"),
    Collection::new("Docs: Frontend", "7705aea0-e18f-4d2f-a541-7972fbde5951"),
    Collection::new("Docs: Ops", "d6b4c854-792b-42d4-a6df-3259b8c2368b"),
    Collection::new("Docs: Product", "f641eadc-5e6e-40f3-a400-466974819fb8"),
    Collection::new("Docs: Runtime", "51e9b52b-4842-47ce-9ab3-8ebf6609cb82"),
    Collection::new("Docs: Specs", "6f247d46-c8f4-4558-b57d-beb9144bacdc"),
    Collection::new("Docs: Security", "6ae72cf9-6098-478c-83c7-ea6ea990b64a"),
    Collection::new("Docs: Archive", "7e5d6cdc-116d-411d-82e9-706a55b5f35f"),
    Collection::new("Docs: Navigation & Glossary", "1b7293b6-d74d-4048-944f-cd3f37e01cd0"),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_collection_ids_are_unique() {
        let ids: HashSet<_> = DOC_COLLECTIONS.iter().map(|c| c.collection_id()).collect();
        assert_eq!(ids.len(), DOC_COLLECTIONS.len());
    }
}
