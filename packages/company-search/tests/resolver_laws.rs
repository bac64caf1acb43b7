//! Property tests for resolution over arbitrary queries.

use std::sync::Arc;

use company_search::testing::{MockModel, MockReply};
use company_search::{
    fallback_resolve, CompanyRecord, Field, Resolution, Resolver, StructuredFilter, WhitelistSet,
};
use proptest::prelude::*;

const VOCABULARY: &[&str] = &[
    "fintech", "health", "medical", "ai", "ml", "email", "voice", "robotics", "iot", "hr",
    "security", "customer", "us", "usa", "america", "india", "indian", "indiana", "uk",
    "britain", "mumbai", "california", "new york", "bengaluru", "companies", "startups", "in",
    "founded", "since", "between", "and", "before", "2015", "2020", "1000-5000", "employees",
];

fn directory() -> Vec<CompanyRecord> {
    vec![
        CompanyRecord::new("1", "Paywise")
            .with_category("Financial Services")
            .with_country("India")
            .with_state("Maharashtra")
            .with_city("Mumbai"),
        CompanyRecord::new("2", "Cardio")
            .with_category("Healthcare & Medical Diagnostics")
            .with_country("US")
            .with_state("California"),
        CompanyRecord::new("3", "Gearbox")
            .with_category("Industry, Robotics, and IoT")
            .with_country("United States")
            .with_state("Indiana"),
    ]
}

fn query() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::collection::vec(proptest::sample::select(VOCABULARY), 1..6)
            .prop_map(|words| words.join(" ")),
        "[A-Za-z0-9 ,.-]{0,40}",
    ]
}

fn resolve(resolver: &Resolver, query: &str, companies: &[CompanyRecord]) -> Resolution {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(resolver.resolve(query, companies))
}

fn within(filter: &StructuredFilter, whitelist: &WhitelistSet) -> bool {
    Field::ALL
        .into_iter()
        .all(|field| filter.values(field).iter().all(|v| whitelist.contains(field, v)))
}

proptest! {
    #[test]
    fn proptest_no_credential_equals_fallback(q in query()) {
        let companies = directory();
        let whitelist = WhitelistSet::from_companies(&companies);
        let resolution = resolve(&Resolver::heuristic_only(), &q, &companies);

        if q.trim().is_empty() {
            prop_assert!(resolution.filter.is_empty());
        } else {
            prop_assert_eq!(resolution.filter, fallback_resolve(&q, &whitelist));
        }
    }

    #[test]
    fn proptest_fallback_stays_in_whitelist(q in query()) {
        let companies = directory();
        let whitelist = WhitelistSet::from_companies(&companies);
        let resolution = resolve(&Resolver::heuristic_only(), &q, &companies);
        prop_assert!(within(&resolution.filter, &whitelist));
    }

    #[test]
    fn proptest_model_output_stays_in_whitelist(
        q in query(),
        values in proptest::collection::vec(proptest::sample::select(VOCABULARY), 0..6),
    ) {
        let companies = directory();
        let whitelist = WhitelistSet::from_companies(&companies);

        // Mix of whitelisted and invented values in every field
        let mut pool: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        pool.extend(["India", "US", "Mumbai", "Financial Services", "Atlantis"].map(String::from));
        let reply = serde_json::json!({
            "categories": pool,
            "countries": pool,
            "states": pool,
            "cities": pool,
            "keywords": values,
        });

        let model = MockModel::new().with_reply(MockReply::text(reply.to_string()));
        let resolution = resolve(&Resolver::new(Arc::new(model)), &q, &companies);
        prop_assert!(within(&resolution.filter, &whitelist));
    }
}
