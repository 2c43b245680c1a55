//! # Registry Consistency
//!
//! Latest/catalog agreement and the publisher-resolution short-circuit,
//! exercised through the registry service rather than the adapter alone.

#[cfg(test)]
mod tests {
    use crate::integration::{publish, publisher, stack, zero_param_abi};
    use mh_01_publish_registry::prelude::{ModuleName, RegistryError, VersionSelector};

    #[tokio::test]
    async fn test_latest_agrees_with_version_list() {
        let s = stack();
        // Deliberately published out of order, with a double-digit major to
        // catch lexicographic ordering.
        for version in ["9.0.0", "10.1.0", "1.0.0", "10.0.2"] {
            publish(&s, "ClaimableERC721", version, Some(zero_param_abi()));
        }

        let registry =
            mh_01_publish_registry::service::RegistryService::new(s.resolver.clone(), s.registry.clone());
        let module = ModuleName::new("ClaimableERC721");

        let latest = registry
            .lookup_version(publisher(), &module, &VersionSelector::Latest)
            .await
            .unwrap();

        // The latest lookup must agree with the semver-greatest entry of
        // the full catalog.
        let catalog = registry.list_versions(publisher(), &module).await.unwrap();
        let greatest = catalog
            .iter()
            .max_by_key(|record| semver::Version::parse(&record.version).ok())
            .unwrap();

        assert_eq!(latest.version, greatest.version);
        assert_eq!(latest.version, "10.1.0");
    }

    #[tokio::test]
    async fn test_every_cataloged_version_is_reachable_exactly() {
        let s = stack();
        for version in ["1.0.0", "1.1.0", "2.0.0"] {
            publish(&s, "TransferableERC20", version, Some(zero_param_abi()));
        }

        let registry =
            mh_01_publish_registry::service::RegistryService::new(s.resolver.clone(), s.registry.clone());
        let module = ModuleName::new("TransferableERC20");

        for record in registry.list_versions(publisher(), &module).await.unwrap() {
            let found = registry
                .lookup_version(
                    publisher(),
                    &module,
                    &VersionSelector::Exact(record.version.clone()),
                )
                .await
                .unwrap();
            assert_eq!(found.version, record.version);
        }
    }

    #[tokio::test]
    async fn test_exact_lookup_has_no_range_semantics() {
        let s = stack();
        publish(&s, "TransferableERC20", "1.2.3", Some(zero_param_abi()));

        let registry =
            mh_01_publish_registry::service::RegistryService::new(s.resolver.clone(), s.registry.clone());
        let module = ModuleName::new("TransferableERC20");

        // "1.2" would match under caret/range semantics; the catalog scan
        // is verbatim and must miss.
        let err = registry
            .lookup_version(
                publisher(),
                &module,
                &VersionSelector::Exact("1.2".to_string()),
            )
            .await
            .unwrap_err();
        assert_eq!(err, RegistryError::not_found("TransferableERC20", "1.2"));
    }

    #[tokio::test]
    async fn test_address_inputs_never_touch_the_resolver() {
        let s = stack();
        let registry =
            mh_01_publish_registry::service::RegistryService::new(s.resolver.clone(), s.registry.clone());

        // All-lowercase, all-uppercase-after-prefix, and checksummed forms.
        for input in [
            "0xdd9900000000000000000000000000000000b024",
            "0xDD9900000000000000000000000000000000B024",
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        ] {
            registry.resolve_publisher(input).await.unwrap();
        }

        assert_eq!(s.resolver.calls(), 0);
    }
}
