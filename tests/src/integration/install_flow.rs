//! # End-to-End Install Flows
//!
//! The full choreography: a publisher address, a published module, a
//! compatibility verdict, and an install transaction observed through the
//! shared bus.

#[cfg(test)]
mod tests {
    use crate::integration::{core, publish, stack, zero_param_abi, CHAIN, PUBLISHER_HEX};
    use mh_01_publish_registry::prelude::{ModuleName, VersionSelector};
    use mh_02_module_abi::{AbiType, AbiValue};
    use mh_04_install_planner::prelude::{InstallRequest, PlanStep, UninstallRequest};
    use shared_bus::{EventFilter, EventTopic, ModuleEvent};
    use shared_types::Address;
    use std::time::Duration;
    use tokio::time::timeout;

    fn latest_request(module: &str) -> InstallRequest {
        InstallRequest {
            chain: CHAIN,
            core: core(),
            publisher: PUBLISHER_HEX.to_string(),
            module: ModuleName::new(module),
            version: VersionSelector::Latest,
        }
    }

    /// The canonical walkthrough: an address-form publisher, a module with
    /// no install parameters, version "latest".
    ///
    /// - resolves directly (the resolver port is never called)
    /// - fetches the latest published version
    /// - extracts zero install parameters
    /// - compatibility confirms, installation proceeds
    #[tokio::test]
    async fn test_batch_metadata_scenario() {
        let s = stack();
        publish(&s, "BatchMetadataERC721", "1.1.0", Some(zero_param_abi()));
        publish(&s, "BatchMetadataERC721", "1.2.0", Some(zero_param_abi()));

        let request = latest_request("BatchMetadataERC721");
        let plan = s.planner.plan_install(&request).await;

        assert!(plan.is_ready());
        assert_eq!(s.resolver.calls(), 0, "address input must bypass the resolver");
        assert_eq!(
            plan.module.as_ref().map(|m| m.version.as_str()),
            Some("1.2.0"),
            "latest must pick the newest published version"
        );
        assert!(plan.params.is_empty(), "no install parameters declared");

        let mut sub = s
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Installer]));

        let receipt = s
            .planner
            .install(&request, &[], Address::new([0xaa; 20]))
            .await
            .expect("install succeeds");
        assert!(receipt.success);

        let event = timeout(Duration::from_millis(200), sub.recv())
            .await
            .expect("event within window")
            .expect("bus open");
        match event {
            ModuleEvent::ModuleInstalled {
                module, version, ..
            } => {
                assert_eq!(module, "BatchMetadataERC721");
                assert_eq!(version, "1.2.0");
            }
            other => panic!("unexpected event: {other:?}"),
        }

        // Subscribers refetch the installed list and see the module.
        let installed = s.planner.installed_modules(CHAIN, core()).await.unwrap();
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].name.as_str(), "BatchMetadataERC721");
    }

    #[tokio::test]
    async fn test_name_publisher_resolves_through_resolver() {
        let s = stack();
        s.resolver.register("deployer.eth", crate::integration::publisher());
        publish(&s, "MintableERC20", "1.0.0", Some(zero_param_abi()));

        let mut request = latest_request("MintableERC20");
        request.publisher = "deployer.eth".to_string();

        let plan = s.planner.plan_install(&request).await;
        assert!(plan.is_ready());
        assert_eq!(s.resolver.calls(), 1);
    }

    #[tokio::test]
    async fn test_unresolvable_publisher_blocks_at_resolution() {
        let s = stack();
        publish(&s, "MintableERC20", "1.0.0", Some(zero_param_abi()));

        let mut request = latest_request("MintableERC20");
        request.publisher = "nobody.eth".to_string();

        let plan = s.planner.plan_install(&request).await;
        let (step, reason) = plan.first_unsatisfied().unwrap();
        assert_eq!(step, PlanStep::ResolvePublisher);
        assert!(reason.contains("nobody.eth"));
    }

    #[tokio::test]
    async fn test_install_with_royalty_parameters() {
        let s = stack();
        let abi = serde_json::json!([{
            "type": "function",
            "name": "encodeBytesOnInstall",
            "inputs": [
                { "type": "address", "name": "royaltyRecipient" },
                { "type": "uint16", "name": "royaltyBps" }
            ]
        }]);
        publish(&s, "RoyaltyERC721", "1.0.0", Some(abi));

        let request = latest_request("RoyaltyERC721");
        let plan = s.planner.plan_install(&request).await;
        assert_eq!(plan.params.len(), 2);

        // Values arrive as raw form JSON and are coerced against the schema.
        let types: Vec<AbiType> = plan
            .params
            .iter()
            .map(|p| AbiType::of_param(p).unwrap())
            .collect();
        let values = vec![
            AbiValue::from_json(
                &types[0],
                &serde_json::json!("0x1111111111111111111111111111111111111111"),
            )
            .unwrap(),
            AbiValue::from_json(&types[1], &serde_json::json!("250")).unwrap(),
        ];

        let receipt = s
            .planner
            .install(&request, &values, Address::ZERO)
            .await
            .expect("install succeeds");
        assert!(receipt.success);
    }

    #[tokio::test]
    async fn test_install_then_uninstall_roundtrip() -> anyhow::Result<()> {
        let s = stack();
        publish(&s, "RemovableModule", "1.0.0", Some(zero_param_abi()));

        s.planner
            .install(&latest_request("RemovableModule"), &[], Address::ZERO)
            .await?;
        assert_eq!(s.planner.installed_modules(CHAIN, core()).await?.len(), 1);

        let uninstall = UninstallRequest {
            chain: CHAIN,
            core: core(),
            publisher: PUBLISHER_HEX.to_string(),
            module: ModuleName::new("RemovableModule"),
            version: VersionSelector::Latest,
        };
        s.planner.uninstall(&uninstall, &[], Address::ZERO).await?;

        assert!(s
            .planner
            .installed_modules(CHAIN, core())
            .await?
            .is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_submission_leaves_state_for_resubmission() {
        let s = stack();
        publish(&s, "FlakyModule", "1.0.0", Some(zero_param_abi()));

        let request = latest_request("FlakyModule");

        s.gateway
            .set_fail_submission(Some("rpc unavailable".to_string()));
        assert!(s
            .planner
            .install(&request, &[], Address::ZERO)
            .await
            .is_err());

        // The user resubmits after the outage clears; same request works.
        s.gateway.set_fail_submission(None);
        let receipt = s
            .planner
            .install(&request, &[], Address::ZERO)
            .await
            .expect("resubmission succeeds");
        assert!(receipt.success);

        let stats = s.planner.stats().await;
        assert_eq!(stats.installs_attempted, 2);
        assert_eq!(stats.installs_failed, 1);
        assert_eq!(stats.installs_succeeded, 1);
    }
}
