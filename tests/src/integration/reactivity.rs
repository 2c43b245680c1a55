//! # Reactivity & Gating
//!
//! The compatibility check re-runs when its inputs change, never serves a
//! stale verdict across an installed-set change, and a non-compatible
//! verdict blocks the install action no matter what else is valid.

#[cfg(test)]
mod tests {
    use crate::integration::{bytecode_of, core, publish, stack, zero_param_abi, CHAIN, PUBLISHER_HEX};
    use mh_01_publish_registry::prelude::{ModuleName, VersionSelector};
    use mh_04_install_planner::prelude::{InstallRequest, PlanStep, PlannerError};
    use shared_types::Address;

    fn request(module: &str, version: VersionSelector) -> InstallRequest {
        InstallRequest {
            chain: CHAIN,
            core: core(),
            publisher: PUBLISHER_HEX.to_string(),
            module: ModuleName::new(module),
            version,
        }
    }

    #[tokio::test]
    async fn test_unchanged_inputs_reuse_the_verdict() {
        let s = stack();
        publish(&s, "ModuleA", "1.0.0", Some(zero_param_abi()));

        let req = request("ModuleA", VersionSelector::Latest);
        s.planner.plan_install(&req).await;
        s.planner.plan_install(&req).await;
        s.planner.plan_install(&req).await;

        assert_eq!(s.oracle.calls(), 1);
        assert_eq!(s.planner.stats().await.cache_hits, 2);
    }

    #[tokio::test]
    async fn test_version_change_recomputes() {
        let s = stack();
        publish(&s, "ModuleA", "1.0.0", Some(zero_param_abi()));
        publish(&s, "ModuleA", "2.0.0", Some(zero_param_abi()));

        s.planner
            .plan_install(&request("ModuleA", VersionSelector::Exact("1.0.0".to_string())))
            .await;
        s.planner
            .plan_install(&request("ModuleA", VersionSelector::Exact("2.0.0".to_string())))
            .await;

        assert_eq!(s.oracle.calls(), 2);
    }

    #[tokio::test]
    async fn test_module_change_recomputes() {
        let s = stack();
        publish(&s, "ModuleA", "1.0.0", Some(zero_param_abi()));
        publish(&s, "ModuleB", "1.0.0", Some(zero_param_abi()));

        s.planner
            .plan_install(&request("ModuleA", VersionSelector::Latest))
            .await;
        s.planner
            .plan_install(&request("ModuleB", VersionSelector::Latest))
            .await;

        assert_eq!(s.oracle.calls(), 2);
    }

    #[tokio::test]
    async fn test_installed_set_change_recomputes() {
        let s = stack();
        publish(&s, "ModuleA", "1.0.0", Some(zero_param_abi()));
        publish(&s, "ModuleB", "1.0.0", Some(zero_param_abi()));

        let plan_b = request("ModuleB", VersionSelector::Latest);
        s.planner.plan_install(&plan_b).await;
        let calls_before = s.oracle.calls();

        // Installing ModuleA changes the installed set under ModuleB's
        // pending verdict.
        s.planner
            .install(&request("ModuleA", VersionSelector::Latest), &[], Address::ZERO)
            .await
            .unwrap();

        s.planner.plan_install(&plan_b).await;
        assert_eq!(
            s.oracle.calls(),
            calls_before + 2,
            "install itself re-checks, and the post-install plan must not reuse the stale verdict"
        );
    }

    #[tokio::test]
    async fn test_incompatible_verdict_blocks_install() {
        let s = stack();
        publish(&s, "ConflictingModule", "1.0.0", Some(zero_param_abi()));
        s.oracle.deny(&bytecode_of("ConflictingModule", "1.0.0"));

        let err = s
            .planner
            .install(
                &request("ConflictingModule", VersionSelector::Latest),
                &[],
                Address::ZERO,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PlannerError::Blocked {
                step: PlanStep::CheckCompatibility,
                ..
            }
        ));
        assert_eq!(s.gateway.sends(), 0, "nothing may reach the chain");
        assert_eq!(s.planner.stats().await.compatibility_blocks, 1);
    }

    #[tokio::test]
    async fn test_oracle_outage_fails_closed() {
        let s = stack();
        publish(&s, "SomeModule", "1.0.0", Some(zero_param_abi()));
        s.oracle.set_failure(Some("oracle unreachable".to_string()));

        let err = s
            .planner
            .install(
                &request("SomeModule", VersionSelector::Latest),
                &[],
                Address::ZERO,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::Blocked { .. }));
        assert_eq!(s.gateway.sends(), 0);

        // The outage clears; the same request now installs.
        s.oracle.set_failure(None);
        let receipt = s
            .planner
            .install(
                &request("SomeModule", VersionSelector::Latest),
                &[],
                Address::ZERO,
            )
            .await
            .unwrap();
        assert!(receipt.success);
    }

    #[tokio::test]
    async fn test_conflict_with_installed_module_blocks_new_candidate() {
        let s = stack();
        publish(&s, "FirstModule", "1.0.0", Some(zero_param_abi()));
        publish(&s, "SecondModule", "1.0.0", Some(zero_param_abi()));

        s.planner
            .install(&request("FirstModule", VersionSelector::Latest), &[], Address::ZERO)
            .await
            .unwrap();

        // The already-installed module is what conflicts.
        s.oracle.deny(&bytecode_of("FirstModule", "1.0.0"));

        let plan = s
            .planner
            .plan_install(&request("SecondModule", VersionSelector::Latest))
            .await;
        let (step, _) = plan.first_unsatisfied().unwrap();
        assert_eq!(step, PlanStep::CheckCompatibility);
    }
}
