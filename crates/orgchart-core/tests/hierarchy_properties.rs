use std::collections::HashSet;

use orgchart_core::hierarchy::{
    Forest, HierarchyStats, build_hierarchy_tree, find_manager_cycles, get_subordinate_ids,
    is_manager_of, would_create_cycle,
};
use orgchart_core::model::{MemberId, UserId};
use proptest::prelude::*;

use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn forest_reconstruction_covers_every_row_once(members in arb_forest(40)) {
        let roots = build_hierarchy_tree(&members);
        let seen: Vec<MemberId> = roots
            .iter()
            .flat_map(|root| root.walk().map(|(_, node)| node.id()))
            .collect();
        let unique: HashSet<MemberId> = seen.iter().copied().collect();

        prop_assert_eq!(seen.len(), members.len());
        prop_assert_eq!(unique.len(), members.len());
    }

    #[test]
    fn unmanaged_and_dangling_rows_are_roots(members in arb_any_snapshot(30)) {
        let ids: HashSet<MemberId> = members.iter().map(|m| m.id).collect();
        let roots: HashSet<MemberId> =
            build_hierarchy_tree(&members).iter().map(|r| r.id()).collect();

        for m in &members {
            let rootless = m.manager_id.is_none_or(|manager| !ids.contains(&manager));
            prop_assert_eq!(rootless, roots.contains(&m.id), "member {}", m.id);
        }
    }

    #[test]
    fn ancestry_matches_subordinates(members in arb_forest(25)) {
        for a in &members {
            let subs: HashSet<UserId> = get_subordinate_ids(&members, a.id).into_iter().collect();
            for b in &members {
                let managed = is_manager_of(&members, a.id, b.id);
                prop_assert_eq!(managed, subs.contains(&b.user_id), "{} over {}", a.id, b.id);
                prop_assert_eq!(managed, naive_is_ancestor(&members, a.id, b.id));
            }
        }
    }

    #[test]
    fn subordinates_are_unique_on_acyclic_input(members in arb_forest(40)) {
        for m in &members {
            let subs = get_subordinate_ids(&members, m.id);
            let unique: HashSet<UserId> = subs.iter().copied().collect();
            prop_assert_eq!(subs.len(), unique.len());
        }
    }

    #[test]
    fn self_loop_always_rejected(members in arb_any_snapshot(20), id in 1u64..30) {
        prop_assert!(would_create_cycle(&members, MemberId(id), MemberId(id)));
    }

    #[test]
    fn cycle_check_is_sound_and_complete(members in arb_forest(25)) {
        for m in &members {
            let subs: HashSet<UserId> = get_subordinate_ids(&members, m.id).into_iter().collect();
            for candidate in &members {
                let is_descendant_or_self =
                    candidate.id == m.id || subs.contains(&candidate.user_id);
                prop_assert_eq!(
                    would_create_cycle(&members, m.id, candidate.id),
                    is_descendant_or_self,
                    "{} under {}", m.id, candidate.id
                );
            }
        }
    }

    #[test]
    fn accepted_edits_keep_the_forest_acyclic(
        members in arb_forest(20),
        member_pick in any::<prop::sample::Index>(),
        manager_pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!members.is_empty());
        let member = members[member_pick.index(members.len())].id;
        let manager = members[manager_pick.index(members.len())].id;

        let mut forest = Forest::new(members.clone()).expect("generated forests are acyclic");
        let rejected = would_create_cycle(&members, member, manager);
        let result = forest.reparent(member, Some(manager));

        prop_assert_eq!(result.is_err(), rejected);
        prop_assert!(find_manager_cycles(forest.members()).is_empty());
    }

    #[test]
    fn operations_terminate_and_are_idempotent_on_any_input(members in arb_any_snapshot(25)) {
        let first = build_hierarchy_tree(&members);
        prop_assert_eq!(&first, &build_hierarchy_tree(&members));

        for m in &members {
            prop_assert_eq!(
                get_subordinate_ids(&members, m.id),
                get_subordinate_ids(&members, m.id)
            );
            if let Some(manager) = m.manager_id {
                prop_assert_eq!(
                    is_manager_of(&members, manager, m.id),
                    is_manager_of(&members, manager, m.id)
                );
                prop_assert_eq!(
                    would_create_cycle(&members, m.id, manager),
                    would_create_cycle(&members, m.id, manager)
                );
            }
        }
    }

    #[test]
    fn stats_account_for_every_row(members in arb_any_snapshot(30)) {
        let stats = HierarchyStats::from_members(&members);
        let placed: usize = build_hierarchy_tree(&members).iter().map(|r| r.size()).sum();

        prop_assert_eq!(stats.member_count, members.len());
        prop_assert_eq!(placed + stats.cyclic_member_count, members.len());
        prop_assert_eq!(stats.cyclic_member_count == 0, find_manager_cycles(&members).is_empty());
    }
}
