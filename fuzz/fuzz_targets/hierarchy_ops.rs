#![no_main]

use libfuzzer_sys::fuzz_target;
use orgchart_core::hierarchy::{
    HierarchyStats, MemberIndex, build_hierarchy_tree, find_manager_cycles,
};
use orgchart_core::model::Member;

// Bytes are read in pairs: (id, manager), where manager 0 means "none".
// Small id space so duplicates, dangling references and loops are common.
fn members_from(data: &[u8]) -> Vec<Member> {
    data.chunks_exact(2)
        .map(|pair| {
            let id = u64::from(pair[0] % 32);
            let member = Member::new(id, 1_000 + id);
            match pair[1] % 33 {
                0 => member,
                manager => member.reporting_to(u64::from(manager - 1)),
            }
        })
        .collect()
}

fuzz_target!(|data: &[u8]| {
    let members = match serde_json::from_slice::<Vec<Member>>(data) {
        Ok(members) => members,
        Err(_) => members_from(data),
    };

    let index = MemberIndex::new(&members);
    let roots = build_hierarchy_tree(&members);
    let placed: usize = roots.iter().map(|root| root.size()).sum();
    assert!(placed <= members.len());

    let stats = HierarchyStats::from_members(&members);
    assert_eq!(placed + stats.cyclic_member_count, members.len());
    for cycle in find_manager_cycles(&members) {
        assert!(!cycle.is_empty());
    }

    for member in members.iter().take(8) {
        let subordinates = index.subordinate_ids(member.id);
        assert!(subordinates.len() < members.len().max(1));

        for other in members.iter().take(8) {
            let cycle = index.would_create_cycle(member.id, other.id);
            if member.id == other.id {
                assert!(cycle);
            }
            let _ = index.is_manager_of(member.id, other.id);
        }
        let _ = index.eligible_managers(member.id);
        let chain = index.ancestor_ids(member.id);
        assert!(!chain.contains(&member.id));
    }
});
