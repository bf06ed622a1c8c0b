// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campstead::CoreError;
use campstead_domain::{DomainError, LeadershipRole, ScopeKind};
use campstead_persistence::PersistenceError;

use crate::error::{ApiError, translate_core_error, translate_domain_error};

#[test]
fn test_not_found_translates_to_resource_not_found() {
    let err = translate_domain_error(DomainError::NotFound {
        resource: "camp",
        id: 7,
    });
    assert!(matches!(
        err,
        ApiError::ResourceNotFound { resource_type, .. } if resource_type == "camp"
    ));
}

#[test]
fn test_forbidden_translates_to_unauthorized() {
    let err = translate_domain_error(DomainError::Forbidden {
        action: "manage camp",
        user_id: 3,
    });
    assert!(matches!(
        err,
        ApiError::Unauthorized { action, .. } if action == "manage camp"
    ));
}

#[test]
fn test_precondition_failures_carry_stable_rule_names() {
    let cases: Vec<(DomainError, &str)> = vec![
        (
            DomainError::RoleDisabled {
                scope: ScopeKind::Team,
                scope_id: 1,
                role: LeadershipRole::Lead,
            },
            "role_disabled",
        ),
        (
            DomainError::NotEligible {
                user_id: 2,
                camp_id: 1,
            },
            "membership_eligibility",
        ),
        (
            DomainError::SlotOccupied {
                scope: ScopeKind::Camp,
                scope_id: 1,
                role: LeadershipRole::Lead,
                holder_id: 4,
            },
            "slot_occupancy",
        ),
        (
            DomainError::MutualExclusion {
                scope: ScopeKind::Cluster,
                scope_id: 1,
                user_id: 2,
            },
            "mutual_exclusion",
        ),
        (
            DomainError::DuplicateRequest {
                subject: "membership",
                detail: String::from("camp 1, user 2"),
            },
            "duplicate_request",
        ),
        (
            DomainError::NotPending {
                subject: "event",
                id: 1,
                status: String::from("approved"),
            },
            "single_decision",
        ),
        (
            DomainError::LeadershipHeld {
                team_id: 1,
                user_id: 2,
            },
            "leadership_held",
        ),
    ];

    for (domain_err, expected_rule) in cases {
        let err = translate_domain_error(domain_err);
        assert!(
            matches!(&err, ApiError::DomainRuleViolation { rule, .. } if rule == expected_rule),
            "unexpected translation: {err:?}"
        );
    }
}

#[test]
fn test_validation_failures_name_the_field() {
    let err = translate_domain_error(DomainError::InvalidCapacity {
        field: "max_sites",
        value: 0,
    });
    assert!(matches!(
        err,
        ApiError::InvalidInput { field, .. } if field == "max_sites"
    ));

    let err = translate_domain_error(DomainError::InvalidDateRange {
        start: String::from("2026-08-28"),
        end: String::from("2026-08-20"),
    });
    assert!(matches!(
        err,
        ApiError::InvalidInput { field, .. } if field == "end_date"
    ));
}

#[test]
fn test_persistence_failures_translate_to_internal() {
    let err = translate_core_error(CoreError::Persistence(PersistenceError::QueryFailed(
        String::from("out of disk"),
    )));
    assert!(matches!(err, ApiError::Internal { .. }));
}

#[test]
fn test_display_formats_are_caller_readable() {
    let err = ApiError::DomainRuleViolation {
        rule: String::from("single_decision"),
        message: String::from("event 3 is not pending (status: approved)"),
    };
    assert_eq!(
        err.to_string(),
        "Domain rule violation (single_decision): event 3 is not pending (status: approved)"
    );
}
