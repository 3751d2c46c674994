// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn execution_id_has_prefix() {
    let id = ExecutionId::new();
    assert!(id.as_str().starts_with("exe-"));
    assert_eq!(id.as_str().len(), 23);
}

#[test]
fn execution_ids_are_unique() {
    let a = ExecutionId::new();
    let b = ExecutionId::new();
    assert_ne!(a, b);
}

#[test]
fn execution_id_from_string_round_trips() {
    let id = ExecutionId::from_string("exe-abc123");
    assert_eq!(id.to_string(), "exe-abc123");
    assert_eq!(ExecutionId::from("exe-abc123"), id);
}
