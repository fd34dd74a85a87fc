#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Classification table over fields [1] and [2]
// ============================================================================

#[test_case("client_index", "context", MessageRole::Request)]
#[test_case("client_index", "sw_if_index", MessageRole::Event)]
#[test_case("client_index", "client_index", MessageRole::Event)]
#[test_case("context", "retval", MessageRole::Reply)]
#[test_case("context", "client_index", MessageRole::Reply)]
#[test_case("context", "context", MessageRole::Reply)]
#[test_case("sw_if_index", "context", MessageRole::Other)]
#[test_case("retval", "client_index", MessageRole::Other)]
#[test_case("Client_Index", "context", MessageRole::Other)]
fn MessageRole___classify___follows_table(first: &str, second: &str, expected: MessageRole) {
    let fields = vec![
        Field::new("_vl_msg_id", "u16"),
        Field::new(first, "u32"),
        Field::new(second, "u32"),
        Field::new("tail", "u32"),
    ];

    assert_eq!(MessageRole::classify(&fields), expected);
}

#[test_case(ClassifierState::Start, "client_index", ClassifierState::SawClientIndex)]
#[test_case(ClassifierState::Start, "context", ClassifierState::Done(MessageRole::Reply))]
#[test_case(ClassifierState::Start, "count", ClassifierState::Done(MessageRole::Other))]
#[test_case(ClassifierState::SawClientIndex, "context", ClassifierState::Done(MessageRole::Request))]
#[test_case(ClassifierState::SawClientIndex, "count", ClassifierState::Done(MessageRole::Event))]
fn ClassifierState___step___transitions(
    state: ClassifierState,
    field: &str,
    expected: ClassifierState,
) {
    assert_eq!(state.step(field), expected);
}

#[test_case(ClassifierState::Start, MessageRole::Other)]
#[test_case(ClassifierState::SawClientIndex, MessageRole::Event)]
#[test_case(ClassifierState::Done(MessageRole::Request), MessageRole::Request)]
fn ClassifierState___role___at_end_of_input(state: ClassifierState, expected: MessageRole) {
    assert_eq!(state.role(), expected);
}
