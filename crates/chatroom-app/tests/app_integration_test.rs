//! Integration tests for App and Bridge behavior.
//!
//! Every scenario feeds raw server payloads through the [`Bridge`] and drives
//! the [`App`] through its public operations, then checks what would have been
//! written to the wire and what the renderer would see.

use chatroom_app::{
    App, AppAction, AppEvent, Bridge, ClientConfig, ConversationTarget, Credentials, Direction,
    UnitKind,
};
use chatroom_proto::LineScope;

/// Create a connected App ready for testing.
fn connected_app() -> App {
    let mut app = App::new(ClientConfig::default());
    app.handle(AppEvent::Connected);
    app
}

/// Feed a server payload to the App.
fn receive(app: &mut App, bridge: &Bridge, payload: &str) -> Vec<AppAction> {
    bridge.handle_payload(payload).into_iter().flat_map(|event| app.handle(event)).collect()
}

/// Route actions through the Bridge and return the payloads written.
fn process_actions(app: &mut App, bridge: &mut Bridge, actions: Vec<AppAction>) -> Vec<String> {
    for action in actions {
        match action {
            AppAction::Send(_) => {
                for event in bridge.process_app_action(action) {
                    app.handle(event);
                }
            },
            AppAction::Render | AppAction::Quit | AppAction::Connect { .. } => {},
        }
    }
    bridge.take_outgoing()
}

fn transcript_texts(app: &App) -> Vec<String> {
    app.transcript().units().map(|unit| unit.text.clone()).collect()
}

fn login(app: &mut App, bridge: &Bridge, username: &str) {
    receive(app, bridge, &format!("登录成功，欢迎 {username}\n"));
}

fn join_groups(app: &mut App, bridge: &Bridge) {
    receive(
        app,
        bridge,
        r#"{"type":"groups_list","groups":[{"id":3,"name":"dev","is_owner":true},{"id":7,"name":"ops","is_owner":false}]}"#,
    );
}

#[test]
fn private_message_to_selected_user() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();

    receive(&mut app, &bridge, r#"{"type":"users_list","users":["bob","carol"]}"#);
    let actions = app.select_user("bob");
    assert!(process_actions(&mut app, &mut bridge, actions).is_empty());

    let actions = app.send_message("hello");
    let sent = process_actions(&mut app, &mut bridge, actions);

    assert_eq!(sent, ["@bob hello"]);
    assert_eq!(app.target(), &ConversationTarget::Private { peer: "bob".into() });
}

#[test]
fn room_message_is_trimmed_and_verbatim() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();

    let actions = app.send_message("  hi all \n");
    assert_eq!(process_actions(&mut app, &mut bridge, actions), ["hi all"]);
}

#[test]
fn empty_input_is_rejected_before_the_wire() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();

    let actions = app.send_message("   ");
    assert!(process_actions(&mut app, &mut bridge, actions).is_empty());
    assert_eq!(app.status_message(), Some("nothing to send"));
}

#[test]
fn duplicate_members_are_listed_once_in_first_seen_order() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();
    join_groups(&mut app, &bridge);

    let actions = app.open_member_panel(3);
    process_actions(&mut app, &mut bridge, actions);
    receive(
        &mut app,
        &bridge,
        r#"{"type":"group_members","group_id":3,"members":[{"username":"carol","is_owner":false},{"username":"alice","is_owner":true},{"username":"carol","is_owner":true}]}"#,
    );

    let members = app.roster().members_for(3);
    let names: Vec<_> = members.iter().map(|m| m.username.as_str()).collect();
    assert_eq!(names, ["carol", "alice"]);
    assert!(!members[0].is_owner);
}

#[test]
fn every_group_selection_fetches_history_once() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();
    join_groups(&mut app, &bridge);

    for _ in 0..3 {
        let actions = app.select_group(7);
        let sent = process_actions(&mut app, &mut bridge, actions);
        assert_eq!(sent, [r#"{"type":"get_group_messages","group_id":7}"#]);
    }
}

#[test]
fn return_to_room_twice_gives_one_notice() {
    let mut app = connected_app();
    let bridge = Bridge::new();
    receive(&mut app, &bridge, r#"{"type":"users_list","users":["bob"]}"#);
    app.select_user("bob");
    receive(&mut app, &bridge, "[2024-05-01 10:00:00] bob (私) 对 alice 说: hey");

    let first = app.return_to_room();
    let second = app.return_to_room();

    assert_eq!(first, [AppAction::Render]);
    assert!(second.is_empty());
    assert_eq!(transcript_texts(&app), ["Switched to public room"]);
}

#[test]
fn replayed_history_is_not_duplicated() {
    let mut app = connected_app();
    let bridge = Bridge::new();
    let history = r#"{"type":"history","messages":[{"sender":"bob","raw":"[t2] bob : second","time":"t2"},{"sender":"bob","raw":"[t1] bob : first","time":"t1"}]}"#;

    receive(&mut app, &bridge, history);
    let once = transcript_texts(&app);
    receive(&mut app, &bridge, history);

    assert_eq!(transcript_texts(&app), once);
    assert_eq!(once, [
        "Connected to server",
        "[t1] bob : first",
        "[t2] bob : second",
        "=== End of history ==="
    ]);
}

#[test]
fn self_authorship_follows_identity() {
    let mut app = connected_app();
    let bridge = Bridge::new();

    receive(&mut app, &bridge, "[12:00] alice: hi");
    login(&mut app, &bridge, "alice");
    receive(&mut app, &bridge, "[12:00] alice: hi");

    let messages: Vec<_> =
        app.transcript().units().filter(|unit| unit.kind == UnitKind::Message).collect();
    assert_eq!(messages.len(), 2);
    assert!(!messages[0].is_self);
    assert!(messages[1].is_self);
    assert_eq!(messages[1].direction(), Direction::Outgoing);
}

#[test]
fn empty_group_history_shows_one_notice_and_separator() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();
    join_groups(&mut app, &bridge);

    let actions = app.select_group(7);
    process_actions(&mut app, &mut bridge, actions);
    receive(&mut app, &bridge, r#"{"type":"group_messages","group_id":7,"messages":[]}"#);

    let units: Vec<_> = app.transcript().units().collect();
    assert_eq!(units.len(), 3);
    assert_eq!(units[0].text, "=== ops 群组消息历史 ===");
    assert_eq!(units.iter().filter(|u| u.text == "No message history").count(), 1);
    assert_eq!(units[1].kind, UnitKind::System);
    assert_eq!(units[2].kind, UnitKind::Separator);
}

#[test]
fn member_fetch_is_throttled_per_group() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();
    join_groups(&mut app, &bridge);

    let actions = app.open_member_panel(3);
    assert_eq!(process_actions(&mut app, &mut bridge, actions), [
        r#"{"type":"get_group_members","group_id":3}"#
    ]);

    let actions = app.open_member_panel(3);
    assert!(process_actions(&mut app, &mut bridge, actions).is_empty());
    assert!(app.members_pending(3));

    receive(&mut app, &bridge, r#"{"type":"group_members","group_id":3,"members":[]}"#);
    assert!(!app.members_pending(3));

    let actions = app.open_member_panel(3);
    assert_eq!(process_actions(&mut app, &mut bridge, actions).len(), 1);
}

#[test]
fn stale_member_list_clears_flag_but_is_discarded() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();
    join_groups(&mut app, &bridge);

    let actions = app.open_member_panel(7);
    process_actions(&mut app, &mut bridge, actions);
    let actions = app.open_member_panel(3);
    process_actions(&mut app, &mut bridge, actions);

    receive(
        &mut app,
        &bridge,
        r#"{"type":"group_members","group_id":7,"members":[{"username":"bob","is_owner":true}]}"#,
    );

    assert!(!app.members_pending(7));
    assert!(app.roster().members_for(7).is_empty());
}

#[test]
fn stale_group_history_is_discarded() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();
    join_groups(&mut app, &bridge);

    let actions = app.select_group(7);
    process_actions(&mut app, &mut bridge, actions);
    let actions = app.select_group(3);
    process_actions(&mut app, &mut bridge, actions);

    receive(
        &mut app,
        &bridge,
        r#"{"type":"group_messages","group_id":7,"messages":[{"sender":"bob","message":"old","timestamp":"t"}]}"#,
    );

    assert!(app.transcript().is_empty());
}

#[test]
fn switching_groups_clears_previous_group() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();
    join_groups(&mut app, &bridge);

    let actions = app.select_group(7);
    process_actions(&mut app, &mut bridge, actions);
    receive(
        &mut app,
        &bridge,
        r#"{"type":"group_messages","group_id":7,"messages":[{"sender":"bob","message":"in ops","timestamp":"t"}]}"#,
    );
    assert!(transcript_texts(&app).contains(&"[t] bob: in ops".to_string()));

    let actions = app.select_group(3);
    process_actions(&mut app, &mut bridge, actions);
    assert!(app.transcript().is_empty());

    receive(
        &mut app,
        &bridge,
        r#"{"type":"group_messages","group_id":3,"messages":[{"sender":"b","message":"2","timestamp":"t2"},{"sender":"a","message":"1","timestamp":"t1"}]}"#,
    );
    assert_eq!(transcript_texts(&app), [
        "=== dev 群组消息历史 ===",
        "[t1] a: 1",
        "[t2] b: 2",
        "=== End of history ==="
    ]);
}

#[test]
fn live_group_message_for_other_group_marks_unread() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();
    join_groups(&mut app, &bridge);

    let actions = app.select_group(3);
    process_actions(&mut app, &mut bridge, actions);
    receive(
        &mut app,
        &bridge,
        r#"{"type":"group_message","group_id":7,"sender":"bob","timestamp":"t","formatted_message":"[t] bob: psst"}"#,
    );

    assert!(!transcript_texts(&app).iter().any(|text| text.contains("psst")));
    assert!(app.roster().is_unread(7));

    let actions = app.select_group(7);
    process_actions(&mut app, &mut bridge, actions);
    assert!(!app.roster().is_unread(7));
}

#[test]
fn live_group_message_in_view_is_appended() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();
    join_groups(&mut app, &bridge);
    login(&mut app, &bridge, "alice");

    let actions = app.select_group(3);
    process_actions(&mut app, &mut bridge, actions);
    receive(&mut app, &bridge, r#"{"type":"group_messages","group_id":3,"messages":[]}"#);
    receive(
        &mut app,
        &bridge,
        r#"{"type":"group_message","group_id":3,"sender":"alice","timestamp":"t","formatted_message":"[t] alice: shipped"}"#,
    );

    let last = app.transcript().live().last().cloned();
    let last = last.expect("live unit expected");
    assert_eq!(last.text, "[t] alice: shipped");
    assert!(last.is_self);
}

#[test]
fn group_message_goes_to_current_group() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();
    join_groups(&mut app, &bridge);

    let actions = app.select_group(7);
    process_actions(&mut app, &mut bridge, actions);
    let actions = app.send_message("hi");

    assert_eq!(process_actions(&mut app, &mut bridge, actions), [
        r#"{"type":"group_message","group_id":7,"content":"hi"}"#
    ]);
}

#[test]
fn owner_cannot_be_removed() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();
    join_groups(&mut app, &bridge);

    let actions = app.open_member_panel(3);
    process_actions(&mut app, &mut bridge, actions);
    receive(
        &mut app,
        &bridge,
        r#"{"type":"group_members","group_id":3,"members":[{"username":"alice","is_owner":true},{"username":"bob","is_owner":false}]}"#,
    );

    let actions = app.remove_member("alice");
    assert!(process_actions(&mut app, &mut bridge, actions).is_empty());
    assert_eq!(app.status_message(), Some("alice owns the group and cannot be removed"));

    let actions = app.remove_member("bob");
    assert_eq!(process_actions(&mut app, &mut bridge, actions), [
        r#"{"type":"remove_group_member","group_id":3,"username":"bob"}"#
    ]);
}

#[test]
fn management_responses_become_notices() {
    let mut app = connected_app();
    let bridge = Bridge::new();

    receive(&mut app, &bridge, r#"{"type":"add_member_response","message":"成员已添加"}"#);

    let last = app.transcript().units().last().map(|unit| (unit.kind, unit.text.clone()));
    assert_eq!(last, Some((UnitKind::System, "成员已添加".to_string())));
}

#[test]
fn unknown_envelope_changes_nothing() {
    let mut app = connected_app();
    let bridge = Bridge::new();
    let before = transcript_texts(&app);

    let actions = receive(&mut app, &bridge, r#"{"type":"typing","user":"bob"}"#);

    assert!(actions.is_empty());
    assert_eq!(transcript_texts(&app), before);
}

#[test]
fn login_prompt_is_answered_with_configured_credentials() {
    let config = ClientConfig::default().with_credentials(Credentials::new("alice", "pw"));
    let mut app = App::new(config);
    let mut bridge = Bridge::new();
    app.handle(AppEvent::Connected);

    let actions = receive(
        &mut app,
        &bridge,
        "请输入用户名,密码（格式 user,pass）或注册（格式 register username, password）：",
    );
    assert_eq!(process_actions(&mut app, &mut bridge, actions), ["alice,pw"]);

    let actions = receive(&mut app, &bridge, "登录失败，请重新输入 user,pass：");
    assert!(process_actions(&mut app, &mut bridge, actions).is_empty());
}

#[test]
fn register_sends_registration_line() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();

    let actions = app.register("dave", "secret");
    assert_eq!(process_actions(&mut app, &mut bridge, actions), ["register dave, secret"]);
}

#[test]
fn disconnect_keeps_conversation_and_pending_flags() {
    let mut app = connected_app();
    let mut bridge = Bridge::new();
    join_groups(&mut app, &bridge);

    let actions = app.select_group(3);
    process_actions(&mut app, &mut bridge, actions);
    let actions = app.open_member_panel(3);
    process_actions(&mut app, &mut bridge, actions);

    app.handle(AppEvent::Disconnected);

    assert_eq!(app.current_group_id(), Some(3));
    assert!(app.members_pending(3));
    assert_eq!(transcript_texts(&app).last().map(String::as_str), Some("Disconnected from server"));
}

#[test]
fn member_list_refused_offline_is_fetched_after_connecting() {
    let mut app = App::new(ClientConfig::default());
    let mut bridge = Bridge::new();
    join_groups(&mut app, &bridge);

    let actions = app.open_member_panel(3);
    assert!(process_actions(&mut app, &mut bridge, actions).is_empty());
    assert!(!app.members_pending(3));

    app.handle(AppEvent::Connected);
    let actions = app.open_member_panel(3);
    assert_eq!(process_actions(&mut app, &mut bridge, actions), [
        r#"{"type":"get_group_members","group_id":3}"#
    ]);
}

#[test]
fn welcome_text_from_another_user_keeps_identity() {
    let mut app = connected_app();
    let bridge = Bridge::new();
    login(&mut app, &bridge, "alice");

    receive(&mut app, &bridge, "[2024-05-01 10:00:00] bob : hi\n登录成功，欢迎 mallory");
    assert_eq!(app.identity().username(), Some("alice"));

    receive(&mut app, &bridge, "[2024-05-01 10:00:01] mallory : x");
    let last = app.transcript().units().last().cloned().expect("unit expected");
    assert!(!last.is_self);
}

#[test]
fn room_history_in_private_view_is_room_scoped() {
    let mut app = connected_app();
    let bridge = Bridge::new();

    receive(&mut app, &bridge, r#"{"type":"users_list","users":["bob"]}"#);
    app.select_user("bob");
    receive(
        &mut app,
        &bridge,
        r#"{"type":"history","messages":[{"sender":"bob","raw":"[t1] bob : hello","time":"t1"}]}"#,
    );

    let separator = app.transcript().units().find(|unit| unit.kind == UnitKind::Separator);
    assert_eq!(separator.map(|unit| unit.scope), Some(LineScope::Room));
    assert!(app.transcript().units().all(|unit| unit.scope != LineScope::Private));
}
