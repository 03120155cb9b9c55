//! Fuzz target for a whole client session.
//!
//! Interleaves user operations with server payloads and connection changes,
//! driving the App through the Bridge exactly like the runtime does. Checks
//! that transcript invariants hold after every step.

#![no_main]

use arbitrary::Arbitrary;
use chatroom_app::{App, AppAction, AppEvent, Bridge, ClientConfig, TransportEvent, UnitKind};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Step {
    Payload(String),
    Closed,
    Connected,
    SelectUser(String),
    SelectGroup(i64),
    ReturnToRoom,
    Send(String),
    OpenMembers(i64),
    CloseMembers,
    AddMember(String),
    RemoveMember(String),
}

fuzz_target!(|steps: Vec<Step>| {
    let mut app = App::new(ClientConfig::default());
    let mut bridge = Bridge::new();

    for step in steps {
        let actions = match step {
            Step::Payload(text) => feed(&mut app, bridge.handle_transport(TransportEvent::Text(text))),
            Step::Closed => feed(&mut app, bridge.handle_transport(TransportEvent::Closed)),
            Step::Connected => app.handle(AppEvent::Connected),
            Step::SelectUser(peer) => app.select_user(&peer),
            Step::SelectGroup(id) => app.select_group(id),
            Step::ReturnToRoom => app.return_to_room(),
            Step::Send(text) => app.send_message(&text),
            Step::OpenMembers(id) => app.open_member_panel(id),
            Step::CloseMembers => app.close_member_panel(),
            Step::AddMember(user) => app.add_member(&user),
            Step::RemoveMember(user) => app.remove_member(&user),
        };

        for action in actions {
            let _ = bridge.process_app_action(action);
        }
        let _ = bridge.take_outgoing();

        if let Some(last) = app.transcript().history().last() {
            assert_eq!(last.kind, UnitKind::Separator);
        }
    }
});

fn feed(app: &mut App, events: Vec<AppEvent>) -> Vec<AppAction> {
    events.into_iter().flat_map(|event| app.handle(event)).collect()
}
