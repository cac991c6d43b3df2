use std::time::Duration;

use folio_common::{DocumentReference, HistoryEntry, HistorySource, Namespace, PageAction};
use folio_tabs::{BackStack, BackStackItem};

use super::*;
use crate::error::{ErrorKind, FetchError};
use crate::host::HostEvent;
use crate::model::{Document, ReadingListPage, Section};

fn reference(name: &str) -> DocumentReference {
    DocumentReference::new("en.wikipedia.org", Namespace::Main, name)
}

fn request(name: &str) -> LoadRequest {
    let r = reference(name);
    LoadRequest::new(r.clone(), HistoryEntry::new(r, HistorySource::InternalLink))
}

fn article(name: &str) -> Document {
    let mut doc = Document::new(reference(name));
    doc.sections = vec![Section {
        id: "History".into(),
        title: "History".into(),
        level: 2,
    }];
    doc
}

fn stack_of(names: &[&str]) -> BackStack {
    let mut stack = BackStack::new();
    for name in names {
        let r = reference(name);
        stack.push(BackStackItem::from_entry(HistoryEntry::new(r, HistorySource::InternalLink)));
    }
    stack
}

fn top_names(stack: &BackStack) -> Vec<&str> {
    stack.items().iter().map(|i| i.reference.name()).collect()
}

/// Load `name` and complete it successfully.
fn load_ok(
    machine: &mut PageLoadStateMachine,
    stack: &mut BackStack,
    events: &mut Vec<HostEvent>,
    name: &str,
) {
    let ticket = machine.load(request(name), stack, events).unwrap();
    assert!(machine.on_fetch_success(ticket.generation, article(name), events));
}

#[test]
fn new_machine_is_idle() {
    let machine = PageLoadStateMachine::new(true);
    assert_eq!(machine.state(), LoadState::Idle);
    assert_eq!(machine.generation(), 0);
    assert!(machine.model().reference.is_none());
}

#[test]
fn load_with_push_grows_stack_by_one() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = stack_of(&["A"]);
    let mut events: Vec<HostEvent> = Vec::new();

    let ticket = machine.load(request("B"), &mut stack, &mut events).unwrap();
    assert_eq!(ticket.generation, 1);
    assert_eq!(ticket.reference, reference("B"));
    assert_eq!(top_names(&stack), vec!["A", "B"]);
    assert!(machine.is_loading());
    assert_eq!(machine.model().reference, Some(reference("B")));
    assert!(events.contains(&HostEvent::HideError));
    assert!(events.contains(&HostEvent::Progress {
        visible: true,
        indeterminate: true
    }));
}

#[test]
fn load_without_push_leaves_stack() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = stack_of(&["A"]);
    let mut events: Vec<HostEvent> = Vec::new();
    machine
        .load(request("B").without_push(), &mut stack, &mut events)
        .unwrap();
    assert_eq!(stack.len(), 1);
}

#[test]
fn same_as_top_with_document_is_noop() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = stack_of(&["A"]);
    let mut events: Vec<HostEvent> = Vec::new();
    load_ok(&mut machine, &mut stack, &mut events, "B");
    let generation = machine.generation();
    events.clear();

    let again = machine.load(request("B"), &mut stack, &mut events);
    assert!(again.is_none());
    assert_eq!(top_names(&stack), vec!["A", "B"]);
    assert_eq!(machine.generation(), generation);
    assert!(events.is_empty());
}

#[test]
fn same_as_top_with_fragment_scrolls() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    load_ok(&mut machine, &mut stack, &mut events, "A");
    events.clear();

    let mut req = request("A");
    req.reference = req.reference.with_fragment("History");
    assert!(machine.load(req, &mut stack, &mut events).is_none());
    assert_eq!(events, vec![HostEvent::ScrollToAnchor("History".into())]);
    assert_eq!(stack.len(), 1);
}

#[test]
fn same_as_top_without_document_reloads_from_stack() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = stack_of(&["A", "B"]);
    let mut events: Vec<HostEvent> = Vec::new();

    let ticket = machine.load(request("B"), &mut stack, &mut events).unwrap();
    assert_eq!(ticket.reference, reference("B"));
    assert_eq!(top_names(&stack), vec!["A", "B"]);
}

#[test]
fn success_emits_completion_sequence() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    let ticket = machine
        .load(request("A").with_scroll(Some(120)), &mut stack, &mut events)
        .unwrap();
    events.clear();

    assert!(machine.on_fetch_success(ticket.generation, article("A"), &mut events));
    assert_eq!(machine.state(), LoadState::Loaded);
    assert!(machine.model().document.is_some());
    assert!(machine.affordances().toc_enabled);
    assert_eq!(
        events,
        vec![
            HostEvent::Progress {
                visible: false,
                indeterminate: true
            },
            HostEvent::InvalidateMenu,
            HostEvent::SetupToc {
                sections: article("A").sections,
                first_page: true
            },
            HostEvent::BindEditor(reference("A")),
            HostEvent::BookmarkChanged { saved: false },
            HostEvent::ScrollTo(120),
            HostEvent::LoadComplete(reference("A")),
            HostEvent::ShowOnboardingTip,
        ]
    );
}

#[test]
fn first_page_and_tip_only_once() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    load_ok(&mut machine, &mut stack, &mut events, "A");
    events.clear();
    load_ok(&mut machine, &mut stack, &mut events, "B");

    assert!(events.contains(&HostEvent::SetupToc {
        sections: article("B").sections,
        first_page: false
    }));
    assert!(!events.contains(&HostEvent::ShowOnboardingTip));
}

#[test]
fn tip_disabled_is_never_shown() {
    let mut machine = PageLoadStateMachine::new(false);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    load_ok(&mut machine, &mut stack, &mut events, "A");
    assert!(!events.contains(&HostEvent::ShowOnboardingTip));
}

#[test]
fn redirect_updates_current_but_not_original() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    let ticket = machine.load(request("Rust lang"), &mut stack, &mut events).unwrap();
    machine.on_fetch_success(ticket.generation, article("Rust"), &mut events);
    assert_eq!(machine.model().reference, Some(reference("Rust")));
    assert_eq!(machine.model().original_reference, Some(reference("Rust lang")));
}

#[test]
fn non_article_disables_article_actions() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    let r = DocumentReference::new("en.wikipedia.org", Namespace::Help, "Contents");
    let ticket = machine
        .load(
            LoadRequest::new(r.clone(), HistoryEntry::new(r.clone(), HistorySource::InternalLink)),
            &mut stack,
            &mut events,
        )
        .unwrap();
    machine.on_fetch_success(ticket.generation, Document::new(r), &mut events);
    let aff = machine.affordances();
    assert!(!aff.is_enabled(PageAction::Share));
    assert!(!aff.is_enabled(PageAction::AddToReadingList));
    assert!(aff.is_enabled(PageAction::FindInPage));
    assert!(aff.is_enabled(PageAction::ThemeChooser));
}

#[test]
fn offline_failure_keeps_reading_list() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    let ticket = machine.load(request("A"), &mut stack, &mut events).unwrap();
    events.clear();

    let error = FetchError::Unreachable("no route".into());
    assert!(machine.on_fetch_failure(ticket.generation, &error, &mut events));
    assert!(machine.is_error());
    assert_eq!(machine.current_error(), Some(ErrorKind::Offline));
    let aff = machine.affordances();
    assert_eq!(aff.enabled_actions(), vec![PageAction::AddToReadingList]);
    assert!(aff.refresh_enabled);
    assert!(!aff.toc_open);
    assert_eq!(
        events,
        vec![
            HostEvent::Progress {
                visible: false,
                indeterminate: true
            },
            HostEvent::HidePageContent,
            HostEvent::ShowError {
                reference: reference("A"),
                kind: ErrorKind::Offline
            },
        ]
    );
}

#[test]
fn not_found_disables_refresh() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    let ticket = machine.load(request("A"), &mut stack, &mut events).unwrap();
    machine.on_fetch_failure(ticket.generation, &FetchError::not_found("gone"), &mut events);
    assert_eq!(machine.current_error(), Some(ErrorKind::NotFound));
    assert!(!machine.affordances().refresh_enabled);
    assert!(machine.affordances().enabled_actions().is_empty());
}

#[test]
fn refresh_follows_error_affordance() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    let ticket = machine.load(request("A"), &mut stack, &mut events).unwrap();
    machine.on_fetch_failure(ticket.generation, &FetchError::not_found("gone"), &mut events);
    let generation = machine.generation();
    events.clear();

    assert!(machine.refresh(&mut stack, &mut events).is_none());
    assert_eq!(events, vec![HostEvent::RefreshFinished]);
    assert_eq!(machine.generation(), generation);

    let ticket = machine.retry(&mut stack, &mut events).unwrap();
    assert_eq!(ticket.reference, reference("A"));
    machine.on_fetch_failure(
        ticket.generation,
        &FetchError::Other("server error".into()),
        &mut events,
    );
    assert_eq!(machine.current_error(), Some(ErrorKind::Generic));
    assert!(machine.refresh(&mut stack, &mut events).is_some());
}

#[test]
fn stale_error_after_newer_success_is_discarded() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();

    let x = machine.load(request("X"), &mut stack, &mut events).unwrap();
    let y = machine.load(request("Y"), &mut stack, &mut events).unwrap();
    assert!(y.generation > x.generation);
    assert!(machine.on_fetch_success(y.generation, article("Y"), &mut events));
    let model_before = machine.model().clone();
    events.clear();

    let error = FetchError::Unreachable("timeout".into());
    assert!(!machine.on_fetch_failure(x.generation, &error, &mut events));
    assert!(events.is_empty());
    assert_eq!(machine.model(), &model_before);
    assert_eq!(machine.state(), LoadState::Loaded);
    assert_eq!(machine.current_error(), None);
}

#[test]
fn stale_success_is_discarded() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    let x = machine.load(request("X"), &mut stack, &mut events).unwrap();
    machine.load(request("Y"), &mut stack, &mut events).unwrap();
    events.clear();

    assert!(!machine.on_fetch_success(x.generation, article("X"), &mut events));
    assert!(events.is_empty());
    assert!(machine.is_loading());
    assert!(machine.model().document.is_none());
}

#[test]
fn duplicate_completion_is_ignored() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    let ticket = machine.load(request("A"), &mut stack, &mut events).unwrap();
    assert!(machine.on_fetch_success(ticket.generation, article("A"), &mut events));
    let error = FetchError::Other("late".into());
    assert!(!machine.on_fetch_failure(ticket.generation, &error, &mut events));
    assert_eq!(machine.state(), LoadState::Loaded);
}

#[test]
fn refresh_while_loading_only_stops_spinner() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    machine.load(request("A"), &mut stack, &mut events).unwrap();
    let generation = machine.generation();
    events.clear();

    assert!(machine.refresh(&mut stack, &mut events).is_none());
    assert_eq!(events, vec![HostEvent::RefreshFinished]);
    assert_eq!(machine.generation(), generation);
}

#[test]
fn refresh_reloads_with_history_entry_and_no_push() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    load_ok(&mut machine, &mut stack, &mut events, "A");
    events.clear();

    let ticket = machine.refresh(&mut stack, &mut events).unwrap();
    assert_eq!(ticket.reference, reference("A"));
    assert_eq!(stack.len(), 1);
    assert_eq!(
        machine.model().entry.as_ref().map(|e| e.source),
        Some(HistorySource::History)
    );

    events.clear();
    machine.on_fetch_success(ticket.generation, article("A"), &mut events);
    assert!(events.contains(&HostEvent::RefreshFinished));
}

#[test]
fn retry_only_from_error() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    load_ok(&mut machine, &mut stack, &mut events, "A");
    assert!(machine.retry(&mut stack, &mut events).is_none());

    let ticket = machine.load(request("B"), &mut stack, &mut events).unwrap();
    machine.on_fetch_failure(ticket.generation, &FetchError::Other("500".into()), &mut events);
    let retry = machine.retry(&mut stack, &mut events).unwrap();
    assert_eq!(retry.reference, reference("B"));
    assert!(machine.is_loading());
    assert_eq!(machine.current_error(), None);
    assert_eq!(stack.len(), 2);
}

#[test]
fn pop_reloads_previous_with_saved_scroll() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = stack_of(&["A"]);
    stack.update_top_scroll(480);
    let mut events: Vec<HostEvent> = Vec::new();
    load_ok(&mut machine, &mut stack, &mut events, "B");
    events.clear();

    match machine.pop_back_stack(&mut stack, &mut events) {
        PopOutcome::Reloaded(ticket) => {
            assert_eq!(ticket.reference, reference("A"));
            machine.on_fetch_success(ticket.generation, article("A"), &mut events);
        }
        PopOutcome::Exhausted => panic!("expected reload"),
    }
    assert_eq!(top_names(&stack), vec!["A"]);
    assert!(events.contains(&HostEvent::ScrollTo(480)));
}

#[test]
fn pop_last_item_is_exhausted() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    load_ok(&mut machine, &mut stack, &mut events, "A");
    assert_eq!(
        machine.pop_back_stack(&mut stack, &mut events),
        PopOutcome::Exhausted
    );
    assert!(stack.is_empty());
}

#[test]
fn next_load_persists_reading_time() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    load_ok(&mut machine, &mut stack, &mut events, "A");
    machine.timer.advance(Duration::from_secs(90));
    events.clear();

    machine.load(request("B"), &mut stack, &mut events).unwrap();
    let persisted = events.iter().find_map(|e| match e {
        HostEvent::PersistHistory(entry) => Some(entry.clone()),
        _ => None,
    });
    let persisted = persisted.unwrap();
    assert_eq!(persisted.reference, reference("A"));
    assert!(persisted.time_spent_sec >= 90);
    assert!(machine.timer().elapsed_secs() < 90);
}

#[test]
fn update_current_item_saves_time_and_scroll() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    load_ok(&mut machine, &mut stack, &mut events, "A");
    machine.timer.advance(Duration::from_secs(12));

    machine.update_current_back_stack_item(&mut stack, 333);
    let top = stack.peek_top().unwrap();
    assert_eq!(top.scroll_y, Some(333));
    assert!(top.entry.time_spent_sec >= 12);
}

#[test]
fn update_current_item_ignores_foreign_stack() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    load_ok(&mut machine, &mut stack, &mut events, "A");

    let mut other = stack_of(&["Z"]);
    machine.update_current_back_stack_item(&mut other, 50);
    assert_eq!(other.peek_top().unwrap().scroll_y, None);
}

#[test]
fn reading_list_association_updates_bookmark() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    load_ok(&mut machine, &mut stack, &mut events, "A");
    events.clear();

    let page = ReadingListPage {
        list_name: "Saved".into(),
        offline: true,
    };
    machine.set_reading_list_page(Some(page), &mut events);
    assert!(machine.model().is_in_reading_list());
    assert_eq!(events, vec![HostEvent::BookmarkChanged { saved: true }]);

    machine.load(request("B"), &mut stack, &mut events).unwrap();
    assert!(!machine.model().is_in_reading_list());
}

#[test]
fn toc_closes_on_new_load() {
    let mut machine = PageLoadStateMachine::new(true);
    let mut stack = BackStack::new();
    let mut events: Vec<HostEvent> = Vec::new();
    load_ok(&mut machine, &mut stack, &mut events, "A");
    machine.open_toc();
    assert!(machine.affordances().toc_open);
    machine.load(request("B"), &mut stack, &mut events).unwrap();
    assert!(!machine.affordances().toc_open);
    assert!(!machine.affordances().toc_enabled);
    assert!(!machine.close_toc());
}
