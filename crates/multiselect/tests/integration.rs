//! Integration tests driving the dropdown the way a host does.
//!
//! `Form` plays the owner: it holds the selection store, routes every key
//! through the document before handing it to the focused widget, and pushes
//! the store back into the dropdown after each update.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use multiselect::simulator::ProgramSimulator;
use multiselect::{
    BlurMsg, Cmd, Document, DocumentKeyMsg, DropdownError, DropdownOption, Focus,
    FocusMsg, FocusTriggerMsg, KeyMsg, KeyType, Message, Model, MouseMsg, MultiselectDropdown,
    sequence,
};
use parking_lot::Mutex;

// ===========================================================================
// Harness
// ===========================================================================

struct Form {
    document: Document,
    dropdown: MultiselectDropdown,
    store: Arc<Mutex<Vec<String>>>,
    changes: Arc<Mutex<Vec<Vec<String>>>>,
    blurs: Arc<AtomicUsize>,
}

impl Form {
    fn new(options: Vec<DropdownOption>, selected: &[&str]) -> Self {
        let document = Document::new();
        let initial: Vec<String> = selected.iter().map(|s| s.to_string()).collect();
        let store = Arc::new(Mutex::new(initial.clone()));
        let changes: Arc<Mutex<Vec<Vec<String>>>> = Arc::default();
        let blurs = Arc::new(AtomicUsize::new(0));

        let (store_sink, change_sink, blur_sink) = (store.clone(), changes.clone(), blurs.clone());
        let mut dropdown = MultiselectDropdown::new()
            .label("Greek")
            .empty_label("None")
            .options(options)
            .selected(initial)
            .on_change(move |next| {
                change_sink.lock().push(next.clone());
                *store_sink.lock() = next;
            })
            .on_blur(move || {
                blur_sink.fetch_add(1, Ordering::SeqCst);
            });
        dropdown.mount(&document).unwrap();

        Self {
            document,
            dropdown,
            store,
            changes,
            blurs,
        }
    }

    fn greek(selected: &[&str]) -> Self {
        Self::new(
            vec![
                DropdownOption::new("a", "Alpha"),
                DropdownOption::new("b", "Beta"),
            ],
            selected,
        )
    }

    fn changes(&self) -> Vec<Vec<String>> {
        self.changes.lock().clone()
    }

    fn blur_count(&self) -> usize {
        self.blurs.load(Ordering::SeqCst)
    }
}

impl Model for Form {
    fn init(&self) -> Option<Cmd> {
        None
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        let mut cmds = Vec::new();
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            for routed in self.document.dispatch_key(key) {
                cmds.push(self.dropdown.update(routed));
            }
        }
        cmds.push(self.dropdown.update(msg));

        let current = self.store.lock().clone();
        if current != self.dropdown.get_selected() {
            self.dropdown.set_selected(current).unwrap();
        }
        sequence(cmds)
    }

    fn view(&self) -> String {
        self.dropdown.view()
    }
}

fn key(t: KeyType) -> Message {
    Message::new(KeyMsg::from_type(t))
}

fn click(x: u16, y: u16) -> Message {
    Message::new(MouseMsg::left_press(x, y))
}

fn s(v: &[&str]) -> Vec<String> {
    v.iter().map(|x| x.to_string()).collect()
}

// ===========================================================================
// Escape handling
// ===========================================================================

mod escape {
    use super::*;

    #[test]
    fn closes_open_menu_then_focuses_trigger() {
        let mut form = Form::greek(&[]);
        form.dropdown.open();
        assert_eq!(form.dropdown.focus(), Focus::None);

        let mut sim = ProgramSimulator::new(form);
        sim.send(key(KeyType::Esc));
        let cmd = sim.step().expect("escape returns a focus command");

        // Closed before focus moves.
        assert!(!sim.model().dropdown.is_open());
        assert_eq!(sim.model().dropdown.focus(), Focus::None);

        let msg = cmd.execute().unwrap();
        assert!(msg.is::<FocusTriggerMsg>());
        sim.send(msg);
        sim.run_until_empty();
        assert_eq!(sim.model().dropdown.focus(), Focus::Trigger);
    }

    #[test]
    fn noop_while_closed() {
        let mut sim = ProgramSimulator::new(Form::greek(&["a"]));
        sim.send(key(KeyType::Esc));
        assert!(sim.step().is_none());
        assert!(!sim.model().dropdown.is_open());
        assert_eq!(sim.model().dropdown.focus(), Focus::None);
        assert!(sim.model().changes().is_empty());
    }

    #[test]
    fn ignored_after_unmount() {
        let mut form = Form::greek(&[]);
        form.dropdown.open();
        assert!(form.dropdown.unmount());
        assert_eq!(form.document.listener_count(), 0);

        let mut sim = ProgramSimulator::new(form);
        sim.send(key(KeyType::Esc));
        sim.run_until_empty();
        assert!(sim.model().dropdown.is_open());
    }

    #[test]
    fn ignored_before_mount() {
        let doc = Document::new();
        let other = doc.add_keydown_listener();
        let mut dropdown = MultiselectDropdown::new()
            .options(vec![DropdownOption::new("a", "Alpha")])
            .on_change(|_| {});
        dropdown.open();

        for msg in doc.dispatch_key(&KeyMsg::from_type(KeyType::Esc)) {
            assert!(dropdown.update(msg).is_none());
        }
        assert!(dropdown.is_open());
        drop(other);
    }

    #[test]
    fn only_the_addressed_instance_reacts() {
        let doc = Document::new();
        let mut first = MultiselectDropdown::new()
            .options(vec![DropdownOption::new("a", "Alpha")])
            .on_change(|_| {});
        let mut second = MultiselectDropdown::new()
            .options(vec![DropdownOption::new("a", "Alpha")])
            .on_change(|_| {});
        first.mount(&doc).unwrap();
        second.mount(&doc).unwrap();
        first.open();
        second.open();

        let routed = doc.dispatch_key(&KeyMsg::from_type(KeyType::Esc));
        assert_eq!(routed.len(), 2);
        let to_first = routed
            .into_iter()
            .find(|m| m.downcast_ref::<DocumentKeyMsg>().map(|d| d.listener) == first.listener_id())
            .unwrap();

        // The second dropdown sees a key addressed to the first one.
        let copy = to_first.downcast_ref::<DocumentKeyMsg>().unwrap().clone();
        assert!(second.update(Message::new(copy)).is_none());
        assert!(second.is_open());

        let focus = first.update(to_first).unwrap().execute().unwrap();
        assert!(!first.is_open());

        // A focus request for the first dropdown leaves the second alone.
        let target = *focus.downcast_ref::<FocusTriggerMsg>().unwrap();
        second.update(Message::new(target));
        assert_eq!(second.focus(), Focus::None);
        first.update(focus);
        assert_eq!(first.focus(), Focus::Trigger);
    }

    #[test]
    fn escape_via_widget_key_path_is_ignored() {
        let mut form = Form::greek(&[]);
        form.dropdown.open();
        form.dropdown.update(Message::new(FocusMsg));
        form.dropdown.update(key(KeyType::Esc));
        assert!(form.dropdown.is_open());
    }
}

// ===========================================================================
// Lifecycle
// ===========================================================================

mod lifecycle {
    use super::*;

    #[test]
    fn mount_registers_one_listener() {
        let form = Form::greek(&[]);
        assert_eq!(form.document.listener_count(), 1);
        assert!(form.dropdown.is_mounted());
    }

    #[test]
    fn dropping_mounted_component_detaches() {
        let form = Form::greek(&[]);
        let doc = form.document.clone();
        drop(form);
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn remount_after_unmount() {
        let mut form = Form::greek(&[]);
        let first = form.dropdown.listener_id().unwrap();
        form.dropdown.unmount();
        form.dropdown.mount(&form.document).unwrap();
        let second = form.dropdown.listener_id().unwrap();
        assert_ne!(first, second);
        assert_eq!(form.document.listener_count(), 1);
    }
}

// ===========================================================================
// Mouse
// ===========================================================================

mod mouse {
    use super::*;

    #[test]
    fn trigger_click_toggles_menu() {
        let mut sim = ProgramSimulator::new(Form::greek(&[]));
        sim.send(click(0, 1));
        sim.run_until_empty();
        assert!(sim.model().dropdown.is_open());
        assert!(sim.model().dropdown.aria().expanded);

        sim.send(click(3, 1));
        sim.run_until_empty();
        assert!(!sim.model().dropdown.is_open());
    }

    #[test]
    fn checkbox_click_proposes_selection() {
        let mut sim = ProgramSimulator::new(Form::greek(&["a"]));
        sim.send_all([click(0, 1), click(4, 3)]);
        sim.run_until_empty();

        assert_eq!(sim.model().changes(), vec![s(&["a", "b"])]);
        assert_eq!(sim.model().dropdown.get_selected(), s(&["a", "b"]).as_slice());
        assert_eq!(sim.model().dropdown.summary(), "Alpha, Beta");
    }

    #[test]
    fn unchecking_removes_value() {
        let mut sim = ProgramSimulator::new(Form::greek(&["a", "b"]));
        sim.send_all([click(0, 1), click(4, 2)]);
        sim.run_until_empty();
        assert_eq!(sim.model().changes(), vec![s(&["b"])]);
    }

    #[test]
    fn clear_all_keeps_menu_state() {
        // "[ Alpha, Beta ▾ ]" is 17 cells wide; clear-all starts at 18.
        let mut sim = ProgramSimulator::new(Form::greek(&["a", "b"]));
        sim.send(click(18, 1));
        sim.run_until_empty();

        assert_eq!(sim.model().changes(), vec![Vec::<String>::new()]);
        assert!(!sim.model().dropdown.is_open());
        assert_eq!(sim.model().dropdown.focus(), Focus::Trigger);
        assert!(!sim.model().dropdown.shows_clear_all());

        let mut open = ProgramSimulator::new(Form::greek(&["a"]));
        open.model_mut().dropdown.open();
        open.send(click(12, 1));
        open.run_until_empty();
        assert_eq!(open.model().changes(), vec![Vec::<String>::new()]);
        assert!(open.model().dropdown.is_open());
    }

    #[test]
    fn outside_click_blurs_without_closing() {
        let mut sim = ProgramSimulator::new(Form::greek(&[]));
        sim.send_all([click(0, 1), click(40, 0)]);
        sim.run_until_empty();

        assert_eq!(sim.model().blur_count(), 1);
        assert!(sim.model().dropdown.is_open());
        assert_eq!(sim.model().dropdown.focus(), Focus::None);
    }

    #[test]
    fn label_click_keeps_focus() {
        let mut sim = ProgramSimulator::new(Form::greek(&[]));
        sim.send_all([Message::new(FocusMsg), click(1, 0)]);
        sim.run_until_empty();

        assert_eq!(sim.model().dropdown.focus(), Focus::Trigger);
        assert_eq!(sim.model().blur_count(), 0);
    }

    #[test]
    fn clicks_on_padding_keep_focus() {
        // Column 11 is the gap between the trigger and "[Clear all]".
        let mut sim = ProgramSimulator::new(Form::greek(&["a"]));
        sim.send_all([click(0, 1), click(11, 1)]);
        sim.run_until_empty();
        assert_eq!(sim.model().dropdown.focus(), Focus::Trigger);

        // Right of "  [x] Alpha" but inside the trigger row's width.
        sim.send(click(15, 2));
        sim.run_until_empty();

        assert_eq!(sim.model().dropdown.focus(), Focus::Trigger);
        assert_eq!(sim.model().blur_count(), 0);
        assert!(sim.model().dropdown.is_open());
    }

    #[test]
    fn outside_click_when_unfocused_is_silent() {
        let mut sim = ProgramSimulator::new(Form::greek(&[]));
        sim.send(click(40, 5));
        sim.run_until_empty();
        assert_eq!(sim.model().blur_count(), 0);
    }
}

// ===========================================================================
// Keyboard
// ===========================================================================

mod keyboard {
    use super::*;

    #[test]
    fn full_keyboard_flow() {
        let mut sim = ProgramSimulator::new(Form::greek(&[]));
        sim.send_all([
            Message::new(FocusMsg),
            key(KeyType::Enter),
            key(KeyType::Tab),
            key(KeyType::Space),
            key(KeyType::Tab),
            key(KeyType::Space),
        ]);
        sim.run_until_empty();

        let form = sim.model();
        assert_eq!(form.changes(), vec![s(&["a"]), s(&["a", "b"])]);
        assert_eq!(form.dropdown.focus(), Focus::Option(1));
        assert!(form.dropdown.is_open());
    }

    #[test]
    fn tab_moves_through_controls() {
        let mut sim = ProgramSimulator::new(Form::greek(&["a"]));
        sim.send_all([Message::new(FocusMsg), key(KeyType::Tab)]);
        sim.run_until_empty();
        assert_eq!(sim.model().dropdown.focus(), Focus::ClearAll);

        sim.send(key(KeyType::ShiftTab));
        sim.run_until_empty();
        assert_eq!(sim.model().dropdown.focus(), Focus::Trigger);
        assert_eq!(sim.model().blur_count(), 0);
    }

    #[test]
    fn tab_past_last_control_blurs() {
        let mut sim = ProgramSimulator::new(Form::greek(&["a"]));
        sim.send_all([Message::new(FocusMsg), key(KeyType::Tab), key(KeyType::Tab)]);
        sim.run_until_empty();

        assert_eq!(sim.model().dropdown.focus(), Focus::None);
        assert_eq!(sim.model().blur_count(), 1);

        // Further keys are not the widget's anymore.
        sim.send(key(KeyType::Tab));
        sim.run_until_empty();
        assert_eq!(sim.model().dropdown.focus(), Focus::None);
        assert_eq!(sim.model().blur_count(), 1);
    }

    #[test]
    fn tab_on_lone_trigger_blurs() {
        let mut sim = ProgramSimulator::new(Form::greek(&[]));
        sim.send_all([Message::new(FocusMsg), key(KeyType::Tab)]);
        sim.run_until_empty();

        assert_eq!(sim.model().dropdown.focus(), Focus::None);
        assert_eq!(sim.model().blur_count(), 1);
    }

    #[test]
    fn shift_tab_on_trigger_blurs() {
        let mut sim = ProgramSimulator::new(Form::greek(&["a"]));
        sim.send_all([Message::new(FocusMsg), key(KeyType::ShiftTab)]);
        sim.run_until_empty();

        assert_eq!(sim.model().dropdown.focus(), Focus::None);
        assert_eq!(sim.model().blur_count(), 1);
        assert!(!sim.model().dropdown.is_open());
    }

    #[test]
    fn enter_on_clear_all() {
        let mut sim = ProgramSimulator::new(Form::greek(&["a", "b"]));
        sim.send_all([
            Message::new(FocusMsg),
            key(KeyType::Tab),
            key(KeyType::Enter),
        ]);
        sim.run_until_empty();

        assert_eq!(sim.model().changes(), vec![Vec::<String>::new()]);
        assert_eq!(sim.model().dropdown.focus(), Focus::Trigger);
        assert!(!sim.model().dropdown.is_open());
    }

    #[test]
    fn keys_ignored_without_focus() {
        let mut sim = ProgramSimulator::new(Form::greek(&[]));
        sim.send(key(KeyType::Enter));
        sim.run_until_empty();
        assert!(!sim.model().dropdown.is_open());
    }

    #[test]
    fn blur_msg_calls_on_blur() {
        let mut sim = ProgramSimulator::new(Form::greek(&[]));
        sim.send_all([Message::new(FocusMsg), key(KeyType::Enter), Message::new(BlurMsg)]);
        sim.run_until_empty();

        assert_eq!(sim.model().blur_count(), 1);
        assert!(sim.model().dropdown.is_open());
        assert_eq!(sim.model().dropdown.focus(), Focus::None);
    }
}

// ===========================================================================
// Delegation and errors
// ===========================================================================

mod delegation {
    use super::*;

    #[test]
    fn option_handler_replaces_on_change() {
        let custom: Arc<Mutex<Vec<(bool, String)>>> = Arc::default();
        let sink = custom.clone();
        let options = vec![
            DropdownOption::new("a", "Alpha"),
            DropdownOption::new("x", "Custom").with_on_change(move |checked, value| {
                sink.lock().push((checked, value.to_string()));
            }),
        ];

        let mut sim = ProgramSimulator::new(Form::new(options, &["a"]));
        sim.send_all([click(0, 1), click(4, 3)]);
        sim.run_until_empty();

        assert_eq!(*custom.lock(), vec![(true, "x".to_string())]);
        assert!(sim.model().changes().is_empty());
    }

    #[test]
    fn display_name_toggle_uses_canonical_value() {
        let mut form = Form::greek(&[]);
        form.dropdown.toggle_option("Beta", true).unwrap();
        assert_eq!(form.changes(), vec![s(&["b"])]);
    }

    #[test]
    fn unknown_toggle_runs_no_callback() {
        let mut form = Form::greek(&["a"]);
        let err = form.dropdown.toggle_option("omega", true).unwrap_err();
        assert_eq!(err, DropdownError::UnknownOption("omega".into()));
        assert!(form.changes().is_empty());
    }

    #[test]
    fn redundant_toggle_still_notifies() {
        let mut form = Form::greek(&["a"]);
        form.dropdown.toggle_option("a", true).unwrap();
        assert_eq!(form.changes(), vec![s(&["a"])]);
    }
}
