//! Drive a [`Model`] through update/command cycles without a terminal.
//!
//! Commands returned by `update` are executed and their messages queued
//! behind the pending input, the same ordering a real host loop gives.
//! Messages from a [`sequence`](crate::command::sequence) are unpacked in
//! order.

use std::collections::VecDeque;

use crate::Model;
use crate::command::{Cmd, SequenceMsg};
use crate::message::{Message, QuitMsg};

/// Counters kept while simulating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    /// `init` calls (at most one).
    pub inits: usize,
    /// Messages delivered to `update`.
    pub updates: usize,
    /// Commands returned by `init` or `update`.
    pub commands: usize,
    /// A [`QuitMsg`] reached the front of the queue.
    pub quit: bool,
}

/// Headless host for a [`Model`].
///
/// Records every rendered view so tests can assert on both state and
/// output.
///
/// # Example
///
/// ```rust
/// use multiselect::simulator::ProgramSimulator;
/// use multiselect::{DropdownOption, FocusMsg, KeyMsg, KeyType, Message, MultiselectDropdown};
///
/// let dropdown = MultiselectDropdown::new()
///     .label("Greek")
///     .empty_label("None")
///     .options(vec![DropdownOption::new("a", "Alpha")])
///     .on_change(|_| {});
///
/// let mut sim = ProgramSimulator::new(dropdown);
/// sim.send_all([
///     Message::new(FocusMsg),
///     Message::new(KeyMsg::from_type(KeyType::Enter)),
/// ]);
/// sim.run_until_empty();
///
/// assert!(sim.model().is_open());
/// assert_eq!(sim.last_view(), Some("Greek\n< None ▾ >\n  [ ] Alpha"));
/// ```
pub struct ProgramSimulator<M: Model> {
    model: M,
    queue: VecDeque<Message>,
    views: Vec<String>,
    stats: SimulationStats,
}

impl<M: Model> ProgramSimulator<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            queue: VecDeque::new(),
            views: Vec::new(),
            stats: SimulationStats::default(),
        }
    }

    /// Calls `init` and renders the first view. Only the first call does
    /// anything; [`step`](Self::step) calls it implicitly.
    pub fn init(&mut self) -> Option<Cmd> {
        if self.stats.inits > 0 {
            return None;
        }
        self.stats.inits = 1;
        let cmd = self.model.init();
        self.count(cmd.as_ref());
        self.render();
        cmd
    }

    pub fn send(&mut self, msg: Message) {
        self.queue.push_back(msg);
    }

    pub fn send_all(&mut self, msgs: impl IntoIterator<Item = Message>) {
        self.queue.extend(msgs);
    }

    /// Delivers the next queued message and re-renders.
    ///
    /// The returned command is not executed; use
    /// [`run_until_empty`](Self::run_until_empty) for that.
    pub fn step(&mut self) -> Option<Cmd> {
        self.init();

        let msg = self.queue.pop_front()?;
        if msg.is::<QuitMsg>() {
            self.stats.quit = true;
            return None;
        }

        self.stats.updates += 1;
        let cmd = self.model.update(msg);
        self.count(cmd.as_ref());
        self.render();
        cmd
    }

    /// Steps until the queue drains or a quit is seen, executing commands
    /// as they come back. Returns how many messages were taken off the
    /// queue.
    pub fn run_until_empty(&mut self) -> usize {
        let mut processed = 0;
        while !self.queue.is_empty() && !self.stats.quit {
            if let Some(cmd) = self.step() {
                self.enqueue(cmd);
            }
            processed += 1;
        }
        processed
    }

    fn enqueue(&mut self, cmd: Cmd) {
        let Some(msg) = cmd.execute() else {
            return;
        };
        if !msg.is::<SequenceMsg>() {
            self.queue.push_back(msg);
        } else if let Some(SequenceMsg(msgs)) = msg.downcast::<SequenceMsg>() {
            self.queue.extend(msgs);
        }
    }

    fn count(&mut self, cmd: Option<&Cmd>) {
        if cmd.is_some() {
            self.stats.commands += 1;
        }
    }

    fn render(&mut self) {
        self.views.push(self.model.view());
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats
    }

    /// Every view rendered so far, oldest first.
    pub fn views(&self) -> &[String] {
        &self.views
    }

    pub fn last_view(&self) -> Option<&str> {
        self.views.last().map(String::as_str)
    }

    pub fn is_quit(&self) -> bool {
        self.stats.quit
    }

    /// Messages still waiting in the queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::sequence;
    use crate::message::{BlurMsg, FocusMsg};

    #[derive(Default)]
    struct Recorder {
        seen: Vec<&'static str>,
    }

    impl Model for Recorder {
        fn init(&self) -> Option<Cmd> {
            None
        }

        fn update(&mut self, msg: Message) -> Option<Cmd> {
            if msg.is::<FocusMsg>() {
                self.seen.push("focus");
                return sequence(vec![
                    Some(Cmd::new(|| Message::new(BlurMsg))),
                    Some(Cmd::new(|| Message::new(7_i32))),
                ]);
            }
            if msg.is::<BlurMsg>() {
                self.seen.push("blur");
            }
            if msg.is::<i32>() {
                self.seen.push("number");
            }
            None
        }

        fn view(&self) -> String {
            self.seen.join(",")
        }
    }

    #[test]
    fn test_implicit_init_renders_once() {
        let mut sim = ProgramSimulator::new(Recorder::default());
        sim.send(Message::new(BlurMsg));
        sim.step();
        assert_eq!(sim.stats().inits, 1);
        assert_eq!(sim.views().len(), 2);
    }

    #[test]
    fn test_init_only_once() {
        let mut sim = ProgramSimulator::new(Recorder::default());
        sim.init();
        sim.init();
        assert_eq!(sim.stats().inits, 1);
    }

    #[test]
    fn test_sequence_messages_are_unpacked_in_order() {
        let mut sim = ProgramSimulator::new(Recorder::default());
        sim.send(Message::new(FocusMsg));
        let processed = sim.run_until_empty();

        assert_eq!(processed, 3);
        assert_eq!(sim.model().seen, vec!["focus", "blur", "number"]);
        assert_eq!(sim.stats().commands, 1);
    }

    #[test]
    fn test_quit_stops_processing() {
        let mut sim = ProgramSimulator::new(Recorder::default());
        sim.send_all([
            Message::new(BlurMsg),
            Message::new(QuitMsg),
            Message::new(BlurMsg),
        ]);
        sim.run_until_empty();

        assert!(sim.is_quit());
        assert_eq!(sim.model().seen, vec!["blur"]);
        assert_eq!(sim.pending(), 1);
    }

    #[test]
    fn test_last_view_tracks_updates() {
        let mut sim = ProgramSimulator::new(Recorder::default());
        sim.init();
        assert_eq!(sim.last_view(), Some(""));
        sim.send(Message::new(BlurMsg));
        sim.step();
        assert_eq!(sim.last_view(), Some("blur"));
        assert_eq!(sim.into_model().seen.len(), 1);
    }
}
