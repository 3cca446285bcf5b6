//! HarnessDriver - scenario orchestration and the terminal wait
//!
//! A small state machine: Idle -> QueuesCreated -> Populated -> Linked ->
//! Waiting. Each transition invokes exactly one queue component, strictly
//! sequentially. Any failure is fatal: no retry, no cleanup — the partially
//! created filesystem state is itself the artifact an external verifier
//! inspects. On entering Waiting the driver performs no further storage
//! operations and blocks until externally interrupted.

use crate::drivers::StorageDriver;
use crate::errors::Result;
use crate::harness::{HarnessConfig, Scenario};
use crate::queue::{LinkBinder, Message, MessageWriter, Queue, QueueStore};
use crate::{FANOUT_LINK_NAME, FANOUT_MESSAGE_NAME, FANOUT_MESSAGE_TEXT, QUEUE_NAME_PREFIX};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use tracing::debug;

/// Driver lifecycle states, in transition order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    QueuesCreated,
    Populated,
    Linked,
    Waiting,
}

/// Orchestrates QueueStore, MessageWriter and LinkBinder for one scenario,
/// then holds the process open for external inspection
pub struct HarnessDriver {
    config: HarnessConfig,
    store: QueueStore,
    writer: MessageWriter,
    binder: LinkBinder,
    state: DriverState,
    interrupt: Receiver<()>,
}

impl HarnessDriver {
    /// Create a new driver over the given backing store
    ///
    /// `interrupt` is the external cancellation channel; the terminal wait
    /// blocks on it and nothing else.
    pub fn new(
        driver: Arc<dyn StorageDriver>,
        config: HarnessConfig,
        interrupt: Receiver<()>,
    ) -> Self {
        let store = QueueStore::new(driver.clone(), config.root.clone());
        let writer = MessageWriter::new(driver.clone());
        let binder = LinkBinder::new(driver);

        Self {
            config,
            store,
            writer,
            binder,
            state: DriverState::Idle,
            interrupt,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Configuration the driver was constructed with
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run one scenario's transitions, then hold the process open
    pub fn run(&mut self, scenario: Scenario) -> Result<()> {
        self.setup(scenario)?;
        self.wait()
    }

    /// Run one scenario's transitions without the terminal wait
    pub fn setup(&mut self, scenario: Scenario) -> Result<()> {
        debug!(?scenario, root = %self.config.root.display(), "starting scenario");

        let queues = self.create_queues_step()?;
        match scenario {
            Scenario::CreateQueues => {}
            Scenario::WriteMessages => {
                self.populate_step(&queues)?;
            }
            Scenario::LinkFanout => {
                let input = self.fanout_message_step(&queues)?;
                self.fanout_link_step(&queues, input.as_ref())?;
            }
        }
        Ok(())
    }

    /// Enter Waiting and block until externally interrupted
    ///
    /// No timeout, no polling: the driver's sole remaining purpose is to
    /// keep the created state alive. A dropped sender counts as an
    /// interruption, so an embedder cannot deadlock the wait.
    pub fn wait(&mut self) -> Result<()> {
        self.state = DriverState::Waiting;
        println!("Waiting for SIGINT");

        let _ = self.interrupt.recv();
        debug!("interrupted, releasing the harness");
        Ok(())
    }

    fn queue_names(&self) -> Vec<String> {
        (0..self.config.queue_count)
            .map(|i| format!("{}{}", QUEUE_NAME_PREFIX, i))
            .collect()
    }

    fn create_queues_step(&mut self) -> Result<Vec<Queue>> {
        let mut queues = Vec::with_capacity(self.config.queue_count);
        for name in self.queue_names() {
            let queue = self.store.create_queue(&name)?;
            println!("event queue: {}", queue.path.display());
            queues.push(queue);
        }
        self.state = DriverState::QueuesCreated;
        Ok(queues)
    }

    fn populate_step(&mut self, queues: &[Queue]) -> Result<()> {
        for queue in queues {
            for j in 0..self.config.message_count {
                let content = format!("{}\n", j);
                let message = self
                    .writer
                    .write_message(queue, &j.to_string(), content.as_bytes())?;
                println!("event message: {}", message.path.display());
            }
        }
        self.state = DriverState::Populated;
        Ok(())
    }

    fn fanout_message_step(&mut self, queues: &[Queue]) -> Result<Option<Message>> {
        let message = match queues.first() {
            Some(first) => {
                let message =
                    self.writer
                        .write_message(first, FANOUT_MESSAGE_NAME, FANOUT_MESSAGE_TEXT.as_bytes())?;
                println!("event message: {}", message.path.display());
                Some(message)
            }
            // Zero queues: nothing to populate, the step is a no-op
            None => None,
        };
        self.state = DriverState::Populated;
        Ok(message)
    }

    fn fanout_link_step(&mut self, queues: &[Queue], input: Option<&Message>) -> Result<()> {
        if let Some(input) = input {
            for queue in &queues[1..] {
                let link = self.binder.bind_into_queue(input, queue, FANOUT_LINK_NAME)?;
                println!("event link: {}", link.path.display());
            }
        }
        self.state = DriverState::Linked;
        Ok(())
    }
}
