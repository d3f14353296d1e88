//! The Command trait and the queue (Invoker) that sequences commands.

use std::collections::VecDeque;

use tracing::{debug, info};

/// A deferred unit of work plus the data it needs.
pub trait Command {
    type Output;
    type Error;

    fn execute(&self) -> Result<Self::Output, Self::Error>;

    /// Short label used in log output.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

// =============================================================================
// Invoker: FIFO command queue
// =============================================================================

/// Holds pending commands and runs them in the order they were enqueued.
///
/// A successful `run` empties the queue. When a command fails, commands that
/// already ran are gone (their effects are committed), the failing command is
/// dropped, and everything after it stays pending.
#[derive(Debug)]
pub struct CommandQueue<C> {
    pending: VecDeque<C>,
}

impl<C> Default for CommandQueue<C> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }
}

impl<C: Command> CommandQueue<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, command: C) {
        debug!(command = %command.describe(), "command enqueued");
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Commands not yet executed, front first.
    pub fn pending(&self) -> impl Iterator<Item = &C> {
        self.pending.iter()
    }

    /// Drain the queue front to back, collecting each command's output.
    pub fn run(&mut self) -> Result<Vec<C::Output>, C::Error> {
        if self.pending.is_empty() {
            return Ok(Vec::new());
        }

        info!(commands = self.pending.len(), "running command queue");
        let mut outputs = Vec::with_capacity(self.pending.len());

        while let Some(command) = self.pending.pop_front() {
            match command.execute() {
                Ok(output) => outputs.push(output),
                Err(err) => {
                    info!(
                        failed = %command.describe(),
                        remaining = self.pending.len(),
                        "command failed, queue run aborted"
                    );
                    return Err(err);
                }
            }
        }

        Ok(outputs)
    }
}

// =============================================================================
// Client: the caller that talks to the invoker
// =============================================================================

/// Forwards commands to an invoker it borrows.
pub struct Client<'a, C> {
    invoker: &'a mut CommandQueue<C>,
}

impl<'a, C: Command> Client<'a, C> {
    pub fn new(invoker: &'a mut CommandQueue<C>) -> Self {
        Self { invoker }
    }

    pub fn add_command(&mut self, command: C) {
        self.invoker.enqueue(command);
    }

    pub fn execute_commands(&mut self) -> Result<Vec<C::Output>, C::Error> {
        self.invoker.run()
    }
}
