//! Print-only record store driven through an Invoker and a Client.

use std::cell::RefCell;
use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;

use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOp {
    Insert,
    Update,
    Delete,
}

impl fmt::Display for RecordOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            RecordOp::Insert => "inserted",
            RecordOp::Update => "updated",
            RecordOp::Delete => "deleted",
        };
        write!(f, "Record {verb}")
    }
}

/// Stand-in database: announces each operation and remembers the order.
#[derive(Debug, Default)]
pub struct RecordStore {
    journal: RefCell<Vec<RecordOp>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self) {
        self.apply(RecordOp::Insert);
    }

    pub fn update(&self) {
        self.apply(RecordOp::Update);
    }

    pub fn delete(&self) {
        self.apply(RecordOp::Delete);
    }

    pub fn journal(&self) -> Vec<RecordOp> {
        self.journal.borrow().clone()
    }

    fn apply(&self, op: RecordOp) {
        println!("{op}");
        self.journal.borrow_mut().push(op);
    }
}

#[derive(Debug, Clone)]
pub struct RecordCommand {
    op: RecordOp,
    store: Rc<RecordStore>,
}

impl RecordCommand {
    pub fn insert(store: &Rc<RecordStore>) -> Self {
        Self::new(RecordOp::Insert, store)
    }

    pub fn update(store: &Rc<RecordStore>) -> Self {
        Self::new(RecordOp::Update, store)
    }

    pub fn delete(store: &Rc<RecordStore>) -> Self {
        Self::new(RecordOp::Delete, store)
    }

    fn new(op: RecordOp, store: &Rc<RecordStore>) -> Self {
        Self {
            op,
            store: Rc::clone(store),
        }
    }

    pub fn op(&self) -> RecordOp {
        self.op
    }
}

impl Command for RecordCommand {
    type Output = RecordOp;
    type Error = Infallible;

    fn execute(&self) -> Result<RecordOp, Infallible> {
        match self.op {
            RecordOp::Insert => self.store.insert(),
            RecordOp::Update => self.store.update(),
            RecordOp::Delete => self.store.delete(),
        }
        Ok(self.op)
    }

    fn describe(&self) -> String {
        format!("{:?}", self.op)
    }
}
