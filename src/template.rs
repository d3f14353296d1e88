//! Template Method: a fixed order-processing sequence with a per-kind hook.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::{LabError, Result};

const GREETING: &str = "Hello! Welcome to our restaurant.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    DineIn,
    TakeOut,
}

impl OrderKind {
    pub fn label(&self) -> &'static str {
        match self {
            OrderKind::DineIn => "Dine-In",
            OrderKind::TakeOut => "Take-Out",
        }
    }

    /// The hook: take, prepare, serve.
    fn hook_steps(&self) -> [&'static str; 3] {
        match self {
            OrderKind::DineIn => [
                "Taking customer's dine-in order.",
                "Preparing the dine-in order in the kitchen.",
                "Serving the dish to the customer's table.",
            ],
            OrderKind::TakeOut => [
                "Taking customer's take-out order.",
                "Preparing the take-out order in the kitchen.",
                "Wrapping the take-out order and giving it to the customer at the counter.",
            ],
        }
    }
}

impl FromStr for OrderKind {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dine-in" => Ok(OrderKind::DineIn),
            "take-out" => Ok(OrderKind::TakeOut),
            other => Err(LabError::UnknownOrderType(other.to_string())),
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every line `process_order` writes for `kind`, in order.
pub fn order_steps(kind: OrderKind) -> Vec<&'static str> {
    let mut steps = vec![GREETING];
    steps.extend(kind.hook_steps());
    steps
}

/// Greet, then run the kind's hook. The sequence itself never varies.
pub fn process_order<W: Write>(kind: OrderKind, out: &mut W) -> Result<()> {
    for step in order_steps(kind) {
        writeln!(out, "{step}")?;
    }
    Ok(())
}
