use std::rc::Rc;

use colored::Colorize;
use design_patterns_lab::records::{RecordCommand, RecordStore};
use design_patterns_lab::{Client, CommandQueue};

fn main() {
    println!("{}", "=== Invoker / Client (Command pattern) ===".bold());

    let db = Rc::new(RecordStore::new());
    let mut invoker = CommandQueue::new();
    let mut client = Client::new(&mut invoker);

    client.add_command(RecordCommand::insert(&db));
    client.add_command(RecordCommand::update(&db));
    client.add_command(RecordCommand::delete(&db));

    client
        .execute_commands()
        .unwrap_or_else(|never| match never {});
}
