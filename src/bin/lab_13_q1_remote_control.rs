use std::rc::Rc;

use colored::Colorize;
use design_patterns_lab::remote::{DeviceCommand, Fan, Light, RemoteControl};

fn main() {
    println!("{}", "=== Remote Control (Command pattern) ===".bold());

    let light = Rc::new(Light::new());
    let fan = Rc::new(Fan::new());
    let mut control = RemoteControl::new();

    control.set_command(DeviceCommand::LightOn(Rc::clone(&light)));
    control.set_command(DeviceCommand::LightOff(Rc::clone(&light)));
    control.set_command(DeviceCommand::FanStart(Rc::clone(&fan)));
    control.set_command(DeviceCommand::FanStop(Rc::clone(&fan)));

    control.light_on_pressed();
    control.light_off_pressed();
    control.fan_start_pressed();
    control.fan_stop_pressed();
}
