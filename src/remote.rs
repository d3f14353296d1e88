//! Command pattern with one command slot per remote-control button.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use crate::command::Command;

#[derive(Debug, Default)]
pub struct Light {
    on: Cell<bool>,
}

impl Light {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turn_on(&self) {
        println!("Turning on light");
        self.on.set(true);
    }

    pub fn turn_off(&self) {
        println!("Turning off light");
        self.on.set(false);
    }

    pub fn is_on(&self) -> bool {
        self.on.get()
    }
}

#[derive(Debug, Default)]
pub struct Fan {
    running: Cell<bool>,
}

impl Fan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        println!("Starting a fan");
        self.running.set(true);
    }

    pub fn stop(&self) {
        println!("Stopping a fan");
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// The four buttons on the remote, one per command kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    LightOn,
    LightOff,
    FanStart,
    FanStop,
}

#[derive(Debug, Clone)]
pub enum DeviceCommand {
    LightOn(Rc<Light>),
    LightOff(Rc<Light>),
    FanStart(Rc<Fan>),
    FanStop(Rc<Fan>),
}

impl DeviceCommand {
    /// The button this command belongs on.
    pub fn button(&self) -> Button {
        match self {
            DeviceCommand::LightOn(_) => Button::LightOn,
            DeviceCommand::LightOff(_) => Button::LightOff,
            DeviceCommand::FanStart(_) => Button::FanStart,
            DeviceCommand::FanStop(_) => Button::FanStop,
        }
    }
}

impl Command for DeviceCommand {
    type Output = ();
    type Error = Infallible;

    fn execute(&self) -> Result<(), Infallible> {
        match self {
            DeviceCommand::LightOn(light) => light.turn_on(),
            DeviceCommand::LightOff(light) => light.turn_off(),
            DeviceCommand::FanStart(fan) => fan.start(),
            DeviceCommand::FanStop(fan) => fan.stop(),
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{:?}", self.button())
    }
}

#[derive(Debug, Default)]
pub struct RemoteControl {
    light_on: Option<DeviceCommand>,
    light_off: Option<DeviceCommand>,
    fan_start: Option<DeviceCommand>,
    fan_stop: Option<DeviceCommand>,
}

impl RemoteControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `command` in the slot for its button, replacing what was there.
    pub fn set_command(&mut self, command: DeviceCommand) {
        let slot = self.slot_mut(command.button());
        *slot = Some(command);
    }

    pub fn is_assigned(&self, button: Button) -> bool {
        self.slot(button).is_some()
    }

    /// Fire the command on `button`. Unassigned buttons do nothing.
    /// Returns whether a command ran.
    pub fn press(&self, button: Button) -> bool {
        match self.slot(button) {
            Some(command) => {
                command.execute().unwrap_or_else(|never| match never {});
                true
            }
            None => false,
        }
    }

    pub fn light_on_pressed(&self) -> bool {
        self.press(Button::LightOn)
    }

    pub fn light_off_pressed(&self) -> bool {
        self.press(Button::LightOff)
    }

    pub fn fan_start_pressed(&self) -> bool {
        self.press(Button::FanStart)
    }

    pub fn fan_stop_pressed(&self) -> bool {
        self.press(Button::FanStop)
    }

    fn slot(&self, button: Button) -> &Option<DeviceCommand> {
        match button {
            Button::LightOn => &self.light_on,
            Button::LightOff => &self.light_off,
            Button::FanStart => &self.fan_start,
            Button::FanStop => &self.fan_stop,
        }
    }

    fn slot_mut(&mut self, button: Button) -> &mut Option<DeviceCommand> {
        match button {
            Button::LightOn => &mut self.light_on,
            Button::LightOff => &mut self.light_off,
            Button::FanStart => &mut self.fan_start,
            Button::FanStop => &mut self.fan_stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_land_in_matching_slots() {
        let light = Rc::new(Light::new());
        let fan = Rc::new(Fan::new());
        let mut remote = RemoteControl::new();

        remote.set_command(DeviceCommand::LightOn(Rc::clone(&light)));
        remote.set_command(DeviceCommand::FanStop(Rc::clone(&fan)));

        assert!(remote.is_assigned(Button::LightOn));
        assert!(remote.is_assigned(Button::FanStop));
        assert!(!remote.is_assigned(Button::LightOff));
        assert!(!remote.is_assigned(Button::FanStart));
    }

    #[test]
    fn test_buttons_drive_devices() {
        let light = Rc::new(Light::new());
        let fan = Rc::new(Fan::new());
        let mut remote = RemoteControl::new();
        remote.set_command(DeviceCommand::LightOn(Rc::clone(&light)));
        remote.set_command(DeviceCommand::LightOff(Rc::clone(&light)));
        remote.set_command(DeviceCommand::FanStart(Rc::clone(&fan)));
        remote.set_command(DeviceCommand::FanStop(Rc::clone(&fan)));

        assert!(remote.light_on_pressed());
        assert!(light.is_on());
        assert!(remote.fan_start_pressed());
        assert!(fan.is_running());

        remote.light_off_pressed();
        remote.fan_stop_pressed();
        assert!(!light.is_on());
        assert!(!fan.is_running());
    }

    #[test]
    fn test_unassigned_button_does_nothing() {
        let remote = RemoteControl::new();
        assert!(!remote.press(Button::FanStart));
    }

    #[test]
    fn test_set_command_replaces_previous() {
        let first = Rc::new(Light::new());
        let second = Rc::new(Light::new());
        let mut remote = RemoteControl::new();

        remote.set_command(DeviceCommand::LightOn(Rc::clone(&first)));
        remote.set_command(DeviceCommand::LightOn(Rc::clone(&second)));
        remote.light_on_pressed();

        assert!(!first.is_on());
        assert!(second.is_on());
    }
}
