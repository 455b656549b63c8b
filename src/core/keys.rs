/// Keyboard commands the editor understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    ToggleFlicker,
    ToggleWireframe,
    ToggleHint,
}

/// Map a DOM `KeyboardEvent.key` value to a command, ignoring case.
#[inline]
pub fn command_for_key(key: &str) -> Option<KeyCommand> {
    match key {
        "f" | "F" => Some(KeyCommand::ToggleFlicker),
        "w" | "W" => Some(KeyCommand::ToggleWireframe),
        "h" | "H" => Some(KeyCommand::ToggleHint),
        _ => None,
    }
}
